//! Records whose adapters all live in one generated file, mirrored under `kson_generated`.
//!
//! Generated adapters sit outside the record modules, so record modules and fields are
//! `pub(crate)` at least.

pub(crate) mod catalog;
pub(crate) mod common;

kson::include_adapters!();

use kson::Kson;

/// Registry backed by the aggregate factory.
#[must_use]
pub fn registry() -> Kson {
    Kson::builder()
        .register_factory(kson_generated::KsonTypeAdapterFactory)
        .build()
}

///
/// Orphan
/// Crate-root records get no adapter.
///

#[derive(Debug, Kson)]
pub struct Orphan {
    pub id: i32,
}
