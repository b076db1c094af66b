//! Records exercising adapters generated next to their types, served by the factory of the
//! designated `TypeAdapterProvider`.

pub mod model;

use kson::{Kson, KsonFactory};

///
/// TypeAdapterProvider
///

#[derive(KsonFactory)]
pub struct TypeAdapterProvider;

///
/// Unlisted
/// Declared at the crate root, so no factory serves it.
///

#[derive(Debug, Kson, PartialEq)]
pub struct Unlisted {
    pub id: i32,
}

/// Registry serving every record of the crate.
#[must_use]
pub fn registry() -> Kson {
    Kson::builder()
        .register_factory(TypeAdapterProvider::get())
        .build()
}
