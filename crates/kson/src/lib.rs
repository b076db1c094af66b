//! ## Crate layout
//! - runtime: registry, stream traits, type tokens and dispatch tables (from `kson-core`).
//! - macros: `#[derive(Kson)]` for records, `#[derive(KsonFactory)]` for the factory marker.
//!
//! Generated code refers to everything through `::kson`, so records only need this crate as a
//! dependency, plus `kson-build` as a build dependency.

pub use kson_core::*;
pub use kson_derive::{Kson, KsonFactory};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Includes the aggregate adapter file written by `kson-build`. Invoke once, at the crate root.
#[macro_export]
macro_rules! include_adapters {
    () => {
        include!(concat!(env!("OUT_DIR"), "/kson_adapters.rs"));
    };
}
