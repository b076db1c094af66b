//! Generation engine for kson adapters: the record model, the adapter-name resolver, adapter and
//! factory synthesis, source discovery and the driver that renders output files.
//!
//! Used by `kson-derive` at macro-expansion time and by `kson-build` from build scripts.

pub mod derive;
pub mod diagnostic;
pub mod discover;
pub mod driver;
pub mod error;
pub mod model;
pub mod naming;
pub mod scope;
pub mod synth;
pub mod validate;

pub use diagnostic::{Diagnostic, Level};
pub use driver::{GeneratedFile, Granularity, Options, Output, generate, run};
pub use error::CodegenError;
