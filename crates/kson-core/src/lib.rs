//! Runtime for Kson type adapters: token streams, type tokens, the adapter registry, and the
//! dispatch tables that generated factories are built on.

pub mod adapter;
mod builtin;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod stream;
pub mod token;

pub use adapter::{ErasedAdapter, KsonRecord, KsonType, LazyAdapter, TypeAdapter};
pub use dispatch::{DispatchEntry, DispatchTable};
pub use error::{KsonError, KsonErrorKind};
pub use registry::{Kson, KsonBuilder, TypeAdapterFactory, WeakKson};
pub use stream::{JsonRead, JsonWrite, StreamReader, StreamWriter, ValueKind};
pub use token::TypeToken;

///
/// Prelude
///
/// Registry entry points and the traits generated code is written against.
///

pub mod prelude {
    pub use crate::{
        adapter::{KsonRecord, KsonType, TypeAdapter},
        registry::{Kson, TypeAdapterFactory},
        token::TypeToken,
    };
}
