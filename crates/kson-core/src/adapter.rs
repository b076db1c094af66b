use crate::{
    error::KsonError,
    registry::{Kson, WeakKson},
    stream::{JsonRead, JsonWrite},
    token::TypeToken,
};
use std::{
    any::{Any, type_name},
    sync::{Arc, OnceLock},
};

///
/// TypeAdapter
///
/// Streaming codec for one type. `None` stands for the JSON `null` token on both sides.
///

pub trait TypeAdapter<T>: Send + Sync {
    /// Write exactly one value (`null` or a complete value) to the stream.
    fn write(&self, writer: &mut dyn JsonWrite, value: Option<&T>) -> Result<(), KsonError>;

    /// Read exactly one value from the stream.
    fn read(&self, reader: &mut dyn JsonRead) -> Result<Option<T>, KsonError>;
}

///
/// KsonType
///
/// Anything the registry can hand out an adapter for.
///

pub trait KsonType: Sized + Send + Sync + 'static {
    fn type_token() -> TypeToken;

    /// Adapter used when no registered factory claims the type.
    fn builtin_adapter(_kson: &Kson) -> Option<Arc<dyn TypeAdapter<Self>>> {
        None
    }
}

///
/// KsonRecord
///
/// Implemented by generated code for every record type.
///

pub trait KsonRecord: KsonType {
    type Adapter: TypeAdapter<Self> + 'static;

    fn adapter(kson: &Kson) -> Self::Adapter;
}

///
/// ErasedAdapter
///
/// Type-erased `Arc<dyn TypeAdapter<T>>` tagged with the token of the type it serves.
///

#[derive(Clone)]
pub struct ErasedAdapter {
    token: TypeToken,
    adapter: Arc<dyn Any + Send + Sync>,
}

impl ErasedAdapter {
    #[must_use]
    pub fn new<T: KsonType>(adapter: Arc<dyn TypeAdapter<T>>) -> Self {
        Self {
            token: T::type_token(),
            adapter: Arc::new(adapter),
        }
    }

    /// Build and erase the generated adapter of a record.
    #[must_use]
    pub fn record<T: KsonRecord>(kson: &Kson) -> Self {
        Self::new::<T>(Arc::new(T::adapter(kson)))
    }

    /// Token of the type this adapter serves.
    #[must_use]
    pub const fn token(&self) -> &TypeToken {
        &self.token
    }

    #[must_use]
    pub fn downcast<T: KsonType>(&self) -> Option<Arc<dyn TypeAdapter<T>>> {
        self.adapter
            .downcast_ref::<Arc<dyn TypeAdapter<T>>>()
            .cloned()
    }
}

impl std::fmt::Debug for ErasedAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErasedAdapter")
            .field("token", &self.token.to_string())
            .finish_non_exhaustive()
    }
}

///
/// LazyAdapter
///
/// Sub-adapter slot resolved against the registry on first use and memoized afterwards.
/// Holding only a weak registry handle keeps cached adapters from owning their registry.
///

pub struct LazyAdapter<T: KsonType> {
    kson: WeakKson,
    token: TypeToken,
    slot: OnceLock<Arc<dyn TypeAdapter<T>>>,
}

impl<T: KsonType> LazyAdapter<T> {
    /// Slot resolved by exact type.
    #[must_use]
    pub fn new(kson: &Kson) -> Self {
        Self::with_token(kson, T::type_token())
    }

    /// Slot resolved through an explicitly constructed token.
    #[must_use]
    pub fn with_token(kson: &Kson, token: TypeToken) -> Self {
        Self {
            kson: kson.downgrade(),
            token,
            slot: OnceLock::new(),
        }
    }

    #[must_use]
    pub const fn token(&self) -> &TypeToken {
        &self.token
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn get(&self) -> Result<&Arc<dyn TypeAdapter<T>>, KsonError> {
        if let Some(adapter) = self.slot.get() {
            return Ok(adapter);
        }

        let adapter = self.kson.upgrade()?.adapter_for::<T>(&self.token)?;

        Ok(self.slot.get_or_init(|| adapter))
    }
}

impl<T: KsonType> std::fmt::Debug for LazyAdapter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyAdapter")
            .field("type", &type_name::<T>())
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}
