use crate::{
    adapter::{ErasedAdapter, KsonType, TypeAdapter},
    error::KsonError,
    stream::{StreamReader, StreamWriter},
    token::TypeToken,
};
use std::{
    any::{TypeId, type_name},
    collections::HashMap,
    io::{Read, Write},
    sync::{Arc, RwLock, Weak},
};

///
/// TypeAdapterFactory
///
/// Answers adapter requests for the types it knows about. Unknown types yield `None` so the
/// registry can fall through to the next factory.
///

pub trait TypeAdapterFactory: Send + Sync {
    fn create(&self, kson: &Kson, token: &TypeToken) -> Option<ErasedAdapter>;
}

///
/// KsonBuilder
///

#[derive(Default)]
pub struct KsonBuilder {
    factories: Vec<Arc<dyn TypeAdapterFactory>>,
}

impl KsonBuilder {
    /// Register a factory; factories are consulted in registration order.
    #[must_use]
    pub fn register_factory<F>(mut self, factory: F) -> Self
    where
        F: TypeAdapterFactory + 'static,
    {
        self.factories.push(Arc::new(factory));
        self
    }

    #[must_use]
    pub fn build(self) -> Kson {
        Kson {
            inner: Arc::new(Inner {
                factories: self.factories,
                cache: RwLock::new(HashMap::new()),
            }),
        }
    }
}

///
/// Kson
///
/// Adapter registry. Cloning is cheap and every clone shares one adapter cache.
///

#[derive(Clone)]
pub struct Kson {
    inner: Arc<Inner>,
}

struct Inner {
    factories: Vec<Arc<dyn TypeAdapterFactory>>,
    cache: RwLock<HashMap<TypeId, ErasedAdapter>>,
}

impl Kson {
    /// Registry with builtin adapters only.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> KsonBuilder {
        KsonBuilder::default()
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakKson {
        WeakKson(Arc::downgrade(&self.inner))
    }

    /// Resolve the adapter for `T` by exact type.
    pub fn adapter<T: KsonType>(&self) -> Result<Arc<dyn TypeAdapter<T>>, KsonError> {
        self.adapter_for::<T>(&T::type_token())
    }

    /// Resolve the adapter for `T` through an explicit token describing `T`.
    ///
    /// Lookup order: cache, registered factories, the type's builtin adapter.
    pub fn adapter_for<T: KsonType>(
        &self,
        token: &TypeToken,
    ) -> Result<Arc<dyn TypeAdapter<T>>, KsonError> {
        if !token.describes::<T>() {
            return Err(KsonError::TokenMismatch {
                token: token.to_string(),
                requested: type_name::<T>(),
            });
        }

        if let Some(adapter) = self.cached::<T>(token) {
            return Ok(adapter);
        }

        for factory in &self.inner.factories {
            let Some(erased) = factory.create(self, token) else {
                continue;
            };

            let Some(adapter) = erased.downcast::<T>() else {
                return Err(KsonError::IncompatibleAdapter {
                    requested: token.to_string(),
                    provided: erased.token().to_string(),
                });
            };

            tracing::trace!(token = %token, "type adapter resolved by factory");
            return Ok(self.store(token, erased, adapter));
        }

        let Some(adapter) = T::builtin_adapter(self) else {
            return Err(KsonError::NoAdapter(token.to_string()));
        };

        tracing::trace!(token = %token, "builtin type adapter resolved");
        let erased = ErasedAdapter::new::<T>(Arc::clone(&adapter));

        Ok(self.store(token, erased, adapter))
    }

    /// Parse one JSON document into `T`; `null` yields `None`.
    pub fn from_json<T: KsonType>(&self, json: &str) -> Result<Option<T>, KsonError> {
        self.read_from(json.as_bytes())
    }

    pub fn read_from<T: KsonType, R: Read>(&self, reader: R) -> Result<Option<T>, KsonError> {
        let adapter = self.adapter::<T>()?;
        let mut reader = StreamReader::new(reader);
        let value = adapter.read(&mut reader)?;
        reader.finish()?;

        Ok(value)
    }

    pub fn to_json<T: KsonType>(&self, value: Option<&T>) -> Result<String, KsonError> {
        let mut out = Vec::new();
        self.write_to(&mut out, value)?;

        Ok(String::from_utf8(out)?)
    }

    pub fn write_to<T: KsonType, W: Write>(
        &self,
        writer: W,
        value: Option<&T>,
    ) -> Result<(), KsonError> {
        let adapter = self.adapter::<T>()?;
        let mut writer = StreamWriter::new(writer);
        adapter.write(&mut writer, value)?;

        writer.finish()
    }

    fn cached<T: KsonType>(&self, token: &TypeToken) -> Option<Arc<dyn TypeAdapter<T>>> {
        let cache = self
            .inner
            .cache
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        cache.get(&token.type_id())?.downcast::<T>()
    }

    // store
    // first writer wins so every caller shares one adapter instance
    fn store<T: KsonType>(
        &self,
        token: &TypeToken,
        erased: ErasedAdapter,
        adapter: Arc<dyn TypeAdapter<T>>,
    ) -> Arc<dyn TypeAdapter<T>> {
        let mut cache = self
            .inner
            .cache
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        cache
            .entry(token.type_id())
            .or_insert(erased)
            .downcast::<T>()
            .unwrap_or(adapter)
    }
}

impl Default for Kson {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Kson {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kson")
            .field("factories", &self.inner.factories.len())
            .finish_non_exhaustive()
    }
}

///
/// WeakKson
///

#[derive(Clone, Debug)]
pub struct WeakKson(Weak<Inner>);

impl WeakKson {
    pub fn upgrade(&self) -> Result<Kson, KsonError> {
        self.0
            .upgrade()
            .map(|inner| Kson { inner })
            .ok_or(KsonError::RegistryDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapter::LazyAdapter,
        error::KsonErrorKind,
        stream::{JsonRead, JsonWrite},
    };

    ///
    /// Upper
    ///
    /// Overrides the builtin `String` adapter.
    ///

    struct Upper;

    impl TypeAdapter<String> for Upper {
        fn write(
            &self,
            writer: &mut dyn JsonWrite,
            value: Option<&String>,
        ) -> Result<(), KsonError> {
            match value {
                Some(value) => writer.string_value(&value.to_uppercase()),
                None => writer.null_value(),
            }
        }

        fn read(&self, reader: &mut dyn JsonRead) -> Result<Option<String>, KsonError> {
            reader.next_string().map(|value| Some(value.to_uppercase()))
        }
    }

    struct UpperFactory;

    impl TypeAdapterFactory for UpperFactory {
        fn create(&self, _kson: &Kson, token: &TypeToken) -> Option<ErasedAdapter> {
            token
                .describes::<String>()
                .then(|| ErasedAdapter::new::<String>(Arc::new(Upper)))
        }
    }

    struct Mislabelled;

    impl TypeAdapterFactory for Mislabelled {
        fn create(&self, _kson: &Kson, _token: &TypeToken) -> Option<ErasedAdapter> {
            Some(ErasedAdapter::new::<String>(Arc::new(Upper)))
        }
    }

    #[test]
    fn factories_take_precedence_over_builtins() {
        let kson = Kson::builder().register_factory(UpperFactory).build();

        assert_eq!(kson.to_json(Some(&"abc".to_string())).unwrap(), r#""ABC""#);
        assert_eq!(kson.from_json::<Vec<String>>(r#"["x"]"#).unwrap(), Some(vec!["X".to_string()]));
        assert_eq!(kson.to_json(Some(&5_u8)).unwrap(), "5");
    }

    #[test]
    fn first_registered_factory_wins() {
        let kson = Kson::builder()
            .register_factory(Mislabelled)
            .register_factory(UpperFactory)
            .build();

        let err = kson.adapter::<i32>().err().unwrap();

        assert_eq!(err.kind(), KsonErrorKind::IncompatibleAdapter);
        assert!(kson.adapter::<String>().is_ok());
    }

    #[test]
    fn tokens_must_describe_the_requested_type() {
        let kson = Kson::new();

        let err = kson.adapter_for::<i32>(&TypeToken::of::<i64>()).err().unwrap();

        assert_eq!(err.kind(), KsonErrorKind::TokenMismatch);
    }

    #[test]
    fn lazy_slots_resolve_once() {
        let kson = Kson::new();
        let slot = LazyAdapter::<Vec<i64>>::new(&kson);

        assert!(!slot.is_resolved());
        let first = Arc::clone(slot.get().unwrap());
        assert!(slot.is_resolved());
        assert!(Arc::ptr_eq(&first, slot.get().unwrap()));
    }

    #[test]
    fn lazy_slots_outliving_the_registry_fail() {
        let slot = LazyAdapter::<bool>::new(&Kson::new());

        let err = slot.get().err().unwrap();

        assert_eq!(err.kind(), KsonErrorKind::RegistryDropped);
    }

    #[test]
    fn clones_share_one_cache() {
        let kson = Kson::new();
        let clone = kson.clone();

        let first = kson.adapter::<String>().unwrap();
        let second = clone.adapter::<String>().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn trailing_content_is_rejected() {
        let kson = Kson::new();

        let err = kson.from_json::<i32>("1 2").unwrap_err();

        assert_eq!(err.kind(), KsonErrorKind::Read);
    }
}
