use crate::{
    adapter::{KsonType, LazyAdapter, TypeAdapter},
    error::KsonError,
    registry::Kson,
    stream::{JsonRead, JsonWrite, ValueKind},
    token::TypeToken,
};
use std::{
    any::type_name,
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

// read_element
// collections reject null elements, Option<T> elements opt in
fn read_element<T: KsonType>(
    element: &LazyAdapter<T>,
    reader: &mut dyn JsonRead,
) -> Result<T, KsonError> {
    element
        .get()?
        .read(reader)?
        .ok_or_else(|| KsonError::unexpected_null(type_name::<T>()))
}

// consume_null
fn consume_null(reader: &mut dyn JsonRead) -> Result<bool, KsonError> {
    if reader.peek()? == ValueKind::Null {
        reader.next_null()?;
        return Ok(true);
    }

    Ok(false)
}

///
/// VecAdapter
///

struct VecAdapter<T: KsonType> {
    element: LazyAdapter<T>,
}

impl<T: KsonType> TypeAdapter<Vec<T>> for VecAdapter<T> {
    fn write(&self, writer: &mut dyn JsonWrite, value: Option<&Vec<T>>) -> Result<(), KsonError> {
        let Some(items) = value else {
            return writer.null_value();
        };

        let adapter = self.element.get()?;
        writer.begin_array()?;
        for item in items {
            adapter.write(writer, Some(item))?;
        }
        writer.end_array()
    }

    fn read(&self, reader: &mut dyn JsonRead) -> Result<Option<Vec<T>>, KsonError> {
        if consume_null(reader)? {
            return Ok(None);
        }

        let mut items = Vec::new();
        reader.begin_array()?;
        while reader.has_next()? {
            items.push(read_element(&self.element, reader)?);
        }
        reader.end_array()?;

        Ok(Some(items))
    }
}

impl<T: KsonType> KsonType for Vec<T> {
    fn type_token() -> TypeToken {
        TypeToken::parameterized::<Self>("Vec", vec![T::type_token()])
    }

    fn builtin_adapter(kson: &Kson) -> Option<Arc<dyn TypeAdapter<Self>>> {
        Some(Arc::new(VecAdapter {
            element: LazyAdapter::<T>::new(kson),
        }))
    }
}

///
/// MapAdapter
///
/// String-keyed maps, written as JSON objects.
///

trait StringMap<V: 'static>: Default + Send + Sync + 'static {
    fn insert_entry(&mut self, key: String, value: V);

    fn entries(&self) -> impl Iterator<Item = (&String, &V)>;
}

impl<V: Send + Sync + 'static> StringMap<V> for HashMap<String, V> {
    fn insert_entry(&mut self, key: String, value: V) {
        self.insert(key, value);
    }

    fn entries(&self) -> impl Iterator<Item = (&String, &V)> {
        self.iter()
    }
}

impl<V: Send + Sync + 'static> StringMap<V> for BTreeMap<String, V> {
    fn insert_entry(&mut self, key: String, value: V) {
        self.insert(key, value);
    }

    fn entries(&self) -> impl Iterator<Item = (&String, &V)> {
        self.iter()
    }
}

struct MapAdapter<V: KsonType> {
    value: LazyAdapter<V>,
}

impl<V: KsonType, M: StringMap<V>> TypeAdapter<M> for MapAdapter<V> {
    fn write(&self, writer: &mut dyn JsonWrite, value: Option<&M>) -> Result<(), KsonError> {
        let Some(map) = value else {
            return writer.null_value();
        };

        let adapter = self.value.get()?;
        writer.begin_object()?;
        for (key, value) in map.entries() {
            writer.name(key)?;
            adapter.write(writer, Some(value))?;
        }
        writer.end_object()
    }

    fn read(&self, reader: &mut dyn JsonRead) -> Result<Option<M>, KsonError> {
        if consume_null(reader)? {
            return Ok(None);
        }

        let mut map = M::default();
        reader.begin_object()?;
        while reader.has_next()? {
            let key = reader.next_name()?;
            map.insert_entry(key, read_element(&self.value, reader)?);
        }
        reader.end_object()?;

        Ok(Some(map))
    }
}

impl<V: KsonType> KsonType for HashMap<String, V> {
    fn type_token() -> TypeToken {
        TypeToken::parameterized::<Self>("HashMap", vec![String::type_token(), V::type_token()])
    }

    fn builtin_adapter(kson: &Kson) -> Option<Arc<dyn TypeAdapter<Self>>> {
        Some(Arc::new(MapAdapter {
            value: LazyAdapter::<V>::new(kson),
        }))
    }
}

impl<V: KsonType> KsonType for BTreeMap<String, V> {
    fn type_token() -> TypeToken {
        TypeToken::parameterized::<Self>("BTreeMap", vec![String::type_token(), V::type_token()])
    }

    fn builtin_adapter(kson: &Kson) -> Option<Arc<dyn TypeAdapter<Self>>> {
        Some(Arc::new(MapAdapter {
            value: LazyAdapter::<V>::new(kson),
        }))
    }
}

///
/// OptionAdapter
///
/// Nested nullability: `null` reads as a present `None`.
///

struct OptionAdapter<T: KsonType> {
    inner: LazyAdapter<T>,
}

impl<T: KsonType> TypeAdapter<Option<T>> for OptionAdapter<T> {
    fn write(
        &self,
        writer: &mut dyn JsonWrite,
        value: Option<&Option<T>>,
    ) -> Result<(), KsonError> {
        match value {
            Some(Some(value)) => self.inner.get()?.write(writer, Some(value)),
            _ => writer.null_value(),
        }
    }

    fn read(&self, reader: &mut dyn JsonRead) -> Result<Option<Option<T>>, KsonError> {
        if consume_null(reader)? {
            return Ok(Some(None));
        }

        self.inner.get()?.read(reader).map(Some)
    }
}

impl<T: KsonType> KsonType for Option<T> {
    fn type_token() -> TypeToken {
        TypeToken::parameterized::<Self>("Option", vec![T::type_token()])
    }

    fn builtin_adapter(kson: &Kson) -> Option<Arc<dyn TypeAdapter<Self>>> {
        Some(Arc::new(OptionAdapter {
            inner: LazyAdapter::<T>::new(kson),
        }))
    }
}

///
/// BoxAdapter
///

struct BoxAdapter<T: KsonType> {
    inner: LazyAdapter<T>,
}

impl<T: KsonType> TypeAdapter<Box<T>> for BoxAdapter<T> {
    fn write(&self, writer: &mut dyn JsonWrite, value: Option<&Box<T>>) -> Result<(), KsonError> {
        self.inner.get()?.write(writer, value.map(|boxed| &**boxed))
    }

    fn read(&self, reader: &mut dyn JsonRead) -> Result<Option<Box<T>>, KsonError> {
        Ok(self.inner.get()?.read(reader)?.map(Box::new))
    }
}

impl<T: KsonType> KsonType for Box<T> {
    fn type_token() -> TypeToken {
        TypeToken::parameterized::<Self>("Box", vec![T::type_token()])
    }

    fn builtin_adapter(kson: &Kson) -> Option<Arc<dyn TypeAdapter<Self>>> {
        Some(Arc::new(BoxAdapter {
            inner: LazyAdapter::<T>::new(kson),
        }))
    }
}
