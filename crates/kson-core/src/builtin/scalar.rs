use crate::{
    adapter::{KsonType, TypeAdapter},
    error::KsonError,
    registry::Kson,
    stream::{JsonRead, JsonWrite, ValueKind},
    token::TypeToken,
};
use std::{any::type_name, marker::PhantomData, str::FromStr, sync::Arc};

///
/// Number
///
/// Numeric primitive carried as JSON number text.
///

trait Number: FromStr + Copy + Send + Sync + 'static {
    fn write_to(self, writer: &mut dyn JsonWrite) -> Result<(), KsonError>;
}

macro_rules! impl_number {
    ($write:ident as $wide:ty => $($ty:ty),*) => {
        $(
            impl Number for $ty {
                fn write_to(self, writer: &mut dyn JsonWrite) -> Result<(), KsonError> {
                    writer.$write(<$wide>::from(self))
                }
            }

            impl KsonType for $ty {
                fn type_token() -> TypeToken {
                    TypeToken::of::<Self>()
                }

                fn builtin_adapter(_kson: &Kson) -> Option<Arc<dyn TypeAdapter<Self>>> {
                    Some(Arc::new(NumberAdapter::<Self>::default()))
                }
            }
        )*
    };
}

impl_number!(i64_value as i64 => i8, i16, i32, i64);
impl_number!(u64_value as u64 => u8, u16, u32, u64);
impl_number!(f32_value as f32 => f32);
impl_number!(f64_value as f64 => f64);

///
/// NumberAdapter
///

struct NumberAdapter<T>(PhantomData<fn() -> T>);

impl<T> Default for NumberAdapter<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T: Number> TypeAdapter<T> for NumberAdapter<T> {
    fn write(&self, writer: &mut dyn JsonWrite, value: Option<&T>) -> Result<(), KsonError> {
        match value {
            Some(value) => value.write_to(writer),
            None => writer.null_value(),
        }
    }

    fn read(&self, reader: &mut dyn JsonRead) -> Result<Option<T>, KsonError> {
        if reader.peek()? == ValueKind::Null {
            reader.next_null()?;
            return Ok(None);
        }

        let text = reader.next_number()?;
        match text.parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(KsonError::InvalidNumber {
                value: text,
                target: type_name::<T>(),
            }),
        }
    }
}

///
/// BoolAdapter
///

struct BoolAdapter;

impl TypeAdapter<bool> for BoolAdapter {
    fn write(&self, writer: &mut dyn JsonWrite, value: Option<&bool>) -> Result<(), KsonError> {
        match value {
            Some(value) => writer.bool_value(*value),
            None => writer.null_value(),
        }
    }

    fn read(&self, reader: &mut dyn JsonRead) -> Result<Option<bool>, KsonError> {
        if reader.peek()? == ValueKind::Null {
            reader.next_null()?;
            return Ok(None);
        }

        reader.next_bool().map(Some)
    }
}

impl KsonType for bool {
    fn type_token() -> TypeToken {
        TypeToken::of::<Self>()
    }

    fn builtin_adapter(_kson: &Kson) -> Option<Arc<dyn TypeAdapter<Self>>> {
        Some(Arc::new(BoolAdapter))
    }
}

///
/// StringAdapter
///

struct StringAdapter;

impl TypeAdapter<String> for StringAdapter {
    fn write(&self, writer: &mut dyn JsonWrite, value: Option<&String>) -> Result<(), KsonError> {
        match value {
            Some(value) => writer.string_value(value),
            None => writer.null_value(),
        }
    }

    fn read(&self, reader: &mut dyn JsonRead) -> Result<Option<String>, KsonError> {
        if reader.peek()? == ValueKind::Null {
            reader.next_null()?;
            return Ok(None);
        }

        reader.next_string().map(Some)
    }
}

impl KsonType for String {
    fn type_token() -> TypeToken {
        TypeToken::of::<Self>()
    }

    fn builtin_adapter(_kson: &Kson) -> Option<Arc<dyn TypeAdapter<Self>>> {
        Some(Arc::new(StringAdapter))
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::KsonErrorKind, registry::Kson};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_i64_round_trips(value in any::<i64>()) {
            let kson = Kson::new();
            let json = kson.to_json(Some(&value)).unwrap();

            prop_assert_eq!(kson.from_json::<i64>(&json).unwrap(), Some(value));
        }

        #[test]
        fn any_string_round_trips(value in any::<String>()) {
            let kson = Kson::new();
            let json = kson.to_json(Some(&value)).unwrap();

            prop_assert_eq!(kson.from_json::<String>(&json).unwrap(), Some(value));
        }
    }

    #[test]
    fn integers_round_trip_at_their_bounds() {
        let kson = Kson::new();

        assert_eq!(kson.to_json(Some(&i64::MIN)).unwrap(), i64::MIN.to_string());
        assert_eq!(kson.to_json(Some(&u64::MAX)).unwrap(), u64::MAX.to_string());
        assert_eq!(kson.from_json::<i8>("-128").unwrap(), Some(i8::MIN));
        assert_eq!(kson.from_json::<u64>(&u64::MAX.to_string()).unwrap(), Some(u64::MAX));
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        let kson = Kson::new();

        let err = kson.from_json::<u8>("256").unwrap_err();
        assert_eq!(err.kind(), KsonErrorKind::InvalidNumber);

        let err = kson.from_json::<i32>("1.5").unwrap_err();
        assert_eq!(err.kind(), KsonErrorKind::InvalidNumber);
    }

    #[test]
    fn floats_accept_exponents() {
        let kson = Kson::new();

        assert_eq!(kson.from_json::<f64>("-3.5e2").unwrap(), Some(-350.0));
        assert_eq!(kson.from_json::<f32>("0.25").unwrap(), Some(0.25));
    }

    #[test]
    fn f32_is_written_at_its_own_precision() {
        let kson = Kson::new();

        assert_eq!(kson.to_json(Some(&0.1_f32)).unwrap(), "0.1");
        assert_eq!(kson.from_json::<f32>("0.1").unwrap(), Some(0.1));
    }

    #[test]
    fn null_reads_as_absent() {
        let kson = Kson::new();

        assert_eq!(kson.from_json::<bool>("null").unwrap(), None);
        assert_eq!(kson.from_json::<String>(" null ").unwrap(), None);
        assert_eq!(kson.to_json::<String>(None).unwrap(), "null");
    }

    #[test]
    fn strings_are_escaped() {
        let kson = Kson::new();
        let text = "line\n\"quoted\"".to_string();

        let json = kson.to_json(Some(&text)).unwrap();

        assert_eq!(json, r#""line\n\"quoted\"""#);
        assert_eq!(kson.from_json::<String>(&json).unwrap(), Some(text));
    }

    #[test]
    fn type_mismatch_is_a_read_error() {
        let kson = Kson::new();

        let err = kson.from_json::<bool>(r#""yes""#).unwrap_err();

        assert_eq!(err.kind(), KsonErrorKind::Read);
    }
}
