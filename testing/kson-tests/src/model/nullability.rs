use kson::Kson;

///
/// Strict
///

#[derive(Debug, Kson, PartialEq)]
pub struct Strict {
    pub id: i32,
    pub name: String,
}

///
/// Nullable
///

#[derive(Debug, Kson, PartialEq)]
pub struct Nullable {
    pub id: Option<i32>,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use kson::{KsonError, KsonErrorKind};

    #[test]
    fn null_into_required_field_fails_on_that_field() {
        let err = registry()
            .from_json::<Strict>(r#"{"id":1,"name":null}"#)
            .unwrap_err();

        assert!(matches!(
            err,
            KsonError::MissingField {
                record: "Strict",
                field: "name"
            }
        ));
    }

    #[test]
    fn missing_required_field_fails() {
        let err = registry().from_json::<Strict>(r#"{"name":"x"}"#).unwrap_err();

        assert_eq!(err.kind(), KsonErrorKind::MissingField);
        assert_eq!(err.to_string(), "required field 'id' of 'Strict' is missing");
    }

    #[test]
    fn null_into_nullable_field_is_none() {
        let value = registry()
            .from_json::<Nullable>(r#"{"id":1,"name":null}"#)
            .unwrap();

        assert_eq!(
            value,
            Some(Nullable {
                id: Some(1),
                name: None
            })
        );
    }

    #[test]
    fn none_fields_are_written_as_null() {
        let json = registry()
            .to_json(Some(&Nullable {
                id: None,
                name: Some("n".into()),
            }))
            .unwrap();

        assert_eq!(json, r#"{"id":null,"name":"n"}"#);
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let value = registry()
            .from_json::<Strict>(r#"{"id":1,"name":"x","extra":true,"nested":{"a":[1,2]}}"#)
            .unwrap();

        assert_eq!(
            value,
            Some(Strict {
                id: 1,
                name: "x".into()
            })
        );
    }

    #[test]
    fn wrong_value_types_are_errors() {
        let err = registry()
            .from_json::<Strict>(r#"{"id":"one","name":"x"}"#)
            .unwrap_err();

        assert_eq!(err.kind(), KsonErrorKind::Read);
    }
}
