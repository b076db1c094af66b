use kson::Kson;
use std::collections::{BTreeMap, HashMap};

///
/// User
///

#[derive(Clone, Debug, Kson, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub tags: Vec<String>,
    pub scores: HashMap<String, i32>,
    pub flags: BTreeMap<String, bool>,
    pub address: Address,
    pub previous: Vec<Address>,
}

///
/// Address
///

#[derive(Clone, Debug, Default, Kson, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use proptest::prelude::*;

    fn user() -> User {
        User {
            id: 42,
            name: "Ada".into(),
            email: Some("ada@example.com".into()),
            tags: vec!["admin".into(), "ops".into()],
            scores: HashMap::from([("chess".into(), 1800)]),
            flags: BTreeMap::from([("beta".into(), true), ("dark".into(), false)]),
            address: Address {
                street: "1 Loop".into(),
                city: "Paris".into(),
                zip: Some(75001),
            },
            previous: vec![Address::default()],
        }
    }

    #[test]
    fn write_then_read_is_identity() {
        let kson = registry();
        let user = user();

        let json = kson.to_json(Some(&user)).unwrap();
        let back = kson.from_json::<User>(&json).unwrap();

        assert_eq!(back, Some(user));
    }

    #[test]
    fn fields_are_written_in_declaration_order() {
        let json = registry().to_json(Some(&user())).unwrap();

        assert_eq!(
            json,
            concat!(
                r#"{"id":42,"name":"Ada","email":"ada@example.com","tags":["admin","ops"],"#,
                r#""scores":{"chess":1800},"flags":{"beta":true,"dark":false},"#,
                r#""address":{"street":"1 Loop","city":"Paris","zip":75001},"#,
                r#""previous":[{"street":"","city":"","zip":null}]}"#
            )
        );
    }

    #[test]
    fn read_then_write_keeps_the_document() {
        let kson = registry();
        let json = r#"{"street":"Main","city":"Oslo","zip":1234}"#;

        let address = kson.from_json::<Address>(json).unwrap();

        assert_eq!(kson.to_json(address.as_ref()).unwrap(), json);
    }

    #[test]
    fn absent_values_are_null() {
        let kson = registry();

        assert_eq!(kson.to_json::<User>(None).unwrap(), "null");
        assert_eq!(kson.from_json::<User>("null").unwrap(), None);
    }

    proptest! {
        #[test]
        fn addresses_round_trip(
            street in ".*",
            city in "[a-zA-Z ]{0,12}",
            zip in proptest::option::of(any::<u32>()),
        ) {
            let kson = registry();
            let address = Address { street, city, zip };

            let json = kson.to_json(Some(&address)).unwrap();

            prop_assert_eq!(kson.from_json::<Address>(&json).unwrap(), Some(address));
        }
    }
}
