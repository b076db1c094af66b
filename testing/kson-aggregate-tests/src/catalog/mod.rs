pub(crate) mod detail;

use self::detail::Dimensions;
use super::common::Money;
use kson::Kson;
use std::collections::BTreeMap;

///
/// Product
///

#[derive(Clone, Debug, Kson, PartialEq)]
pub(crate) struct Product {
    pub(crate) sku: String,
    pub(crate) price: Money,
    pub(crate) dimensions: Option<Dimensions>,
    pub(crate) attributes: BTreeMap<String, String>,

    #[kson(alias = "label")]
    pub(crate) title: String,
}

///
/// Listing
///

#[derive(Clone, Debug, Default, Kson, PartialEq)]
#[kson(default)]
pub(crate) struct Listing {
    pub(crate) products: Vec<Product>,
    pub(crate) page: u32,
    pub(crate) next: Option<String>,
}

///
/// Parcel
///

#[derive(Clone, Debug, Kson, PartialEq)]
pub(crate) struct Parcel {
    pub(crate) size: detail::Dimensions,
    pub(crate) weight: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use kson::{KsonErrorKind, KsonType};

    fn product() -> Product {
        Product {
            sku: "A-1".into(),
            price: Money {
                amount: 1299,
                currency: "EUR".into(),
            },
            dimensions: Some(Dimensions {
                width: 1.5,
                height: 0.25,
            }),
            attributes: BTreeMap::from([("color".into(), "red".into())]),
            title: "Lamp".into(),
        }
    }

    #[test]
    fn nested_records_round_trip() {
        let kson = registry();
        let listing = Listing {
            products: vec![product()],
            page: 2,
            next: None,
        };

        let json = kson.to_json(Some(&listing)).unwrap();

        assert_eq!(
            json,
            concat!(
                r#"{"products":[{"sku":"A-1","price":{"amount":1299,"currency":"EUR"},"#,
                r#""dimensions":{"width":1.5,"height":0.25},"attributes":{"color":"red"},"#,
                r#""title":"Lamp"}],"page":2,"next":null}"#
            )
        );
        assert_eq!(kson.from_json::<Listing>(&json).unwrap(), Some(listing));
    }

    #[test]
    fn alias_is_accepted() {
        let json = r#"{"sku":"B","price":{"amount":1,"currency":"USD"},"attributes":{},"label":"Desk"}"#;

        let product = registry().from_json::<Product>(json).unwrap().unwrap();

        assert_eq!(product.title, "Desk");
        assert_eq!(product.dimensions, None);
    }

    #[test]
    fn default_provider_fills_missing_fields() {
        let listing = registry().from_json::<Listing>(r#"{"page":3}"#).unwrap();

        assert_eq!(
            listing,
            Some(Listing {
                page: 3,
                ..Listing::default()
            })
        );
    }

    #[test]
    fn nested_required_fields_are_enforced() {
        let json = r#"{"sku":"C","price":{"amount":1},"attributes":{},"title":"Chair"}"#;

        let err = registry().from_json::<Product>(json).unwrap_err();

        assert_eq!(err.kind(), KsonErrorKind::MissingField);
        assert!(err.to_string().contains("'currency' of 'Money'"));
    }

    #[test]
    fn derive_still_provides_the_type_token() {
        assert_eq!(Product::type_token().raw_name(), "Product");
    }

    #[test]
    fn child_module_paths_resolve_in_generated_code() {
        let kson = registry();
        let parcel = Parcel {
            size: detail::Dimensions {
                width: 2.5,
                height: 0.5,
            },
            weight: 3.25,
        };

        let json = kson.to_json(Some(&parcel)).unwrap();

        assert_eq!(json, r#"{"size":{"width":2.5,"height":0.5},"weight":3.25}"#);
        assert_eq!(kson.from_json::<Parcel>(&json).unwrap(), Some(parcel));
    }
}
