use kson::Kson;

///
/// TreeNode
///

#[derive(Clone, Debug, Kson, PartialEq)]
pub struct TreeNode {
    pub name: String,
    pub children: Vec<Self>,
}

///
/// Person
///

#[derive(Clone, Debug, Kson, PartialEq)]
pub struct Person {
    pub name: String,
    pub pet: Option<Box<Pet>>,
}

///
/// Pet
///

#[derive(Clone, Debug, Kson, PartialEq)]
pub struct Pet {
    pub name: String,
    pub owner: Option<Box<Person>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    fn leaf(name: &str) -> TreeNode {
        TreeNode {
            name: name.into(),
            children: Vec::new(),
        }
    }

    #[test]
    fn self_referencing_records_round_trip() {
        let kson = registry();
        let tree = TreeNode {
            name: "root".into(),
            children: vec![
                leaf("a"),
                TreeNode {
                    name: "b".into(),
                    children: vec![leaf("c")],
                },
            ],
        };

        let json = kson.to_json(Some(&tree)).unwrap();

        assert_eq!(
            json,
            r#"{"name":"root","children":[{"name":"a","children":[]},{"name":"b","children":[{"name":"c","children":[]}]}]}"#
        );
        assert_eq!(kson.from_json::<TreeNode>(&json).unwrap(), Some(tree));
    }

    #[test]
    fn mutually_referencing_records_round_trip() {
        let kson = registry();
        let person = Person {
            name: "Ann".into(),
            pet: Some(Box::new(Pet {
                name: "Rex".into(),
                owner: Some(Box::new(Person {
                    name: "Bob".into(),
                    pet: None,
                })),
            })),
        };

        let json = kson.to_json(Some(&person)).unwrap();

        assert_eq!(
            json,
            r#"{"name":"Ann","pet":{"name":"Rex","owner":{"name":"Bob","pet":null}}}"#
        );
        assert_eq!(kson.from_json::<Person>(&json).unwrap(), Some(person));
    }

    #[test]
    fn adapters_are_shared_across_lookups() {
        let kson = registry();

        let first = kson.adapter::<Pet>().unwrap();
        let second = kson.adapter::<Pet>().unwrap();

        assert!(std::sync::Arc::ptr_eq(&first, &second));
    }
}
