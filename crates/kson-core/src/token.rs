use std::{
    any::{TypeId, type_name},
    fmt,
    hash::{Hash, Hasher},
};

///
/// TypeToken
///
/// Runtime description of a possibly parameterized type.
///
/// Identity is the concrete `TypeId`; the raw name and arguments mirror the declared shape and
/// the supertype list drives assignability checks in dispatch tables.
///

#[derive(Clone, Debug)]
pub struct TypeToken {
    id: TypeId,
    raw: &'static str,
    args: Vec<Self>,
    supertypes: Vec<TypeId>,
}

impl TypeToken {
    /// Token for a non-parameterized type, named after its last path segment.
    #[must_use]
    pub fn of<T: 'static + ?Sized>() -> Self {
        Self::named::<T>(simple_name(type_name::<T>()))
    }

    #[must_use]
    pub fn named<T: 'static + ?Sized>(raw: &'static str) -> Self {
        Self {
            id: TypeId::of::<T>(),
            raw,
            args: Vec::new(),
            supertypes: Vec::new(),
        }
    }

    /// Token for `Raw<args...>`; `T` must be the fully applied type.
    #[must_use]
    pub fn parameterized<T: 'static + ?Sized>(raw: &'static str, args: Vec<Self>) -> Self {
        Self {
            args,
            ..Self::named::<T>(raw)
        }
    }

    /// Declare `parent` (and everything it extends) as a supertype.
    #[must_use]
    pub fn extends(mut self, parent: Self) -> Self {
        for id in std::iter::once(parent.id).chain(parent.supertypes) {
            if !self.supertypes.contains(&id) {
                self.supertypes.push(id);
            }
        }

        self
    }

    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub const fn raw_name(&self) -> &'static str {
        self.raw
    }

    #[must_use]
    pub fn args(&self) -> &[Self] {
        &self.args
    }

    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        !self.args.is_empty()
    }

    #[must_use]
    pub fn supertypes(&self) -> &[TypeId] {
        &self.supertypes
    }

    /// Whether `T` is the type this token describes.
    #[must_use]
    pub fn describes<T: 'static + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Same type, or `candidate` is one of this token's supertypes.
    #[must_use]
    pub fn is_assignable_to(&self, candidate: &Self) -> bool {
        self.id == candidate.id || self.supertypes.contains(&candidate.id)
    }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeToken {}

impl Hash for TypeToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)?;

        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            f.write_str(">")?;
        }

        Ok(())
    }
}

// simple_name
// last path segment with generic arguments stripped
fn simple_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);

    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Base;
    struct Middle;
    struct Leaf;

    #[test]
    fn simple_names_drop_module_paths() {
        assert_eq!(TypeToken::of::<String>().raw_name(), "String");
        assert_eq!(TypeToken::of::<i32>().raw_name(), "i32");
        assert_eq!(TypeToken::of::<Vec<String>>().raw_name(), "Vec");
    }

    #[test]
    fn parameterized_tokens_render_their_shape() {
        let token = TypeToken::parameterized::<HashMap<String, Vec<i64>>>(
            "HashMap",
            vec![
                TypeToken::of::<String>(),
                TypeToken::parameterized::<Vec<i64>>("Vec", vec![TypeToken::of::<i64>()]),
            ],
        );

        assert!(token.is_parameterized());
        assert!(token.describes::<HashMap<String, Vec<i64>>>());
        assert_eq!(token.to_string(), "HashMap<String, Vec<i64>>");
    }

    #[test]
    fn equality_follows_type_identity() {
        let plain = TypeToken::of::<Vec<u8>>();
        let shaped = TypeToken::parameterized::<Vec<u8>>("Vec", vec![TypeToken::of::<u8>()]);

        assert_eq!(plain, shaped);
        assert_ne!(plain, TypeToken::of::<Vec<u16>>());
    }

    #[test]
    fn supertypes_are_transitive() {
        let base = TypeToken::named::<Base>("Base");
        let middle = TypeToken::named::<Middle>("Middle").extends(base.clone());
        let leaf = TypeToken::named::<Leaf>("Leaf").extends(middle.clone());

        assert!(leaf.is_assignable_to(&leaf));
        assert!(leaf.is_assignable_to(&middle));
        assert!(leaf.is_assignable_to(&base));
        assert!(!base.is_assignable_to(&leaf));
        assert_eq!(leaf.supertypes().len(), 2);
    }
}
