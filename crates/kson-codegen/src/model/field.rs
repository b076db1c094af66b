use crate::{model::TypeRef, naming::AdapterIdentifier};
use quote::format_ident;
use syn::{Ident, ext::IdentExt};

///
/// FieldDescriptor
///
/// One serialized field of a record.
///

#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    pub local_name: Ident,
    pub wire_key: String,
    pub alternate_keys: Vec<String>,
    pub declared_type: TypeRef,
    pub nullable: bool,
    pub adapter: AdapterIdentifier,
}

impl FieldDescriptor {
    /// Build from a field's declared type, peeling one level of `Option` into nullability.
    #[must_use]
    pub fn new(
        local_name: Ident,
        rename: Option<String>,
        alternate_keys: Vec<String>,
        ty: TypeRef,
    ) -> Self {
        let (declared_type, nullable) = match ty.option_inner() {
            Some(inner) => (inner.clone(), true),
            None => (ty, false),
        };

        let wire_key = rename.unwrap_or_else(|| local_name.unraw().to_string());
        let adapter = AdapterIdentifier::resolve(&declared_type);

        Self {
            local_name,
            wire_key,
            alternate_keys,
            declared_type,
            nullable,
            adapter,
        }
    }

    /// Every key this field is read from, wire key first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.wire_key.as_str())
            .chain(self.alternate_keys.iter().map(String::as_str))
    }

    /// Local holding the parsed value while an object is read.
    #[must_use]
    pub fn slot_ident(&self) -> Ident {
        format_ident!("slot_{}", self.local_name.unraw())
    }

    /// Local flagging that the key was present; the prefix keeps it apart from every slot.
    #[must_use]
    pub fn assigned_ident(&self) -> Ident {
        format_ident!("assigned_{}", self.local_name.unraw())
    }
}
