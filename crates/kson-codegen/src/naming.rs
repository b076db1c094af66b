//! Deterministic names for everything generation emits.

use crate::model::TypeRef;
use convert_case::{Case, Casing};
use proc_macro2::Span;
use quote::format_ident;
use std::fmt;
use syn::Ident;

/// File holding every adapter in aggregate granularity.
pub const AGGREGATE_FILE: &str = "kson_adapters.rs";

/// Factory covering every record in aggregate granularity.
pub const AGGREGATE_FACTORY: &str = "KsonTypeAdapterFactory";

///
/// AdapterIdentifier
///
/// Name of a sub-adapter slot, keyed by the structural shape of the field type.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AdapterIdentifier(String);

impl AdapterIdentifier {
    /// `Simple(name)` resolves to `name_adapter`; parameterized types flatten the raw name and
    /// every argument depth-first, left to right.
    #[must_use]
    pub fn resolve(ty: &TypeRef) -> Self {
        let mut parts = Vec::new();
        flatten(ty, &mut parts);
        parts.push("adapter");

        Self(parts.join("_").to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn ident(&self) -> Ident {
        Ident::new(&self.0, Span::call_site())
    }
}

impl fmt::Display for AdapterIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn flatten<'a>(ty: &'a TypeRef, parts: &mut Vec<&'a str>) {
    parts.push(ty.name().ident());
    for arg in ty.args() {
        flatten(arg, parts);
    }
}

/// Generated adapter type of a record.
#[must_use]
pub fn adapter_type(record: &Ident) -> Ident {
    format_ident!("{}TypeAdapter", record)
}

/// Generated factory named after its designated marker type.
#[must_use]
pub fn factory_type(marker: &Ident) -> Ident {
    format_ident!("Kson{}", marker)
}

/// Output file of a designated factory.
#[must_use]
pub fn factory_file(marker: &Ident) -> String {
    format!("{}.rs", factory_type(marker).to_string().to_case(Case::Snake))
}
