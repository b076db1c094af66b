use crate::{
    model::{DefaultAttr, FieldAttrs, FieldDescriptor, RecordAttrs, TypeRef},
    validate,
};
use darling::{Error as DarlingError, FromDeriveInput};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, Ident, Path, Visibility};

///
/// RecordDescriptor
///
/// Everything generation needs to know about one record type.
///

#[derive(Clone, Debug)]
pub struct RecordDescriptor {
    pub ident: Ident,
    pub vis: Visibility,
    pub module: Vec<String>,
    pub fields: Vec<FieldDescriptor>,
    pub skipped: Vec<Ident>,
    pub default_provider: Option<DefaultProvider>,
    pub extends: Option<Path>,
}

impl RecordDescriptor {
    /// Parse and validate a record declaration.
    pub fn from_derive_input(input: &DeriveInput) -> Result<Self, DarlingError> {
        let attrs = RecordAttrs::from_derive_input(input)?;
        let mut errors = DarlingError::accumulator();

        if !attrs.generics.params.is_empty() {
            errors.push(
                DarlingError::custom("records cannot have generic parameters")
                    .with_span(&attrs.generics),
            );
        }

        let mut fields = Vec::new();
        let mut skipped = Vec::new();
        let declared = attrs.data.take_struct().map(|data| data.fields).unwrap_or_default();

        for field in declared {
            let Some(parsed) = errors.handle(Self::field(&attrs.ident, &field)) else {
                continue;
            };

            match parsed {
                Some(descriptor) => fields.push(descriptor),
                None => skipped.extend(field.ident),
            }
        }

        let record = Self {
            default_provider: attrs
                .default
                .map(|attr| DefaultProvider::new(attr, &attrs.ident)),
            ident: attrs.ident,
            vis: attrs.vis,
            module: Vec::new(),
            fields,
            skipped,
            extends: attrs.extends,
        };

        errors.handle(validate::record(&record));
        errors.finish_with(record)
    }

    // field
    // None for fields that never reach the wire
    fn field(record: &Ident, field: &FieldAttrs) -> Result<Option<FieldDescriptor>, DarlingError> {
        let Some(ident) = field.ident.clone() else {
            return Err(DarlingError::custom("record fields must be named").with_span(&field.ty));
        };

        if field.skip {
            return Ok(None);
        }

        let ty = TypeRef::parse(&field.ty, record)?;
        if ty.is_phantom() {
            return Ok(None);
        }

        Ok(Some(FieldDescriptor::new(
            ident,
            field.rename.clone(),
            field.alias.clone(),
            ty,
        )))
    }

    /// Place the record in a module, given by its path below the crate root.
    #[must_use]
    pub fn in_module(mut self, module: Vec<String>) -> Self {
        self.module = module;
        self
    }

    /// Absolute path of the record type.
    #[must_use]
    pub fn crate_path(&self) -> TokenStream {
        let ident = &self.ident;
        let module = self.module.iter().map(|segment| format_ident!("{segment}"));

        quote!(crate #(:: #module)* :: #ident)
    }

    #[must_use]
    pub fn display_path(&self) -> String {
        let mut segments = self.module.clone();
        segments.push(self.ident.to_string());

        segments.join("::")
    }
}

///
/// DefaultProvider
///

#[derive(Clone, Debug)]
pub enum DefaultProvider {
    Trait,
    Function(Path),
}

impl DefaultProvider {
    // new
    // a leading `Self` segment is replaced by the record name
    fn new(attr: DefaultAttr, record: &Ident) -> Self {
        match attr {
            DefaultAttr::Trait => Self::Trait,
            DefaultAttr::Function(mut path) => {
                if let Some(first) = path.segments.first_mut()
                    && first.ident == "Self"
                {
                    first.ident = record.clone();
                }

                Self::Function(path)
            }
        }
    }

    /// Expression producing the fallback instance of `record`.
    #[must_use]
    pub fn call(&self, record: &Ident) -> TokenStream {
        match self {
            Self::Trait => quote!(<#record as ::core::default::Default>::default()),
            Self::Function(path) => quote!(#path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn skipped_and_phantom_fields_leave_the_wire() {
        let input: DeriveInput = parse_quote! {
            struct Entity {
                id: i32,
                #[kson(skip)]
                cache: Vec<u8>,
                marker: std::marker::PhantomData<u8>,
            }
        };

        let record = RecordDescriptor::from_derive_input(&input).unwrap();

        assert_eq!(record.fields.len(), 1);
        assert_eq!(record.skipped, ["cache", "marker"]);
    }

    #[test]
    fn self_default_paths_name_the_record() {
        let input: DeriveInput = parse_quote! {
            #[kson(default = "Self::sample")]
            struct Entity {
                id: i32,
            }
        };

        let record = RecordDescriptor::from_derive_input(&input).unwrap();
        let provider = record.default_provider.unwrap();

        assert_eq!(
            provider.call(&record.ident).to_string(),
            "Entity :: sample ()"
        );
    }

    #[test]
    fn generic_records_are_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Wrapper<T> {
                value: T,
            }
        };

        let err = RecordDescriptor::from_derive_input(&input).unwrap_err();

        assert!(err.to_string().contains("generic parameters"));
    }

    #[test]
    fn errors_accumulate_across_fields() {
        let input: DeriveInput = parse_quote! {
            struct Entity {
                a: &'static str,
                b: (i32, i32),
            }
        };

        let err = RecordDescriptor::from_derive_input(&input).unwrap_err();

        assert_eq!(err.len(), 2);
    }

    #[test]
    fn paths_follow_the_module() {
        let input: DeriveInput = parse_quote!(struct Entity { id: i32 });

        let record = RecordDescriptor::from_derive_input(&input)
            .unwrap()
            .in_module(vec!["model".into(), "user".into()]);

        assert_eq!(record.display_path(), "model::user::Entity");
        assert_eq!(
            record.crate_path().to_string(),
            "crate :: model :: user :: Entity"
        );
    }
}
