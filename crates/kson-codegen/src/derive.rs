//! Expansion of the derive macros, kept here so it can be tested without a proc-macro crate.

use crate::{
    model::RecordDescriptor,
    naming::{factory_file, factory_type},
    synth::{GeneratedAdapterUnit, type_impl},
};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields};

// kson
// the adapter stands aside when an aggregate file provides it
pub fn kson(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let record = match RecordDescriptor::from_derive_input(&input) {
        Ok(record) => record,
        Err(err) => return err.write_errors(),
    };

    let token = type_impl(&record);
    let unit = GeneratedAdapterUnit::new(&record)
        .with_attr(syn::parse_quote!(#[cfg(not(kson_aggregate))]));

    quote! {
        #token
        #unit
    }
}

// factory
// pulls in the factory the build script generated for this marker
pub fn factory(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let is_unit = matches!(&input.data, Data::Struct(data) if matches!(data.fields, Fields::Unit));
    if !is_unit || !input.generics.params.is_empty() {
        return Error::new_spanned(
            &input.ident,
            "KsonFactory can only be derived for unit structs without generics",
        )
        .to_compile_error();
    }

    let marker = &input.ident;
    let factory = factory_type(marker);
    let file = format!("/{}", factory_file(marker));

    quote! {
        include!(concat!(env!("OUT_DIR"), #file));

        impl #marker {
            /// The generated factory for every record of this crate.
            #[must_use]
            pub const fn get() -> #factory {
                #factory
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(tokens: &TokenStream) -> String {
        tokens.to_string().replace(' ', "")
    }

    #[test]
    fn record_derive_gates_the_adapter() {
        let text = compact(&kson(quote! {
            pub struct User {
                id: i64,
            }
        }));

        assert!(text.contains("impl::kson::KsonTypeforUser"));
        assert!(text.contains("#[cfg(not(kson_aggregate))]pubstructUserTypeAdapter"));
    }

    #[test]
    fn invalid_records_render_errors() {
        let text = kson(quote! {
            enum Choice { A, B }
        })
        .to_string();

        assert!(text.contains("compile_error"));
    }

    #[test]
    fn factory_derive_includes_the_generated_file() {
        let text = compact(&factory(quote!(pub struct TypeAdapterProvider;)));

        assert!(text.contains(r#"include!(concat!(env!("OUT_DIR"),"/kson_type_adapter_provider.rs"));"#));
        assert!(text.contains("pubconstfnget()->KsonTypeAdapterProvider"));
    }

    #[test]
    fn factory_derive_requires_a_unit_struct() {
        let text = factory(quote!(pub struct Provider { inner: u8 })).to_string();

        assert!(text.contains("compile_error"));
    }
}
