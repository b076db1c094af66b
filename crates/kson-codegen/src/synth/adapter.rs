use crate::{
    model::{RecordDescriptor, TypeRef},
    naming::{AdapterIdentifier, adapter_type},
    synth::{read::read_fn, token::slot_init, write::write_fn},
};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Attribute, Visibility};

///
/// GeneratedAdapterUnit
///
/// The adapter type of one record: its sub-adapter table, constructor, read and write routines,
/// and the `KsonRecord` impl tying it to the record.
///

pub struct GeneratedAdapterUnit<'a> {
    record: &'a RecordDescriptor,
    slots: Vec<(&'a AdapterIdentifier, &'a TypeRef)>,
    attrs: Vec<Attribute>,
    vis: Visibility,
}

impl<'a> GeneratedAdapterUnit<'a> {
    #[must_use]
    pub fn new(record: &'a RecordDescriptor) -> Self {
        let mut slots: Vec<(&AdapterIdentifier, &TypeRef)> = Vec::new();
        for field in &record.fields {
            if !slots.iter().any(|(ident, _)| **ident == field.adapter) {
                slots.push((&field.adapter, &field.declared_type));
            }
        }

        Self {
            record,
            slots,
            attrs: Vec::new(),
            vis: record.vis.clone(),
        }
    }

    /// Override the adapter's visibility, which otherwise follows the record.
    #[must_use]
    pub fn with_vis(mut self, vis: Visibility) -> Self {
        self.vis = vis;
        self
    }

    /// Attach an attribute to every emitted item.
    #[must_use]
    pub fn with_attr(mut self, attr: Attribute) -> Self {
        self.attrs.push(attr);
        self
    }

    /// Distinct sub-adapter identifiers, in first-use order.
    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(ident, _)| ident.as_str())
    }
}

impl ToTokens for GeneratedAdapterUnit<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let record = &self.record.ident;
        let vis = &self.vis;
        let adapter = adapter_type(record);
        let attrs = &self.attrs;
        let doc = format!(" Generated type adapter for [`{record}`].");

        let slot_defs = self.slots.iter().map(|(ident, ty)| {
            let ident = ident.ident();
            quote!(#ident: ::kson::LazyAdapter<#ty>,)
        });
        let slot_inits = self.slots.iter().map(|(ident, ty)| {
            let ident = ident.ident();
            let init = slot_init(ty);
            quote!(#ident: #init,)
        });

        let kson_param = if self.slots.is_empty() {
            quote!(_kson)
        } else {
            quote!(kson)
        };

        let write = write_fn(self.record);
        let read = read_fn(self.record);

        tokens.extend(quote! {
            #[doc = #doc]
            #(#attrs)*
            #vis struct #adapter {
                #(#slot_defs)*
            }

            #(#attrs)*
            impl #adapter {
                #[must_use]
                pub fn new(#kson_param: &::kson::Kson) -> Self {
                    Self {
                        #(#slot_inits)*
                    }
                }
            }

            #(#attrs)*
            #[automatically_derived]
            impl ::kson::TypeAdapter<#record> for #adapter {
                #write
                #read
            }

            #(#attrs)*
            #[automatically_derived]
            impl ::kson::KsonRecord for #record {
                type Adapter = #adapter;

                fn adapter(kson: &::kson::Kson) -> Self::Adapter {
                    #adapter::new(kson)
                }
            }
        });
    }
}

// type_impl
// token of a record, with its declared supertype chain
pub fn type_impl(record: &RecordDescriptor) -> TokenStream {
    let ident = &record.ident;
    let name = ident.to_string();
    let extends = record.extends.as_ref().map(|parent| {
        quote!(.extends(<#parent as ::kson::KsonType>::type_token()))
    });

    quote! {
        #[automatically_derived]
        impl ::kson::KsonType for #ident {
            fn type_token() -> ::kson::TypeToken {
                ::kson::TypeToken::named::<Self>(#name)
                    #extends
            }
        }
    }
}
