use crate::model::RecordDescriptor;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::Ident;

///
/// FactoryUnit
///
/// Factory dispatching to every record it lists, in discovery order.
///

pub struct FactoryUnit<'a> {
    ident: Ident,
    records: &'a [RecordDescriptor],
}

impl<'a> FactoryUnit<'a> {
    #[must_use]
    pub const fn new(ident: Ident, records: &'a [RecordDescriptor]) -> Self {
        Self { ident, records }
    }
}

impl ToTokens for FactoryUnit<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ident = &self.ident;
        let entries = self.records.iter().map(RecordDescriptor::crate_path);

        tokens.extend(quote! {
            /// Generated type adapter factory.
            #[derive(Clone, Copy, Debug, Default)]
            pub struct #ident;

            impl #ident {
                const ENTRIES: &'static [::kson::DispatchEntry] = &[
                    #(::kson::DispatchEntry::of::<#entries>(),)*
                ];

                /// Served records, in discovery order.
                pub const TABLE: ::kson::DispatchTable = ::kson::DispatchTable::new(Self::ENTRIES);
            }

            #[automatically_derived]
            impl ::kson::TypeAdapterFactory for #ident {
                fn create(
                    &self,
                    kson: &::kson::Kson,
                    token: &::kson::TypeToken,
                ) -> ::core::option::Option<::kson::ErasedAdapter> {
                    Self::TABLE.create(kson, token)
                }
            }
        });
    }
}
