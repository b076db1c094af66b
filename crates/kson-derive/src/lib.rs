use proc_macro::TokenStream;

/// Generates the `KsonType` impl of a record and, unless the crate is built in aggregate
/// granularity, its type adapter.
#[proc_macro_derive(Kson, attributes(kson))]
pub fn derive_kson(input: TokenStream) -> TokenStream {
    kson_codegen::derive::kson(input.into()).into()
}

/// Marks the type whose module receives the factory generated by `kson-build`.
#[proc_macro_derive(KsonFactory)]
pub fn derive_kson_factory(input: TokenStream) -> TokenStream {
    kson_codegen::derive::factory(input.into()).into()
}
