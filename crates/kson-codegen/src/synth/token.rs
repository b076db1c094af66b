use crate::model::TypeRef;
use proc_macro2::TokenStream;
use quote::quote;

// type_token
// explicitly nested token for a declared type
pub fn type_token(ty: &TypeRef) -> TokenStream {
    match ty {
        TypeRef::Simple(_) => quote!(<#ty as ::kson::KsonType>::type_token()),
        TypeRef::Parameterized(name, args) => {
            let raw = name.ident();
            let args = args.iter().map(type_token);

            quote! {
                ::kson::TypeToken::parameterized::<#ty>(#raw, ::std::vec![#(#args),*])
            }
        }
    }
}

// slot_init
// simple types resolve by exact type, parameterized ones through their token
pub fn slot_init(ty: &TypeRef) -> TokenStream {
    if ty.is_parameterized() {
        let token = type_token(ty);

        quote!(::kson::LazyAdapter::with_token(kson, #token))
    } else {
        quote!(::kson::LazyAdapter::new(kson))
    }
}
