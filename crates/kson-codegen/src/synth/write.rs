use crate::model::RecordDescriptor;
use proc_macro2::TokenStream;
use quote::quote;

// write_fn
// fields go out in declaration order, each as key then value
pub fn write_fn(record: &RecordDescriptor) -> TokenStream {
    let ident = &record.ident;
    let binding = if record.fields.is_empty() {
        quote!(_)
    } else {
        quote!(obj)
    };

    let fields = record.fields.iter().map(|field| {
        let key = &field.wire_key;
        let local = &field.local_name;
        let adapter = field.adapter.ident();
        let value = if field.nullable {
            quote!(obj.#local.as_ref())
        } else {
            quote!(::core::option::Option::Some(&obj.#local))
        };

        quote! {
            writer.name(#key)?;
            self.#adapter.get()?.write(writer, #value)?;
        }
    });

    quote! {
        fn write(
            &self,
            writer: &mut dyn ::kson::JsonWrite,
            obj: ::core::option::Option<&#ident>,
        ) -> ::core::result::Result<(), ::kson::KsonError> {
            let ::core::option::Option::Some(#binding) = obj else {
                return writer.null_value();
            };

            writer.begin_object()?;
            #(#fields)*
            writer.end_object()
        }
    }
}
