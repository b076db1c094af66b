use crate::model::RecordDescriptor;
use proc_macro2::TokenStream;
use quote::quote;

// read_fn
// scan the object into per-field slots, then assemble the record
pub fn read_fn(record: &RecordDescriptor) -> TokenStream {
    let ident = &record.ident;
    let has_default = record.default_provider.is_some();

    let slots = record.fields.iter().map(|field| {
        let slot = field.slot_ident();
        let ty = &field.declared_type;
        let assigned = field.assigned_ident();
        let flag = has_default.then(|| quote!(let mut #assigned = false;));

        quote! {
            let mut #slot: ::core::option::Option<#ty> = ::core::option::Option::None;
            #flag
        }
    });

    let scan = scan_entries(record);
    let assemble = assemble(record);

    quote! {
        fn read(
            &self,
            reader: &mut dyn ::kson::JsonRead,
        ) -> ::core::result::Result<::core::option::Option<#ident>, ::kson::KsonError> {
            if reader.peek()? == ::kson::ValueKind::Null {
                reader.next_null()?;
                return ::core::result::Result::Ok(::core::option::Option::None);
            }

            #(#slots)*

            reader.begin_object()?;
            #scan
            reader.end_object()?;

            #assemble
        }
    }
}

// scan_entries
// nulls leave the slot untouched, unknown keys are skipped
fn scan_entries(record: &RecordDescriptor) -> TokenStream {
    if record.fields.is_empty() {
        return quote! {
            while reader.has_next()? {
                reader.next_name()?;
                reader.skip_value()?;
            }
        };
    }

    let has_default = record.default_provider.is_some();
    let arms = record.fields.iter().map(|field| {
        let keys = field.keys();
        let slot = field.slot_ident();
        let adapter = field.adapter.ident();
        let assigned = field.assigned_ident();
        let flag = has_default.then(|| quote!(#assigned = true;));

        quote! {
            #(#keys)|* => {
                #slot = self.#adapter.get()?.read(reader)?;
                #flag
            }
        }
    });

    quote! {
        while reader.has_next()? {
            let name = reader.next_name()?;
            if reader.peek()? == ::kson::ValueKind::Null {
                reader.next_null()?;
                continue;
            }

            match name.as_str() {
                #(#arms)*
                _ => reader.skip_value()?,
            }
        }
    }
}

// assemble
// unassigned fields fall back to the default instance, required ones fail
fn assemble(record: &RecordDescriptor) -> TokenStream {
    let ident = &record.ident;
    let record_name = ident.to_string();
    let provider = record
        .default_provider
        .as_ref()
        .filter(|_| !record.fields.is_empty() || !record.skipped.is_empty());

    let fields = record.fields.iter().map(|field| {
        let local = &field.local_name;
        let slot = field.slot_ident();
        let name = field.local_name.to_string();
        let required = quote! {
            #slot.ok_or_else(|| ::kson::KsonError::missing_field(#record_name, #name))?
        };

        let value = match (provider.is_some(), field.nullable) {
            (false, false) => required,
            (false, true) => quote!(#slot),
            (true, nullable) => {
                let assigned = field.assigned_ident();
                let parsed = if nullable { quote!(#slot) } else { required };

                quote!(if #assigned { #parsed } else { default.#local })
            }
        };

        quote!(#local: #value,)
    });

    let skipped = record.skipped.iter().map(|local| {
        if provider.is_some() {
            quote!(#local: default.#local,)
        } else {
            quote!(#local: ::core::default::Default::default(),)
        }
    });

    let default = provider.map(|provider| {
        let call = provider.call(ident);

        quote!(let default: #ident = #call;)
    });

    quote! {
        #default

        ::core::result::Result::Ok(::core::option::Option::Some(#ident {
            #(#fields)*
            #(#skipped)*
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{DeriveInput, parse_quote};

    fn record(input: DeriveInput) -> RecordDescriptor {
        RecordDescriptor::from_derive_input(&input).unwrap()
    }

    fn compact(tokens: &TokenStream) -> String {
        tokens.to_string().replace(' ', "")
    }

    #[test]
    fn aliases_share_one_arm() {
        let tokens = read_fn(&record(parse_quote! {
            struct Entity {
                #[kson(rename = "idVal", alias = "id")]
                id: i32,
            }
        }));

        assert!(compact(&tokens).contains(r#""idVal"|"id"=>{slot_id=self.i32_adapter.get()?.read(reader)?;}"#));
    }

    #[test]
    fn required_fields_fail_with_their_names() {
        let tokens = read_fn(&record(parse_quote! {
            struct Entity {
                id: i32,
                name: Option<String>,
            }
        }));
        let text = compact(&tokens);

        assert!(text.contains(r#"id:slot_id.ok_or_else(||::kson::KsonError::missing_field("Entity","id"))?,"#));
        assert!(text.contains("name:slot_name,"));
        assert!(!text.contains("assigned_"));
    }

    #[test]
    fn default_provider_adds_assigned_flags() {
        let tokens = read_fn(&record(parse_quote! {
            #[kson(default)]
            struct Entity {
                title: String,
                #[kson(skip)]
                cache: Vec<u8>,
            }
        }));
        let text = compact(&tokens);

        assert!(text.contains("letmutassigned_title=false;"));
        assert!(text.contains("assigned_title=true;"));
        assert!(text.contains("letdefault:Entity=<Entityas::core::default::Default>::default();"));
        assert!(text.contains("title:ifassigned_title{slot_title.ok_or_else("));
        assert!(text.contains("else{default.title}"));
        assert!(text.contains("cache:default.cache,"));
    }

    #[test]
    fn skipped_fields_without_provider_use_default() {
        let tokens = read_fn(&record(parse_quote! {
            struct Entity {
                id: i32,
                marker: PhantomData<u8>,
            }
        }));

        assert!(compact(&tokens).contains("marker:::core::default::Default::default(),"));
    }

    #[test]
    fn empty_records_skip_every_entry() {
        let tokens = read_fn(&record(parse_quote!(struct Marker {})));

        assert!(!compact(&tokens).contains("matchname"));
    }
}
