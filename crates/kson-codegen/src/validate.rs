use crate::{
    model::{RecordDescriptor, TypeRef},
    naming::AdapterIdentifier,
};
use darling::Error as DarlingError;
use std::collections::HashMap;
use syn::Ident;

// record
// wire keys must be unique, identifiers must map to one shape
pub fn record(record: &RecordDescriptor) -> Result<(), DarlingError> {
    let mut errors = DarlingError::accumulator();

    let mut keys: HashMap<&str, &Ident> = HashMap::new();
    for field in &record.fields {
        for key in field.keys() {
            if let Some(owner) = keys.insert(key, &field.local_name) {
                errors.push(
                    DarlingError::custom(format!(
                        "wire key '{key}' of field '{}' is already used by field '{owner}'",
                        field.local_name
                    ))
                    .with_span(&field.local_name),
                );
            }
        }
    }

    let mut shapes: HashMap<&AdapterIdentifier, &TypeRef> = HashMap::new();
    for field in &record.fields {
        let ty = &field.declared_type;

        match shapes.get(&field.adapter) {
            Some(seen) if !seen.same_shape(ty) => errors.push(
                DarlingError::custom(format!(
                    "field '{}' has type '{ty}' but adapter '{}' already serves '{seen}'",
                    field.local_name, field.adapter
                ))
                .with_span(&field.local_name),
            ),
            Some(_) => {}
            None => {
                shapes.insert(&field.adapter, ty);
            }
        }
    }

    errors.finish()
}
