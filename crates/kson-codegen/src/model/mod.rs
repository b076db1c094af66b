mod attr;
mod field;
mod record;
mod type_ref;

pub use attr::{DefaultAttr, FieldAttrs, RecordAttrs};
pub use field::FieldDescriptor;
pub use record::{DefaultProvider, RecordDescriptor};
pub use type_ref::{TypeName, TypeRef};
