//! Adapters for primitives and std containers.
//!
//! These back [`KsonType::builtin_adapter`](crate::KsonType::builtin_adapter) and are used
//! whenever no registered factory claims a type.

mod collection;
mod scalar;
