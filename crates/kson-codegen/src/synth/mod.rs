//! Token synthesis for adapters and factories.

mod adapter;
mod factory;
mod read;
mod token;
mod write;

pub use adapter::{GeneratedAdapterUnit, type_impl};
pub use factory::FactoryUnit;
