pub mod article;
pub mod graph;
pub mod legacy;
pub mod nullability;
pub mod shape;
pub mod user;
