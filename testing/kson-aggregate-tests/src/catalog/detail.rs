use kson::Kson;

///
/// Dimensions
///

#[derive(Clone, Debug, Kson, PartialEq)]
pub(crate) struct Dimensions {
    pub(crate) width: f64,
    pub(crate) height: f64,
}
