use kson::Kson;

///
/// Money
///

#[derive(Clone, Debug, Kson, PartialEq)]
pub(crate) struct Money {
    pub(crate) amount: i64,
    pub(crate) currency: String,
}
