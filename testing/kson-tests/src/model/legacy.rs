use kson::Kson;

///
/// Account
/// Older documents used `id` instead of `idVal`.
///

#[derive(Debug, Kson, PartialEq)]
pub struct Account {
    #[kson(rename = "idVal", alias = "id")]
    pub id_val: i64,

    #[kson(rename = "displayName", alias = "name", alias = "display")]
    pub display_name: String,
}
