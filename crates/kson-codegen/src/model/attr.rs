use darling::{
    Error as DarlingError, FromDeriveInput, FromField, FromMeta, ast::Data, util::Ignored,
};
use syn::{Generics, Ident, Path, Type, Visibility};

///
/// RecordAttrs
///
/// `#[kson(...)]` on the record itself.
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(kson), supports(struct_named))]
pub struct RecordAttrs {
    pub ident: Ident,
    pub vis: Visibility,
    pub generics: Generics,
    pub data: Data<Ignored, FieldAttrs>,

    #[darling(default)]
    pub default: Option<DefaultAttr>,

    #[darling(default)]
    pub extends: Option<Path>,
}

///
/// FieldAttrs
///

#[derive(Debug, FromField)]
#[darling(attributes(kson))]
pub struct FieldAttrs {
    pub ident: Option<Ident>,
    pub ty: Type,

    #[darling(default)]
    pub rename: Option<String>,

    #[darling(multiple)]
    pub alias: Vec<String>,

    #[darling(default)]
    pub skip: bool,
}

///
/// DefaultAttr
///
/// Bare `default` selects `Default::default()`; `default = "path"` names a function.
///

#[derive(Clone, Debug)]
pub enum DefaultAttr {
    Trait,
    Function(Path),
}

impl FromMeta for DefaultAttr {
    fn from_word() -> Result<Self, DarlingError> {
        Ok(Self::Trait)
    }

    fn from_string(value: &str) -> Result<Self, DarlingError> {
        syn::parse_str::<Path>(value)
            .map(Self::Function)
            .map_err(|_| DarlingError::unknown_value(value))
    }

    fn from_expr(expr: &syn::Expr) -> Result<Self, DarlingError> {
        match expr {
            syn::Expr::Path(path) if path.qself.is_none() => Ok(Self::Function(path.path.clone())),
            syn::Expr::Lit(lit) => Self::from_value(&lit.lit),
            _ => Err(DarlingError::unexpected_expr_type(expr)),
        }
    }
}
