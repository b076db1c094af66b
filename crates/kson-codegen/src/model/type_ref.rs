use darling::Error as DarlingError;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use std::fmt;
use syn::{GenericArgument, Ident, Path, PathArguments, Type};

// module roots whose paths normalize to the bare type name
const STD_ROOTS: [&str; 3] = ["std", "core", "alloc"];

///
/// TypeName
///
/// One named type as written in a field declaration, without its generic arguments.
///

#[derive(Clone, Debug)]
pub struct TypeName {
    ident: String,
    canonical: String,
    path: Path,
}

impl TypeName {
    fn from_path(path: &Path, record: &Ident) -> Self {
        let mut path = path.clone();
        if let Some(last) = path.segments.last_mut() {
            last.arguments = PathArguments::None;
        }

        // `Self` in a field type names the record itself
        if path.leading_colon.is_none()
            && path.segments.len() == 1
            && path.segments[0].ident == "Self"
        {
            path = Path::from(record.clone());
        }

        let segments: Vec<String> = path
            .segments
            .iter()
            .map(|seg| seg.ident.to_string())
            .collect();
        let ident = segments.last().cloned().unwrap_or_default();
        let canonical = if segments.len() > 1 && STD_ROOTS.contains(&segments[0].as_str()) {
            ident.clone()
        } else {
            segments.join("::")
        };

        Self {
            ident,
            canonical,
            path,
        }
    }

    /// Last path segment.
    #[must_use]
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Normalized full name used for structural identity.
    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }
}

///
/// TypeRef
///
/// Declared field type: a simple name or a raw name applied to type arguments.
///

#[derive(Clone, Debug)]
pub enum TypeRef {
    Simple(TypeName),
    Parameterized(TypeName, Vec<TypeRef>),
}

impl TypeRef {
    /// Parse a field type. Only plain paths with type arguments are accepted.
    pub fn parse(ty: &Type, record: &Ident) -> Result<Self, DarlingError> {
        match ty {
            Type::Group(group) => Self::parse(&group.elem, record),
            Type::Paren(paren) => Self::parse(&paren.elem, record),
            Type::Path(type_path) if type_path.qself.is_none() => {
                Self::parse_path(&type_path.path, record)
            }
            _ => Err(DarlingError::custom(
                "field types must be type paths such as `String`, `Vec<T>` or `crate::Item`",
            )
            .with_span(ty)),
        }
    }

    fn parse_path(path: &Path, record: &Ident) -> Result<Self, DarlingError> {
        let Some(last) = path.segments.last() else {
            return Err(DarlingError::custom("empty type path").with_span(path));
        };

        for segment in path.segments.iter().take(path.segments.len() - 1) {
            if !segment.arguments.is_none() {
                return Err(DarlingError::custom(
                    "generic arguments are only supported on the last path segment",
                )
                .with_span(segment));
            }
        }

        let name = TypeName::from_path(path, record);
        match &last.arguments {
            PathArguments::None => Ok(Self::Simple(name)),
            PathArguments::AngleBracketed(generics) => {
                let mut args = Vec::with_capacity(generics.args.len());
                let mut errors = DarlingError::accumulator();

                for arg in &generics.args {
                    match arg {
                        GenericArgument::Type(ty) => {
                            if let Some(parsed) = errors.handle(Self::parse(ty, record)) {
                                args.push(parsed);
                            }
                        }
                        other => errors.push(
                            DarlingError::custom("only type arguments are supported")
                                .with_span(other),
                        ),
                    }
                }
                errors.finish()?;

                if args.is_empty() {
                    Ok(Self::Simple(name))
                } else {
                    Ok(Self::Parameterized(name, args))
                }
            }
            PathArguments::Parenthesized(_) => Err(DarlingError::custom(
                "function-style type arguments are not supported",
            )
            .with_span(last)),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &TypeName {
        match self {
            Self::Simple(name) | Self::Parameterized(name, _) => name,
        }
    }

    #[must_use]
    pub fn args(&self) -> &[Self] {
        match self {
            Self::Simple(_) => &[],
            Self::Parameterized(_, args) => args,
        }
    }

    #[must_use]
    pub const fn is_parameterized(&self) -> bool {
        matches!(self, Self::Parameterized(..))
    }

    /// Whether this is `Option<T>`, returning `T`.
    #[must_use]
    pub fn option_inner(&self) -> Option<&Self> {
        match self {
            Self::Parameterized(name, args) if name.canonical() == "Option" && args.len() == 1 => {
                args.first()
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_phantom(&self) -> bool {
        self.name().canonical() == "PhantomData"
    }

    /// Structural equality on normalized names.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.name().canonical() == other.name().canonical()
            && self.args().len() == other.args().len()
            && self
                .args()
                .iter()
                .zip(other.args())
                .all(|(a, b)| a.same_shape(b))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().canonical())?;

        if let Some((first, rest)) = self.args().split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            f.write_str(">")?;
        }

        Ok(())
    }
}

impl ToTokens for TypeRef {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let path = self.name().path();

        tokens.extend(match self {
            Self::Simple(_) => quote!(#path),
            Self::Parameterized(_, args) => quote!(#path<#(#args),*>),
        });
    }
}
