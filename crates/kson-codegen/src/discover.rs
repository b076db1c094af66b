//! Source discovery.
//!
//! Walks the crate's module tree from its root file, following `mod` declarations the way the
//! compiler does, and collects every `#[derive(Kson)]` record, every `#[derive(KsonFactory)]`
//! target, and the name scope of each module that holds records.

use crate::{
    error::CodegenError,
    scope::{ModuleScope, is_test_only},
};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use syn::{Attribute, DeriveInput, Ident, Item, ItemMod, LitStr, Token, punctuated::Punctuated};

const RECORD_DERIVE: &str = "Kson";
const FACTORY_DERIVE: &str = "KsonFactory";

///
/// DiscoveredRecord
///

#[derive(Clone, Debug)]
pub struct DiscoveredRecord {
    pub module: Vec<String>,
    pub input: DeriveInput,
}

///
/// FactoryTarget
///

#[derive(Clone, Debug)]
pub struct FactoryTarget {
    pub module: Vec<String>,
    pub ident: Ident,
}

impl FactoryTarget {
    #[must_use]
    pub fn display_path(&self) -> String {
        let mut segments = self.module.clone();
        segments.push(self.ident.to_string());

        segments.join("::")
    }
}

///
/// Discovery
///

#[derive(Debug, Default)]
pub struct Discovery {
    pub records: Vec<DiscoveredRecord>,
    pub factories: Vec<FactoryTarget>,
    pub scopes: BTreeMap<Vec<String>, ModuleScope>,
    pub files: Vec<PathBuf>,
}

impl Discovery {
    /// Walk the module tree rooted at `root` (usually `src/lib.rs`).
    pub fn from_root(root: &Path) -> Result<Self, CodegenError> {
        let mut discovery = Self::default();
        let dir = root.parent().map(Path::to_path_buf).unwrap_or_default();

        discovery.visit_file(root, &dir, Vec::new())?;

        Ok(discovery)
    }

    /// Discover from already parsed items of the crate root.
    pub fn from_items(items: &[Item], dir: &Path) -> Result<Self, CodegenError> {
        let mut discovery = Self::default();
        discovery.visit_items(items, dir, &[])?;

        Ok(discovery)
    }

    fn visit_file(
        &mut self,
        file: &Path,
        dir: &Path,
        module: Vec<String>,
    ) -> Result<(), CodegenError> {
        tracing::trace!(file = %file.display(), "scanning source file");

        let source = fs::read_to_string(file).map_err(|source| CodegenError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        let parsed = syn::parse_file(&source).map_err(|source| CodegenError::Parse {
            path: file.to_path_buf(),
            source,
        })?;

        self.files.push(file.to_path_buf());
        self.visit_items(&parsed.items, dir, &module)
    }

    // visit_items
    // `dir` is where child module files of this module live
    fn visit_items(
        &mut self,
        items: &[Item],
        dir: &Path,
        module: &[String],
    ) -> Result<(), CodegenError> {
        let mut scope = ModuleScope::new(module.to_vec());

        for item in items {
            if is_test_only(item_attrs(item)) {
                continue;
            }

            if let Some(name) = item_name(item) {
                scope.push_local(name);
            }

            match item {
                Item::Use(item_use) => scope.push_use(item_use.clone()),
                Item::Struct(item_struct) => {
                    self.visit_type(&item_struct.attrs, &item_struct.ident, module, || {
                        DeriveInput::from(item_struct.clone())
                    });
                }
                Item::Enum(item_enum) => {
                    self.visit_type(&item_enum.attrs, &item_enum.ident, module, || {
                        DeriveInput::from(item_enum.clone())
                    });
                }
                Item::Mod(item_mod) => self.visit_mod(item_mod, dir, module)?,
                _ => {}
            }
        }

        if !module.is_empty() {
            self.scopes.insert(module.to_vec(), scope);
        }

        Ok(())
    }

    fn visit_type(
        &mut self,
        attrs: &[Attribute],
        ident: &Ident,
        module: &[String],
        input: impl FnOnce() -> DeriveInput,
    ) {
        let derives = derived(attrs);

        if derives.iter().any(|name| name == FACTORY_DERIVE) {
            tracing::debug!(marker = %ident, "factory target discovered");
            self.factories.push(FactoryTarget {
                module: module.to_vec(),
                ident: ident.clone(),
            });
        }

        if derives.iter().any(|name| name == RECORD_DERIVE) {
            if module.is_empty() {
                tracing::debug!(record = %ident, "skipping record declared at the crate root");
                return;
            }

            tracing::debug!(record = %ident, module = %module.join("::"), "record discovered");
            self.records.push(DiscoveredRecord {
                module: module.to_vec(),
                input: input(),
            });
        }
    }

    fn visit_mod(
        &mut self,
        item: &ItemMod,
        dir: &Path,
        module: &[String],
    ) -> Result<(), CodegenError> {
        let name = item.ident.to_string();
        let mut child = module.to_vec();
        child.push(name.clone());

        let explicit = path_attr(&item.attrs);

        if let Some((_, items)) = &item.content {
            let child_dir = match &explicit {
                Some(path) => dir.join(path),
                None => dir.join(&name),
            };

            return self.visit_items(items, &child_dir, &child);
        }

        let candidates = match &explicit {
            Some(path) => vec![dir.join(path)],
            None => vec![dir.join(format!("{name}.rs")), dir.join(&name).join("mod.rs")],
        };

        let Some(file) = candidates.iter().find(|path| path.is_file()) else {
            return Err(CodegenError::ModuleNotFound {
                module: child.join("::"),
                candidates: candidates
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        };

        // `foo.rs` keeps its children in `foo/`, `mod.rs` and #[path] files next to themselves
        let is_dir_owner = explicit.is_some() || file.file_name().is_some_and(|f| f == "mod.rs");
        let child_dir = if is_dir_owner {
            file.parent().map(Path::to_path_buf).unwrap_or_default()
        } else {
            dir.join(&name)
        };

        self.visit_file(file, &child_dir, child)
    }
}

// derived
// last segment of every path in #[derive(...)]
fn derived(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .filter_map(|attr| {
            attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
                .ok()
        })
        .flatten()
        .filter_map(|path| path.segments.last().map(|seg| seg.ident.to_string()))
        .collect()
}

// path_attr
fn path_attr(attrs: &[Attribute]) -> Option<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("path"))
        .find_map(|attr| {
            let value = &attr.meta.require_name_value().ok()?.value;
            let syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(lit),
                ..
            }) = value
            else {
                return None;
            };

            Some(LitStr::value(lit))
        })
}

fn item_attrs(item: &Item) -> &[Attribute] {
    match item {
        Item::Const(item) => &item.attrs,
        Item::Enum(item) => &item.attrs,
        Item::Fn(item) => &item.attrs,
        Item::Mod(item) => &item.attrs,
        Item::Static(item) => &item.attrs,
        Item::Struct(item) => &item.attrs,
        Item::Trait(item) => &item.attrs,
        Item::Type(item) => &item.attrs,
        Item::Union(item) => &item.attrs,
        Item::Use(item) => &item.attrs,
        _ => &[],
    }
}

fn item_name(item: &Item) -> Option<String> {
    let ident = match item {
        Item::Const(item) => &item.ident,
        Item::Enum(item) => &item.ident,
        Item::Fn(item) => &item.sig.ident,
        Item::Mod(item) => &item.ident,
        Item::Static(item) => &item.ident,
        Item::Struct(item) => &item.ident,
        Item::Trait(item) => &item.ident,
        Item::Type(item) => &item.ident,
        Item::Union(item) => &item.ident,
        _ => return None,
    };

    Some(ident.to_string())
}
