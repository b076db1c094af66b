//! Re-creating a source module's name scope inside the aggregate file.
//!
//! Generated adapters refer to field types exactly as written. In aggregate granularity they
//! live in a mirror of the source module, so every `use` of the source module is re-emitted with
//! `self`, `super` and child-module prefixes made absolute, followed by a glob re-export of the
//! source module itself. The mirror of a child module shadows the source module in its parent,
//! so the re-export keeps paths such as `child::Item` resolving there.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::BTreeSet;
use syn::{Attribute, ItemUse, UseGroup, UseTree, punctuated::Punctuated};

///
/// ModuleScope
///

#[derive(Clone, Debug, Default)]
pub struct ModuleScope {
    path: Vec<String>,
    uses: Vec<ItemUse>,
    locals: BTreeSet<String>,
}

impl ModuleScope {
    #[must_use]
    pub fn new(path: Vec<String>) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn push_use(&mut self, item: ItemUse) {
        self.uses.push(item);
    }

    /// Record the name of an item declared in the module.
    pub fn push_local(&mut self, name: String) {
        self.locals.insert(name);
    }

    /// Imports usable from any module, minus those binding a `reserved` name.
    #[must_use]
    pub fn absolute_uses(&self, reserved: &BTreeSet<String>) -> Vec<TokenStream> {
        self.uses
            .iter()
            .filter_map(|item| {
                let tree = prune(&item.tree, reserved)?;
                let tree = if item.leading_colon.is_some() {
                    quote!(::#tree)
                } else {
                    self.rewrite(&tree)?
                };
                let cfgs = item.attrs.iter().filter(|attr| attr.path().is_ident("cfg"));

                Some(quote!(#(#cfgs)* use #tree;))
            })
            .collect()
    }

    /// `pub(crate) use crate::<path>::*;`
    #[must_use]
    pub fn glob_import(&self) -> TokenStream {
        let segments = self.path.iter().map(|segment| format_ident!("{segment}"));

        quote!(pub(crate) use crate #(:: #segments)* :: *;)
    }

    fn rewrite(&self, tree: &UseTree) -> Option<TokenStream> {
        match tree {
            UseTree::Path(path) if path.ident == "crate" => Some(quote!(#tree)),
            UseTree::Path(path) if path.ident == "self" => Some(prefixed(&self.path, &path.tree)),
            UseTree::Path(path) if path.ident == "super" => {
                let mut module = self.path.clone();
                let mut rest = tree;
                while let UseTree::Path(step) = rest
                    && step.ident == "super"
                {
                    module.pop()?;
                    rest = &step.tree;
                }

                Some(prefixed(&module, rest))
            }
            UseTree::Path(path) if self.is_local(&path.ident) => Some(prefixed(&self.path, tree)),
            UseTree::Name(name) if self.is_local(&name.ident) => Some(prefixed(&self.path, tree)),
            UseTree::Rename(rename) if self.is_local(&rename.ident) => {
                Some(prefixed(&self.path, tree))
            }
            UseTree::Group(group) => {
                let items: Vec<_> = group
                    .items
                    .iter()
                    .filter_map(|item| self.rewrite(item))
                    .collect();

                (!items.is_empty()).then(|| quote!({ #(#items),* }))
            }
            UseTree::Glob(_) => None,
            _ => Some(quote!(#tree)),
        }
    }

    fn is_local(&self, ident: &syn::Ident) -> bool {
        self.locals.contains(&ident.to_string())
    }
}

// prefixed
fn prefixed(module: &[String], rest: &UseTree) -> TokenStream {
    let segments = module.iter().map(|segment| format_ident!("{segment}"));

    quote!(crate #(:: #segments)* :: #rest)
}

// prune
// drop leaves whose binding collides with a reserved name
fn prune(tree: &UseTree, reserved: &BTreeSet<String>) -> Option<UseTree> {
    match tree {
        UseTree::Path(path) => {
            let mut path = path.clone();
            *path.tree = prune(&path.tree, reserved)?;

            Some(UseTree::Path(path))
        }
        UseTree::Name(name) if reserved.contains(&name.ident.to_string()) => None,
        UseTree::Rename(rename) if reserved.contains(&rename.rename.to_string()) => None,
        UseTree::Group(group) => {
            let items: Punctuated<UseTree, syn::Token![,]> = group
                .items
                .iter()
                .filter_map(|item| prune(item, reserved))
                .collect();

            (!items.is_empty()).then(|| {
                UseTree::Group(UseGroup {
                    brace_token: group.brace_token,
                    items,
                })
            })
        }
        _ => Some(tree.clone()),
    }
}

/// Whether an item is compiled only for tests.
#[must_use]
pub fn is_test_only(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("cfg")
            && attr
                .parse_args::<syn::Meta>()
                .is_ok_and(|meta| meta.path().is_ident("test"))
    })
}
