//! One generation pass: discovery, validation, synthesis and rendering of output files.

use crate::{
    diagnostic::Diagnostic,
    discover::{Discovery, FactoryTarget},
    error::CodegenError,
    model::RecordDescriptor,
    naming::{AGGREGATE_FACTORY, AGGREGATE_FILE, factory_file, factory_type},
    scope::ModuleScope,
    synth::{FactoryUnit, GeneratedAdapterUnit},
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Display},
    path::PathBuf,
    str::FromStr,
};

const HEADER: &str = "// @generated by kson-codegen, do not edit\n";

///
/// Granularity
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Granularity {
    /// Every adapter plus the fixed factory in one file.
    Aggregate,

    /// Adapters are emitted next to their records by the derive.
    #[default]
    PerType,
}

impl Granularity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aggregate => "aggregate",
            Self::PerType => "per-type",
        }
    }
}

impl Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aggregate" => Ok(Self::Aggregate),
            "per-type" => Ok(Self::PerType),
            other => Err(format!(
                "unknown granularity '{other}', expected 'aggregate' or 'per-type'"
            )),
        }
    }
}

///
/// Options
///

#[derive(Clone, Debug)]
pub struct Options {
    pub granularity: Granularity,
    pub root: PathBuf,
    pub module: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            root: PathBuf::from("src/lib.rs"),
            module: "kson_generated".to_string(),
        }
    }
}

///
/// GeneratedFile
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedFile {
    pub name: String,
    pub contents: String,
}

impl GeneratedFile {
    fn new(name: impl Into<String>, tokens: &TokenStream) -> Self {
        Self {
            name: name.into(),
            contents: format!("{HEADER}{tokens}\n"),
        }
    }
}

///
/// Output
///

#[derive(Debug, Default)]
pub struct Output {
    pub files: Vec<GeneratedFile>,
    pub diagnostics: Vec<Diagnostic>,

    /// Every source file the pass read.
    pub sources: Vec<PathBuf>,
}

impl Output {
    #[must_use]
    pub fn file(&self, name: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.name == name)
    }
}

/// Discover the crate at `options.root` and generate its output files.
pub fn run(options: &Options) -> Result<Output, CodegenError> {
    let discovery = Discovery::from_root(&options.root)?;

    generate(discovery, options)
}

/// Generate output files for an already completed discovery.
pub fn generate(discovery: Discovery, options: &Options) -> Result<Output, CodegenError> {
    let records = discovery
        .records
        .iter()
        .map(|found| {
            RecordDescriptor::from_derive_input(&found.input)
                .map(|record| record.in_module(found.module.clone()))
                .map_err(|source| CodegenError::Record {
                    record: format!("{}::{}", found.module.join("::"), found.input.ident),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut output = Output {
        sources: discovery.files.clone(),
        ..Output::default()
    };

    match discovery.factories.as_slice() {
        [] => {
            if options.granularity == Granularity::PerType && !records.is_empty() {
                output.diagnostics.push(Diagnostic::warning(format!(
                    "no type derives KsonFactory, the {} generated adapter(s) are not reachable through a factory",
                    records.len()
                )));
            }
        }
        [target] => output.files.push(designated_factory(target, &records)),
        targets => {
            return Err(CodegenError::MultipleFactoryTargets(
                targets
                    .iter()
                    .map(FactoryTarget::display_path)
                    .collect::<Vec<_>>()
                    .join(", "),
            ));
        }
    }

    if options.granularity == Granularity::Aggregate {
        output
            .files
            .push(aggregate(&records, &discovery.scopes, &options.module));
    }

    tracing::debug!(
        records = records.len(),
        files = output.files.len(),
        granularity = %options.granularity,
        "generation pass complete"
    );

    Ok(output)
}

// designated_factory
fn designated_factory(target: &FactoryTarget, records: &[RecordDescriptor]) -> GeneratedFile {
    let factory = FactoryUnit::new(factory_type(&target.ident), records);
    tracing::debug!(marker = %target.display_path(), "generating designated factory");

    GeneratedFile::new(factory_file(&target.ident), &quote!(#factory))
}

///
/// ModuleNode
///
/// One module of the mirrored tree in the aggregate file.
///

#[derive(Default)]
struct ModuleNode<'a> {
    records: Vec<&'a RecordDescriptor>,
    children: BTreeMap<String, ModuleNode<'a>>,
}

impl<'a> ModuleNode<'a> {
    fn insert(&mut self, record: &'a RecordDescriptor) {
        let mut node = self;
        for segment in &record.module {
            node = node.children.entry(segment.clone()).or_default();
        }

        node.records.push(record);
    }

    fn render(&self, path: &[String], scopes: &BTreeMap<Vec<String>, ModuleScope>) -> TokenStream {
        let mut tokens = TokenStream::new();

        // modules without records only re-export, for paths written through them
        if let Some(scope) = scopes.get(path) {
            let glob = scope.glob_import();
            let uses = if self.records.is_empty() {
                Vec::new()
            } else {
                let reserved: BTreeSet<String> = self.children.keys().cloned().collect();
                scope.absolute_uses(&reserved)
            };

            tokens.extend(quote! {
                #(#uses)*
                #glob
            });
        }

        for record in &self.records {
            tracing::debug!(record = %record.display_path(), "generating adapter unit");
            let unit = GeneratedAdapterUnit::new(record).with_vis(syn::parse_quote!(pub));

            tokens.extend(quote!(#unit));
        }

        for (name, child) in &self.children {
            let mut child_path = path.to_vec();
            child_path.push(name.clone());

            let ident = format_ident!("{name}");
            let body = child.render(&child_path, scopes);

            tokens.extend(quote! {
                pub(crate) mod #ident {
                    #body
                }
            });
        }

        tokens
    }
}

// aggregate
// mirrors the module tree of the records below a wrapper module
fn aggregate(
    records: &[RecordDescriptor],
    scopes: &BTreeMap<Vec<String>, ModuleScope>,
    module: &str,
) -> GeneratedFile {
    let mut root = ModuleNode::default();
    for record in records {
        root.insert(record);
    }

    let wrapper = format_ident!("{module}");
    let body = root.render(&[], scopes);
    let factory = FactoryUnit::new(format_ident!("{AGGREGATE_FACTORY}"), records);

    let tokens = quote! {
        #[allow(unused_imports, clippy::all, clippy::pedantic, clippy::nursery)]
        pub mod #wrapper {
            #body
            #factory
        }
    };

    GeneratedFile::new(AGGREGATE_FILE, &tokens)
}
