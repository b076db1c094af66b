//! Build-script front end of kson: loads `kson.toml`, runs a generation pass over the crate and
//! writes the generated files to `OUT_DIR`.

mod config;
mod error;
mod macros;

pub use config::{CONFIG_FILE, Config, GranularityConfig};
pub use error::BuildError;
pub use kson_codegen::{Diagnostic, Granularity};

use kson_codegen::{Options, Output};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Cfg set on crates built in aggregate granularity.
pub const AGGREGATE_CFG: &str = "kson_aggregate";

///
/// Builder
///

#[derive(Clone, Debug)]
pub struct Builder {
    manifest_dir: PathBuf,
    out_dir: PathBuf,
    options: Options,
    config_file: Option<PathBuf>,
}

impl Builder {
    /// Configure from the environment cargo gives build scripts.
    pub fn from_env() -> Result<Self, BuildError> {
        let manifest_dir = env::var_os("CARGO_MANIFEST_DIR")
            .ok_or(BuildError::Env("CARGO_MANIFEST_DIR"))?;
        let out_dir = env::var_os("OUT_DIR").ok_or(BuildError::Env("OUT_DIR"))?;

        Self::new(manifest_dir, out_dir)
    }

    /// Configure for the crate in `manifest_dir`, reading its `kson.toml` if present.
    pub fn new(
        manifest_dir: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
    ) -> Result<Self, BuildError> {
        let manifest_dir = manifest_dir.into();
        let config = Config::load(&manifest_dir)?;

        let mut options = Options {
            granularity: config.granularity.into(),
            ..Options::default()
        };
        if let Some(root) = config.root {
            options.root = root;
        }
        if let Some(module) = config.module {
            options.module = module;
        }

        let config_file = Some(manifest_dir.join(CONFIG_FILE)).filter(|path| path.is_file());

        Ok(Self {
            manifest_dir,
            out_dir: out_dir.into(),
            options,
            config_file,
        })
    }

    #[must_use]
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.options.granularity = granularity;
        self
    }

    /// Crate root file, relative to the manifest directory.
    #[must_use]
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.options.root = root.into();
        self
    }

    /// Wrapper module of the aggregate file.
    #[must_use]
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.options.module = module.into();
        self
    }

    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Run the generation pass and write changed files, without printing anything.
    pub fn generate(&self) -> Result<Report, BuildError> {
        let options = Options {
            root: self.manifest_dir.join(&self.options.root),
            ..self.options.clone()
        };

        let output = kson_codegen::run(&options)?;
        let mut report = Report::default();

        for file in &output.files {
            let path = self.out_dir.join(&file.name);

            if write_if_changed(&path, &file.contents)? {
                tracing::debug!(path = %path.display(), "generated file written");
                report.written.push(path);
            } else {
                tracing::trace!(path = %path.display(), "generated file unchanged");
                report.unchanged.push(path);
            }
        }

        report.directives = self.directives(&output);
        report.diagnostics = output.diagnostics;

        Ok(report)
    }

    /// Generate, then print the cargo directives.
    pub fn run(&self) -> Result<Report, BuildError> {
        let report = self.generate()?;
        for directive in &report.directives {
            println!("{directive}");
        }

        Ok(report)
    }

    fn directives(&self, output: &Output) -> Vec<String> {
        let mut directives = vec!["cargo:rerun-if-changed=build.rs".to_string()];

        if let Some(config) = &self.config_file {
            directives.push(format!("cargo:rerun-if-changed={}", config.display()));
        }
        directives.extend(
            output
                .sources
                .iter()
                .map(|source| format!("cargo:rerun-if-changed={}", source.display())),
        );

        directives.push(format!("cargo:rustc-check-cfg=cfg({AGGREGATE_CFG})"));
        if self.options.granularity == Granularity::Aggregate {
            directives.push(format!("cargo:rustc-cfg={AGGREGATE_CFG}"));
        }

        directives.extend(
            output
                .diagnostics
                .iter()
                .map(|diagnostic| format!("cargo:warning={}", diagnostic.message)),
        );

        directives
    }
}

///
/// Report
///

#[derive(Debug, Default)]
pub struct Report {
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
    pub directives: Vec<String>,
}

// write_if_changed
// keeps the file's mtime when the contents are identical
fn write_if_changed(path: &Path, contents: &str) -> Result<bool, BuildError> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == contents) {
        return Ok(false);
    }

    fs::write(path, contents).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(true)
}
