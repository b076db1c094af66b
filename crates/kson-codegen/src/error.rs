use std::{io, path::PathBuf};
use thiserror::Error as ThisError;

///
/// CodegenError
///
/// Fatal failures of a generation pass.
///

#[derive(Debug, ThisError)]
pub enum CodegenError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    #[error("invalid record '{record}': {source}")]
    Record {
        record: String,
        #[source]
        source: darling::Error,
    },

    #[error("more than one type derives KsonFactory: {0}")]
    MultipleFactoryTargets(String),

    #[error("file for module '{module}' not found, looked for {candidates}")]
    ModuleNotFound { module: String, candidates: String },
}
