//! Front-end errors.

use std::path::PathBuf;

use crate::type_expr::ParseError;

/// Everything that can stop a manifest from turning into generated code.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid type expression `{expr}`: {source}")]
    TypeExpr { expr: String, source: ParseError },

    #[error("unknown type `{name}`")]
    UnknownType { name: String },

    #[error("unknown package qualifier `{qualifier}`")]
    UnknownQualifier { qualifier: String },

    #[error("type `{name}` is declared more than once")]
    Duplicate { name: String },

    #[error("type `{name}` must declare exactly one of `fields` or `underlying`")]
    AmbiguousDecl { name: String },
}
