//! Error types for skim-core

use crate::document::{Document, Shape};
use thiserror::Error;

/// Result type alias using skim-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Every condition that ends an extraction run
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the input stream failed
    #[error("failed to read manifests: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not well-formed YAML
    #[error("failed to decode manifest: {0}")]
    Syntax(#[from] serde_yaml_ng::Error),

    /// A document lacks a string-typed `apiVersion` or `kind`
    #[error("{message}, manifest: {document}")]
    MalformedDocument { message: String, document: Document },

    /// A recognized kind has a field of the wrong shape
    #[error("malformed field {field}: expected {expected}, found {found}, in: {context}")]
    MalformedField {
        field: String,
        expected: Shape,
        found: Shape,
        context: Box<Document>,
    },

    /// No extraction rule matches the resource kind
    #[error("unrecognized resource kind {gvk}, manifest: {document}")]
    UnrecognizedKind { gvk: String, document: Document },

    /// A kind alias points at an identifier without a built-in rule
    #[error("cannot alias {alias} to {target}: {target} has no built-in extraction rule")]
    UnknownAliasTarget { alias: String, target: String },

    /// The run was cancelled between documents
    #[error("extraction cancelled after {documents} document(s)")]
    Cancelled { documents: usize },
}

impl Error {
    /// Create a malformed document error
    pub fn malformed_document(message: impl Into<String>, document: Document) -> Self {
        Self::MalformedDocument {
            message: message.into(),
            document,
        }
    }

    /// Create a malformed field error
    pub fn malformed_field(
        field: impl Into<String>,
        expected: Shape,
        found: Shape,
        context: Document,
    ) -> Self {
        Self::MalformedField {
            field: field.into(),
            expected,
            found,
            context: Box::new(context),
        }
    }

    /// Create an unrecognized kind error
    pub fn unrecognized_kind(gvk: impl Into<String>, document: Document) -> Self {
        Self::UnrecognizedKind {
            gvk: gvk.into(),
            document,
        }
    }

    /// Whether this is the recoverable unrecognized-kind condition
    pub fn is_unrecognized_kind(&self) -> bool {
        matches!(self, Self::UnrecognizedKind { .. })
    }

    /// Whether this is a malformed document or malformed field condition
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedDocument { .. } | Self::MalformedField { .. }
        )
    }

    /// The resource-kind identifier this error refers to, if any
    pub fn gvk(&self) -> Option<&str> {
        match self {
            Self::UnrecognizedKind { gvk, .. } => Some(gvk),
            Self::UnknownAliasTarget { alias, .. } => Some(alias),
            _ => None,
        }
    }
}
