//! Error types for field construction

use thiserror::Error;

/// Result type for form field operations
pub type Result<T> = std::result::Result<T, FormsError>;

/// Errors that can occur while building, updating, or locating fields
#[derive(Debug, Error)]
pub enum FormsError {
    /// The requested field kind is not one of the supported kinds
    #[error("field type not supported: {kind}")]
    UnsupportedKind { kind: String },

    /// The request carried no kind at all
    #[error("field type missing from request")]
    MissingKind,

    /// A select field was requested with neither choices nor a value
    #[error("select field '{id}' has no choices and no value")]
    EmptyChoices { id: String },

    /// A wrapper tag that is not a plain element name
    #[error("invalid wrapper element: {tag}")]
    InvalidWrapperElement { tag: String },

    /// No widget with this identifier is on the surface
    #[error("widget not found: {id}")]
    WidgetNotFound { id: String },

    /// An update was requested without an identifier to locate the widget
    #[error("field request has no identifier")]
    MissingIdentifier,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
