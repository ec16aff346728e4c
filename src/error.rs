//! # Error Handling
//!
//! This module defines the centralized error type for `vrepo`. It uses the
//! `thiserror` library to build a single `Error` enum covering every failure
//! mode of the repository, the compiled locator and the URI dispatcher.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all possible errors. Lookup failures carry the
//!   normalized repository path, dispatcher failures carry the scheme or URI
//!   that was rejected.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! All errors are returned synchronously to the immediate caller. Nothing in
//! the library retries; a failed lazy load or factory call is simply attempted
//! again on the next request.

use thiserror::Error;

/// Main error type for vrepo operations
#[derive(Error, Debug)]
pub enum Error {
    /// A literal path selector has no corresponding entry.
    #[error("The resource \"{path}\" was not found")]
    ResourceNotFound { path: String },

    /// A directory-only operation was applied to a file.
    #[error("The resource \"{path}\" is not a directory")]
    NotADirectory { path: String },

    /// Malformed input passed to a registration or binding call.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A URI that is not of the form `scheme:///absolute/path`.
    #[error("Invalid URI \"{uri}\": {message}")]
    InvalidUri { uri: String, message: String },

    /// No locator is registered for the scheme of a URI.
    #[error("The scheme \"{scheme}\" is not supported")]
    SchemeNotSupported { scheme: String },

    /// A registered locator factory failed to produce a locator.
    #[error("The locator factory for scheme \"{scheme}\" failed: {message}")]
    LocatorFactory { scheme: String, message: String },

    /// The destination of an index dump cannot be used.
    #[error("Invalid dump target \"{path}\": {message}")]
    InvalidTarget { path: String, message: String },

    /// A dump directory that does not hold a complete compiled index.
    #[error("The dump at \"{path}\" is invalid: {message}")]
    InvalidIndex { path: String, message: String },

    /// An error occurred while parsing a repository manifest.
    ///
    /// Optionally carries a hint about how to fix the manifest.
    #[error("Manifest parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the manifest
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON encoding error from reading or writing an index document.
    #[error("Index encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

impl Error {
    pub(crate) fn not_found(path: &str) -> Self {
        Error::ResourceNotFound {
            path: path.to_string(),
        }
    }

    pub(crate) fn not_a_directory(path: &str) -> Self {
        Error::NotADirectory {
            path: path.to_string(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
