//! Persistent, path-addressed editing of nested content documents.
//!
//! A [`Document`] is a JSON-compatible tree whose containers are shared
//! between versions. A [`Path`] is a list of [`PathStep`]s, each either a
//! mapping key or a sequence index. The [`editor`] functions take a root
//! and a path and return a new root, leaving the old one intact, which lets
//! a form bind every input to a path instead of a hand-written setter.
//!
//! # Example
//!
//! ```
//! use content_doc::{editor, get, path, Document};
//! use serde_json::json;
//!
//! let home = Document::from(json!({"services": [{"name": "Cleaning"}]}));
//!
//! let home = editor::add_to_array(&home, &path!["services"], Document::from(json!({"name": "Whitening"})));
//! let home = editor::set(&home, &path!["services", 0, "name"], "Hygiene");
//! let home = editor::remove_from_array(&home, &path!["services"], 1);
//!
//! assert_eq!(home.to_string(), r#"{"services":[{"name":"Hygiene"}]}"#);
//! assert_eq!(get(&home, &path!["services", 0, "name"]).and_then(Document::as_str), Some("Hygiene"));
//! ```

use thiserror::Error;

pub mod document;
pub use document::{Document, Kind, Mapping, Sequence};

pub mod types;
pub use types::{Path, PathStep};

pub mod get;
pub use get::{get, get_array};

pub mod pointer;
pub use pointer::{format_pointer, parse_pointer, resolve_pointer, PointerError};

pub mod editor;
pub use editor::{add_to_array, remove_from_array, set, update};

/// Errors from the strict (`try_*`) editing operations.
///
/// The lenient operations never fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("cannot edit the root through an empty path")]
    EmptyPath,
    #[error("expected {expected} at {pointer:?}, found {found}")]
    KindMismatch {
        pointer: String,
        expected: Kind,
        found: Kind,
    },
    #[error("index {index} is too far past the end of the sequence at {pointer:?} (length {len})")]
    IndexTooFar {
        pointer: String,
        index: usize,
        len: usize,
    },
}
