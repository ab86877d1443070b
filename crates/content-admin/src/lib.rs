//! Admin-side editing of the site's home content document.
//!
//! - [`edit`]: serializable set/push/remove operations
//! - [`session`]: the state container the content form edits through
//! - [`cli`]: logic behind the `content-edit` binary
//!
//! All document manipulation goes through [`content_doc`].

use content_doc::{EditError, PointerError};
use thiserror::Error;

pub mod cli;
pub mod edit;
pub mod session;

pub use edit::{apply_edits, parse_edits, Edit, EditMode};
pub use session::{EditSession, SessionOptions};

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Pointer(#[from] PointerError),
    #[error("no value at {0:?}")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("usage: {0}")]
    Usage(&'static str),
}
