//! The state container behind the admin content form.
//!
//! An [`EditSession`] owns the current home content document. Every edit
//! produces a new root through [`content_doc::editor`] and replaces the old
//! one wholesale, so a snapshot taken with [`EditSession::document`] before
//! an edit stays valid after it.

use content_doc::editor::{self, try_update};
use content_doc::{format_pointer, Document, EditError, PathStep};
use tracing::{debug, info, warn};

use crate::edit::{apply_edits, Edit, EditMode};

/// Options for an [`EditSession`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub mode: EditMode,
    /// Pretty-print the JSON produced by [`EditSession::to_json`].
    pub pretty: bool,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    root: Document,
    options: SessionOptions,
    revision: u64,
    saved_revision: u64,
}

impl EditSession {
    /// Start a session from the JSON text the content endpoint returned.
    ///
    /// Text that does not parse, or whose top level is not an object, gives
    /// an empty document.
    pub fn load(json: &str, options: SessionOptions) -> Self {
        let root = match serde_json::from_str::<Document>(json) {
            Ok(doc) if doc.is_object() => doc,
            Ok(doc) => {
                warn!(found = %doc.kind(), "home content is not an object, starting empty");
                Document::empty_object()
            }
            Err(err) => {
                warn!(error = %err, "failed to parse home content, starting empty");
                Document::empty_object()
            }
        };
        Self::from_document(root, options)
    }

    pub fn from_document(root: Document, options: SessionOptions) -> Self {
        Self {
            root,
            options,
            revision: 0,
            saved_revision: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.root
    }

    pub fn into_document(self) -> Document {
        self.root
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn get(&self, path: &[PathStep]) -> Option<&Document> {
        content_doc::get(&self.root, path)
    }

    /// Number of edits applied since the session started.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether there are edits that have not been saved.
    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    pub fn set(&mut self, path: &[PathStep], value: impl Into<Document>) -> Result<(), EditError> {
        self.apply(&Edit::set(path.to_vec(), value))
    }

    pub fn update<F>(&mut self, path: &[PathStep], updater: F) -> Result<(), EditError>
    where
        F: FnOnce(Option<&Document>) -> Document,
    {
        let next = match self.options.mode {
            EditMode::Lenient => editor::update(&self.root, path, updater),
            EditMode::Strict => try_update(&self.root, path, updater)?,
        };
        self.commit("update", path, next);
        Ok(())
    }

    pub fn add_to_array(&mut self, path: &[PathStep], item: impl Into<Document>) -> Result<(), EditError> {
        self.apply(&Edit::push(path.to_vec(), item))
    }

    pub fn remove_from_array(&mut self, path: &[PathStep], index: usize) -> Result<(), EditError> {
        self.apply(&Edit::remove(path.to_vec(), index))
    }

    /// Store the URL returned by the image upload endpoint at `path`.
    pub fn splice_upload(&mut self, path: &[PathStep], url: &str) -> Result<(), EditError> {
        self.apply(&Edit::set(path.to_vec(), url))
    }

    pub fn apply(&mut self, edit: &Edit) -> Result<(), EditError> {
        let next = edit.apply(&self.root, self.options.mode)?;
        self.commit(edit.op_name(), edit.path(), next);
        Ok(())
    }

    /// Apply all `edits` or none of them.
    pub fn apply_all(&mut self, edits: &[Edit]) -> Result<(), EditError> {
        let next = apply_edits(&self.root, edits, self.options.mode)?;
        self.root = next;
        self.revision += edits.len() as u64;
        debug!(count = edits.len(), revision = self.revision, "applied edit batch");
        Ok(())
    }

    fn commit(&mut self, op: &str, path: &[PathStep], next: Document) {
        self.root = next;
        self.revision += 1;
        debug!(op, pointer = %format_pointer(path), revision = self.revision, "applied edit");
    }

    /// The request body for a save.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        if self.options.pretty {
            serde_json::to_string_pretty(&self.root)
        } else {
            serde_json::to_string(&self.root)
        }
    }

    /// Record that the current document was saved.
    pub fn mark_saved(&mut self) {
        self.saved_revision = self.revision;
        info!(revision = self.revision, "home content saved");
    }

    /// Replace the document with the one the server stored, after a
    /// successful save.
    ///
    /// On a parse error the session is left as it was.
    pub fn replace_saved(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let saved: Document = serde_json::from_str(json)?;
        self.root = saved;
        self.saved_revision = self.revision;
        info!(revision = self.revision, "home content replaced by saved copy");
        Ok(())
    }
}
