//! Persistent writes into a [`Document`] by path.
//!
//! Every operation takes the current root by reference and returns a new
//! root. The input is never modified. Containers on the path from the root
//! to the target are copied one level deep; everything else is shared with
//! the input.
//!
//! The kind of each container on the way down is decided by the step used
//! to address into it: a [`PathStep::Index`] makes it a sequence, a
//! [`PathStep::Key`] makes it a mapping. A missing container is created, and
//! an existing value of the other kind is replaced. The lenient functions
//! (`set`, `update`, `add_to_array`, `remove_from_array`) are total. The
//! `try_*` functions report such replacements as [`EditError`] instead.
//!
//! # Example
//!
//! ```
//! use content_doc::{editor, get, path, Document};
//! use serde_json::json;
//!
//! let root = Document::from(json!({"hero": {"trust": [{"label": "A", "value": "1"}]}}));
//! let next = editor::set(&root, &path!["hero", "trust", 0, "value"], "2");
//!
//! assert_eq!(get(&next, &path!["hero", "trust", 0, "value"]), Some(&Document::from("2")));
//! assert_eq!(get(&root, &path!["hero", "trust", 0, "value"]), Some(&Document::from("1")));
//! ```

use std::sync::Arc;

use crate::document::{Document, Kind};
use crate::get::get;
use crate::pointer::format_pointer;
use crate::types::PathStep;
use crate::EditError;

// ── Lenient operations ────────────────────────────────────────────────────

/// How many `Null`s a write past the end of a sequence may pad with. An
/// index further out than this appends at the end instead.
pub const MAX_INDEX_GAP: usize = 1024;

/// The position a write to `index` lands at in a sequence of length `len`.
///
/// ```
/// use content_doc::editor::{slot_index, MAX_INDEX_GAP};
///
/// assert_eq!(slot_index(2, 1), 1);
/// assert_eq!(slot_index(2, 5), 5);
/// assert_eq!(slot_index(2, 2 + MAX_INDEX_GAP + 1), 2);
/// assert_eq!(slot_index(2, usize::MAX), 2);
/// ```
pub fn slot_index(len: usize, index: usize) -> usize {
    match index.checked_sub(len) {
        Some(gap) if gap > MAX_INDEX_GAP => len,
        _ => index,
    }
}

/// Write `value` at `path`.
///
/// An empty path returns `root` unchanged. Writing to an index past the end
/// of a sequence pads the gap with `Null`, up to [`MAX_INDEX_GAP`] of them.
/// See [`slot_index`].
pub fn set(root: &Document, path: &[PathStep], value: impl Into<Document>) -> Document {
    let value = value.into();
    update(root, path, move |_| value)
}

/// Replace the value at `path` with `updater(current)`.
///
/// `current` is `None` when the slot does not exist yet, including when a
/// container on the way down is missing or of the other kind. The updater
/// is not called for an empty path.
pub fn update<F>(root: &Document, path: &[PathStep], updater: F) -> Document
where
    F: FnOnce(Option<&Document>) -> Document,
{
    match path.split_first() {
        None => root.clone(),
        Some((step, rest)) => write_into(Some(root), step, rest, updater),
    }
}

/// Append `item` to the sequence at `path`. An absent or non-sequence value
/// is treated as an empty sequence.
pub fn add_to_array(root: &Document, path: &[PathStep], item: impl Into<Document>) -> Document {
    let item = item.into();
    update(root, path, move |current| {
        let mut items = match current {
            Some(Document::Array(items)) => Arc::clone(items),
            _ => Arc::default(),
        };
        Arc::make_mut(&mut items).push(item);
        Document::Array(items)
    })
}

/// Remove the element at `index` from the sequence at `path`, keeping the
/// order of the rest. An out-of-range index leaves the elements as they
/// are, but the sequence is still written back as a fresh copy.
pub fn remove_from_array(root: &Document, path: &[PathStep], index: usize) -> Document {
    update(root, path, move |current| {
        let items = current.and_then(Document::as_array).unwrap_or(&[]);
        items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| item.clone())
            .collect()
    })
}

/// Rebuild `container` with the value under `step` replaced.
fn write_into<F>(container: Option<&Document>, step: &PathStep, rest: &[PathStep], updater: F) -> Document
where
    F: FnOnce(Option<&Document>) -> Document,
{
    match step {
        PathStep::Index(index) => {
            let existing = match container {
                Some(Document::Array(items)) => Some(items),
                _ => None,
            };
            let slot = slot_index(existing.map_or(0, |items| items.len()), *index);
            let child = descend(existing.and_then(|items| items.get(slot)), rest, updater);
            let mut items = existing.cloned().unwrap_or_default();
            let slots = Arc::make_mut(&mut items);
            if slot < slots.len() {
                slots[slot] = child;
            } else {
                slots.resize(slot, Document::Null);
                slots.push(child);
            }
            Document::Array(items)
        }
        PathStep::Key(key) => {
            let existing = match container {
                Some(Document::Object(entries)) => Some(entries),
                _ => None,
            };
            let child = descend(existing.and_then(|entries| entries.get(key.as_str())), rest, updater);
            let mut entries = existing.cloned().unwrap_or_default();
            Arc::make_mut(&mut entries).insert(key.clone(), child);
            Document::Object(entries)
        }
    }
}

fn descend<F>(current: Option<&Document>, rest: &[PathStep], updater: F) -> Document
where
    F: FnOnce(Option<&Document>) -> Document,
{
    match rest.split_first() {
        None => updater(current),
        Some((step, tail)) => write_into(current, step, tail, updater),
    }
}

// ── Strict operations ─────────────────────────────────────────────────────

/// Check that a lenient write at `path` would not replace an existing value
/// of the wrong container kind, and would not land an index step anywhere
/// but at that index.
///
/// Only the containers on the way down are checked, not the target itself.
/// Missing values and `Null` are fine: a container created there replaces
/// nothing.
pub fn check_path(root: &Document, path: &[PathStep]) -> Result<(), EditError> {
    let mut current = Some(root);
    for (depth, step) in path.iter().enumerate() {
        current = match (step, current) {
            (PathStep::Index(index), Some(Document::Array(items))) => {
                check_gap(path, depth, *index, items.len())?;
                items.get(*index)
            }
            (PathStep::Index(index), None | Some(Document::Null)) => {
                check_gap(path, depth, *index, 0)?;
                None
            }
            (PathStep::Key(key), Some(Document::Object(entries))) => entries.get(key.as_str()),
            (PathStep::Key(_), None | Some(Document::Null)) => None,
            (_, Some(other)) => {
                return Err(EditError::KindMismatch {
                    pointer: format_pointer(&path[..depth]),
                    expected: step.container_kind(),
                    found: other.kind(),
                })
            }
        };
    }
    Ok(())
}

fn check_gap(path: &[PathStep], depth: usize, index: usize, len: usize) -> Result<(), EditError> {
    if slot_index(len, index) == index {
        return Ok(());
    }
    Err(EditError::IndexTooFar {
        pointer: format_pointer(&path[..depth]),
        index,
        len,
    })
}

fn check_write(root: &Document, path: &[PathStep]) -> Result<(), EditError> {
    if path.is_empty() {
        return Err(EditError::EmptyPath);
    }
    check_path(root, path)
}

fn check_array_target(root: &Document, path: &[PathStep]) -> Result<(), EditError> {
    check_write(root, path)?;
    match get(root, path) {
        None | Some(Document::Null) | Some(Document::Array(_)) => Ok(()),
        Some(other) => Err(EditError::KindMismatch {
            pointer: format_pointer(path),
            expected: Kind::Array,
            found: other.kind(),
        }),
    }
}

/// [`set`], failing instead of coercing.
pub fn try_set(root: &Document, path: &[PathStep], value: impl Into<Document>) -> Result<Document, EditError> {
    check_write(root, path)?;
    Ok(set(root, path, value))
}

/// [`update`], failing instead of coercing.
pub fn try_update<F>(root: &Document, path: &[PathStep], updater: F) -> Result<Document, EditError>
where
    F: FnOnce(Option<&Document>) -> Document,
{
    check_write(root, path)?;
    Ok(update(root, path, updater))
}

/// [`add_to_array`], failing if the target exists and is not a sequence.
pub fn try_add_to_array(
    root: &Document,
    path: &[PathStep],
    item: impl Into<Document>,
) -> Result<Document, EditError> {
    check_array_target(root, path)?;
    Ok(add_to_array(root, path, item))
}

/// [`remove_from_array`], failing if the target exists and is not a
/// sequence. An out-of-range index is still not an error.
pub fn try_remove_from_array(root: &Document, path: &[PathStep], index: usize) -> Result<Document, EditError> {
    check_array_target(root, path)?;
    Ok(remove_from_array(root, path, index))
}
