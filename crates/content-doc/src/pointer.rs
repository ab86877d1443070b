//! Text form of a [`Path`], with RFC 6901 escaping.
//!
//! A pointer is `""` for the root, otherwise `/`-separated components where
//! `~` is written `~0` and `/` is written `~1`. Because text cannot tell a
//! numeric key from an index, [`parse_pointer`] turns canonical integers
//! into [`PathStep::Index`], and [`resolve_pointer`] looks at the document
//! to keep numeric keys of existing mappings as keys.

use thiserror::Error;

use crate::document::Document;
use crate::types::{Path, PathStep};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("pointer must be empty or start with '/': {0:?}")]
    Invalid(String),
    #[error("the root path has no parent")]
    NoParent,
}

/// Unescapes a pointer component.
///
/// ```
/// use content_doc::pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, so that "~01" decodes to "~1" and not "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a pointer component.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Check if a component is a canonical non-negative integer: `0`, or digits
/// without a leading zero.
pub fn is_valid_index(component: &str) -> bool {
    let bytes = component.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return false;
    }
    bytes.iter().all(u8::is_ascii_digit)
}

fn components(pointer: &str) -> Result<Option<std::str::Split<'_, char>>, PointerError> {
    if pointer.is_empty() {
        return Ok(None);
    }
    match pointer.strip_prefix('/') {
        Some(rest) => Ok(Some(rest.split('/'))),
        None => Err(PointerError::Invalid(pointer.to_string())),
    }
}

fn index_step(component: &str) -> Option<PathStep> {
    if !is_valid_index(component) {
        return None;
    }
    component.parse().ok().map(PathStep::Index)
}

/// Parse a pointer without looking at any document.
///
/// ```
/// use content_doc::{path, pointer::parse_pointer};
///
/// assert_eq!(parse_pointer("").unwrap(), path![]);
/// assert_eq!(parse_pointer("/hero/trust/0").unwrap(), path!["hero", "trust", 0]);
/// assert!(parse_pointer("hero").is_err());
/// ```
pub fn parse_pointer(pointer: &str) -> Result<Path, PointerError> {
    let Some(parts) = components(pointer)? else {
        return Ok(Vec::new());
    };
    Ok(parts
        .map(|part| index_step(part).unwrap_or_else(|| PathStep::Key(unescape_component(part))))
        .collect())
}

/// Parse a pointer against the shape of `root`.
///
/// Where the existing value at a step is a mapping, the component is a key
/// even if it looks like an integer. Elsewhere the rules of
/// [`parse_pointer`] apply.
pub fn resolve_pointer(root: &Document, pointer: &str) -> Result<Path, PointerError> {
    let Some(parts) = components(pointer)? else {
        return Ok(Vec::new());
    };
    let mut path = Vec::new();
    let mut current = Some(root);
    for part in parts {
        let step = match current {
            Some(Document::Object(_)) => PathStep::Key(unescape_component(part)),
            _ => index_step(part).unwrap_or_else(|| PathStep::Key(unescape_component(part))),
        };
        current = match (&step, current) {
            (PathStep::Key(key), Some(Document::Object(entries))) => entries.get(key.as_str()),
            (PathStep::Index(index), Some(Document::Array(items))) => items.get(*index),
            _ => None,
        };
        path.push(step);
    }
    Ok(path)
}

/// Format a path as a pointer.
///
/// ```
/// use content_doc::{path, pointer::format_pointer};
///
/// assert_eq!(format_pointer(&path![]), "");
/// assert_eq!(format_pointer(&path!["a/b", 1]), "/a~1b/1");
/// ```
pub fn format_pointer(path: &[PathStep]) -> String {
    let mut out = String::new();
    for step in path {
        out.push('/');
        match step {
            PathStep::Key(key) => out.push_str(&escape_component(key)),
            PathStep::Index(index) => out.push_str(&index.to_string()),
        }
    }
    out
}

/// Get the parent path of a given path.
pub fn parent(path: &[PathStep]) -> Result<Path, PointerError> {
    match path.split_last() {
        Some((_, init)) => Ok(init.to_vec()),
        None => Err(PointerError::NoParent),
    }
}

/// Check if `parent` is a strict prefix of `child`.
pub fn is_child(parent: &[PathStep], child: &[PathStep]) -> bool {
    parent.len() < child.len() && child.starts_with(parent)
}
