//! Core logic of the `content-edit` binary.
//!
//! - `apply_edits_json` applies an edit list to a document
//! - `lookup` reads one value by pointer

use content_doc::{get, resolve_pointer, Document};
use tracing_subscriber::EnvFilter;

use crate::edit::{apply_edits, parse_edits};
use crate::session::SessionOptions;
use crate::AdminError;

fn render(doc: &Document, pretty: bool) -> Result<String, AdminError> {
    let out = if pretty {
        serde_json::to_string_pretty(doc)?
    } else {
        serde_json::to_string(doc)?
    };
    Ok(out)
}

/// Apply edits to a document.
///
/// `doc_json`: the document as a JSON string.
/// `edits_json`: one edit object or an array of them.
pub fn apply_edits_json(doc_json: &str, edits_json: &str, options: SessionOptions) -> Result<String, AdminError> {
    let doc: Document = serde_json::from_str(doc_json)?;
    let edits = parse_edits(edits_json)?;
    let result = apply_edits(&doc, &edits, options.mode)?;
    tracing::debug!(count = edits.len(), "applied edits");
    render(&result, options.pretty)
}

/// Look up the value at `pointer`. Numeric components address mapping keys
/// where the document has a mapping, sequence slots otherwise.
pub fn lookup(doc_json: &str, pointer: &str, pretty: bool) -> Result<String, AdminError> {
    let doc: Document = serde_json::from_str(doc_json)?;
    let path = resolve_pointer(&doc, pointer)?;
    let value = get(&doc, &path).ok_or_else(|| AdminError::NotFound(pointer.to_string()))?;
    render(value, pretty)
}

/// Install a stderr `fmt` subscriber. `directives` overrides `RUST_LOG`;
/// with neither, only warnings are shown.
pub fn init_tracing(directives: Option<&str>) {
    let filter = match directives {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
