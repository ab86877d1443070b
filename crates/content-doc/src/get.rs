use crate::document::Document;
use crate::types::PathStep;

/// Get a value from a document by path.
///
/// Returns `None` if a key is missing, an index is out of range, or a step
/// does not match the kind of container it meets. Nothing is coerced.
pub fn get<'a>(root: &'a Document, path: &[PathStep]) -> Option<&'a Document> {
    let mut current = root;
    for step in path {
        current = match (step, current) {
            (PathStep::Key(key), Document::Object(entries)) => entries.get(key.as_str())?,
            (PathStep::Index(index), Document::Array(items)) => items.get(*index)?,
            _ => return None,
        };
    }
    Some(current)
}

/// The sequence at `path`, or an empty slice when the value is absent or
/// not a sequence.
pub fn get_array<'a>(root: &'a Document, path: &[PathStep]) -> &'a [Document] {
    get(root, path).and_then(Document::as_array).unwrap_or(&[])
}
