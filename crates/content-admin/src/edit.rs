//! Serializable edit operations.
//!
//! Each [`Edit`] is one of the three writes the admin form performs. The
//! JSON form is tagged by `op`:
//!
//! ```json
//! {"op": "set", "path": ["hero", "title"], "value": "Welcome"}
//! {"op": "push", "path": ["services"], "item": {"name": "Cleaning"}}
//! {"op": "remove", "path": ["services"], "index": 2}
//! ```

use content_doc::editor::{self, try_add_to_array, try_remove_from_array, try_set};
use content_doc::{format_pointer, Document, EditError, Path, PathStep};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// How writes treat values of the wrong container kind on the way down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    /// Replace them silently.
    #[default]
    Lenient,
    /// Reject the edit with [`EditError`].
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    Set { path: Path, value: Document },
    Push { path: Path, item: Document },
    Remove { path: Path, index: usize },
}

impl Edit {
    pub fn set(path: impl Into<Path>, value: impl Into<Document>) -> Self {
        Edit::Set {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn push(path: impl Into<Path>, item: impl Into<Document>) -> Self {
        Edit::Push {
            path: path.into(),
            item: item.into(),
        }
    }

    pub fn remove(path: impl Into<Path>, index: usize) -> Self {
        Edit::Remove {
            path: path.into(),
            index,
        }
    }

    /// The operation name, as it appears in the `op` tag.
    pub fn op_name(&self) -> &'static str {
        match self {
            Edit::Set { .. } => "set",
            Edit::Push { .. } => "push",
            Edit::Remove { .. } => "remove",
        }
    }

    pub fn path(&self) -> &[PathStep] {
        match self {
            Edit::Set { path, .. } | Edit::Push { path, .. } | Edit::Remove { path, .. } => path.as_slice(),
        }
    }

    /// Apply this edit to `root`, returning the new root.
    ///
    /// In [`EditMode::Lenient`] this never fails.
    pub fn apply(&self, root: &Document, mode: EditMode) -> Result<Document, EditError> {
        match (self, mode) {
            (Edit::Set { path, value }, EditMode::Lenient) => Ok(editor::set(root, path, value.clone())),
            (Edit::Set { path, value }, EditMode::Strict) => try_set(root, path, value.clone()),
            (Edit::Push { path, item }, EditMode::Lenient) => Ok(editor::add_to_array(root, path, item.clone())),
            (Edit::Push { path, item }, EditMode::Strict) => try_add_to_array(root, path, item.clone()),
            (Edit::Remove { path, index }, EditMode::Lenient) => {
                Ok(editor::remove_from_array(root, path, *index))
            }
            (Edit::Remove { path, index }, EditMode::Strict) => try_remove_from_array(root, path, *index),
        }
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::Remove { path, index } => write!(f, "remove {} at {index}", format_pointer(path)),
            _ => write!(f, "{} {}", self.op_name(), format_pointer(self.path())),
        }
    }
}

/// Apply `edits` in order.
///
/// Stops at the first failure; `root` is untouched either way.
pub fn apply_edits(root: &Document, edits: &[Edit], mode: EditMode) -> Result<Document, EditError> {
    edits
        .iter()
        .try_fold(root.clone(), |doc, edit| edit.apply(&doc, mode))
}

/// Parse either a single edit object or an array of edits.
pub fn parse_edits(json: &str) -> Result<Vec<Edit>, serde_json::Error> {
    let raw: Value = serde_json::from_str(json)?;
    match raw {
        Value::Array(_) => serde_json::from_value(raw),
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_doc::{path, Kind};
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::from(value)
    }

    #[test]
    fn decode_all_ops() {
        let edits = parse_edits(
            r#"[
                {"op": "set", "path": ["hero", "title"], "value": "Welcome"},
                {"op": "push", "path": ["services"], "item": {"name": "Cleaning"}},
                {"op": "remove", "path": ["services"], "index": 0}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            edits,
            vec![
                Edit::set(path!["hero", "title"], "Welcome"),
                Edit::push(path!["services"], doc(json!({"name": "Cleaning"}))),
                Edit::remove(path!["services"], 0),
            ]
        );
    }

    #[test]
    fn decode_single_object() {
        let edits = parse_edits(r#"{"op": "set", "path": ["a", 0], "value": null}"#).unwrap();
        assert_eq!(edits, vec![Edit::set(path!["a", 0], Document::Null)]);
    }

    #[test]
    fn decode_rejects_unknown_op() {
        assert!(parse_edits(r#"{"op": "move", "path": ["a"]}"#).is_err());
        assert!(parse_edits(r#"[{"op": "remove", "path": ["a"], "index": -1}]"#).is_err());
    }

    #[test]
    fn encode_set() {
        let edit = Edit::set(path!["hero", "trust", 0], doc(json!({"label": "A"})));
        assert_eq!(
            serde_json::to_value(&edit).unwrap(),
            json!({"op": "set", "path": ["hero", "trust", 0], "value": {"label": "A"}})
        );
    }

    #[test]
    fn display() {
        assert_eq!(Edit::set(path!["hero", "title"], 1).to_string(), "set /hero/title");
        assert_eq!(Edit::push(path!["services"], 1).to_string(), "push /services");
        assert_eq!(Edit::remove(path!["services"], 2).to_string(), "remove /services at 2");
    }

    #[test]
    fn apply_sequence() {
        let root = doc(json!({"services": [{"name": "A"}]}));
        let edits = [
            Edit::push(path!["services"], doc(json!({"name": "B"}))),
            Edit::set(path!["services", 1, "name"], "C"),
            Edit::remove(path!["services"], 0),
        ];
        let out = apply_edits(&root, &edits, EditMode::Lenient).unwrap();
        assert_eq!(Value::from(out), json!({"services": [{"name": "C"}]}));
        assert_eq!(Value::from(root), json!({"services": [{"name": "A"}]}));
    }

    #[test]
    fn strict_mode_aborts_on_first_failure() {
        let root = doc(json!({"title": "x"}));
        let edits = [
            Edit::set(path!["subtitle"], "ok"),
            Edit::push(path!["title"], "bad"),
            Edit::set(path!["never"], "reached"),
        ];
        let err = apply_edits(&root, &edits, EditMode::Strict).unwrap_err();
        assert_eq!(
            err,
            EditError::KindMismatch {
                pointer: "/title".to_string(),
                expected: Kind::Array,
                found: Kind::String,
            }
        );

        let out = apply_edits(&root, &edits, EditMode::Lenient).unwrap();
        assert_eq!(
            Value::from(out),
            json!({"title": ["bad"], "subtitle": "ok", "never": "reached"})
        );
    }
}
