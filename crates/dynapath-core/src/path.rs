//! Composite document/node path.
//!
//! Canonical form: `doc/seg/...:node/seg/...`. Document segments name folders
//! down to a single document; node segments are the exact content of outline
//! nodes from the document root downwards.

use std::convert::Infallible;
use std::fmt;
use std::ops::{Div, DivAssign};
use std::str::FromStr;

use serde_json::Value;

use crate::error::PathError;

const SEPARATOR: char = '/';
const NODE_DELIMITER: char = ':';

const SEGMENTS_EXPECTED: &str = "a string or a list of strings";

/// Accepted shapes for building or extending a `DynaPath`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSource {
    /// Slash-delimited text, split after trimming outer separators.
    Text(String),
    /// Pre-split segments, taken verbatim.
    Segments(Vec<String>),
    /// Another path; contributes both of its segment sequences.
    Path(DynaPath),
}

impl PathSource {
    fn is_blank(&self) -> bool {
        match self {
            PathSource::Text(text) => text.is_empty(),
            PathSource::Segments(segments) => segments.is_empty(),
            PathSource::Path(_) => false,
        }
    }

    /// Validate an untyped value at the boundary.
    fn from_json(argument: &'static str, value: &Value) -> Result<Self, PathError> {
        match value {
            Value::String(text) => Ok(PathSource::Text(text.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| invalid(argument, SEGMENTS_EXPECTED, value_kind(item)))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(PathSource::Segments),
            other => Err(invalid(argument, SEGMENTS_EXPECTED, value_kind(other))),
        }
    }
}

impl TryFrom<&Value> for PathSource {
    type Error = PathError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        PathSource::from_json("value", value)
    }
}

impl From<&str> for PathSource {
    fn from(text: &str) -> Self {
        PathSource::Text(text.to_string())
    }
}

impl From<String> for PathSource {
    fn from(text: String) -> Self {
        PathSource::Text(text)
    }
}

impl From<&String> for PathSource {
    fn from(text: &String) -> Self {
        PathSource::Text(text.clone())
    }
}

impl From<Vec<String>> for PathSource {
    fn from(segments: Vec<String>) -> Self {
        PathSource::Segments(segments)
    }
}

impl From<Vec<&str>> for PathSource {
    fn from(segments: Vec<&str>) -> Self {
        PathSource::Segments(segments.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for PathSource {
    fn from(segments: &[&str]) -> Self {
        PathSource::Segments(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PathSource {
    fn from(segments: [&str; N]) -> Self {
        PathSource::Segments(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl From<DynaPath> for PathSource {
    fn from(path: DynaPath) -> Self {
        PathSource::Path(path)
    }
}

impl From<&DynaPath> for PathSource {
    fn from(path: &DynaPath) -> Self {
        PathSource::Path(path.clone())
    }
}

/// A document path followed by a node path.
///
/// Composition mutates in place: `append` returns `&mut Self` and `/`
/// consumes and returns the same value. Use `join` for a fresh copy.
/// Appending a string or segment list always extends the node path; the
/// document path only grows at construction or when composing two paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DynaPath {
    document: Vec<String>,
    node: Vec<String>,
}

impl DynaPath {
    /// Build a path from a document source and an optional node source.
    ///
    /// A `DynaPath` document source is composed through `append`, so its node
    /// segments stay node segments. The node source must be text or segments;
    /// an empty one is ignored.
    pub fn new(
        document: impl Into<PathSource>,
        node: Option<PathSource>,
    ) -> Result<Self, PathError> {
        let mut path = Self::from_document(document);
        if let Some(node) = node.filter(|n| !n.is_blank()) {
            let segments = segments_of(node, "node_path")?;
            path.node.extend(segments);
        }
        Ok(path)
    }

    /// Build a path with no node segments.
    pub fn from_document(document: impl Into<PathSource>) -> Self {
        let mut path = Self::default();
        match document.into() {
            PathSource::Path(other) => {
                path.append(other);
            }
            PathSource::Text(text) => path.document.extend(split_segments(&text)),
            PathSource::Segments(segments) => path.document.extend(segments),
        }
        path
    }

    /// Build a path from untyped values, e.g. decoded JSON arguments.
    ///
    /// Each argument is validated independently. A `null` node is treated as absent.
    pub fn from_json(document: &Value, node: Option<&Value>) -> Result<Self, PathError> {
        let document = PathSource::from_json("document_path", document)?;
        let node = node
            .filter(|v| !v.is_null())
            .map(|v| PathSource::from_json("node_path", v))
            .transpose()?;
        Self::new(document, node)
    }

    pub fn document_segments(&self) -> &[String] {
        &self.document
    }

    pub fn node_segments(&self) -> &[String] {
        &self.node
    }

    /// Iterate node segments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.node.iter()
    }

    /// Append `tail` in place.
    ///
    /// A path contributes document segments to the document path and node
    /// segments to the node path. Text and segment lists go to the node path.
    pub fn append(&mut self, tail: impl Into<PathSource>) -> &mut Self {
        match tail.into() {
            PathSource::Path(other) => {
                self.document.extend(other.document);
                self.node.extend(other.node);
            }
            PathSource::Text(text) => self.node.extend(split_segments(&text)),
            PathSource::Segments(segments) => self.node.extend(segments),
        }
        self
    }

    /// Append an untyped value in place, rejecting anything that is not text or a list of text.
    pub fn try_append_json(&mut self, tail: &Value) -> Result<&mut Self, PathError> {
        let tail = PathSource::from_json("tail", tail)?;
        Ok(self.append(tail))
    }

    pub fn append_document(&mut self, tail: impl Into<PathSource>) -> Result<&mut Self, PathError> {
        let segments = segments_of(tail.into(), "tail")?;
        self.document.extend(segments);
        Ok(self)
    }

    pub fn append_node(&mut self, tail: impl Into<PathSource>) -> Result<&mut Self, PathError> {
        let segments = segments_of(tail.into(), "tail")?;
        self.node.extend(segments);
        Ok(self)
    }

    /// Return a copy with `tail` appended, leaving `self` untouched.
    pub fn join(&self, tail: impl Into<PathSource>) -> Self {
        let mut joined = self.clone();
        joined.append(tail);
        joined
    }
}

impl From<&str> for DynaPath {
    fn from(document: &str) -> Self {
        Self::from_document(document)
    }
}

impl From<String> for DynaPath {
    fn from(document: String) -> Self {
        Self::from_document(document)
    }
}

impl From<Vec<String>> for DynaPath {
    fn from(document: Vec<String>) -> Self {
        Self::from_document(document)
    }
}

impl From<&[&str]> for DynaPath {
    fn from(document: &[&str]) -> Self {
        Self::from_document(document)
    }
}

impl<T: Into<PathSource>> Div<T> for DynaPath {
    type Output = DynaPath;

    fn div(mut self, tail: T) -> Self::Output {
        self.append(tail);
        self
    }
}

impl<T: Into<PathSource>> DivAssign<T> for DynaPath {
    fn div_assign(&mut self, tail: T) {
        self.append(tail);
    }
}

impl fmt::Display for DynaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.document.join("/"),
            NODE_DELIMITER,
            self.node.join("/")
        )
    }
}

impl FromStr for DynaPath {
    type Err = Infallible;

    /// Parse the canonical form. Text without `:` is a bare document path.
    ///
    /// Rendering is ambiguous for a node path made of one empty segment:
    /// it renders as `doc:` and parses back with no node segments.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = match s.split_once(NODE_DELIMITER) {
            Some((document, node)) => {
                let mut path = Self::from_document(document);
                if !node.is_empty() {
                    path.node.extend(split_segments(node));
                }
                path
            }
            None => Self::from_document(s),
        };
        Ok(path)
    }
}

impl<'a> IntoIterator for &'a DynaPath {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.node.iter()
    }
}

/// Trim outer separators, then split. Empty interior segments are kept.
fn split_segments(text: &str) -> Vec<String> {
    text.trim_matches(SEPARATOR)
        .split(SEPARATOR)
        .map(str::to_string)
        .collect()
}

fn segments_of(source: PathSource, argument: &'static str) -> Result<Vec<String>, PathError> {
    match source {
        PathSource::Text(text) => Ok(split_segments(&text)),
        PathSource::Segments(segments) => Ok(segments),
        PathSource::Path(_) => Err(invalid(argument, SEGMENTS_EXPECTED, "a path")),
    }
}

fn invalid(argument: &'static str, expected: &'static str, found: &'static str) -> PathError {
    PathError::InvalidArgumentType {
        argument,
        expected,
        found,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case("Tasks")]
    #[case("Work/Projects/Roadmap")]
    #[case("a b/c-d")]
    fn test_document_text_renders_back(#[case] text: &str) {
        let path = DynaPath::from(text);
        assert_eq!(path.document_segments().join("/"), text);
        assert_eq!(path.to_string(), format!("{}:", text));
    }

    #[rstest]
    #[case("/Tasks/Today/", &["Tasks", "Today"])]
    #[case("//Tasks", &["Tasks"])]
    #[case("a//b", &["a", "", "b"])]
    #[case("", &[""])]
    #[case("///", &[""])]
    fn test_split_normalization(#[case] text: &str, #[case] expected: &[&str]) {
        let path = DynaPath::from(text);
        assert_eq!(path.document_segments(), strings(expected).as_slice());
    }

    #[test]
    fn test_segment_list_is_not_resplit() {
        let path = DynaPath::from_document(vec!["a/b", "c"]);
        assert_eq!(path.document_segments(), strings(&["a/b", "c"]).as_slice());
    }

    #[test]
    fn test_new_with_node_source() {
        let path = DynaPath::new("Tasks", Some("Today/Test".into())).unwrap();
        assert_eq!(path.document_segments(), strings(&["Tasks"]).as_slice());
        assert_eq!(path.node_segments(), strings(&["Today", "Test"]).as_slice());
        assert_eq!(path.to_string(), "Tasks:Today/Test");
    }

    #[test]
    fn test_new_skips_empty_node_source() {
        let from_text = DynaPath::new("Tasks", Some("".into())).unwrap();
        let from_list = DynaPath::new("Tasks", Some(Vec::<String>::new().into())).unwrap();
        assert!(from_text.node_segments().is_empty());
        assert!(from_list.node_segments().is_empty());
    }

    #[test]
    fn test_new_rejects_path_as_node_source() {
        let other = DynaPath::from("Other");
        let err = DynaPath::new("Tasks", Some(other.into())).unwrap_err();
        assert!(matches!(
            err,
            PathError::InvalidArgumentType {
                argument: "node_path",
                ..
            }
        ));
    }

    #[test]
    fn test_new_from_path_keeps_both_sequences() {
        let inner = DynaPath::new("Tasks", Some("Today".into())).unwrap();
        let copy = DynaPath::new(inner.clone(), Some("Test".into())).unwrap();
        assert_eq!(copy.document_segments(), strings(&["Tasks"]).as_slice());
        assert_eq!(copy.node_segments(), strings(&["Today", "Test"]).as_slice());
    }

    #[test]
    fn test_div_extends_node_path() {
        let path = DynaPath::from("Tasks") / "Today" / "Test";
        assert_eq!(path.document_segments(), strings(&["Tasks"]).as_slice());
        assert_eq!(path.node_segments(), strings(&["Today", "Test"]).as_slice());
        assert_eq!(path.to_string(), "Tasks:Today/Test");
    }

    #[test]
    fn test_div_twice_equals_single_concatenated_append() {
        let twice = DynaPath::from("Doc") / ["a", "b"] / ["a", "b"];
        let once = DynaPath::from("Doc") / ["a", "b", "a", "b"];
        assert_eq!(twice.node_segments(), once.node_segments());
    }

    #[test]
    fn test_compose_two_paths_concatenates_in_order() {
        let p1 = DynaPath::new("Work", Some("Inbox".into())).unwrap();
        let p2 = DynaPath::new("Notes/Daily", Some("Monday/Standup".into())).unwrap();

        let composed = p1 / p2;
        assert_eq!(
            composed.document_segments(),
            strings(&["Work", "Notes", "Daily"]).as_slice()
        );
        assert_eq!(
            composed.node_segments(),
            strings(&["Inbox", "Monday", "Standup"]).as_slice()
        );
    }

    #[test]
    fn test_append_returns_same_value_for_chaining() {
        let mut path = DynaPath::from("Tasks");
        path.append("Today").append(vec!["Test", "Boop"]);
        assert_eq!(
            path.node_segments(),
            strings(&["Today", "Test", "Boop"]).as_slice()
        );

        path /= "Nope";
        assert_eq!(path.node_segments().last().map(String::as_str), Some("Nope"));
    }

    #[test]
    fn test_join_leaves_receiver_untouched() {
        let base = DynaPath::from("Tasks") / "Today";
        let joined = base.join("Test");
        assert_eq!(base.to_string(), "Tasks:Today");
        assert_eq!(joined.to_string(), "Tasks:Today/Test");
    }

    #[test]
    fn test_explicit_document_and_node_appends() {
        let mut path = DynaPath::from("Work");
        path.append_document("Projects/Roadmap")
            .unwrap()
            .append_node(["Q3"])
            .unwrap();
        assert_eq!(path.to_string(), "Work/Projects/Roadmap:Q3");

        let err = path.append_document(DynaPath::from("x")).unwrap_err();
        assert!(matches!(err, PathError::InvalidArgumentType { .. }));
    }

    #[test]
    fn test_iteration_yields_node_segments_only() {
        let path = DynaPath::new("Tasks/Inbox", Some("Today/Test".into())).unwrap();
        let collected: Vec<&str> = path.into_iter().map(String::as_str).collect();
        assert_eq!(collected, vec!["Today", "Test"]);
    }

    #[rstest]
    #[case("Tasks:Today/Test")]
    #[case("Work/Projects:Roadmap")]
    #[case("Tasks:")]
    fn test_parse_render_round_trip(#[case] text: &str) {
        let path: DynaPath = text.parse().unwrap();
        assert_eq!(path.to_string(), text);
        assert_eq!(path.to_string().parse::<DynaPath>().unwrap(), path);
    }

    #[test]
    fn test_single_empty_node_segment_does_not_round_trip() {
        let path = DynaPath::new("Tasks", Some("/".into())).unwrap();
        assert_eq!(path.node_segments(), strings(&[""]).as_slice());
        assert_eq!(path.to_string(), "Tasks:");

        let parsed: DynaPath = path.to_string().parse().unwrap();
        assert!(parsed.node_segments().is_empty());
        assert_ne!(parsed, path);
    }

    #[test]
    fn test_parse_without_delimiter_is_document_path() {
        let path: DynaPath = "/Tasks/Today/".parse().unwrap();
        assert_eq!(path.document_segments(), strings(&["Tasks", "Today"]).as_slice());
        assert!(path.node_segments().is_empty());
    }

    #[test]
    fn test_parse_splits_at_first_delimiter() {
        let path: DynaPath = "Tasks:Meeting 10:30/Notes".parse().unwrap();
        assert_eq!(
            path.node_segments(),
            strings(&["Meeting 10:30", "Notes"]).as_slice()
        );
    }

    #[test]
    fn test_from_json_accepts_strings_and_lists() {
        let path = DynaPath::from_json(&json!("Tasks"), Some(&json!(["Today", "Test"]))).unwrap();
        assert_eq!(path.to_string(), "Tasks:Today/Test");

        let path = DynaPath::from_json(&json!(["Tasks"]), Some(&Value::Null)).unwrap();
        assert_eq!(path.to_string(), "Tasks:");
    }

    #[rstest]
    #[case(json!(42))]
    #[case(json!(true))]
    #[case(json!({"title": "Tasks"}))]
    #[case(json!(["Tasks", 7]))]
    fn test_from_json_rejects_document_argument(#[case] document: Value) {
        let err = DynaPath::from_json(&document, None).unwrap_err();
        assert!(matches!(
            err,
            PathError::InvalidArgumentType {
                argument: "document_path",
                ..
            }
        ));
    }

    #[test]
    fn test_from_json_rejects_node_argument_independently() {
        let err = DynaPath::from_json(&json!("Tasks"), Some(&json!(42))).unwrap_err();
        assert_eq!(
            err,
            PathError::InvalidArgumentType {
                argument: "node_path",
                expected: SEGMENTS_EXPECTED,
                found: "a number",
            }
        );
    }

    #[test]
    fn test_try_append_json() {
        let mut path = DynaPath::from("Tasks");
        path.try_append_json(&json!("Today")).unwrap();
        assert_eq!(path.to_string(), "Tasks:Today");

        let err = path.try_append_json(&json!(3.5)).unwrap_err();
        assert!(matches!(
            err,
            PathError::InvalidArgumentType { argument: "tail", .. }
        ));
        assert_eq!(path.to_string(), "Tasks:Today");
    }

    #[test]
    fn test_path_source_try_from_value() {
        assert_eq!(
            PathSource::try_from(&json!("a/b")).unwrap(),
            PathSource::Text("a/b".to_string())
        );
        assert!(PathSource::try_from(&Value::Null).is_err());
    }
}
