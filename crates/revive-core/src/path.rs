//! # Field Paths
//!
//! Location of a value inside the JSON document, rendered as a JSON Pointer
//! (RFC 6901). The document root renders as `(root)` so error messages never
//! show an empty location.

use std::fmt;

/// One step into a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key.
    Field(String),
    /// An array index.
    Index(usize),
}

/// Location of a value relative to the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path to the named key of the object at this path.
    pub fn join_field(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.to_owned()));
        Self { segments }
    }

    /// Path to the element at `index` of the array at this path.
    pub fn join_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Whether this is the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of steps from the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The individual steps from the root.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("(root)");
        }
        for segment in &self.segments {
            match segment {
                // RFC 6901 escaping: '~' first, then '/'.
                PathSegment::Field(name) => {
                    write!(f, "/{}", name.replace('~', "~0").replace('/', "~1"))?
                }
                PathSegment::Index(index) => write!(f, "/{index}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_display() {
        assert_eq!(FieldPath::root().to_string(), "(root)");
        assert!(FieldPath::root().is_root());
    }

    #[test]
    fn test_nested_display() {
        let path = FieldPath::root()
            .join_field("friends")
            .join_index(1)
            .join_field("job");
        assert_eq!(path.to_string(), "/friends/1/job");
        assert_eq!(path.depth(), 3);
    }

    #[test]
    fn test_pointer_escaping() {
        let path = FieldPath::root().join_field("a/b").join_field("c~d");
        assert_eq!(path.to_string(), "/a~1b/c~0d");
    }

    #[test]
    fn test_join_does_not_mutate_parent() {
        let parent = FieldPath::root().join_field("job");
        let _child = parent.join_field("title");
        assert_eq!(parent.depth(), 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use serde_json::{json, Value};

        proptest! {
            /// The rendered path is a pointer serde_json resolves to the
            /// same location, whatever the keys contain.
            #[test]
            fn rendered_path_resolves_with_json_pointer(
                keys in prop::collection::vec("\\PC{0,8}", 1..5)
            ) {
                let mut document = json!("leaf");
                for key in keys.iter().rev() {
                    let mut object = serde_json::Map::new();
                    object.insert(key.clone(), document);
                    document = Value::Object(object);
                }
                let path = keys
                    .iter()
                    .fold(FieldPath::root(), |path, key| path.join_field(key));
                prop_assert_eq!(document.pointer(&path.to_string()), Some(&json!("leaf")));
            }
        }
    }
}
