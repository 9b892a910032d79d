//! Resolution of internal `$ref` pointers.
//!
//! A reference is a JSON pointer prefixed with `#`, e.g. `#/components/schemas/Pet`.
//! Resolution is a direct lookup in the raw document: no fixed point is computed and
//! no cycle detection happens here. Callers that expand references recursively track
//! the chain themselves (see [`crate::synth`]).

use serde_json::Value as JsonValue;

use crate::document::{Document, SchemaNode};

/// A parsed internal reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    raw: &'a str,
    segments: Vec<String>,
}

impl<'a> Reference<'a> {
    /// Parse an internal reference. External references (`other.yaml#/...`) are not internal.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let pointer = raw.strip_prefix('#')?;
        let segments = if pointer.is_empty() {
            Vec::new()
        } else {
            pointer
                .strip_prefix('/')?
                .split('/')
                .map(unescape_segment)
                .collect()
        };
        Some(Self { raw, segments })
    }

    /// The reference exactly as written in the document
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Unescaped pointer segments, e.g. `["components", "schemas", "Pet"]`
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Registry key when the reference targets `#/components/schemas/<key>` directly
    pub fn component_name(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [components, schemas, name] if components == "components" && schemas == "schemas" => {
                Some(name.as_str())
            }
            _ => None,
        }
    }
}

fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Look a reference up in a raw document
pub fn lookup<'a>(root: &'a JsonValue, reference: &str) -> Option<&'a JsonValue> {
    let pointer = reference.strip_prefix('#')?;
    root.pointer(pointer)
}

/// Resolve a reference to the schema node at its target; `None` when any segment is absent
pub fn resolve(document: &Document, reference: &str) -> Option<SchemaNode> {
    lookup(document.raw(), reference).map(SchemaNode::from_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PrimitiveKind;
    use serde_json::json;

    fn document() -> Document {
        Document::from_json(json!({
            "openapi": "3.0.3",
            "paths": {},
            "components": {
                "schemas": {
                    "Pet": {
                        "type": "object",
                        "properties": { "name": { "type": "string" } }
                    },
                    "a/b": { "type": "boolean" }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_component_reference() {
        let reference = Reference::parse("#/components/schemas/Pet").unwrap();
        assert_eq!(reference.component_name(), Some("Pet"));
        assert_eq!(reference.segments(), ["components", "schemas", "Pet"]);
    }

    #[test]
    fn test_parse_unescapes_segments() {
        let reference = Reference::parse("#/components/schemas/a~1b").unwrap();
        assert_eq!(reference.component_name(), Some("a/b"));
    }

    #[test]
    fn test_parse_rejects_external_reference() {
        assert!(Reference::parse("other.yaml#/components/schemas/Pet").is_none());
        assert!(Reference::parse("#components").is_none());
    }

    #[test]
    fn test_deeper_pointer_is_not_a_component() {
        let reference = Reference::parse("#/components/schemas/Pet/properties/name").unwrap();
        assert_eq!(reference.component_name(), None);
    }

    #[test]
    fn test_resolve_existing_target() {
        let doc = document();
        assert_eq!(
            resolve(&doc, "#/components/schemas/Pet/properties/name"),
            Some(SchemaNode::Primitive(PrimitiveKind::String))
        );
        assert_eq!(
            resolve(&doc, "#/components/schemas/a~1b"),
            Some(SchemaNode::Primitive(PrimitiveKind::Boolean))
        );
    }

    #[test]
    fn test_resolve_missing_segment_is_not_found() {
        let doc = document();
        assert_eq!(resolve(&doc, "#/components/schemas/Missing"), None);
        assert_eq!(resolve(&doc, "#/components/parameters/limit"), None);
        assert_eq!(resolve(&doc, "https://example.com/schema.json"), None);
    }
}
