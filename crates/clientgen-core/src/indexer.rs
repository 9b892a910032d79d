//! Grouping of operations by tag.
//!
//! Every (path, method) pair is visited in document order. An operation lands in each
//! group named by its tags, or in the fallback group when it has none. Groups appear
//! in the order their tag is first seen.

use indexmap::IndexMap;

use crate::document::{Document, HttpMethod, Operation};

/// An operation together with where it is bound
#[derive(Debug, Clone, Copy)]
pub struct IndexedOperation<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Operation,
}

/// Operations sharing one tag, in document order
#[derive(Debug, Clone)]
pub struct TagGroup<'a> {
    pub tag: String,
    pub operations: Vec<IndexedOperation<'a>>,
}

/// Build the tag groups of a document
pub fn index_operations<'a>(document: &'a Document, fallback_tag: &str) -> Vec<TagGroup<'a>> {
    let mut groups: IndexMap<&str, Vec<IndexedOperation<'a>>> = IndexMap::new();

    for (path, method, operation) in document.operations() {
        let entry = IndexedOperation {
            path,
            method,
            operation,
        };

        let mut tags: Vec<&str> = Vec::new();
        for tag in operation.tags.iter().map(|tag| tag.trim()) {
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        if tags.is_empty() {
            tags.push(fallback_tag);
        }

        for tag in tags {
            groups.entry(tag).or_default().push(entry);
        }
    }

    log::debug!("indexed operations into {} tag groups", groups.len());

    groups
        .into_iter()
        .map(|(tag, operations)| TagGroup {
            tag: tag.to_string(),
            operations,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(group: &TagGroup<'_>) -> Vec<String> {
        group
            .operations
            .iter()
            .map(|op| format!("{} {}", op.method, op.path))
            .collect()
    }

    #[test]
    fn test_groups_by_tag_with_fan_out() {
        let doc = Document::from_json(json!({
            "openapi": "3.0.0",
            "paths": {
                "/users": {
                    "get": { "tags": ["users"] },
                    "post": { "tags": ["users", "admin"] }
                },
                "/health": { "get": {} },
                "/audit": { "get": { "tags": ["admin", "admin", " "] } }
            }
        }))
        .unwrap();

        let groups = index_operations(&doc, "default");
        let tags: Vec<_> = groups.iter().map(|group| group.tag.as_str()).collect();
        assert_eq!(tags, ["users", "admin", "default"]);

        assert_eq!(summary(&groups[0]), ["GET /users", "POST /users"]);
        assert_eq!(summary(&groups[1]), ["POST /users", "GET /audit"]);
        assert_eq!(summary(&groups[2]), ["GET /health"]);
    }

    #[test]
    fn test_blank_tags_fall_back() {
        let doc = Document::from_json(json!({
            "openapi": "3.0.0",
            "paths": { "/login": { "post": { "tags": [""] } } }
        }))
        .unwrap();

        let groups = index_operations(&doc, "misc");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].tag, "misc");
    }

    #[test]
    fn test_empty_document_has_no_groups() {
        let doc = Document::from_json(json!({ "openapi": "3.0.0" })).unwrap();
        assert!(index_operations(&doc, "default").is_empty());
    }
}
