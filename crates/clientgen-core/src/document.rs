//! Typed view of an OpenAPI 3 document.
//!
//! The loader hands over a raw `serde_json::Value`; this module turns it into the
//! closed model the generator works on. Parsing is best-effort and total below the
//! root: a schema shape the generator does not understand becomes an untyped
//! primitive instead of an error. Every map keeps document order, which is what
//! makes repeated runs produce identical output.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::{openapi::OpenApiContext, resolver, Error};

/// HTTP methods an OpenAPI path item can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Every method, in path item key order
    pub const ALL: [Self; 8] = [
        Self::Get,
        Self::Put,
        Self::Post,
        Self::Delete,
        Self::Options,
        Self::Head,
        Self::Patch,
        Self::Trace,
    ];

    /// Parse a path item key (`get`, `post`, ...). Other keys are not methods.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(Self::Get),
            "put" => Some(Self::Put),
            "post" => Some(Self::Post),
            "delete" => Some(Self::Delete),
            "options" => Some(Self::Options),
            "head" => Some(Self::Head),
            "patch" => Some(Self::Patch),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }

    /// Upper-cased method token
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
            Self::Trace => "TRACE",
        }
    }

    /// Whether generated callables take a request body for this method
    pub fn carries_body(&self) -> bool {
        !matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind tag of a primitive schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Number,
    Integer,
    Boolean,
    /// Any other declared type, or `None` for a schema without one
    Other(Option<String>),
}

/// A schema, reduced to the shapes the generator distinguishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// Pointer into the document, e.g. `#/components/schemas/Pet`
    Reference(String),
    /// Object with declared properties; an empty map means a bare object
    Object {
        properties: IndexMap<String, SchemaNode>,
        required: IndexSet<String>,
    },
    Array(Box<SchemaNode>),
    Primitive(PrimitiveKind),
    /// `oneOf` / `anyOf` alternatives in declared order
    Union(Vec<SchemaNode>),
}

impl SchemaNode {
    /// A schema that carries no usable type information
    pub fn untyped() -> Self {
        Self::Primitive(PrimitiveKind::Other(None))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// Build a node from a raw schema value
    pub fn from_json(value: &JsonValue) -> Self {
        let Some(schema) = value.as_object() else {
            return Self::untyped();
        };

        if let Some(reference) = schema.get("$ref").and_then(JsonValue::as_str) {
            return Self::Reference(reference.to_string());
        }

        for key in ["oneOf", "anyOf"] {
            if let Some(alternatives) = schema.get(key).and_then(JsonValue::as_array) {
                return Self::Union(alternatives.iter().map(Self::from_json).collect());
            }
        }

        // allOf only collapses when there is nothing to intersect
        if let Some([single]) = schema
            .get("allOf")
            .and_then(JsonValue::as_array)
            .map(Vec::as_slice)
        {
            return Self::from_json(single);
        }

        match schema.get("type") {
            Some(JsonValue::String(kind)) => Self::from_type(kind, schema),
            Some(JsonValue::Array(kinds)) => Self::Union(
                kinds
                    .iter()
                    .filter_map(JsonValue::as_str)
                    .map(|kind| Self::from_type(kind, schema))
                    .collect(),
            ),
            _ if schema.contains_key("properties") => Self::object(schema),
            _ => Self::untyped(),
        }
    }

    fn from_type(kind: &str, schema: &JsonMap<String, JsonValue>) -> Self {
        match kind {
            "object" => Self::object(schema),
            "array" => Self::Array(Box::new(
                schema
                    .get("items")
                    .map(Self::from_json)
                    .unwrap_or_else(Self::untyped),
            )),
            "string" => Self::Primitive(PrimitiveKind::String),
            "number" => Self::Primitive(PrimitiveKind::Number),
            "integer" => Self::Primitive(PrimitiveKind::Integer),
            "boolean" => Self::Primitive(PrimitiveKind::Boolean),
            other => Self::Primitive(PrimitiveKind::Other(Some(other.to_string()))),
        }
    }

    fn object(schema: &JsonMap<String, JsonValue>) -> Self {
        let properties = schema
            .get("properties")
            .and_then(JsonValue::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, prop)| (name.clone(), Self::from_json(prop)))
                    .collect()
            })
            .unwrap_or_default();
        let required = schema
            .get("required")
            .and_then(JsonValue::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(JsonValue::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Self::Object {
            properties,
            required,
        }
    }
}

/// Schemas keyed by media type, in declared order
pub type MediaSchemas = IndexMap<String, SchemaNode>;

/// One method bound to one path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operation {
    /// `operationId`
    pub id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    /// Declared tags, possibly empty
    pub tags: Vec<String>,
    /// Request body schemas keyed by media type
    pub request_body: Option<MediaSchemas>,
    /// Response schemas keyed by status code, then media type
    pub responses: IndexMap<String, MediaSchemas>,
}

impl Operation {
    /// Schema of the request body, preferring JSON media types
    pub fn request_schema(&self) -> Option<&SchemaNode> {
        self.request_body.as_ref().and_then(select_media)
    }

    /// `200` when declared, otherwise the first 2xx status in document order
    pub fn success_status(&self) -> Option<&str> {
        if self.responses.contains_key("200") {
            return Some("200");
        }
        self.responses
            .keys()
            .map(String::as_str)
            .find(|status| status.starts_with('2'))
    }

    /// Schema of the success response, if it declares one
    pub fn success_schema(&self) -> Option<&SchemaNode> {
        self.success_status()
            .and_then(|status| self.responses.get(status))
            .and_then(select_media)
    }
}

fn select_media(content: &MediaSchemas) -> Option<&SchemaNode> {
    content
        .get("application/json")
        .or_else(|| {
            content
                .iter()
                .find(|(media, _)| media.ends_with("+json"))
                .map(|(_, schema)| schema)
        })
        .or_else(|| content.values().next())
}

/// Operations of one path, keyed by method in declared order
pub type PathItem = IndexMap<HttpMethod, Operation>;

/// A loaded OpenAPI document
#[derive(Debug, Clone)]
pub struct Document {
    raw: JsonValue,
    /// `info.title`
    pub title: Option<String>,
    /// `info.version`
    pub version: Option<String>,
    /// Path items in declared order
    pub paths: IndexMap<String, PathItem>,
    /// `components.schemas` in declared order
    pub schemas: IndexMap<String, SchemaNode>,
}

impl Document {
    /// Build the typed document from a loaded context
    pub fn from_context(context: &OpenApiContext) -> crate::Result<Self> {
        Self::from_json(context.as_json().clone())
    }

    /// Build the typed document from a raw OpenAPI 3 value
    pub fn from_json(raw: JsonValue) -> crate::Result<Self> {
        let root = raw
            .as_object()
            .ok_or_else(|| Error::openapi("document root must be an object"))?;

        let legacy = root.contains_key("swagger")
            || root
                .get("openapi")
                .and_then(JsonValue::as_str)
                .is_some_and(|version| version.starts_with('2'));
        if legacy {
            return Err(Error::openapi(
                "Swagger 2.0 documents are not supported, convert the document to OpenAPI 3 first",
            ));
        }

        let title = raw
            .pointer("/info/title")
            .and_then(JsonValue::as_str)
            .map(String::from);
        let version = raw
            .pointer("/info/version")
            .and_then(JsonValue::as_str)
            .map(String::from);

        let schemas: IndexMap<String, SchemaNode> = raw
            .pointer("/components/schemas")
            .and_then(JsonValue::as_object)
            .map(|schemas| {
                schemas
                    .iter()
                    .map(|(name, schema)| (name.clone(), SchemaNode::from_json(schema)))
                    .collect()
            })
            .unwrap_or_default();

        let mut paths = IndexMap::new();
        if let Some(entries) = root.get("paths").and_then(JsonValue::as_object) {
            for (path, item) in entries {
                let context = format!("path item '{path}'");
                let Some(item) = follow_ref(&raw, item, &context).and_then(JsonValue::as_object)
                else {
                    continue;
                };
                paths.insert(path.clone(), parse_path_item(&raw, path, item));
            }
        }

        log::debug!(
            "loaded document with {} paths and {} component schemas",
            paths.len(),
            schemas.len()
        );

        Ok(Self {
            raw,
            title,
            version,
            paths,
            schemas,
        })
    }

    /// The raw document, for pointer lookups
    pub fn raw(&self) -> &JsonValue {
        &self.raw
    }

    /// Every (path, method, operation) triple in document order
    pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &Operation)> + '_ {
        self.paths.iter().flat_map(|(path, item)| {
            item.iter()
                .map(move |(method, operation)| (path.as_str(), *method, operation))
        })
    }
}

/// Follow a single `$ref` hop for non-schema objects (path items, bodies, responses)
fn follow_ref<'a>(root: &'a JsonValue, value: &'a JsonValue, context: &str) -> Option<&'a JsonValue> {
    let Some(reference) = value.get("$ref").and_then(JsonValue::as_str) else {
        return Some(value);
    };
    let target = resolver::lookup(root, reference);
    if target.is_none() {
        log::warn!("ignoring {context}: reference '{reference}' does not resolve");
    }
    target
}

fn parse_path_item(root: &JsonValue, path: &str, item: &JsonMap<String, JsonValue>) -> PathItem {
    item.iter()
        .filter_map(|(key, value)| {
            let method = HttpMethod::from_key(key)?;
            let operation = value.as_object()?;
            Some((method, parse_operation(root, path, method, operation)))
        })
        .collect()
}

fn parse_operation(
    root: &JsonValue,
    path: &str,
    method: HttpMethod,
    operation: &JsonMap<String, JsonValue>,
) -> Operation {
    let text = |key: &str| {
        operation
            .get(key)
            .and_then(JsonValue::as_str)
            .map(String::from)
    };

    let request_body = operation
        .get("requestBody")
        .and_then(|body| follow_ref(root, body, &format!("request body of {method} {path}")))
        .map(parse_content);

    let responses = operation
        .get("responses")
        .and_then(JsonValue::as_object)
        .map(|responses| {
            responses
                .iter()
                .filter_map(|(status, response)| {
                    let context = format!("response {status} of {method} {path}");
                    let response = follow_ref(root, response, &context)?;
                    Some((status.clone(), parse_content(response)))
                })
                .collect()
        })
        .unwrap_or_default();

    Operation {
        id: text("operationId"),
        summary: text("summary"),
        description: text("description"),
        deprecated: operation
            .get("deprecated")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false),
        tags: operation
            .get("tags")
            .and_then(JsonValue::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(JsonValue::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
        request_body,
        responses,
    }
}

fn parse_content(holder: &JsonValue) -> MediaSchemas {
    holder
        .get("content")
        .and_then(JsonValue::as_object)
        .map(|content| {
            content
                .iter()
                .filter_map(|(media, entry)| {
                    Some((media.clone(), SchemaNode::from_json(entry.get("schema")?)))
                })
                .collect()
        })
        .unwrap_or_default()
}
