//! TypeScript operation context builder.
//!
//! For each operation the builder allocates a callable name, decides the request
//! and response types, and records the local declarations those types need. A
//! schema that is a bare reference is used directly; anything else gets its own
//! `<Name>Request` / `<Name>Response` declaration in the group artifact.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::OperationContextBuilder;
use crate::{
    document::{Document, SchemaNode},
    emitters::Declaration,
    indexer::IndexedOperation,
    naming::{operation_name, to_type_name, GlobalNames, NameAllocator},
    synth::{Synthesizer, TypeExpr, TypeMode, TYPES_NAMESPACE},
    utils::{escape_ts_string, sanitize_comment},
};

/// Name of the injected request capability type
pub const REQUEST_CAPABILITY: &str = "RequestFn";

/// Template context of one generated callable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallableContext {
    /// Method name on the client object
    pub name: String,
    /// Rendered parameter list
    pub params: String,
    /// Resolved success type
    pub returns: String,
    /// Path literal contents, already escaped
    pub path: String,
    /// Upper-cased HTTP method token
    pub method: String,
    /// Argument passed as the request body
    pub data: String,
    /// JSDoc lines, empty when there is nothing to say
    pub doc: Vec<String>,
}

/// Builds callables and local declarations for one group artifact
#[derive(Debug)]
pub struct TypeScriptOperationBuilder<'a> {
    synthesizer: Synthesizer<'a>,
    method_names: NameAllocator,
    type_names: NameAllocator,
    declarations: Vec<Declaration>,
}

impl<'a> TypeScriptOperationBuilder<'a> {
    pub fn new(document: &'a Document, names: &'a GlobalNames, scope: &str, strict: bool) -> Self {
        let mut type_names = NameAllocator::new(scope, strict);
        type_names.reserve(REQUEST_CAPABILITY);
        type_names.reserve(TYPES_NAMESPACE);

        Self {
            synthesizer: Synthesizer::new(document, names, TypeMode::Local),
            method_names: NameAllocator::new(scope, strict),
            type_names,
            declarations: Vec::new(),
        }
    }

    /// Local declarations recorded so far, in operation order
    pub fn into_declarations(self) -> Vec<Declaration> {
        self.declarations
    }

    /// Type expression for a schema, declaring it locally unless it is a bare reference
    fn resolve_type(
        &mut self,
        schema: &SchemaNode,
        base: &str,
        role: &str,
    ) -> crate::Result<TypeExpr> {
        let ty = self.synthesizer.synthesize(schema);
        if schema.is_reference() {
            return Ok(ty);
        }
        let name = self.type_names.allocate(&format!("{base}{role}"))?;
        self.declarations.push(Declaration::new(name.clone(), ty));
        Ok(TypeExpr::Named(name))
    }
}

impl OperationContextBuilder for TypeScriptOperationBuilder<'_> {
    fn build(&mut self, op: &IndexedOperation<'_>) -> crate::Result<JsonValue> {
        let operation = op.operation;
        let name = self.method_names.allocate(&operation_name(operation))?;
        let base = to_type_name(&name);

        let mut params = Vec::new();
        let data = if op.method.carries_body() {
            match operation.request_schema() {
                Some(schema) => {
                    let ty = self.resolve_type(schema, &base, "Request")?;
                    params.push(format!("data: {ty}"));
                }
                None => params.push("data?: any".to_string()),
            }
            "data"
        } else {
            "undefined"
        };
        params.push("signal?: AbortSignal".to_string());

        let returns = match operation.success_schema() {
            Some(schema) => self.resolve_type(schema, &base, "Response")?,
            None => TypeExpr::void(),
        };

        log::debug!("{} {} -> {}", op.method, op.path, name);

        let context = CallableContext {
            name,
            params: params.join(", "),
            returns: returns.to_string(),
            path: escape_ts_string(op.path),
            method: op.method.as_str().to_string(),
            data: data.to_string(),
            doc: doc_lines(
                operation.summary.as_deref(),
                operation.description.as_deref(),
                operation.deprecated,
            ),
        };

        Ok(serde_json::to_value(&context)?)
    }
}

fn doc_lines(summary: Option<&str>, description: Option<&str>, deprecated: bool) -> Vec<String> {
    let mut body: Vec<String> = Vec::new();
    for text in [summary, description].into_iter().flatten() {
        let text = sanitize_comment(text);
        if text.is_empty() || body.iter().any(|line| *line == text) {
            continue;
        }
        if !body.is_empty() {
            body.push(String::new());
        }
        body.push(text);
    }
    if deprecated {
        body.push("@deprecated".to_string());
    }
    if body.is_empty() {
        return body;
    }

    let mut lines = vec!["/**".to_string()];
    lines.extend(body.into_iter().map(|line| {
        if line.is_empty() {
            " *".to_string()
        } else {
            format!(" * {line}")
        }
    }));
    lines.push(" */".to_string());
    lines
}
