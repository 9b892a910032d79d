//! Context builder traits and adapters for language-specific codegen.
pub mod typescript;

use serde_json::Value as JsonValue;

use crate::indexer::IndexedOperation;

/// Turns one indexed operation into the template context of its callable.
///
/// Builders are stateful per artifact: names handed out for one operation are
/// taken for the rest of the artifact.
pub trait OperationContextBuilder {
    fn build(&mut self, op: &IndexedOperation<'_>) -> crate::Result<JsonValue>;
}
