//! Group artifact: local declarations plus a client factory for one tag.

use serde_json::Value as JsonValue;
use tera::Context;

use crate::{
    builders::{
        typescript::{TypeScriptOperationBuilder, REQUEST_CAPABILITY},
        OperationContextBuilder,
    },
    config::GenerateOptions,
    document::Document,
    indexer::TagGroup,
    naming::{to_type_name, GlobalNames},
    synth::TYPES_NAMESPACE,
    templates::{ArtifactTemplate, TemplateSet},
};

/// Everything a group artifact needs besides its operations
#[derive(Debug, Clone, Copy)]
pub struct GroupEnv<'a> {
    pub document: &'a Document,
    pub names: &'a GlobalNames,
    pub options: &'a GenerateOptions,
    pub templates: &'a TemplateSet,
    pub banner: &'a str,
}

/// Render the artifact of one tag group; `scope` names it in collision reports
pub fn emit_group(env: GroupEnv<'_>, group: &TagGroup<'_>, scope: &str) -> crate::Result<String> {
    let mut builder = TypeScriptOperationBuilder::new(
        env.document,
        env.names,
        scope,
        env.options.strict_names,
    );
    let operations = group
        .operations
        .iter()
        .map(|op| builder.build(op))
        .collect::<crate::Result<Vec<JsonValue>>>()?;
    let declarations: Vec<String> = builder
        .into_declarations()
        .iter()
        .map(|declaration| declaration.render())
        .collect();

    log::debug!(
        "{}: {} callables, {} local types",
        scope,
        operations.len(),
        declarations.len()
    );

    let mut context = Context::new();
    context.insert("banner", env.banner);
    context.insert("request_type", REQUEST_CAPABILITY);
    context.insert("request_module", &env.options.request_module);
    context.insert("types_namespace", TYPES_NAMESPACE);
    context.insert("types_module", &env.options.types_module);
    context.insert("factory", &format!("create{}Api", to_type_name(&group.tag)));
    context.insert("declarations", &declarations);
    context.insert("operations", &operations);
    env.templates.render(ArtifactTemplate::Group, &context)
}
