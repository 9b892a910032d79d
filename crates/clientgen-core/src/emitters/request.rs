//! Type-only contract of the injected request capability.

use tera::Context;

use crate::{
    builders::typescript::REQUEST_CAPABILITY,
    document::HttpMethod,
    templates::{ArtifactTemplate, TemplateSet},
};

pub fn emit_request_contract(templates: &TemplateSet, banner: &str) -> crate::Result<String> {
    let mut context = Context::new();
    context.insert("banner", banner);
    context.insert("request_type", REQUEST_CAPABILITY);
    let methods: Vec<&str> = HttpMethod::ALL.iter().map(HttpMethod::as_str).collect();
    context.insert("methods", &methods);
    templates.render(ArtifactTemplate::Request, &context)
}
