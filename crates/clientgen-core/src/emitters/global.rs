//! Global-types artifact: one declaration per component schema.

use tera::Context;

use super::Declaration;
use crate::{
    document::Document,
    naming::GlobalNames,
    synth::{Synthesizer, TypeMode},
    templates::{ArtifactTemplate, TemplateSet},
};

/// Render the global-types artifact, declarations in registry order
pub fn emit_types(
    document: &Document,
    names: &GlobalNames,
    templates: &TemplateSet,
    banner: &str,
) -> crate::Result<String> {
    let synthesizer = Synthesizer::new(document, names, TypeMode::Global);
    let declarations: Vec<String> = document
        .schemas
        .iter()
        .filter_map(|(key, schema)| {
            let name = names.get(key)?;
            Some(Declaration::new(name, synthesizer.synthesize(schema)).render())
        })
        .collect();

    log::debug!("emitting {} global declarations", declarations.len());

    let mut context = Context::new();
    context.insert("banner", banner);
    context.insert("declarations", &declarations);
    templates.render(ArtifactTemplate::Types, &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn emit(spec: serde_json::Value) -> String {
        let doc = Document::from_json(spec).unwrap();
        let names = GlobalNames::build(&doc, "types.ts", false).unwrap();
        let templates = TemplateSet::builtin().unwrap();
        emit_types(&doc, &names, &templates, "// header").unwrap()
    }

    #[test]
    fn test_declarations_in_registry_order() {
        let rendered = emit(json!({
            "openapi": "3.0.0",
            "components": {
                "schemas": {
                    "User": {
                        "type": "object",
                        "required": ["id"],
                        "properties": {
                            "id": { "type": "string" },
                            "manager": { "$ref": "#/components/schemas/User" },
                            "role": { "$ref": "#/components/schemas/user-role" }
                        }
                    },
                    "user-role": { "oneOf": [{ "type": "string" }, { "type": "integer" }] },
                    "Broken": { "$ref": "#/components/schemas/Ghost" }
                }
            }
        }));

        assert_eq!(
            rendered,
            "// header\n\n\
             export interface User {\n  id: string;\n  manager?: User;\n  role?: UserRole;\n}\n\n\
             export type UserRole = string | number;\n\n\
             export type Broken = any /* unresolved reference: #/components/schemas/Ghost */;\n"
        );
    }

    #[test]
    fn test_empty_registry_is_still_a_module() {
        let rendered = emit(json!({ "openapi": "3.0.0" }));
        assert_eq!(rendered, "// header\n\nexport {};\n");
    }
}
