//! End-to-end behaviour of the transform on small documents

use clientgen_core::{transform, Artifacts, Document, GenerateOptions, TemplateSet};
use serde_json::{json, Value as JsonValue};

fn generate(spec: JsonValue) -> Artifacts {
    let document = Document::from_json(spec).expect("valid document");
    let templates = TemplateSet::builtin().expect("built-in templates");
    transform(&document, &GenerateOptions::default(), &templates).expect("transform")
}

fn json_content(schema: JsonValue) -> JsonValue {
    json!({ "content": { "application/json": { "schema": schema } } })
}

#[test]
fn scenario_untagged_login_gets_local_types() {
    let artifacts = generate(json!({
        "openapi": "3.0.0",
        "paths": {
            "/login": {
                "post": {
                    "operationId": "login",
                    "requestBody": json_content(json!({
                        "type": "object",
                        "required": ["username", "password"],
                        "properties": {
                            "username": { "type": "string" },
                            "password": { "type": "string" }
                        }
                    })),
                    "responses": {
                        "200": json_content(json!({
                            "type": "object",
                            "properties": { "token": { "type": "string" } }
                        }))
                    }
                }
            }
        }
    }));

    let group = &artifacts["default.ts"];
    assert!(group.contains(
        "export interface LoginRequest {\n  username: string;\n  password: string;\n}"
    ));
    assert!(group.contains("export interface LoginResponse {\n  token?: string;\n}"));
    assert!(group.contains(
        "    login(data: LoginRequest, signal?: AbortSignal): Promise<LoginResponse> {\n      \
         return request<LoginResponse>(\"/login\", \"POST\", data, signal);\n    },"
    ));
}

#[test]
fn scenario_registry_reference_is_not_redeclared() {
    let artifacts = generate(json!({
        "openapi": "3.0.0",
        "paths": {
            "/me": {
                "get": {
                    "operationId": "getMe",
                    "tags": ["users"],
                    "responses": {
                        "200": json_content(json!({ "$ref": "#/components/schemas/User" }))
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "User": {
                    "type": "object",
                    "required": ["id"],
                    "properties": { "id": { "type": "string" } }
                }
            }
        }
    }));

    assert!(artifacts["types.ts"].contains("export interface User {\n  id: string;\n}"));

    let group = &artifacts["users.ts"];
    assert!(group.contains("getMe(signal?: AbortSignal): Promise<Types.User> {"));
    assert!(!group.contains("GetMeResponse"));
    assert!(group.contains("import type * as Types from \"./types\";"));
    assert!(group.contains("import type { RequestFn } from \"./request\";"));
}

#[test]
fn scenario_multi_tagged_operation_fans_out() {
    let artifacts = generate(json!({
        "openapi": "3.0.0",
        "paths": {
            "/reports": {
                "post": {
                    "operationId": "createReport",
                    "tags": ["reports", "admin"],
                    "requestBody": json_content(json!({ "type": "string" }))
                }
            }
        }
    }));

    let callable = "    createReport(data: CreateReportRequest, signal?: AbortSignal): Promise<void> {\n      \
                    return request<void>(\"/reports\", \"POST\", data, signal);\n    },";
    for file in ["reports.ts", "admin.ts"] {
        assert!(artifacts[file].contains(callable), "{file}");
        assert!(artifacts[file].contains("export type CreateReportRequest = string;"));
    }
    assert!(!artifacts.contains_key("default.ts"));
}

#[test]
fn scenario_broken_reference_does_not_stop_generation() {
    let artifacts = generate(json!({
        "openapi": "3.0.0",
        "paths": {
            "/ghost": {
                "get": {
                    "operationId": "getGhost",
                    "responses": {
                        "200": json_content(json!({ "$ref": "#/components/schemas/Ghost" }))
                    }
                }
            },
            "/ok": {
                "get": {
                    "operationId": "getOk",
                    "responses": { "200": json_content(json!({ "type": "boolean" })) }
                }
            }
        }
    }));

    let group = &artifacts["default.ts"];
    assert!(group.contains(
        "getGhost(signal?: AbortSignal): Promise<any /* unresolved reference: #/components/schemas/Ghost */>"
    ));
    assert!(group.contains("getOk(signal?: AbortSignal): Promise<GetOkResponse>"));
    assert!(group.contains("export type GetOkResponse = boolean;"));
}

#[test]
fn generation_is_deterministic() {
    let spec = json!({
        "openapi": "3.0.0",
        "info": { "title": "Zoo", "version": "3" },
        "paths": {
            "/z": { "put": { "tags": ["zeta"], "requestBody": json_content(json!({
                "type": "object",
                "properties": { "b": { "type": "number" }, "a": { "type": "string" } }
            })) } },
            "/a": { "get": { "tags": ["alpha"] }, "delete": {} }
        },
        "components": {
            "schemas": {
                "Zebra": { "type": "string" },
                "Aardvark": { "type": "array", "items": { "$ref": "#/components/schemas/Zebra" } }
            }
        }
    });

    let first = generate(spec.clone());
    let second = generate(spec);
    assert_eq!(first, second);
    assert_eq!(
        first.keys().collect::<Vec<_>>(),
        ["types.ts", "request.ts", "zeta.ts", "alpha.ts", "default.ts"]
    );
    let types = &first["types.ts"];
    assert!(types.find("Zebra").unwrap() < types.find("Aardvark").unwrap());
    assert!(first["zeta.ts"].contains("b?: number;\n  a?: string;"));
}

#[test]
fn every_operation_lands_in_its_groups() {
    let artifacts = generate(json!({
        "openapi": "3.0.0",
        "paths": {
            "/one": { "get": { "operationId": "one", "tags": ["x"] } },
            "/two": { "get": { "operationId": "two", "tags": ["x", "y"] } },
            "/three": { "get": { "operationId": "three" } }
        }
    }));

    let has = |file: &str, name: &str| {
        artifacts[file].contains(&format!("    {name}(signal?: AbortSignal)"))
    };
    assert!(has("x.ts", "one") && has("x.ts", "two") && !has("x.ts", "three"));
    assert!(has("y.ts", "two") && !has("y.ts", "one") && !has("y.ts", "three"));
    assert!(has("default.ts", "three") && !has("default.ts", "one"));
}

#[test]
fn required_fields_are_the_only_mandatory_ones() {
    let artifacts = generate(json!({
        "openapi": "3.0.0",
        "components": {
            "schemas": {
                "Form": {
                    "type": "object",
                    "required": ["a", "c", "not-a-property"],
                    "properties": {
                        "a": { "type": "string" },
                        "b": { "type": "string" },
                        "c": { "type": "string" },
                        "d": { "type": "string" }
                    }
                }
            }
        }
    }));

    assert!(artifacts["types.ts"].contains(
        "export interface Form {\n  a: string;\n  b?: string;\n  c: string;\n  d?: string;\n}"
    ));
}

#[test]
fn cyclic_registry_schemas_terminate() {
    let artifacts = generate(json!({
        "openapi": "3.0.0",
        "components": {
            "schemas": {
                "A": { "type": "object", "properties": { "b": { "$ref": "#/components/schemas/B" } } },
                "B": { "type": "object", "properties": { "a": { "$ref": "#/components/schemas/A" } } }
            }
        }
    }));

    let types = &artifacts["types.ts"];
    assert!(types.contains("export interface A {\n  b?: B;\n}"));
    assert!(types.contains("export interface B {\n  a?: A;\n}"));
}
