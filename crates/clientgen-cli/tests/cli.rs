//! End-to-end tests for the clientgen binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result};

const SPEC: &str = r##"
openapi: 3.0.0
info:
  title: Test API
  version: 1.0.0
paths:
  /pets:
    get:
      operationId: listPets
      tags: [pets]
      responses:
        "200":
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: "#/components/schemas/Pet"
    post:
      operationId: createPet
      tags: [pets]
      requestBody:
        content:
          application/json:
            schema:
              type: object
              required: [name]
              properties:
                name:
                  type: string
      responses:
        "201":
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Pet"
  /health:
    get:
      summary: Health check
components:
  schemas:
    Pet:
      type: object
      required: [id]
      properties:
        id:
          type: integer
        name:
          type: string
"##;

fn write_spec(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("openapi.yaml");
    fs::write(&path, SPEC).context("writing fixture")?;
    Ok(path)
}

fn clientgen(args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_clientgen"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .context("running clientgen")
}

#[test]
fn test_generate_writes_client() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let spec = write_spec(temp.path())?;
    let out = temp.path().join("client");

    let output = clientgen(&[
        "generate",
        "--schema-path",
        spec.to_str().context("utf-8 path")?,
        "--output-dir",
        out.to_str().context("utf-8 path")?,
    ])?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let types = fs::read_to_string(out.join("types.ts"))?;
    assert!(types.contains("export interface Pet {\n  id: number;\n  name?: string;\n}"));

    let pets = fs::read_to_string(out.join("pets.ts"))?;
    assert!(pets.contains("export function createPetsApi(request: RequestFn) {"));
    assert!(pets.contains("listPets(signal?: AbortSignal): Promise<ListPetsResponse> {"));
    assert!(pets.contains("export type ListPetsResponse = Types.Pet[];"));
    assert!(pets.contains(
        "createPet(data: CreatePetRequest, signal?: AbortSignal): Promise<Types.Pet> {"
    ));

    let default = fs::read_to_string(out.join("default.ts"))?;
    assert!(default.contains("healthCheck(signal?: AbortSignal): Promise<void> {"));
    assert!(out.join("request.ts").exists());
    Ok(())
}

#[test]
fn test_config_file_and_flag_override() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let spec = write_spec(temp.path())?;
    let out = temp.path().join("from-config");
    let config = temp.path().join("clientgen.toml");
    fs::write(
        &config,
        format!(
            "schema_path = {:?}\noutput_dir = {:?}\nfallback_tag = \"misc\"\n",
            spec.to_string_lossy(),
            out.to_string_lossy()
        ),
    )?;

    let output = clientgen(&[
        "generate",
        "--config",
        config.to_str().context("utf-8 path")?,
        "--no-request-contract",
    ])?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(out.join("misc.ts").exists());
    assert!(out.join("pets.ts").exists());
    assert!(!out.join("request.ts").exists());
    Ok(())
}

#[test]
fn test_missing_schema_fails() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let out = temp.path().join("client");

    let output = clientgen(&[
        "generate",
        "--schema-path",
        temp.path().join("missing.yaml").to_str().context("utf-8 path")?,
        "--output-dir",
        out.to_str().context("utf-8 path")?,
    ])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to generate client"));
    assert!(!out.exists());
    Ok(())
}

#[test]
fn test_swagger_documents_are_rejected() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let spec = temp.path().join("swagger.json");
    fs::write(&spec, r#"{"swagger":"2.0","paths":{}}"#)?;

    let output = clientgen(&["generate", "--schema-path", spec.to_str().context("utf-8 path")?])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Swagger 2.0"));
    Ok(())
}
