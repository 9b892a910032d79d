//! Code generation entry points.
//!
//! [`transform`] is the pure part: a document in, a complete set of named artifacts
//! out. [`generate`] wraps it with loading and persistence.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::{
    config::{Config, GenerateOptions},
    document::Document,
    emitters::{self, group::GroupEnv},
    indexer::index_operations,
    naming::{GlobalNames, NameAllocator},
    openapi::OpenApiContext,
    output::write_artifacts,
    templates::{TemplateDir, TemplateSet},
    utils::sanitize_filename,
};

/// Generated artifacts keyed by file name, in emission order
pub type Artifacts = IndexMap<String, String>;

/// Turn a document into its artifacts.
///
/// Order: global types, request contract (when enabled), then one artifact per tag
/// in the order tags first appear.
pub fn transform(
    document: &Document,
    options: &GenerateOptions,
    templates: &TemplateSet,
) -> crate::Result<Artifacts> {
    options.validate()?;
    let banner = emitters::banner(document);
    let types_file = options.artifact_name(&options.types_module);
    let names = GlobalNames::build(document, &types_file, options.strict_names)?;

    let mut artifacts = Artifacts::new();
    artifacts.insert(
        types_file,
        emitters::emit_types(document, &names, templates, &banner)?,
    );
    if options.emit_request_contract {
        artifacts.insert(
            options.artifact_name(&options.request_module),
            emitters::emit_request_contract(templates, &banner)?,
        );
    }

    let groups = index_operations(document, &options.fallback_tag);

    let mut stems = NameAllocator::new("output directory", options.strict_names).ignore_case();
    stems.reserve(options.types_module.clone());
    stems.reserve(options.request_module.clone());
    let files = groups
        .iter()
        .map(|group| {
            stems
                .allocate(&sanitize_filename(&group.tag))
                .map(|stem| options.artifact_name(&stem))
        })
        .collect::<crate::Result<Vec<_>>>()?;

    let env = GroupEnv {
        document,
        names: &names,
        options,
        templates,
        banner: &banner,
    };
    let rendered = groups
        .par_iter()
        .zip(files.par_iter())
        .map(|(group, file)| emitters::emit_group(env, group, file))
        .collect::<crate::Result<Vec<_>>>()?;

    artifacts.extend(files.into_iter().zip(rendered));

    log::debug!("generated {} artifacts", artifacts.len());
    Ok(artifacts)
}

/// Load the configured document, transform it and write the artifacts
pub async fn generate(config: &Config) -> crate::Result<Artifacts> {
    // 1. Load the OpenAPI document
    let context = OpenApiContext::from_file_or_url(&config.schema_path).await?;
    let document = Document::from_context(&context)?;
    log::info!(
        "loaded {} ({} operations, {} component schemas)",
        config.schema_path,
        document.operations().count(),
        document.schemas.len()
    );

    // 2. Resolve templates
    let template_dir = TemplateDir::discover(config.template_dir.as_deref().map(Path::new))?;
    let templates = TemplateSet::with_overrides(template_dir.as_ref()).await?;

    // 3. Transform in full before touching the output directory
    let artifacts = transform(&document, &config.options, &templates)?;

    // 4. Persist
    write_artifacts(PathBuf::from(&config.output_dir), &artifacts).await?;
    Ok(artifacts)
}
