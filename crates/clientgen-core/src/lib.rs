//! clientgen Core Library
//!
//! This library turns OpenAPI 3 documents into typed TypeScript API clients: one
//! shared types module, a type-only request contract, and one client factory per
//! operation tag.

pub mod builders;
pub mod config;
pub mod document;
pub mod emitters;
pub mod error;
pub mod generate;
pub mod indexer;
pub mod naming;
pub mod openapi;
pub mod output;
pub mod resolver;
pub mod synth;
pub mod templates;
pub mod utils;

pub use crate::{
    config::{Config, GenerateOptions},
    document::Document,
    error::{Error, Result},
    generate::{generate, transform, Artifacts},
    openapi::OpenApiContext,
    output::write_artifacts,
    templates::{TemplateDir, TemplateSet},
};
