//! Emitters for the generated artifacts.
//!
//! Each emitter renders one artifact from its template and returns the text.
//! Nothing here touches the filesystem.

pub mod global;
pub mod group;
pub mod request;

use crate::{document::Document, synth::TypeExpr, utils::sanitize_comment};

pub use global::emit_types;
pub use group::emit_group;
pub use request::emit_request_contract;

/// A named top-level type declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub ty: TypeExpr,
}

impl Declaration {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Structural types become interfaces, everything else a type alias
    pub fn render(&self) -> String {
        match &self.ty {
            TypeExpr::Object(properties) => {
                let mut out = format!("export interface {} {{\n", self.name);
                for property in properties {
                    out.push_str(&format!("  {property};\n"));
                }
                out.push('}');
                out
            }
            ty => format!("export type {} = {};", self.name, ty),
        }
    }
}

/// Header comment of every artifact
pub fn banner(document: &Document) -> String {
    let source = [document.title.as_deref(), document.version.as_deref()]
        .into_iter()
        .flatten()
        .map(sanitize_comment)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>();
    let source = if document.title.is_some() && !source.is_empty() {
        format!(" from {}", source.join(" "))
    } else {
        String::new()
    };
    format!("/* eslint-disable */\n// Generated by clientgen{source}. Do not edit by hand.")
}
