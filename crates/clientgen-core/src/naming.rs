//! Identifier naming for generated TypeScript.
//!
//! Two casing transforms produce callable and type names from whatever the document
//! offers. Both are total and idempotent: a name that is already normalized comes
//! back unchanged, and an input with nothing usable yields a fixed fallback.
//!
//! Uniqueness is handled separately by [`NameAllocator`], which either suffixes a
//! repeated name (`unknown`, `unknown2`, ...) or reports it, depending on the
//! strict naming setting.

use std::collections::HashSet;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::{
    document::{Document, Operation},
    utils::{is_ts_identifier, to_lower_camel_case, to_upper_camel_case},
    Error,
};

/// Callable name used when an operation offers no naming source
pub const FALLBACK_METHOD_NAME: &str = "unknown";

/// Type name used when normalization leaves nothing
pub const FALLBACK_TYPE_NAME: &str = "Unknown";

/// Words that cannot name a declared TypeScript type
static RESERVED_TYPE_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "any", "bigint", "boolean", "never", "null", "number", "object", "string", "symbol",
        "undefined", "unknown", "void", "break", "case", "catch", "class", "const", "continue",
        "debugger", "default", "delete", "do", "else", "enum", "export", "extends", "false",
        "finally", "for", "function", "if", "import", "in", "instanceof", "new", "return",
        "super", "switch", "this", "throw", "true", "try", "typeof", "var", "while", "with",
    ]
    .into_iter()
    .collect()
});

/// lowerCamelCase name for a callable
pub fn to_method_name(raw: &str) -> String {
    finish(to_lower_camel_case(raw), FALLBACK_METHOD_NAME)
}

/// UpperCamelCase name for a declared type
pub fn to_type_name(raw: &str) -> String {
    finish(to_upper_camel_case(raw), FALLBACK_TYPE_NAME)
}

fn finish(name: String, fallback: &str) -> String {
    if name.is_empty() {
        return fallback.to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{name}");
    }
    name
}

/// Callable name for an operation: `operationId`, else summary, else the fallback
pub fn operation_name(operation: &Operation) -> String {
    [operation.id.as_deref(), operation.summary.as_deref()]
        .into_iter()
        .flatten()
        .find(|source| !source.trim().is_empty())
        .map(to_method_name)
        .unwrap_or_else(|| FALLBACK_METHOD_NAME.to_string())
}

/// Hands out names that are unique within one scope
#[derive(Debug, Clone)]
pub struct NameAllocator {
    scope: String,
    strict: bool,
    ignore_case: bool,
    taken: HashSet<String>,
}

impl NameAllocator {
    pub fn new(scope: impl Into<String>, strict: bool) -> Self {
        Self {
            scope: scope.into(),
            strict,
            ignore_case: false,
            taken: HashSet::new(),
        }
    }

    /// Treat names that differ only in case as the same name, as file names are
    /// on case-insensitive filesystems
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Mark a name as used without allocating it
    pub fn reserve(&mut self, name: impl Into<String>) {
        let key = self.key(&name.into());
        self.taken.insert(key);
    }

    /// Allocate `base`, or the first free `base2`, `base3`, ... when it is taken
    pub fn allocate(&mut self, base: &str) -> crate::Result<String> {
        if self.claim(base) {
            return Ok(base.to_string());
        }
        if self.strict {
            return Err(Error::NameCollision {
                scope: self.scope.clone(),
                name: base.to_string(),
            });
        }

        let mut counter = 2;
        loop {
            let candidate = format!("{base}{counter}");
            if self.claim(&candidate) {
                log::warn!(
                    "{}: '{}' is generated more than once, renamed to '{}'",
                    self.scope,
                    base,
                    candidate
                );
                return Ok(candidate);
            }
            counter += 1;
        }
    }

    fn claim(&mut self, name: &str) -> bool {
        let key = self.key(name);
        self.taken.insert(key)
    }

    fn key(&self, name: &str) -> String {
        if self.ignore_case {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }
}

/// Declared names of the component schemas, keyed by registry key
#[derive(Debug, Clone, Default)]
pub struct GlobalNames {
    by_key: IndexMap<String, String>,
}

impl GlobalNames {
    /// Assign a type name to every registry entry, in registry order
    pub fn build(document: &Document, scope: &str, strict: bool) -> crate::Result<Self> {
        let mut allocator = NameAllocator::new(scope, strict);
        let mut by_key = IndexMap::new();
        for key in document.schemas.keys() {
            let name = allocator.allocate(&global_type_name(key))?;
            by_key.insert(key.clone(), name);
        }
        Ok(Self { by_key })
    }

    /// Declared name for a registry key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }

    /// (registry key, declared name) pairs in registry order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_key
            .iter()
            .map(|(key, name)| (key.as_str(), name.as_str()))
    }
}

/// Registry keys are kept verbatim when TypeScript accepts them as a type name
fn global_type_name(key: &str) -> String {
    if is_ts_identifier(key) && !RESERVED_TYPE_NAMES.contains(key) {
        key.to_string()
    } else {
        to_type_name(key)
    }
}
