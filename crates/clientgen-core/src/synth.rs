//! Type synthesis: schema nodes to TypeScript type expressions.
//!
//! References into the component registry are never expanded. They render as the
//! declared name of the registry entry, bare in the global-types artifact and
//! qualified with the types namespace everywhere else, so a cycle through the
//! registry terminates by construction. Any other internal reference is resolved
//! and expanded in place; the chain currently being expanded is tracked and a
//! pointer that reappears in it renders as the permissive fallback.
//!
//! Synthesis never fails. Document-quality problems come out as `any` annotated
//! with a comment naming the problem.

use std::fmt;

use crate::{
    document::{Document, PrimitiveKind, SchemaNode},
    naming::GlobalNames,
    resolver::{self, Reference},
    utils::{quote_if_needed, sanitize_comment},
};

/// Namespace the group artifacts import the global types under
pub const TYPES_NAMESPACE: &str = "Types";

/// Where the synthesized expression will live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMode {
    /// Inside the global-types artifact: registry names are bare
    Global,
    /// Inside a group artifact: registry names are namespace-qualified
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    String,
    Number,
    Boolean,
    Void,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Void => "void",
        }
    }
}

/// A synthesized TypeScript type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Keyword(Keyword),
    /// A declared type, possibly qualified (`Types.User`)
    Named(String),
    /// Structural type with at least one property
    Object(Vec<PropertyExpr>),
    Array(Box<TypeExpr>),
    Union(Vec<TypeExpr>),
    /// Permissive fallback, optionally annotated with the reason
    Any { note: Option<String> },
}

impl TypeExpr {
    pub fn any() -> Self {
        Self::Any { note: None }
    }

    /// `any /* note */`; the note is flattened so it cannot close the comment
    pub fn annotated(note: impl AsRef<str>) -> Self {
        Self::Any {
            note: Some(sanitize_comment(note.as_ref())),
        }
    }

    pub fn void() -> Self {
        Self::Keyword(Keyword::Void)
    }

    /// Whether the expression renders as a union at its top level
    fn is_compound(&self) -> bool {
        matches!(self, Self::Union(members) if members.len() > 1)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(keyword) => f.write_str(keyword.as_str()),
            Self::Named(name) => f.write_str(name),
            Self::Object(properties) => {
                f.write_str("{ ")?;
                for (index, property) in properties.iter().enumerate() {
                    if index > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{property}")?;
                }
                f.write_str(" }")
            }
            Self::Array(item) if item.is_compound() => write!(f, "({item})[]"),
            Self::Array(item) => write!(f, "{item}[]"),
            Self::Union(members) if members.is_empty() => f.write_str("any"),
            Self::Union(members) => {
                for (index, member) in members.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            Self::Any { note: None } => f.write_str("any"),
            Self::Any { note: Some(note) } => write!(f, "any /* {note} */"),
        }
    }
}

/// One member of a structural type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyExpr {
    pub name: String,
    pub optional: bool,
    pub ty: TypeExpr,
}

impl fmt::Display for PropertyExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.optional { "?" } else { "" };
        write!(f, "{}{}: {}", quote_if_needed(&self.name), marker, self.ty)
    }
}

/// Converts schema nodes into [`TypeExpr`] values for one emission mode
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer<'a> {
    document: &'a Document,
    names: &'a GlobalNames,
    mode: TypeMode,
}

impl<'a> Synthesizer<'a> {
    pub fn new(document: &'a Document, names: &'a GlobalNames, mode: TypeMode) -> Self {
        Self {
            document,
            names,
            mode,
        }
    }

    /// Synthesize the type of `node`
    pub fn synthesize(&self, node: &SchemaNode) -> TypeExpr {
        let mut chain = Vec::new();
        self.expand(node, &mut chain)
    }

    fn expand(&self, node: &SchemaNode, chain: &mut Vec<String>) -> TypeExpr {
        match node {
            SchemaNode::Reference(pointer) => self.reference(pointer, chain),
            // a single alternative is the alternative itself
            SchemaNode::Union(alternatives) if alternatives.len() == 1 => {
                self.expand(&alternatives[0], chain)
            }
            SchemaNode::Union(alternatives) if !alternatives.is_empty() => TypeExpr::Union(
                alternatives
                    .iter()
                    .map(|alternative| self.expand(alternative, chain))
                    .collect(),
            ),
            SchemaNode::Object {
                properties,
                required,
            } if !properties.is_empty() => TypeExpr::Object(
                properties
                    .iter()
                    .map(|(name, schema)| PropertyExpr {
                        name: name.clone(),
                        optional: !required.contains(name),
                        ty: self.expand(schema, chain),
                    })
                    .collect(),
            ),
            SchemaNode::Array(item) => TypeExpr::Array(Box::new(self.expand(item, chain))),
            SchemaNode::Primitive(PrimitiveKind::String) => TypeExpr::Keyword(Keyword::String),
            SchemaNode::Primitive(PrimitiveKind::Number | PrimitiveKind::Integer) => {
                TypeExpr::Keyword(Keyword::Number)
            }
            SchemaNode::Primitive(PrimitiveKind::Boolean) => TypeExpr::Keyword(Keyword::Boolean),
            // bare objects, empty unions and unknown kinds
            _ => TypeExpr::any(),
        }
    }

    fn reference(&self, pointer: &str, chain: &mut Vec<String>) -> TypeExpr {
        let parsed = Reference::parse(pointer);
        if let Some(key) = parsed.as_ref().and_then(Reference::component_name) {
            return match self.names.get(key) {
                Some(name) => self.named(name),
                None => unresolved(pointer),
            };
        }

        if chain.iter().any(|seen| seen == pointer) {
            log::warn!("circular reference '{pointer}' rendered as any");
            return TypeExpr::annotated(format!("circular reference: {pointer}"));
        }

        let Some(target) = resolver::resolve(self.document, pointer) else {
            return unresolved(pointer);
        };
        chain.push(pointer.to_string());
        let expr = self.expand(&target, chain);
        chain.pop();
        expr
    }

    fn named(&self, name: &str) -> TypeExpr {
        match self.mode {
            TypeMode::Global => TypeExpr::Named(name.to_string()),
            TypeMode::Local => TypeExpr::Named(format!("{TYPES_NAMESPACE}.{name}")),
        }
    }
}

fn unresolved(pointer: &str) -> TypeExpr {
    log::warn!("reference '{pointer}' does not resolve, rendered as any");
    TypeExpr::annotated(format!("unresolved reference: {pointer}"))
}
