//! Registry of built-in runtime types with a fixed TypeScript counterpart.
//!
//! The registry provides a data-driven way to classify primitive types by their
//! fully-qualified name. The runtime's numeric, textual, date and boolean types
//! are registered automatically, and users can add or remove mappings.

use std::collections::HashMap;

/// Primitive classification of a runtime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Fixed-width integers, floats and decimal: `number`.
    Numeric,
    /// Strings: `string | null`.
    Textual,
    /// Date/time values: `Date`.
    DateTime,
    /// `boolean`.
    Boolean,
}

const NUMERIC_TYPES: [&str; 11] = [
    "System.Byte",
    "System.SByte",
    "System.Int16",
    "System.UInt16",
    "System.Int32",
    "System.UInt32",
    "System.Int64",
    "System.UInt64",
    "System.Single",
    "System.Double",
    "System.Decimal",
];

/// A registry of fully-qualified runtime type name -> [`PrimitiveKind`] associations.
///
/// Each name maps to exactly one kind, so the numeric, textual, date and boolean
/// classes never overlap.
///
/// # Built-in mappings
///
/// | Runtime type | Kind |
/// |--------------|------|
/// | `System.Byte`, `System.SByte`, `System.Int16`, `System.UInt16`, `System.Int32`, `System.UInt32`, `System.Int64`, `System.UInt64`, `System.Single`, `System.Double`, `System.Decimal` | `Numeric` |
/// | `System.String` | `Textual` |
/// | `System.DateTime` | `DateTime` |
/// | `System.Boolean` | `Boolean` |
///
/// # Custom mappings
///
/// ```
/// use dtsgen_codegen::registry::{PrimitiveKind, TypeRegistry};
///
/// let mut registry = TypeRegistry::with_builtins();
/// registry.register("System.Guid", PrimitiveKind::Textual);
/// assert_eq!(registry.get("System.Guid"), Some(PrimitiveKind::Textual));
/// ```
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    mappings: HashMap<String, PrimitiveKind>,
}

impl TypeRegistry {
    /// Create an empty registry with no mappings.
    pub fn new() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the runtime's primitive types.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// Register all built-in primitive mappings.
    pub fn register_builtins(&mut self) {
        for name in NUMERIC_TYPES {
            self.register(name, PrimitiveKind::Numeric);
        }
        self.register("System.String", PrimitiveKind::Textual);
        self.register("System.DateTime", PrimitiveKind::DateTime);
        self.register("System.Boolean", PrimitiveKind::Boolean);
    }

    /// Register a kind for a fully-qualified type name, replacing any existing one.
    pub fn register(&mut self, name: impl Into<String>, kind: PrimitiveKind) {
        self.mappings.insert(name.into(), kind);
    }

    pub fn get(&self, name: &str) -> Option<PrimitiveKind> {
        self.mappings.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.mappings.contains_key(name)
    }

    /// Remove a mapping.
    pub fn unregister(&mut self, name: &str) -> Option<PrimitiveKind> {
        self.mappings.remove(name)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
