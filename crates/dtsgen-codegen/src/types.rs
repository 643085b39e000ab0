//! Type definitions for the declaration generator.
//!
//! The descriptors mirror what a reflector reports for a compiled module: every
//! type reference carries enough information (module identity, generic
//! arguments, implemented interfaces, nullable wrapping) for the
//! [`TypeMapper`](crate::TypeMapper) to classify it without further lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Module that defines the runtime's built-in types.
pub const CORE_LIBRARY: &str = "System.Private.CoreLib";

/// Interface implemented by keyed-associative containers.
pub const DICTIONARY_CAPABILITY: &str = "System.Collections.IDictionary";

/// Interface implemented by sequential containers.
pub const ENUMERABLE_CAPABILITY: &str = "System.Collections.IEnumerable";

/// Identity of a type for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey {
    pub module: String,
    pub full_name: String,
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name, self.module)
    }
}

/// A reference to a native type, as reported by the metadata source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    /// Simple name (e.g., `"Int32"`, ``"List`1"``).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Fully-qualified name (e.g., `"System.Int32"`).
    pub full_name: String,
    /// Owning namespace. `None` for types in the global namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Identity of the module (assembly) that defines the type.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub module: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_arguments: Vec<TypeDescriptor>,
    /// Fully-qualified names of the interfaces the type implements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    /// Set when this type is the nullable wrapper of another type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable_of: Option<Box<TypeDescriptor>>,
    /// Set for enums: the integral type the enum is stored as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_underlying: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    /// Create a descriptor, deriving the simple name and namespace from the
    /// fully-qualified name.
    pub fn new(module: impl Into<String>, full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let (namespace, name) = split_full_name(&full_name);
        Self {
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            full_name,
            module: module.into(),
            generic_arguments: Vec::new(),
            interfaces: Vec::new(),
            nullable_of: None,
            enum_underlying: None,
        }
    }

    /// A type defined by the runtime's core library.
    pub fn core(full_name: impl Into<String>) -> Self {
        Self::new(CORE_LIBRARY, full_name)
    }

    pub fn with_generic_arguments(mut self, arguments: Vec<TypeDescriptor>) -> Self {
        self.generic_arguments = arguments;
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    // Built-in types

    pub fn byte() -> Self {
        Self::core("System.Byte")
    }

    pub fn int32() -> Self {
        Self::core("System.Int32")
    }

    pub fn int64() -> Self {
        Self::core("System.Int64")
    }

    pub fn double() -> Self {
        Self::core("System.Double")
    }

    pub fn decimal() -> Self {
        Self::core("System.Decimal")
    }

    pub fn boolean() -> Self {
        Self::core("System.Boolean")
    }

    pub fn char() -> Self {
        Self::core("System.Char")
    }

    pub fn string() -> Self {
        Self::core("System.String").with_interface(ENUMERABLE_CAPABILITY)
    }

    pub fn date_time() -> Self {
        Self::core("System.DateTime")
    }

    pub fn object() -> Self {
        Self::core("System.Object")
    }

    /// `Nullable<T>` wrapping `inner`.
    pub fn nullable(inner: TypeDescriptor) -> Self {
        let mut ty = Self::core("System.Nullable`1").with_generic_arguments(vec![inner.clone()]);
        ty.nullable_of = Some(Box::new(inner));
        ty
    }

    /// `List<T>`.
    pub fn list(item: TypeDescriptor) -> Self {
        Self::core("System.Collections.Generic.List`1")
            .with_generic_arguments(vec![item])
            .with_interface(ENUMERABLE_CAPABILITY)
    }

    /// `Dictionary<K, V>`.
    pub fn dictionary(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::core("System.Collections.Generic.Dictionary`2")
            .with_generic_arguments(vec![key, value])
            .with_interface(DICTIONARY_CAPABILITY)
            .with_interface(ENUMERABLE_CAPABILITY)
    }

    /// An enum stored as `underlying`.
    pub fn enumeration(
        module: impl Into<String>,
        full_name: impl Into<String>,
        underlying: TypeDescriptor,
    ) -> Self {
        let mut ty = Self::new(module, full_name);
        ty.enum_underlying = Some(Box::new(underlying));
        ty
    }

    pub fn key(&self) -> TypeKey {
        TypeKey {
            module: self.module.clone(),
            full_name: self.full_name.clone(),
        }
    }

    /// Check whether the type implements the interface with the given
    /// fully-qualified name.
    pub fn implements(&self, interface: &str) -> bool {
        self.interfaces.iter().any(|i| i == interface)
    }

    /// Check whether the type implements an interface whose simple name is
    /// `name`, regardless of its namespace.
    pub fn implements_named(&self, name: &str) -> bool {
        self.interfaces
            .iter()
            .any(|i| split_full_name(i).1 == name)
    }

    pub fn is_keyed_container(&self) -> bool {
        self.implements(DICTIONARY_CAPABILITY)
    }

    pub fn is_sequential_container(&self) -> bool {
        self.implements(ENUMERABLE_CAPABILITY)
    }

    /// Fill in the simple name and namespace when the metadata omitted them.
    pub(crate) fn fill_names(&mut self) {
        if self.name.is_empty() {
            let (namespace, name) = split_full_name(&self.full_name);
            self.name = name.to_string();
            if self.namespace.is_none() {
                self.namespace = namespace.map(str::to_string);
            }
        }
    }
}

/// Split `"A.B.C"` into `(Some("A.B"), "C")`.
fn split_full_name(full_name: &str) -> (Option<&str>, &str) {
    match full_name.rsplit_once('.') {
        Some((namespace, name)) => (Some(namespace), name),
        None => (None, full_name),
    }
}

fn default_public() -> bool {
    true
}

/// A reflected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMember {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub is_static: bool,
    /// Init-only: assignable only during construction.
    #[serde(default)]
    pub is_read_only: bool,
}

impl FieldMember {
    pub fn read_only(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            is_public: true,
            is_static: false,
            is_read_only: true,
        }
    }

    pub fn mutable(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            is_read_only: false,
            ..Self::read_only(name, ty)
        }
    }
}

/// A reflected property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMember {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub has_public_setter: bool,
}

impl PropertyMember {
    pub fn read_write(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            is_public: true,
            is_static: false,
            has_public_setter: true,
        }
    }

    pub fn read_only(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            has_public_setter: false,
            ..Self::read_write(name, ty)
        }
    }
}

/// A method parameter. Only counted, never emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterMember {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

/// A reflected method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodMember {
    pub name: String,
    pub return_type: TypeDescriptor,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub is_static: bool,
    /// Operators and property/event accessors.
    #[serde(default)]
    pub is_special_name: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterMember>,
}

impl MethodMember {
    pub fn new(name: impl Into<String>, return_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            return_type,
            is_public: true,
            is_static: false,
            is_special_name: false,
            parameters: Vec::new(),
        }
    }

    pub fn special_name(mut self) -> Self {
        self.is_special_name = true;
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.parameters.push(ParameterMember {
            name: name.into(),
            ty,
        });
        self
    }
}

/// One member selected for a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberDescriptor<'a> {
    Field(&'a FieldMember),
    Property(&'a PropertyMember),
    Method(&'a MethodMember),
}

impl<'a> MemberDescriptor<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            MemberDescriptor::Field(f) => &f.name,
            MemberDescriptor::Property(p) => &p.name,
            MemberDescriptor::Method(m) => &m.name,
        }
    }

    /// The declared type (the return type for methods).
    pub fn ty(&self) -> &'a TypeDescriptor {
        match self {
            MemberDescriptor::Field(f) => &f.ty,
            MemberDescriptor::Property(p) => &p.ty,
            MemberDescriptor::Method(m) => &m.return_type,
        }
    }
}

/// A type together with its reflected members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    #[serde(flatten)]
    pub descriptor: TypeDescriptor,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldMember>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyMember>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodMember>,
}

impl TypeDefinition {
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldMember) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_property(mut self, property: PropertyMember) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_method(mut self, method: MethodMember) -> Self {
        self.methods.push(method);
        self
    }

    pub fn key(&self) -> TypeKey {
        self.descriptor.key()
    }
}

/// A TypeScript type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    Number,
    String,
    Boolean,
    Date,
    /// The open type, `any`.
    Any,
    /// `Array<T>`
    Array(Box<TsType>),
    /// `{ [key: K]: V }`
    Index(Box<TsType>, Box<TsType>),
    /// Reference to a generated interface by its fully-qualified name.
    Named(String),
    /// `T | null`
    Nullable(Box<TsType>),
}

impl TsType {
    /// Union `inner` with `null`. Already-nullable expressions are returned as is.
    pub fn nullable(inner: TsType) -> TsType {
        if inner.is_nullable() {
            inner
        } else {
            TsType::Nullable(Box::new(inner))
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, TsType::Nullable(_))
    }

    /// Strip a top-level null union.
    pub fn non_null(self) -> TsType {
        match self {
            TsType::Nullable(inner) => *inner,
            other => other,
        }
    }

    /// Render the TypeScript type expression.
    pub fn to_ts_type(&self) -> String {
        match self {
            TsType::Number => "number".to_string(),
            TsType::String => "string".to_string(),
            TsType::Boolean => "boolean".to_string(),
            TsType::Date => "Date".to_string(),
            TsType::Any => "any".to_string(),
            TsType::Array(inner) => format!("Array<{}>", inner.to_ts_type()),
            TsType::Index(key, value) => {
                format!("{{ [key: {}]: {} }}", key.to_ts_type(), value.to_ts_type())
            }
            TsType::Named(name) => name.clone(),
            TsType::Nullable(inner) => format!("{} | null", inner.to_ts_type()),
        }
    }
}

impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ts_type())
    }
}
