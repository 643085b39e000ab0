//! Translation of runtime type descriptors into TypeScript type expressions.

use crate::registry::{PrimitiveKind, TypeRegistry};
use crate::types::{TsType, TypeDescriptor};
use std::collections::HashSet;

/// Result of mapping one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapped<'t> {
    pub ts: TsType,
    /// Project-owned types referenced by the expression, in discovery order.
    /// Each one needs its own declaration.
    pub owned: Vec<&'t TypeDescriptor>,
}

/// Maps [`TypeDescriptor`]s to [`TsType`]s.
///
/// Rules are checked in a fixed order and the first match wins:
///
/// 1. nullable wrapper of `T`: `map(T) | null`, never doubling an existing
///    `| null` (`Nullable<Point>` is `Shop.Point | null`)
/// 2. numeric (including enums): `number`
/// 3. textual: `string | null`
/// 4. date/time: `Date`
/// 5. boolean: `boolean`
/// 6. keyed container with two generic arguments: `{ [key: K]: V } | null`
/// 7. sequential container with a generic argument: `Array<T> | null`
/// 8. type from a project module: `Full.Name | null`, reported as owned
/// 9. anything else: `any`
#[derive(Debug, Clone)]
pub struct TypeMapper {
    registry: TypeRegistry,
    project_modules: HashSet<String>,
}

impl TypeMapper {
    pub fn new<I, M>(project_modules: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        Self {
            registry: TypeRegistry::with_builtins(),
            project_modules: project_modules.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    /// Check if the type is defined by one of the project modules.
    pub fn is_project_owned(&self, ty: &TypeDescriptor) -> bool {
        self.project_modules.contains(&ty.module)
    }

    pub fn map<'t>(&self, ty: &'t TypeDescriptor) -> Mapped<'t> {
        let mut owned = Vec::new();
        let ts = self.map_into(ty, &mut owned);
        Mapped { ts, owned }
    }

    fn map_into<'t>(&self, ty: &'t TypeDescriptor, owned: &mut Vec<&'t TypeDescriptor>) -> TsType {
        if let Some(inner) = ty.nullable_of.as_deref() {
            return TsType::nullable(self.map_into(inner, owned));
        }

        match self.primitive_kind(ty) {
            Some(PrimitiveKind::Numeric) => return TsType::Number,
            Some(PrimitiveKind::Textual) => return TsType::nullable(TsType::String),
            Some(PrimitiveKind::DateTime) => return TsType::Date,
            Some(PrimitiveKind::Boolean) => return TsType::Boolean,
            None => {}
        }

        if ty.is_keyed_container()
            && let [key, value] = ty.generic_arguments.as_slice()
        {
            // Index signature keys cannot be unioned with null
            let key = self.map_into(key, owned).non_null();
            let value = self.map_into(value, owned);
            return TsType::nullable(TsType::Index(Box::new(key), Box::new(value)));
        }

        if ty.is_sequential_container()
            && let Some(item) = ty.generic_arguments.first()
        {
            let item = self.map_into(item, owned);
            return TsType::nullable(TsType::Array(Box::new(item)));
        }

        if self.is_project_owned(ty) {
            owned.push(ty);
            return TsType::nullable(TsType::Named(ty.full_name.clone()));
        }

        TsType::Any
    }

    /// Enums classify through their underlying integral type.
    fn primitive_kind(&self, ty: &TypeDescriptor) -> Option<PrimitiveKind> {
        let ty = ty.enum_underlying.as_deref().unwrap_or(ty);
        self.registry.get(&ty.full_name)
    }
}
