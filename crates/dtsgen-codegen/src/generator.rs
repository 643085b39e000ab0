//! TypeScript declaration generator for reflected types.

use crate::mapper::TypeMapper;
use crate::metadata::{Metadata, MetadataSource};
use crate::registry::{PrimitiveKind, TypeRegistry};
use crate::types::{MemberDescriptor, TypeDefinition, TypeDescriptor, TypeKey};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Methods every object carries that are not part of a data contract.
pub const IGNORED_METHODS: [&str; 5] = ["Equals", "GetHashCode", "ToString", "Dispose", "GetType"];

/// A finished interface declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Simple name of the declared type.
    pub name: String,
    /// Declaration text, without namespace indentation.
    pub text: String,
}

/// A public method whose parameters were dropped from the emitted signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfContract {
    pub type_name: String,
    pub method: String,
    pub parameter_count: usize,
}

/// Generator that walks the type graph from root types and collects interface
/// declarations grouped by namespace.
///
/// Every project-owned type reachable from a root is declared exactly once,
/// including types that reference each other.
///
/// # Example
///
/// ```
/// use dtsgen_codegen::{
///     InterfaceGenerator, Metadata, MethodMember, PropertyMember, TypeDefinition, TypeDescriptor,
/// };
///
/// let mut metadata = Metadata::new();
/// metadata
///     .add_type(
///         TypeDefinition::new(TypeDescriptor::new("Shop", "Shop.Pages.Home"))
///             .with_property(PropertyMember::read_only("Title", TypeDescriptor::string()))
///             .with_method(MethodMember::new("GetCount", TypeDescriptor::int32())),
///     )
///     .unwrap();
///
/// let mut generator = InterfaceGenerator::for_metadata(&metadata);
/// generator.generate_for(&TypeDescriptor::new("Shop", "Shop.Pages.Home"));
/// let code = generator.declarations();
/// assert!(code.contains("\t\treadonly title: string | null;"));
/// assert!(code.contains("\t\tgetCount(): Promise<number>;"));
/// ```
pub struct InterfaceGenerator<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
    mapper: TypeMapper,

    /// Custom header comment
    header: Option<String>,

    /// Types already generated or in progress
    visited: HashSet<TypeKey>,

    /// Declarations per namespace, in discovery order. `None` is the global namespace.
    namespaces: IndexMap<Option<String>, Vec<Declaration>>,

    out_of_contract: Vec<OutOfContract>,
}

impl<'a> InterfaceGenerator<'a, Metadata> {
    /// Create a generator treating every module loaded into `metadata` as a
    /// project module.
    pub fn for_metadata(metadata: &'a Metadata) -> Self {
        Self::new(metadata, metadata.modules())
    }
}

impl<'a, S: MetadataSource + ?Sized> InterfaceGenerator<'a, S> {
    pub fn new<I, M>(source: &'a S, project_modules: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        Self {
            source,
            mapper: TypeMapper::new(project_modules),
            header: None,
            visited: HashSet::new(),
            namespaces: IndexMap::new(),
            out_of_contract: Vec::new(),
        }
    }

    /// Set a header comment for the generated file.
    pub fn set_header(&mut self, header: impl Into<String>) -> &mut Self {
        self.header = Some(header.into());
        self
    }

    /// Classify a runtime type name as a primitive.
    pub fn register_type(&mut self, name: impl Into<String>, kind: PrimitiveKind) -> &mut Self {
        self.mapper.registry_mut().register(name, kind);
        self
    }

    /// Remove a primitive mapping, e.g. to disable a built-in one.
    pub fn unregister_type(&mut self, name: &str) -> &mut Self {
        self.mapper.registry_mut().unregister(name);
        self
    }

    pub fn registry(&self) -> &TypeRegistry {
        self.mapper.registry()
    }

    /// Declarations collected so far.
    pub fn namespaces(&self) -> &IndexMap<Option<String>, Vec<Declaration>> {
        &self.namespaces
    }

    /// Methods that declared parameters. They are emitted without them.
    pub fn out_of_contract(&self) -> &[OutOfContract] {
        &self.out_of_contract
    }

    /// Generate the declaration of `ty` and of every project-owned type it
    /// references. Types already generated are skipped.
    pub fn generate_for(&mut self, ty: &TypeDescriptor) {
        let key = ty.key();
        if self.visited.contains(&key) {
            return;
        }
        // Mark before traversal so that cycles terminate
        self.visited.insert(key.clone());

        let source = self.source;
        let Some(definition) = source.definition(&key) else {
            warn!(type_name = %key, "no metadata for project type; emitting an empty interface");
            // Member references from metadata documents may carry only the full name
            let mut reference = ty.clone();
            reference.fill_names();
            let text = format!("interface {} {{\n}}\n", reference.name);
            self.add_to_namespace(reference.namespace, reference.name, text);
            return;
        };

        let name = &definition.descriptor.name;
        let mut output = format!("interface {name} {{\n");

        for member in select_members(definition) {
            let mapped = self.mapper.map(member.ty());
            for dependency in &mapped.owned {
                self.generate_for(dependency);
            }

            let ts = mapped.ts;
            match member {
                MemberDescriptor::Field(field) => {
                    output.push_str(&format!("\t{}: {ts};\n", field.name));
                }
                MemberDescriptor::Property(property) => {
                    let readonly = if property.has_public_setter { "" } else { "readonly " };
                    output.push_str(&format!("\t{readonly}{}: {ts};\n", lc_first(&property.name)));
                }
                MemberDescriptor::Method(method) => {
                    if !method.parameters.is_empty() {
                        warn!(
                            type_name = %key,
                            method = %method.name,
                            parameters = method.parameters.len(),
                            "method parameters are not part of the contract and were dropped"
                        );
                        self.out_of_contract.push(OutOfContract {
                            type_name: definition.descriptor.full_name.clone(),
                            method: method.name.clone(),
                            parameter_count: method.parameters.len(),
                        });
                    }
                    output.push_str(&format!("\t{}(): Promise<{ts}>;\n", lc_first(&method.name)));
                }
            }
        }

        output.push_str("}\n");

        debug!(type_name = %key, "generated interface");
        self.add_to_namespace(
            definition.descriptor.namespace.clone(),
            name.clone(),
            output,
        );
    }

    /// Serialize all collected declarations, grouped by namespace.
    pub fn declarations(&self) -> String {
        let mut output = String::new();

        if let Some(header) = &self.header {
            output.push_str("/**\n");
            for line in header.lines() {
                output.push_str(" * ");
                output.push_str(line);
                output.push('\n');
            }
            output.push_str(" */\n\n");
        }

        for (namespace, declarations) in &self.namespaces {
            match namespace {
                Some(namespace) => {
                    output.push_str(&format!("declare namespace {namespace} {{\n"));
                    for declaration in declarations {
                        for line in declaration.text.lines() {
                            output.push('\t');
                            output.push_str(line);
                            output.push('\n');
                        }
                        output.push('\n');
                    }
                    output.push_str("}\n");
                }
                None => {
                    for declaration in declarations {
                        output.push_str(&declaration.text);
                        output.push('\n');
                    }
                }
            }
        }

        output
    }

    /// Write the declarations to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.declarations())
    }

    /// Write the declarations to a writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.declarations().as_bytes())
    }

    fn add_to_namespace(&mut self, namespace: Option<String>, name: String, text: String) {
        self.namespaces
            .entry(namespace)
            .or_default()
            .push(Declaration { name, text });
    }
}

/// Members that make up a type's public contract: read-only public instance
/// fields, public instance properties, then public instance methods that are
/// neither special-name nor in [`IGNORED_METHODS`].
fn select_members(definition: &TypeDefinition) -> impl Iterator<Item = MemberDescriptor<'_>> {
    let fields = definition
        .fields
        .iter()
        .filter(|f| f.is_public && !f.is_static && f.is_read_only)
        .map(MemberDescriptor::Field);
    let properties = definition
        .properties
        .iter()
        .filter(|p| p.is_public && !p.is_static)
        .map(MemberDescriptor::Property);
    let methods = definition
        .methods
        .iter()
        .filter(|m| {
            m.is_public
                && !m.is_static
                && !m.is_special_name
                && !IGNORED_METHODS.contains(&m.name.as_str())
        })
        .map(MemberDescriptor::Method);
    fields.chain(properties).chain(methods)
}

/// Lower-case the first character.
fn lc_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldMember, MethodMember, PropertyMember};
    use indoc::indoc;

    const SHOP: &str = "Shop.Backend";

    fn ty(full_name: &str) -> TypeDescriptor {
        TypeDescriptor::new(SHOP, full_name)
    }

    fn metadata(definitions: Vec<TypeDefinition>) -> Metadata {
        let mut metadata = Metadata::new();
        for definition in definitions {
            metadata.add_type(definition).unwrap();
        }
        metadata
    }

    fn object_methods(definition: TypeDefinition) -> TypeDefinition {
        definition
            .with_method(MethodMember::new("Equals", TypeDescriptor::boolean()))
            .with_method(MethodMember::new("GetHashCode", TypeDescriptor::int32()))
            .with_method(MethodMember::new("ToString", TypeDescriptor::string()))
            .with_method(MethodMember::new("GetType", TypeDescriptor::core("System.Type")))
            .with_method(MethodMember::new("Dispose", TypeDescriptor::core("System.Void")))
    }

    #[test]
    fn test_generate_simple_interface() {
        let metadata = metadata(vec![
            TypeDefinition::new(ty("Shop.Pages.HomePage"))
                .with_field(FieldMember::read_only("Id", TypeDescriptor::int32()))
                .with_property(PropertyMember::read_write("Title", TypeDescriptor::string()))
                .with_property(PropertyMember::read_only("CreatedAt", TypeDescriptor::date_time()))
                .with_method(MethodMember::new("GetName", TypeDescriptor::string())),
        ]);

        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator.generate_for(&ty("Shop.Pages.HomePage"));

        let expected = indoc! {"
            declare namespace Shop.Pages {
            \tinterface HomePage {
            \t\tId: number;
            \t\ttitle: string | null;
            \t\treadonly createdAt: Date;
            \t\tgetName(): Promise<string | null>;
            \t}

            }
        "};
        assert_eq!(generator.declarations(), expected);
    }

    #[test]
    fn test_excluded_members_never_appear() {
        let metadata = metadata(vec![object_methods(
            TypeDefinition::new(ty("Shop.Pages.HomePage"))
                .with_field(FieldMember::mutable("Counter", TypeDescriptor::int32()))
                .with_field(FieldMember {
                    is_static: true,
                    ..FieldMember::read_only("Instance", TypeDescriptor::int32())
                })
                .with_field(FieldMember {
                    is_public: false,
                    ..FieldMember::read_only("secret", TypeDescriptor::int32())
                })
                .with_property(PropertyMember {
                    is_static: true,
                    ..PropertyMember::read_only("Default", TypeDescriptor::int32())
                })
                .with_method(MethodMember::new("get_Title", TypeDescriptor::string()).special_name())
                .with_method(MethodMember::new("op_Equality", TypeDescriptor::boolean()).special_name())
                .with_method(MethodMember {
                    is_public: false,
                    ..MethodMember::new("Load", TypeDescriptor::int32())
                })
                .with_property(PropertyMember::read_only("Title", TypeDescriptor::string())),
        )]);

        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator.generate_for(&ty("Shop.Pages.HomePage"));
        let code = generator.declarations();

        assert!(code.contains("readonly title: string | null;"));
        for excluded in [
            "Counter",
            "Instance",
            "secret",
            "default",
            "get_Title",
            "op_Equality",
            "load",
            "equals",
            "getHashCode",
            "toString",
            "getType",
            "dispose",
        ] {
            assert!(!code.contains(excluded), "{excluded} leaked into:\n{code}");
        }
    }

    #[test]
    fn test_generate_for_is_idempotent() {
        let metadata = metadata(vec![
            TypeDefinition::new(ty("Shop.Pages.HomePage"))
                .with_property(PropertyMember::read_only("Product", ty("Shop.Models.Product"))),
            TypeDefinition::new(ty("Shop.Models.Product"))
                .with_property(PropertyMember::read_only("Name", TypeDescriptor::string())),
        ]);

        let mut once = InterfaceGenerator::for_metadata(&metadata);
        once.generate_for(&ty("Shop.Pages.HomePage"));

        let mut twice = InterfaceGenerator::for_metadata(&metadata);
        twice.generate_for(&ty("Shop.Pages.HomePage"));
        twice.generate_for(&ty("Shop.Pages.HomePage"));
        twice.generate_for(&ty("Shop.Models.Product"));

        assert_eq!(once.namespaces(), twice.namespaces());
        assert_eq!(once.declarations(), twice.declarations());
    }

    #[test]
    fn test_mutual_references_terminate() {
        let metadata = metadata(vec![
            TypeDefinition::new(ty("Shop.Models.Order"))
                .with_property(PropertyMember::read_only("Customer", ty("Shop.Models.Customer"))),
            TypeDefinition::new(ty("Shop.Models.Customer")).with_property(PropertyMember::read_only(
                "Orders",
                TypeDescriptor::list(ty("Shop.Models.Order")),
            )),
        ]);

        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator.generate_for(&ty("Shop.Models.Order"));

        let declarations = &generator.namespaces()[&Some("Shop.Models".to_string())];
        let names: Vec<_> = declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Customer", "Order"]);

        let code = generator.declarations();
        assert!(code.contains("readonly orders: Array<Shop.Models.Order | null> | null;"));
        assert!(code.contains("readonly customer: Shop.Models.Customer | null;"));
    }

    #[test]
    fn test_self_reference_is_emitted_once() {
        let metadata = metadata(vec![TypeDefinition::new(ty("Shop.Models.Category"))
            .with_property(PropertyMember::read_only("Parent", ty("Shop.Models.Category")))
            .with_property(PropertyMember::read_only(
                "Children",
                TypeDescriptor::list(ty("Shop.Models.Category")),
            ))]);

        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator.generate_for(&ty("Shop.Models.Category"));

        let code = generator.declarations();
        assert_eq!(code.matches("interface Category {").count(), 1);
        assert!(code.contains("readonly parent: Shop.Models.Category | null;"));
    }

    #[test]
    fn test_dependency_keeps_its_own_namespace() {
        let metadata = metadata(vec![
            TypeDefinition::new(ty("Shop.Pages.ProductPage"))
                .with_property(PropertyMember::read_only("Product", ty("Shop.Models.Product"))),
            TypeDefinition::new(ty("Shop.ViewModels.CartViewModel"))
                .with_property(PropertyMember::read_only("Total", TypeDescriptor::decimal())),
            TypeDefinition::new(ty("Shop.Models.Product"))
                .with_property(PropertyMember::read_only("Price", TypeDescriptor::decimal())),
        ]);

        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator.generate_for(&ty("Shop.ViewModels.CartViewModel"));
        generator.generate_for(&ty("Shop.Pages.ProductPage"));

        let namespaces: Vec<_> = generator
            .namespaces()
            .keys()
            .map(|n| n.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(namespaces, ["Shop.ViewModels", "Shop.Models", "Shop.Pages"]);

        let expected = indoc! {"
            declare namespace Shop.ViewModels {
            \tinterface CartViewModel {
            \t\treadonly total: number;
            \t}

            }
            declare namespace Shop.Models {
            \tinterface Product {
            \t\treadonly price: number;
            \t}

            }
            declare namespace Shop.Pages {
            \tinterface ProductPage {
            \t\treadonly product: Shop.Models.Product | null;
            \t}

            }
        "};
        assert_eq!(generator.declarations(), expected);
    }

    #[test]
    fn test_dependency_namespace_comes_from_definition() {
        // The reference omits the namespace; the definition supplies it.
        let mut reference = ty("Shop.Models.Product");
        reference.namespace = None;
        let metadata = metadata(vec![
            TypeDefinition::new(ty("Shop.Pages.ProductPage"))
                .with_property(PropertyMember::read_only("Product", reference)),
            TypeDefinition::new(ty("Shop.Models.Product")),
        ]);

        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator.generate_for(&ty("Shop.Pages.ProductPage"));
        assert!(generator
            .namespaces()
            .contains_key(&Some("Shop.Models".to_string())));
    }

    #[test]
    fn test_unknown_types_are_not_generated() {
        let metadata = metadata(vec![TypeDefinition::new(ty("Shop.Pages.HomePage"))
            .with_property(PropertyMember::read_only(
                "Payload",
                TypeDescriptor::new("Newtonsoft.Json", "Newtonsoft.Json.Linq.JObject"),
            ))
            .with_property(PropertyMember::read_only("Tag", TypeDescriptor::object()))]);

        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator.generate_for(&ty("Shop.Pages.HomePage"));

        assert_eq!(generator.namespaces().len(), 1);
        let code = generator.declarations();
        assert!(code.contains("readonly payload: any;"));
        assert!(code.contains("readonly tag: any;"));
    }

    #[test]
    fn test_method_wrapping() {
        let metadata = metadata(vec![TypeDefinition::new(ty("Shop.Pages.HomePage"))
            .with_method(MethodMember::new("GetName", TypeDescriptor::string()))
            .with_method(MethodMember::new(
                "GetPrices",
                TypeDescriptor::dictionary(TypeDescriptor::string(), TypeDescriptor::int32()),
            ))
            .with_method(MethodMember::new("LoadProduct", ty("Shop.Models.Product")))]);

        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator.generate_for(&ty("Shop.Pages.HomePage"));
        let code = generator.declarations();

        assert!(code.contains("\t\tgetName(): Promise<string | null>;\n"));
        assert!(code.contains("\t\tgetPrices(): Promise<{ [key: string]: number } | null>;\n"));
        assert!(code.contains("\t\tloadProduct(): Promise<Shop.Models.Product | null>;\n"));
        assert!(generator.out_of_contract().is_empty());
    }

    #[test]
    fn test_missing_definition_emits_empty_interface() {
        let metadata = metadata(vec![TypeDefinition::new(ty("Shop.Pages.HomePage"))
            .with_property(PropertyMember::read_only("Ghost", ty("Shop.Models.Ghost")))]);

        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator.generate_for(&ty("Shop.Pages.HomePage"));

        let expected = indoc! {"
            declare namespace Shop.Models {
            \tinterface Ghost {
            \t}

            }
            declare namespace Shop.Pages {
            \tinterface HomePage {
            \t\treadonly ghost: Shop.Models.Ghost | null;
            \t}

            }
        "};
        assert_eq!(generator.declarations(), expected);
    }

    #[test]
    fn test_missing_definition_from_document_keeps_namespace() {
        let mut metadata = Metadata::new();
        metadata
            .add_str(indoc! {r#"
                {
                  "module": "Shop.Backend",
                  "types": [
                    {
                      "fullName": "Shop.Pages.HomePage",
                      "properties": [
                        {
                          "name": "Ghost",
                          "type": { "fullName": "Shop.Models.Ghost", "module": "Shop.Backend" }
                        }
                      ]
                    }
                  ]
                }
            "#})
            .unwrap();

        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator.generate_for(&ty("Shop.Pages.HomePage"));

        let expected = indoc! {"
            declare namespace Shop.Models {
            \tinterface Ghost {
            \t}

            }
            declare namespace Shop.Pages {
            \tinterface HomePage {
            \t\treadonly ghost: Shop.Models.Ghost | null;
            \t}

            }
        "};
        assert_eq!(generator.declarations(), expected);
    }

    #[test]
    fn test_parameterized_methods_are_reported() {
        let metadata = metadata(vec![TypeDefinition::new(ty("Shop.Pages.HomePage")).with_method(
            MethodMember::new("Search", TypeDescriptor::list(TypeDescriptor::string()))
                .with_parameter("query", TypeDescriptor::string())
                .with_parameter("limit", TypeDescriptor::int32()),
        )]);

        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator.generate_for(&ty("Shop.Pages.HomePage"));

        assert!(generator
            .declarations()
            .contains("search(): Promise<Array<string | null> | null>;"));
        assert_eq!(
            generator.out_of_contract(),
            [OutOfContract {
                type_name: "Shop.Pages.HomePage".to_string(),
                method: "Search".to_string(),
                parameter_count: 2,
            }]
        );
    }

    #[test]
    fn test_global_namespace_is_top_level() {
        let metadata = metadata(vec![TypeDefinition::new(ty("Orphan"))
            .with_field(FieldMember::read_only("Value", TypeDescriptor::int32()))]);

        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator.generate_for(&ty("Orphan"));

        let expected = indoc! {"
            interface Orphan {
            \tValue: number;
            }

        "};
        assert_eq!(generator.declarations(), expected);
    }

    #[test]
    fn test_header() {
        let metadata = metadata(vec![TypeDefinition::new(ty("Shop.Pages.HomePage"))]);
        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator.set_header("Generated by dtsgen\nDO NOT EDIT");
        generator.generate_for(&ty("Shop.Pages.HomePage"));

        assert!(generator
            .declarations()
            .starts_with("/**\n * Generated by dtsgen\n * DO NOT EDIT\n */\n\ndeclare namespace Shop.Pages {\n"));
    }

    #[test]
    fn test_register_type() {
        let metadata = metadata(vec![TypeDefinition::new(ty("Shop.Pages.HomePage"))
            .with_property(PropertyMember::read_only("Id", TypeDescriptor::core("System.Guid")))
            .with_property(PropertyMember::read_only("At", TypeDescriptor::date_time()))]);

        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator
            .register_type("System.Guid", PrimitiveKind::Textual)
            .unregister_type("System.DateTime");
        generator.generate_for(&ty("Shop.Pages.HomePage"));

        let code = generator.declarations();
        assert!(code.contains("readonly id: string | null;"));
        assert!(code.contains("readonly at: any;"));
    }

    #[test]
    fn test_write_to() {
        let metadata = metadata(vec![TypeDefinition::new(ty("Shop.Pages.HomePage"))]);
        let mut generator = InterfaceGenerator::for_metadata(&metadata);
        generator.generate_for(&ty("Shop.Pages.HomePage"));

        let mut buffer = Vec::new();
        generator.write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), generator.declarations());
    }

    #[test]
    fn test_lc_first() {
        assert_eq!(lc_first("GetName"), "getName");
        assert_eq!(lc_first("URL"), "uRL");
        assert_eq!(lc_first("x"), "x");
        assert_eq!(lc_first(""), "");
    }
}
