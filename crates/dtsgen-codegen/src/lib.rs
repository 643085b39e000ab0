//! # dtsgen-codegen
//!
//! TypeScript declaration generator for reflected managed-runtime types. Given the
//! metadata of a backend's compiled modules, this crate emits an ambient
//! declaration file (`application.d.ts`) describing the public shape of selected
//! root types and of every project type they reach.
//!
//! ## Features
//!
//! - Public contract selection: read-only fields, properties and argument-less
//!   asynchronous methods
//! - Recursive discovery of project types, each declared exactly once even with
//!   reference cycles
//! - Declarations grouped into `declare namespace` blocks in discovery order
//! - JSON metadata documents loaded from files or directories
//! - Extensible registry of primitive runtime types
//!
//! ## Quick Start
//!
//! ```rust
//! use dtsgen_codegen::{
//!     FieldMember, InterfaceGenerator, Metadata, PropertyMember, TypeDefinition, TypeDescriptor,
//! };
//!
//! let mut metadata = Metadata::new();
//! metadata
//!     .add_type(
//!         TypeDefinition::new(TypeDescriptor::new("Shop", "Shop.Models.Product"))
//!             .with_field(FieldMember::read_only("Id", TypeDescriptor::int32()))
//!             .with_property(PropertyMember::read_write("Name", TypeDescriptor::string())),
//!     )
//!     .unwrap();
//!
//! let mut generator = InterfaceGenerator::for_metadata(&metadata);
//! generator.generate_for(&TypeDescriptor::new("Shop", "Shop.Models.Product"));
//!
//! assert_eq!(
//!     generator.declarations(),
//!     "declare namespace Shop.Models {\n\tinterface Product {\n\t\tId: number;\n\t\tname: string | null;\n\t}\n\n}\n",
//! );
//! ```
//!
//! ### Loading metadata documents
//!
//! ```no_run
//! use dtsgen_codegen::{DEFAULT_MARKERS, InterfaceGenerator, Metadata, OUTPUT_FILE_NAME};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut metadata = Metadata::new();
//! metadata.add_path("metadata/")?;
//!
//! let mut generator = InterfaceGenerator::for_metadata(&metadata);
//! for root in metadata.roots(&DEFAULT_MARKERS) {
//!     generator.generate_for(&root.descriptor);
//! }
//! generator.write_to_file(std::path::Path::new("generated").join(OUTPUT_FILE_NAME))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Type Mappings
//!
//! | Runtime type | TypeScript type |
//! |--------------|-----------------|
//! | `Nullable<T>` | `T \| null` |
//! | integers, `Single`, `Double`, `Decimal`, enums | `number` |
//! | `String` | `string \| null` |
//! | `DateTime` | `Date` |
//! | `Boolean` | `boolean` |
//! | `IDictionary` with `<K, V>` | `{ [key: K]: V } \| null` |
//! | `IEnumerable` with `<T, ..>` | `Array<T> \| null` |
//! | project types | `Full.Name \| null` |
//! | anything else | `any` |

mod const_enum;
mod error;
mod generator;
mod mapper;
mod metadata;
pub mod registry;
mod types;

pub use const_enum::const_enum_of;
pub use error::MetadataError;
pub use generator::{Declaration, IGNORED_METHODS, InterfaceGenerator, OutOfContract};
pub use mapper::{Mapped, TypeMapper};
pub use metadata::{Metadata, MetadataDocument, MetadataSource};
pub use registry::{PrimitiveKind, TypeRegistry};
pub use types::{
    CORE_LIBRARY, DICTIONARY_CAPABILITY, ENUMERABLE_CAPABILITY, FieldMember, MemberDescriptor,
    MethodMember, ParameterMember, PropertyMember, TsType, TypeDefinition, TypeDescriptor, TypeKey,
};

/// Marker interfaces selecting root types, in generation order.
pub const DEFAULT_MARKERS: [&str; 2] = ["IViewModel", "IPage"];

/// File name the declarations are written to.
pub const OUTPUT_FILE_NAME: &str = "application.d.ts";
