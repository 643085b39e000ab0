//! Example crate demonstrating dtsgen-codegen usage.
//!
//! The metadata of a small shop backend is available two ways: built in code
//! by [`shop_metadata`], and as the JSON document `metadata/shop.json` that a
//! reflector would produce. Both describe the same types and generate the same
//! declarations.

use dtsgen_codegen::{
    DEFAULT_MARKERS, FieldMember, InterfaceGenerator, Metadata, MetadataError, MethodMember,
    PropertyMember, TypeDefinition, TypeDescriptor,
};

/// Module that defines every shop type.
pub const SHOP_MODULE: &str = "Shop.Backend";

/// The serialized form of [`shop_metadata`].
pub const SHOP_JSON: &str = include_str!("../metadata/shop.json");

fn shop_type(full_name: &str) -> TypeDescriptor {
    TypeDescriptor::new(SHOP_MODULE, full_name)
}

/// Build the shop metadata in code.
pub fn shop_metadata() -> Result<Metadata, MetadataError> {
    let cart_line = shop_type("Shop.Models.CartLine");
    let product = shop_type("Shop.Models.Product");
    let order = shop_type("Shop.Models.Order");
    let customer = shop_type("Shop.Models.Customer");
    let status = TypeDescriptor::enumeration(
        SHOP_MODULE,
        "Shop.Models.ProductStatus",
        TypeDescriptor::int32(),
    );

    let mut metadata = Metadata::new();
    metadata
        .add_type(
            TypeDefinition::new(
                shop_type("Shop.ViewModels.CartViewModel")
                    .with_interface("Shop.Contracts.IViewModel"),
            )
            .with_property(PropertyMember::read_only(
                "Lines",
                TypeDescriptor::list(cart_line.clone()),
            ))
            .with_property(PropertyMember::read_write("Coupon", TypeDescriptor::string()))
            .with_method(
                MethodMember::new("get_Lines", TypeDescriptor::list(cart_line.clone()))
                    .special_name(),
            )
            .with_method(MethodMember::new("GetTotal", TypeDescriptor::decimal()))
            .with_method(MethodMember::new("Checkout", order.clone()))
            .with_method(MethodMember::new("ToString", TypeDescriptor::string())),
        )?
        .add_type(
            TypeDefinition::new(
                shop_type("Shop.Pages.ProductPage").with_interface("Shop.Contracts.IPage"),
            )
            .with_field(FieldMember::read_only("Id", TypeDescriptor::int32()))
            .with_property(PropertyMember::read_only("Product", product.clone()))
            .with_property(PropertyMember::read_only(
                "Related",
                TypeDescriptor::dictionary(TypeDescriptor::string(), product.clone()),
            )),
        )?
        .add_type(
            TypeDefinition::new(cart_line)
                .with_field(FieldMember::read_only("Quantity", TypeDescriptor::int32()))
                .with_property(PropertyMember::read_only("Product", product.clone())),
        )?
        .add_type(
            TypeDefinition::new(product)
                .with_property(PropertyMember::read_write("Name", TypeDescriptor::string()))
                .with_property(PropertyMember::read_only("Price", TypeDescriptor::decimal()))
                .with_property(PropertyMember::read_only("Status", status))
                .with_property(PropertyMember::read_only(
                    "Discontinued",
                    TypeDescriptor::nullable(TypeDescriptor::date_time()),
                )),
        )?
        .add_type(
            TypeDefinition::new(order.clone())
                .with_property(PropertyMember::read_only("Customer", customer.clone()))
                .with_property(PropertyMember::read_only(
                    "PlacedAt",
                    TypeDescriptor::date_time(),
                )),
        )?
        .add_type(TypeDefinition::new(customer).with_property(PropertyMember::read_only(
            "Orders",
            TypeDescriptor::list(order),
        )))?;

    Ok(metadata)
}

/// Load the shop metadata from its JSON document.
pub fn shop_metadata_from_json() -> Result<Metadata, MetadataError> {
    let mut metadata = Metadata::new();
    metadata.add_str(SHOP_JSON)?;
    Ok(metadata)
}

/// Generate the declarations for every root type of `metadata`, selected by the
/// default marker interfaces.
pub fn generate_declarations(metadata: &Metadata) -> String {
    let mut generator = InterfaceGenerator::for_metadata(metadata);
    for root in metadata.roots(&DEFAULT_MARKERS) {
        generator.generate_for(&root.descriptor);
    }
    generator.declarations()
}
