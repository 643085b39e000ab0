use anyhow::{Context, Result, bail};
use dtsgen_codegen::{InterfaceGenerator, Metadata, OUTPUT_FILE_NAME, const_enum_of};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub out_path: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub markers: Vec<String>,
    pub header: Option<String>,
    pub deny_parameterized_methods: bool,
}

/// Load every input, generate declarations for all root types and write them
/// to `<out_path>/application.d.ts`. Returns the written path.
pub fn generate(options: &GenerateOptions) -> Result<PathBuf> {
    let mut metadata = Metadata::new();
    for input in &options.inputs {
        let input = std::path::absolute(input)
            .with_context(|| format!("cannot resolve {}", input.display()))?;
        metadata
            .add_path(&input)
            .with_context(|| format!("cannot load metadata from {}", input.display()))?;
    }

    let roots = metadata.roots(&options.markers);
    info!(
        types = metadata.len(),
        roots = roots.len(),
        "loaded metadata"
    );

    let mut generator = InterfaceGenerator::for_metadata(&metadata);
    if let Some(header) = &options.header {
        generator.set_header(header);
    }
    for root in &roots {
        generator.generate_for(&root.descriptor);
    }

    if options.deny_parameterized_methods && !generator.out_of_contract().is_empty() {
        let methods: Vec<_> = generator
            .out_of_contract()
            .iter()
            .map(|m| format!("{}.{} ({} parameters)", m.type_name, m.method, m.parameter_count))
            .collect();
        bail!(
            "public methods with parameters are not supported: {}",
            methods.join(", ")
        );
    }

    let out_dir = std::path::absolute(&options.out_path)
        .with_context(|| format!("cannot resolve {}", options.out_path.display()))?;
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("cannot create {}", out_dir.display()))?;
    let target = out_dir.join(OUTPUT_FILE_NAME);
    generator
        .write_to_file(&target)
        .with_context(|| format!("cannot write {}", target.display()))?;

    info!(path = %target.display(), "wrote declarations");
    Ok(target)
}

/// Read a JSON object of string values and render it as a const-enum object.
pub fn const_enum(path: &Path) -> Result<String> {
    let source =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let values: IndexMap<String, String> = serde_json::from_str(&source)
        .with_context(|| format!("{} is not an object of string values", path.display()))?;
    Ok(const_enum_of(&values))
}
