//! Writes application.d.ts for the example shop metadata.
//!
//! Usage: generate-declarations [OUT_DIR]   (defaults to `generated`)

use dtsgen_codegen::OUTPUT_FILE_NAME;
use dtsgen_example::{generate_declarations, shop_metadata};
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("generated"));

    fs::create_dir_all(&out_dir)?;

    let metadata = shop_metadata()?;
    let path = out_dir.join(OUTPUT_FILE_NAME);
    fs::write(&path, generate_declarations(&metadata))?;

    println!("Generated {} types into {}", metadata.len(), path.display());
    Ok(())
}
