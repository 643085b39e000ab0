mod commands;

use clap::{ArgAction, Parser};
use commands::{GenerateOptions, const_enum, generate};
use dtsgen_codegen::DEFAULT_MARKERS;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generate TypeScript declarations (application.d.ts) from reflected type metadata
#[derive(Parser, Debug)]
#[command(name = "dtsgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory that receives application.d.ts
    #[arg(required_unless_present = "const_enum")]
    out_path: Option<PathBuf>,

    /// Metadata documents, or directories scanned for *.json documents
    #[arg(required_unless_present = "const_enum")]
    inputs: Vec<PathBuf>,

    /// Marker interface selecting root types (repeatable; defaults to IViewModel, IPage)
    #[arg(long = "marker", value_name = "INTERFACE")]
    markers: Vec<String>,

    /// Header comment placed at the top of the generated file
    #[arg(long)]
    header: Option<String>,

    /// Fail when a public method declares parameters
    #[arg(long)]
    deny_parameterized_methods: bool,

    /// Print the const-enum object for a JSON object of string values and exit
    #[arg(long, value_name = "JSON")]
    const_enum: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn generate_options(self) -> Option<GenerateOptions> {
        let markers = if self.markers.is_empty() {
            DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect()
        } else {
            self.markers
        };
        Some(GenerateOptions {
            out_path: self.out_path?,
            inputs: self.inputs,
            markers,
            header: self.header,
            deny_parameterized_methods: self.deny_parameterized_methods,
        })
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.const_enum {
        print!("{}", const_enum(path)?);
        return Ok(());
    }

    let options = cli
        .generate_options()
        .ok_or_else(|| anyhow::anyhow!("missing output path"))?;
    let written = generate(&options)?;
    println!("Wrote {}", written.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
