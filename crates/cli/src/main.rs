//! cfn-typegen CLI
//!
//! Command-line interface for generating TypeScript declaration modules
//! from CloudFormation resource provider schemas.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use cfn_typegen_common::EmitterConfig;
use cfn_typegen_emitter::{ModuleEmitter, SourceFacts};
use cfn_typegen_schema::{ResourceSchema, SchemaCatalog, SchemaLoader};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cfn-typegen")]
#[command(version, about = "Generate TypeScript declarations from CloudFormation resource schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a schema file and display the extracted module definition
    #[command(after_help = "EXAMPLES:\n  \
        # Inspect a single resource schema\n  \
        cfn-typegen parse --schema aws-s3-bucket.json\n\n  \
        # Show per-structure detail\n  \
        cfn-typegen parse --schema aws-ec2-subnet.json --verbose")]
    Parse {
        /// Path to the resource provider schema file
        #[arg(short, long)]
        schema: PathBuf,
    },

    /// Generate one declaration module from a single schema file
    #[command(after_help = "EXAMPLES:\n  \
        # Generate into ./types\n  \
        cfn-typegen generate \\\n    \
        --schema aws-s3-bucket.json \\\n    \
        --output ./types\n\n  \
        # With a custom emitter configuration\n  \
        cfn-typegen generate \\\n    \
        --schema aws-s3-bucket.json \\\n    \
        --config cfn-typegen.yaml \\\n    \
        --output ./types")]
    Generate {
        /// Path to the resource provider schema file
        #[arg(short, long)]
        schema: PathBuf,

        /// Emitter configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
    },

    /// Generate the full catalogue from a directory of schema files
    #[command(after_help = "EXAMPLES:\n  \
        # Generate every schema in a registry snapshot\n  \
        cfn-typegen generate-all \\\n    \
        --schema-dir ./schemas \\\n    \
        --output ./types\n\n  \
        # Only selected services\n  \
        cfn-typegen generate-all \\\n    \
        --schema-dir ./schemas \\\n    \
        --filter s3,ec2,sns \\\n    \
        --output ./types")]
    GenerateAll {
        /// Directory containing resource provider schema files
        #[arg(long)]
        schema_dir: PathBuf,

        /// Comma-separated list of service names to include
        #[arg(long, value_delimiter = ',')]
        filter: Option<Vec<String>>,

        /// Emitter configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { schema } => {
            parse_command(schema.as_path(), cli.verbose)?;
        }
        Commands::Generate {
            schema,
            config,
            output,
        } => {
            generate_command(
                schema.as_path(),
                config.as_deref(),
                output.as_path(),
                cli.verbose,
            )?;
        }
        Commands::GenerateAll {
            schema_dir,
            filter,
            config,
            output,
        } => {
            generate_all_command(
                schema_dir.as_path(),
                filter.as_deref(),
                config.as_deref(),
                output.as_path(),
                cli.verbose,
            )?;
        }
    }

    Ok(())
}

fn parse_command(schema_path: &Path, verbose: bool) -> Result<()> {
    println!(
        "{} Parsing schema file: {}",
        "→".cyan(),
        schema_path.display()
    );

    let loader = SchemaLoader::from_file(schema_path).context("Failed to load schema")?;
    let module = loader.parse().context("Failed to lower schema")?;

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Module Definition:".bold());
    println!("  Resource type: {}", module.type_name.to_string().yellow());
    println!(
        "  Output module: {}/{}.ts",
        module.type_name.service_dir(),
        module.type_name.module_stem()
    );
    println!("  Nested structures: {}", module.structs.len());
    println!("  Properties: {}", module.properties.len());

    if verbose {
        println!("\n{}", "Structures:".bold());
        for def in &module.structs {
            println!("  • {} ({} fields)", def.name.cyan(), def.fields.len());
        }
        println!("\n{}", "Properties:".bold());
        for field in &module.properties {
            let marker = if field.required { "required" } else { "optional" };
            println!("  • {} ({})", field.name.cyan(), marker);
        }
    }

    Ok(())
}

fn generate_command(
    schema_path: &Path,
    config_path: Option<&Path>,
    output: &Path,
    verbose: bool,
) -> Result<()> {
    println!(
        "{} Generating module from: {}",
        "→".cyan(),
        schema_path.display()
    );

    let config = load_config(config_path)?;
    let loader = SchemaLoader::from_file(schema_path).context("Failed to load schema")?;
    let module = loader.parse().context("Failed to lower schema")?;
    let facts = source_facts(loader.schema());

    if verbose {
        println!("  Resource type: {}", module.type_name);
        println!("  Output: {}", output.display());
    }

    let emitter = ModuleEmitter::new(config).context("Failed to create emitter")?;
    let path = emitter
        .emit_module(&module, &facts, output)
        .context("Failed to emit module")?;
    emitter
        .emit_support_modules(output)
        .context("Failed to emit support modules")?;
    emitter
        .emit_service_indexes(&[&module], output)
        .context("Failed to emit service index")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("\n{}", "Generated files:".bold());
    println!("  {}", path.display());

    Ok(())
}

fn generate_all_command(
    schema_dir: &Path,
    filter: Option<&[String]>,
    config_path: Option<&Path>,
    output: &Path,
    verbose: bool,
) -> Result<()> {
    println!(
        "{} Scanning directory for schemas: {}",
        "→".cyan(),
        schema_dir.display()
    );

    let catalog = SchemaCatalog::discover(schema_dir).context("Failed to scan schema directory")?;
    if catalog.skipped() > 0 && verbose {
        println!(
            "  Skipped {} non-schema file(s) during discovery",
            catalog.skipped()
        );
    }
    println!("{} Discovered {} schema files", "✓".green(), catalog.len());

    if catalog.is_empty() {
        anyhow::bail!("No schema files found in {}", schema_dir.display());
    }

    let config = load_config(config_path)?;
    let emitter = ModuleEmitter::new(config).context("Failed to create emitter")?;

    // Each module generates independently; a bad schema must not block the
    // rest, so failures are collected and reported at the end
    let mut modules = Vec::new();
    let mut failures: Vec<(String, String)> = Vec::new();
    let total = catalog.len();

    for (i, (type_name, path)) in catalog.iter().enumerate() {
        if let Some(filter) = filter {
            if !matches_filter(type_name, filter) {
                if verbose {
                    println!("  Skipping {} (not in filter)", type_name);
                }
                continue;
            }
        }

        println!(
            "{} Generating {}/{}: {}",
            "→".cyan(),
            i + 1,
            total,
            type_name.yellow()
        );

        let result: Result<_> = (|| {
            let loader = SchemaLoader::from_file(path)
                .with_context(|| format!("Failed to load schema: {}", path.display()))?;
            let module = loader.parse().context("Failed to lower schema")?;
            let facts = source_facts(loader.schema());
            emitter
                .emit_module(&module, &facts, output)
                .context("Failed to emit module")?;
            Ok(module)
        })();

        match result {
            Ok(module) => modules.push(module),
            Err(e) => {
                eprintln!("{} Skipping {}: {:#}", "⚠".yellow(), type_name, e);
                failures.push((type_name.clone(), format!("{:#}", e)));
            }
        }
    }

    if modules.is_empty() {
        if failures.is_empty() {
            anyhow::bail!("No schemas matched the filter");
        }
        anyhow::bail!("All {} schema(s) failed to generate", failures.len());
    }

    let module_refs: Vec<_> = modules.iter().collect();
    emitter
        .emit_support_modules(output)
        .context("Failed to emit support modules")?;
    emitter
        .emit_service_indexes(&module_refs, output)
        .context("Failed to emit service indexes")?;

    println!(
        "\n{} Generated {} modules into {}",
        "✓".green().bold(),
        modules.len(),
        output.display()
    );

    if !failures.is_empty() {
        println!(
            "\n{} {} schema(s) failed:",
            "⚠".yellow().bold(),
            failures.len()
        );
        for (type_name, error) in &failures {
            println!("  • {}: {}", type_name.yellow(), error);
        }
    }

    Ok(())
}

/// Match a canonical type name ("AWS::S3::Bucket") against service filters
fn matches_filter(type_name: &str, filter: &[String]) -> bool {
    let service = type_name
        .split("::")
        .nth(1)
        .unwrap_or(type_name)
        .to_lowercase();
    filter.iter().any(|f| f.to_lowercase() == service)
}

fn load_config(path: Option<&Path>) -> Result<EmitterConfig> {
    match path {
        Some(path) => EmitterConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(EmitterConfig::default()),
    }
}

fn source_facts(schema: &ResourceSchema) -> SourceFacts {
    SourceFacts {
        canonical_type: schema.type_name.clone(),
        required: schema.required.clone(),
    }
}
