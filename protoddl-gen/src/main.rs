//! protoddl-gen - MySQL table DDL generation tool
//!
//! Reads annotated message schema descriptors (TOML or JSON) and writes one
//! `<table>.sql` file per message carrying table metadata. The first failing
//! message stops the run with a non-zero exit code.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use protoddl::{Generator, GeneratorConfig};
use protoddl_gen::parser::load_schemas;
use protoddl_gen::{resolve_config, ConfigOverrides, SqlWriter};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "protoddl-gen")]
#[command(about = "Generate MySQL CREATE TABLE statements from annotated message schemas")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Configuration file (default: config/protoddl.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one .sql file per table message
    Generate {
        /// Schema file, or directory of .toml/.json schema files
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for generated DDL (overrides configuration)
        #[arg(short, long)]
        outdir: Option<PathBuf>,

        /// Database to create and use before the table (overrides configuration)
        #[arg(short, long)]
        database: Option<String>,

        /// Plugin-style parameters, e.g. `database=shop,outdir=sql`
        #[arg(long)]
        param: Option<String>,

        /// Print the DDL instead of writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Translate schemas and report tables without writing anything
    Check {
        /// Schema file, or directory of .toml/.json schema files
        #[arg(short, long)]
        input: PathBuf,

        /// Database to create and use before the table (overrides configuration)
        #[arg(short, long)]
        database: Option<String>,

        /// Plugin-style parameters, e.g. `database=shop,outdir=sql`
        #[arg(long)]
        param: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    // Initialize logging
    let default_filter = if quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config_file = cli.config;
    let result = match cli.command {
        Commands::Generate {
            input,
            outdir,
            database,
            param,
            dry_run,
        } => resolve_config(&ConfigOverrides {
            config_file,
            param,
            outdir,
            database,
        })
        .map_err(anyhow::Error::from)
        .and_then(|config| handle_generate(&input, config, dry_run, quiet)),
        Commands::Check {
            input,
            database,
            param,
        } => resolve_config(&ConfigOverrides {
            config_file,
            param,
            outdir: None,
            database,
        })
        .map_err(anyhow::Error::from)
        .and_then(|config| handle_check(&input, config)),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "❌ Error:".red().bold(), e);
        process::exit(1);
    }
}

fn handle_generate(
    input: &Path,
    config: GeneratorConfig,
    dry_run: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let schemas = load_schemas(input)?;
    if schemas.is_empty() {
        anyhow::bail!("No schema files found in {}", input.display());
    }

    let writer = SqlWriter::new(config.outdir.clone());
    let generator = Generator::new(config);
    let mut table_count = 0;

    for (path, schema) in &schemas {
        if dry_run {
            for table in generator.translate_file(schema)? {
                println!("-- {}", table.file_name());
                println!("{}\n", table.ddl);
                table_count += 1;
            }
            continue;
        }

        let written = writer
            .write_schema(&generator, schema)
            .with_context(|| format!("schema {}", path.display()))?;
        if !quiet {
            for file in &written {
                println!("{} {}", "✅ Generated:".green(), file.display());
            }
        }
        table_count += written.len();
    }

    if !quiet {
        println!(
            "✨ Generated {} table{}",
            table_count,
            if table_count == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

fn handle_check(input: &Path, config: GeneratorConfig) -> anyhow::Result<()> {
    let generator = Generator::new(config);

    for (path, schema) in load_schemas(input)? {
        let tables = generator
            .translate_file(&schema)
            .with_context(|| format!("schema {}", path.display()))?;
        for table in tables {
            println!("{} {} ({})", "✓".green(), table.table_name, path.display());
        }
    }

    Ok(())
}
