//! pdfsections CLI - outline extraction and section ranking tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfsections::{
    render, CollectionOptions, CollectionOutcome, CollectionProcessor, ExtractorOptions,
    JsonFormat, OutlineBatch, OutlineExtractor, RankOptions,
};

#[derive(Parser)]
#[command(name = "pdfsections")]
#[command(version)]
#[command(about = "Extract PDF outlines and rank sections for a persona", long_about = None)]
struct Cli {
    /// Input PDF file or directory of PDFs
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file or directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the title and heading outline of PDFs
    Outline {
        /// Input PDF file, or a directory of PDFs
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (single PDF) or directory (batch)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Smallest font size treated as a heading
        #[arg(long, env = "PDFSECTIONS_MIN_HEADING_SIZE", default_value = "10.0")]
        min_heading_size: f32,

        /// Output format for a single PDF
        #[arg(long, value_enum, default_value = "json")]
        format: OutlineFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Rank sections of one collection for its persona and job
    Rank {
        /// Collection directory
        #[arg(value_name = "DIR")]
        collection: PathBuf,

        /// Sections kept per document
        #[arg(long, env = "PDFSECTIONS_TOP_K", default_value = "5")]
        top_k: usize,

        /// Extract outlines for PDFs without a heading file
        #[arg(long)]
        extract_missing: bool,

        /// Print the report instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Process every collection directory under a base directory
    Collections {
        /// Base directory
        #[arg(value_name = "DIR", default_value = ".")]
        base: PathBuf,

        /// Sections kept per document
        #[arg(long, env = "PDFSECTIONS_TOP_K", default_value = "5")]
        top_k: usize,

        /// Prefix of collection directory names
        #[arg(long, default_value = "Collection")]
        prefix: String,

        /// Extract outlines for PDFs without a heading file
        #[arg(long)]
        extract_missing: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum OutlineFormat {
    /// Outline JSON
    Json,
    /// Indented heading list
    Text,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            min_heading_size,
            format,
            compact,
        }) => cmd_outline(
            &input,
            output.as_deref(),
            min_heading_size,
            format,
            json_format(compact),
        ),
        Some(Commands::Rank {
            collection,
            top_k,
            extract_missing,
            dry_run,
            compact,
        }) => {
            let options = collection_options(top_k, extract_missing, compact);
            cmd_rank(&collection, options, dry_run)
        }
        Some(Commands::Collections {
            base,
            top_k,
            prefix,
            extract_missing,
            compact,
        }) => {
            let options =
                collection_options(top_k, extract_missing, compact).with_collection_prefix(prefix);
            cmd_collections(&base, options)
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: outline if input is provided
            if let Some(input) = cli.input {
                cmd_outline(
                    &input,
                    cli.output.as_deref(),
                    10.0,
                    OutlineFormat::Json,
                    JsonFormat::Pretty,
                )
            } else {
                println!("{}", "Usage: pdfsections <INPUT> [OUTPUT]".yellow());
                println!("       pdfsections --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn collection_options(top_k: usize, extract_missing: bool, compact: bool) -> CollectionOptions {
    CollectionOptions::new()
        .with_rank_options(RankOptions::new().with_top_k(top_k))
        .with_extract_missing(extract_missing)
        .with_json_format(json_format(compact))
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    min_heading_size: f32,
    format: OutlineFormat,
    json: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ExtractorOptions::new().with_min_heading_size(min_heading_size);

    if input.is_dir() {
        let output_dir = output
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("output"));
        return cmd_outline_batch(input, &output_dir, options, json);
    }

    let extractor = OutlineExtractor::with_options(options);
    let extraction = pdfsections::extract_outline_with(input, &extractor);
    if let Some(cause) = extraction.cause() {
        eprintln!("{}: {}", "Warning".yellow().bold(), cause);
    }
    let outline = extraction.into_value();

    let rendered = match format {
        OutlineFormat::Json => render::to_json(&outline, json)?,
        OutlineFormat::Text => render::outline_to_text(&outline),
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_outline_batch(
    input_dir: &Path,
    output_dir: &Path,
    options: ExtractorOptions,
    json: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let batch = OutlineBatch::with_options(options).with_format(json);
    let inputs = batch.inputs(input_dir)?;
    fs::create_dir_all(output_dir)?;

    let pb = progress_bar(inputs.len() as u64);
    let mut written = 0;
    let mut degraded = 0;

    for input in &inputs {
        pb.set_message(input.file_name().unwrap_or_default().to_string_lossy().into_owned());
        let item = batch.process_file(input, output_dir);
        if item.degraded {
            degraded += 1;
        }
        match item.result {
            Ok(_) => written += 1,
            Err(e) => pb.println(format!("{} {}: {}", "Failed".red(), item.output.display(), e)),
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} outlines written to {}",
        "Done!".green().bold(),
        written,
        output_dir.display()
    );
    if degraded > 0 {
        println!("{} {} unreadable PDFs got an empty outline", "Warning".yellow().bold(), degraded);
    }

    Ok(())
}

fn cmd_rank(
    collection: &Path,
    options: CollectionOptions,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let processor = CollectionProcessor::with_options(options);

    if dry_run {
        let report = processor.process(collection)?;
        println!("{}", render::to_json(&report, processor.options().json_format)?);
        return Ok(());
    }

    let output = processor.run(collection)?;
    println!("{} {}", "Saved to".green(), output.display());
    Ok(())
}

fn cmd_collections(base: &Path, options: CollectionOptions) -> Result<(), Box<dyn std::error::Error>> {
    let processor = CollectionProcessor::with_options(options);
    let collections = processor.discover(base)?;

    if collections.is_empty() {
        println!(
            "{} no '{}*' directories in {}",
            "Nothing to do:".yellow(),
            processor.options().collection_prefix,
            base.display()
        );
        return Ok(());
    }

    let total = collections.len();
    let pb = progress_bar(total as u64);
    let outcomes = processor.run_each(collections, |outcome| {
        pb.set_message(
            outcome
                .collection
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned(),
        );
        pb.inc(1);
    });
    pb.finish_with_message("Done!");

    let failed: Vec<&CollectionOutcome> = outcomes.iter().filter(|o| !o.is_success()).collect();
    println!(
        "\n{} {} of {} collections processed",
        "Done!".green().bold(),
        total - failed.len(),
        total
    );
    for outcome in failed {
        if let Err(e) = &outcome.result {
            println!("  {} {}: {}", "└─".dimmed(), outcome.collection.display(), e);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfsections".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and section ranking tool");
    println!();
    println!("License: MIT");
}
