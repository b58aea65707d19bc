//! Command-line interface for the extractor.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use roxmltree::Document;

use crate::config::{ExtractOptions, ExtractionMode, MismatchPolicy, DEFAULT_OUTPUT_FILE};
use crate::dataset::{build_dataset, discover_documents, Dataset};
use crate::error::{ExtractorError, Result};
use crate::inspect::{render_tree, unique_tags};
use crate::output::save_csv;

/// Stemtelling - Flatten EML vote counts per polling station into a table.
#[derive(Parser)]
#[command(name = "stemtelling")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract every count document in a directory into one CSV file.
    Extract {
        /// Directory containing the EML count files (default: current directory)
        input: Option<PathBuf>,

        /// Output CSV file (default: processed_data.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include all candidates instead of only the lead candidate per party
        #[arg(long)]
        all_candidates: bool,

        /// Drop reporting units whose party totals do not match their candidates
        #[arg(long)]
        strict: bool,
    },

    /// List the distinct qualified tags used in a document.
    Tags {
        /// EML count file
        file: PathBuf,
    },

    /// Print the element tree of a document.
    Tree {
        /// EML count file
        file: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            output,
            all_candidates,
            strict,
        } => {
            let mode = ExtractionMode::from_all_candidates(all_candidates);
            let policy = if strict {
                MismatchPolicy::Reject
            } else {
                MismatchPolicy::Warn
            };
            extract_command(
                input.as_deref().unwrap_or(Path::new(".")),
                output.as_deref().unwrap_or(Path::new(DEFAULT_OUTPUT_FILE)),
                ExtractOptions::new(mode).with_mismatch_policy(policy),
            )
        }
        Commands::Tags { file } => tags_command(&file),
        Commands::Tree { file } => tree_command(&file),
    }
}

/// Execute the extract command.
fn extract_command(input: &Path, output: &Path, options: ExtractOptions) -> Result<()> {
    if !input.is_dir() {
        return Err(ExtractorError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input directory does not exist: {}", input.display()),
        )));
    }

    let paths = discover_documents(input)?;

    let mode_label = match options.mode {
        ExtractionMode::AllCandidates => "all candidates",
        ExtractionMode::FirstCandidateOnly => "lead candidates",
    };
    println!(
        "{} {} documents from {} ({})",
        style("Extracting").bold(),
        style(paths.len()).cyan(),
        style(input.display()).green(),
        mode_label
    );
    println!();

    let pb = ProgressBar::new(paths.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green} {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let dataset = build_dataset(&paths, options, |path| {
        pb.set_message(
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        pb.inc(1);
    });
    pb.finish_and_clear();

    save_csv(&dataset.rows, output)?;

    print_summary(&dataset);
    println!();
    println!("{} {}", style("Saved to:").green().bold(), output.display());

    if dataset.has_failures() {
        println!(
            "{}",
            style("Skipped data is listed above and not included in the output").yellow()
        );
    }

    Ok(())
}

/// Print counts and the list of failed or empty documents.
fn print_summary(dataset: &Dataset) {
    println!("  Documents: {}", dataset.documents_processed);
    println!("  Rows: {}", dataset.rows.len());

    if !dataset.warnings.is_empty() {
        println!("  Warnings: {}", style(dataset.warnings.len()).yellow().bold());
        for warning in &dataset.warnings {
            println!("    {warning}");
        }
    }

    if !dataset.empty_documents.is_empty() {
        println!(
            "  Documents without data: {}",
            style(dataset.empty_documents.len()).yellow().bold()
        );
        for path in &dataset.empty_documents {
            println!("    {}", path.display());
        }
    }

    if !dataset.document_failures.is_empty() {
        println!(
            "  Failed documents: {}",
            style(dataset.document_failures.len()).red().bold()
        );
        for failure in &dataset.document_failures {
            println!("    {}: {}", failure.path.display(), failure.error);
        }
    }

    if !dataset.unit_failures.is_empty() {
        println!(
            "  Failed reporting units: {}",
            style(dataset.unit_failures.len()).red().bold()
        );
        for unit in &dataset.unit_failures {
            println!(
                "    {} #{} ({}): {}",
                unit.path.display(),
                unit.failure.index,
                unit.failure.unit_id.as_deref().unwrap_or("no id"),
                unit.failure.error
            );
        }
    }
}

/// Execute the tags command.
fn tags_command(file: &Path) -> Result<()> {
    let xml = fs::read_to_string(file)?;
    let doc = Document::parse(&xml)?;
    for tag in unique_tags(&doc) {
        println!("{tag}");
    }
    Ok(())
}

/// Execute the tree command.
fn tree_command(file: &Path) -> Result<()> {
    let xml = fs::read_to_string(file)?;
    let doc = Document::parse(&xml)?;
    print!("{}", render_tree(doc.root_element()));
    Ok(())
}
