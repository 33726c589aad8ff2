//! Itemized statement CLI.
//!
//! Reads an itemized telecom bill, names every dialled number from the
//! contact list and writes a new sectioned statement.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use itemized::config::{parse_contact, FileConfig, RunConfigBuilder};
use itemized::logger::init_cli_logger;
use itemized::{
    Bucket, ContactDirectory, LopdfSource, PdfExtractSource, StatementConverter,
    StatementRenderer, TextSource,
};

/// Itemized Statement Tool
///
/// Rebuild the itemized call section of a telecom bill as a new PDF
/// with contact names and one table per call section.
#[derive(Parser)]
#[command(name = "itemized")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input bill PDF [default: ~/Downloads/MF2629I002189456.pdf]
    #[arg(short, long, value_name = "FILE", global = true)]
    input: Option<PathBuf>,

    /// Output statement PDF [default: names_<input>.pdf next to the input]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Contact to name in the statement (can be specified multiple times)
    #[arg(short, long, value_name = "NUMBER=NAME", value_parser = parse_contact, global = true)]
    contact: Vec<(String, String)>,

    /// TOML file with input, output and a [contacts] table
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Do not seed the contact list with built-in entries
    #[arg(long, global = true)]
    no_default_contacts: bool,

    /// PDF text extraction backend
    #[arg(long, value_enum, default_value_t = Backend::PdfExtract, global = true)]
    backend: Backend,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump the page text of a bill (for debugging the record layout)
    Extract {
        /// Output text file (optional, defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List the records found in a bill without writing a statement
    Inspect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    PdfExtract,
    Lopdf,
}

impl Backend {
    fn source(self) -> Box<dyn TextSource> {
        match self {
            Self::PdfExtract => Box::new(PdfExtractSource::new()),
            Self::Lopdf => Box::new(LopdfSource::new()),
        }
    }
}

/// Command handler with the converter injected.
struct StatementHandler {
    converter: StatementConverter,
    verbose: bool,
}

impl StatementHandler {
    fn new(backend: Backend, verbose: bool) -> Self {
        Self {
            converter: StatementConverter::new(backend.source(), StatementRenderer::new()),
            verbose,
        }
    }

    /// Builds the named statement.
    fn convert(&self, input: &Path, output: &Path, contacts: &ContactDirectory) -> Result<()> {
        if self.verbose {
            println!("Input:    {}", input.display());
            println!("Output:   {}", output.display());
            println!("Contacts: {}", contacts.len());
            println!("Backend:  {}", self.converter.source_name());
        }

        let summary = match self.converter.create_statement(input, output, contacts) {
            Ok(summary) => summary,
            Err(e) if e.is_no_records() => {
                anyhow::bail!("No call records found in the input PDF: {}", input.display());
            }
            Err(e) => return Err(e).with_context(|| "Statement generation failed"),
        };

        if self.verbose {
            println!("\nStatement Summary:");
            println!("  Pages read:      {}", summary.pages_processed);
            for (bucket, count) in &summary.bucket_counts {
                println!("  {:<22} {}", bucket.heading(), count);
            }
            if summary.records_orphaned > 0 {
                println!("  Dropped (no section): {}", summary.records_orphaned);
            }
            println!("  Pages written:   {}", summary.pages_rendered);
        }

        println!(
            "✓ New PDF created with {} call record(s) → {}",
            summary.records_written,
            summary.output.display()
        );

        Ok(())
    }

    /// Extracts text from a PDF.
    fn extract(&self, input: &Path, output: Option<&Path>) -> Result<()> {
        let text = self
            .converter
            .extract_text(input)
            .with_context(|| "Text extraction failed")?;

        if let Some(output_path) = output {
            std::fs::write(output_path, &text)
                .with_context(|| format!("Failed to write to {}", output_path.display()))?;
            println!(
                "✓ Extracted {} characters → {}",
                text.len(),
                output_path.display()
            );
        } else {
            println!("{}", text);
        }

        Ok(())
    }

    /// Prints every record in document order, with the bucket the number
    /// prefix alone would suggest next to the one the section header gave.
    fn inspect(&self, input: &Path, contacts: &ContactDirectory) -> Result<()> {
        let records = self
            .converter
            .extract_records(input, contacts)
            .with_context(|| "Record extraction failed")?;

        if records.is_empty() {
            println!("⚠ No call records found");
            return Ok(());
        }

        for record in &records {
            let by_prefix = Bucket::classify_number(&record.number);
            let marker = if by_prefix == record.bucket { "" } else { " *" };
            println!(
                "{:>5}  {}  {}  {}  {:<20} {:>6} {:>4} {:>8}  {} [prefix: {}]{}",
                record.serial,
                record.date,
                record.time,
                record.number,
                record.name,
                record.duration,
                record.pulse,
                record.amount,
                record.bucket,
                by_prefix,
                marker
            );
        }
        println!("{} record(s)", records.len());

        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => FileConfig::default(),
    };

    let config = RunConfigBuilder::new()
        .input(cli.input.clone())
        .output(cli.output.clone())
        .file(file_config)
        .contacts(cli.contact.clone())
        .default_contacts(!cli.no_default_contacts)
        .build();

    let handler = StatementHandler::new(cli.backend, cli.verbose);

    match &cli.command {
        Some(Commands::Extract { output }) => {
            handler.extract(&config.input, output.as_deref())?;
        }
        Some(Commands::Inspect) => {
            handler.inspect(&config.input, &config.contacts)?;
        }
        None => {
            handler.convert(&config.input, &config.output, &config.contacts)?;
        }
    }

    Ok(())
}
