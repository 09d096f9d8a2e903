//! htmlpdf CLI - HTML to PDF conversion tool

mod sheet;
mod webhook;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use htmlpdf::render::to_json_document;
use htmlpdf::{
    clean_for_download, detect_markup, extract_blocks_with_options, pdf_filename, prettify,
    ConversionJob, ExtractOptions, HtmlPdf, JsonFormat, PageSize,
};

use sheet::CodeEntry;
use webhook::PromptPayload;

#[derive(Parser)]
#[command(name = "htmlpdf")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert HTML snippets to styled PDF documents", long_about = None)]
struct Cli {
    /// Input HTML file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an HTML file to PDF
    Convert {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file (defaults to the input with a .pdf extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Document title (defaults to the input file name)
        #[arg(short, long)]
        title: Option<String>,

        /// Page size
        #[arg(long, value_enum, default_value = "letter")]
        page_size: PageSizeArg,

        /// Render text outside block elements as paragraphs even without other structure
        #[arg(long)]
        loose_text: bool,

        /// Write uncompressed content streams
        #[arg(long)]
        uncompressed: bool,
    },

    /// Dump extracted content blocks as JSON
    Blocks {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Treat text outside block elements as paragraphs even without other structure
        #[arg(long)]
        loose_text: bool,
    },

    /// Show content statistics for an HTML file
    Info {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Strip scripts and consolidate CSS for download
    Clean {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Re-indent HTML for reading
    Prettify {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Work with code entries from a CSV-exported sheet
    Sheet {
        /// CSV export URL
        #[arg(long, env = "HTMLPDF_SHEET_URL")]
        url: String,

        /// Convert the entry with this Number
        #[arg(short, long, conflicts_with = "all")]
        number: Option<String>,

        /// Convert every entry
        #[arg(long)]
        all: bool,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },

    /// Send a text prompt to a webhook
    Webhook {
        /// Webhook URL
        #[arg(long, env = "HTMLPDF_WEBHOOK_URL")]
        url: String,

        /// Prompt text
        #[arg(value_name = "TEXT")]
        text: String,

        /// Prompt category
        #[arg(short, long, default_value = "Code Generator")]
        category: String,

        /// Prompt title (defaults to "<category> - Custom Prompt")
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageSizeArg {
    /// US Letter
    Letter,
    /// ISO A4
    A4,
}

impl From<PageSizeArg> for PageSize {
    fn from(size: PageSizeArg) -> Self {
        match size {
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::A4 => PageSize::A4,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            title,
            page_size,
            loose_text,
            uncompressed,
        }) => cmd_convert(
            &input,
            output.as_deref(),
            title,
            page_size,
            loose_text,
            uncompressed,
        ),
        Some(Commands::Blocks {
            input,
            output,
            compact,
            loose_text,
        }) => cmd_blocks(&input, output.as_deref(), compact, loose_text),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Clean { input, output }) => cmd_clean(&input, output.as_deref()),
        Some(Commands::Prettify { input, output }) => cmd_prettify(&input, output.as_deref()),
        Some(Commands::Sheet {
            url,
            number,
            all,
            output,
        }) => cmd_sheet(&url, number.as_deref(), all, &output),
        Some(Commands::Webhook {
            url,
            text,
            category,
            title,
        }) => cmd_webhook(&url, text, category, title),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(
                    &input,
                    cli.output.as_deref(),
                    None,
                    PageSizeArg::Letter,
                    false,
                    false,
                )
            } else {
                println!("{}", "Usage: htmlpdf <FILE> [OUTPUT]".yellow());
                println!("       htmlpdf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn file_title(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    title: Option<String>,
    page_size: PageSizeArg,
    loose_text: bool,
    uncompressed: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = fs::read_to_string(input)?;
    let title = title.unwrap_or_else(|| file_title(input));
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("pdf"));

    let mut builder = HtmlPdf::new()
        .with_title(title)
        .with_page_size(page_size.into());
    if loose_text {
        builder = builder.loose_text_as_paragraphs();
    }
    if uncompressed {
        builder = builder.uncompressed();
    }

    let doc = builder.render(&html)?;
    fs::write(&output, &doc.bytes)?;

    println!("{} {}", "Saved to".green(), output.display());
    println!(
        "  {} {} page(s), {} bytes",
        "└─".dimmed(),
        doc.page_count,
        doc.len()
    );
    if doc.stats.fallback_used {
        println!(
            "  {} {}",
            "!".yellow(),
            "No structural content found; rendered plain text".yellow()
        );
    }

    Ok(())
}

fn cmd_blocks(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    loose_text: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = fs::read_to_string(input)?;

    let mut options = ExtractOptions::new();
    if loose_text {
        options = options.loose_text_as_paragraphs();
    }
    let blocks = extract_blocks_with_options(&html, options);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json_document(&file_title(input), &blocks, format)?;

    write_or_print(output, &json)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let html = fs::read_to_string(input)?;
    let doc = HtmlPdf::new().with_title(file_title(input)).render(&html)?;
    let stats = &doc.stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Markup".bold(), detect_markup(&html));
    println!("{}: {}", "Title".bold(), doc.title);
    println!("{}: {}", "Pages".bold(), doc.page_count);
    println!("{}: {} bytes", "PDF size".bold(), doc.len());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!(
        "{}: {} ({} rows)",
        "Tables".bold(),
        stats.table_count,
        stats.table_row_count
    );
    println!(
        "{}: {}",
        "Fallback".bold(),
        if stats.fallback_used {
            format!("Yes ({} paragraph(s))", stats.fallback_paragraph_count)
        } else {
            "No".to_string()
        }
    );

    Ok(())
}

fn cmd_clean(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let html = fs::read_to_string(input)?;
    write_or_print(output, &clean_for_download(&html))
}

fn cmd_prettify(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let html = fs::read_to_string(input)?;
    write_or_print(output, &prettify(&html))
}

fn print_entries(entries: &[CodeEntry]) {
    println!("{}", "Sheet Entries".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for entry in entries {
        println!(
            "{:>6}  {}  {}",
            entry.number.bold(),
            entry.title,
            format!("[{}]", entry.category).dimmed()
        );
    }
    println!("\n{} {} entries", "Total:".green().bold(), entries.len());
}

/// PDF file name per entry. Entries whose titles map to the same file
/// name get their `Number` appended.
fn entry_filenames(entries: &[CodeEntry]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(pdf_filename(&entry.title)).or_default() += 1;
    }

    entries
        .iter()
        .map(|entry| {
            let name = pdf_filename(&entry.title);
            if counts[&name] > 1 {
                pdf_filename(&format!("{} {}", entry.title, entry.number))
            } else {
                name
            }
        })
        .collect()
}

fn cmd_sheet(
    url: &str,
    number: Option<&str>,
    all: bool,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let entries = rt.block_on(sheet::load(url))?;

    if let Some(number) = number {
        let entry = entries
            .iter()
            .find(|e| e.number == number)
            .ok_or_else(|| format!("No sheet entry with Number {}", number))?;

        fs::create_dir_all(output)?;
        let doc = HtmlPdf::new().with_title(&entry.title).render(&entry.code)?;
        let path = output.join(pdf_filename(&entry.title));
        fs::write(&path, &doc.bytes)?;
        println!("{} {}", "Saved to".green(), path.display());
        return Ok(());
    }

    if !all {
        print_entries(&entries);
        return Ok(());
    }

    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Converting...");
    let jobs: Vec<ConversionJob> = entries
        .iter()
        .map(|e| ConversionJob::new(e.code.clone(), Some(e.title.clone())))
        .collect();
    let results = HtmlPdf::new().converter().convert_batch(&jobs);

    pb.set_message("Writing...");
    let names = entry_filenames(&entries);
    let mut failed = Vec::new();
    for ((entry, name), result) in entries.iter().zip(&names).zip(results) {
        match result {
            Some(bytes) => fs::write(output.join(name), bytes)?,
            None => failed.push(entry.number.clone()),
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} PDF(s) written to {}",
        "Done!".green().bold(),
        entries.len() - failed.len(),
        output.display()
    );
    if !failed.is_empty() {
        println!("{} {}", "Failed:".red().bold(), failed.join(", "));
    }

    Ok(())
}

fn cmd_webhook(
    url: &str,
    text: String,
    category: String,
    title: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if text.trim().is_empty() {
        return Err("Prompt text is empty".into());
    }

    let title = title.unwrap_or_else(|| PromptPayload::default_title(&category));
    let payload = PromptPayload::new(title, text, category);

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(webhook::send(url, &payload));

    let status = if result.success {
        "success".green()
    } else {
        "error".red()
    };
    println!(
        "{} {} ({})",
        "Webhook".bold(),
        status,
        result.status_code
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.success {
        Ok(())
    } else {
        Err(format!("Webhook call failed with status {}", result.status_code).into())
    }
}

fn cmd_version() {
    println!("{} {}", "htmlpdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("HTML to PDF conversion tool");
    println!();
    println!(
        "PDF backend: {}",
        if htmlpdf::backend_available() {
            "available".green()
        } else {
            "unavailable".red()
        }
    );
    println!("License: MIT");
}
