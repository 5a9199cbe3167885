//! docxgen CLI - build .docx documents from JSON content lists

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docxgen::convert::docx::summarize;
use docxgen::{
    build_and_write, download, ConverterRegistry, DocumentConverter, DocumentRequest,
    LayoutOptions, OfficeConverter, ResourceStore,
};

#[derive(Parser)]
#[command(name = "docxgen")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Build .docx documents from JSON content lists", long_about = None)]
struct Cli {
    /// Resource root holding templates and generated documents
    #[arg(long, global = true, env = "DOCXGEN_ROOT", default_value = "./resources")]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a document from a JSON request
    Build {
        /// Request file
        #[arg(value_name = "REQUEST")]
        request: PathBuf,

        /// Blank template under the resource root
        #[arg(long, value_name = "NAME")]
        template: Option<String>,

        /// Also convert the document to PDF
        #[arg(long)]
        pdf: bool,

        /// Use portrait instead of landscape pages
        #[arg(long)]
        portrait: bool,

        /// Office suite executable used for PDF conversion
        #[arg(long, value_name = "PATH", env = "DOCXGEN_SOFFICE")]
        soffice: Option<PathBuf>,

        /// Print the build outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a stored document to PDF
    Convert {
        /// Source document under the resource root
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Destination under the resource root
        #[arg(value_name = "DEST")]
        dest: String,

        /// Office suite executable
        #[arg(long, value_name = "PATH", env = "DOCXGEN_SOFFICE")]
        soffice: Option<PathBuf>,
    },

    /// Copy a stored document (or its PDF) out of the resource root
    Download {
        /// Document name under the resource root
        #[arg(value_name = "NAME")]
        name: String,

        /// Output file (defaults to the document's file name)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Download the PDF instead of the document
        #[arg(long)]
        pdf: bool,
    },

    /// Show element counts of a stored document
    Info {
        /// Document name under the resource root
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let store = ResourceStore::new(&cli.root);

    let result = match cli.command {
        Some(Commands::Build {
            request,
            template,
            pdf,
            portrait,
            soffice,
            json,
        }) => cmd_build(
            &store,
            &request,
            template,
            pdf,
            portrait,
            soffice.as_deref(),
            json,
        ),
        Some(Commands::Convert {
            source,
            dest,
            soffice,
        }) => cmd_convert(&store, &source, &dest, soffice.as_deref()),
        Some(Commands::Download { name, output, pdf }) => {
            cmd_download(&store, &name, output.as_deref(), pdf)
        }
        Some(Commands::Info { name }) => cmd_info(&store, &name),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: docxgen build <REQUEST.json>".yellow());
            println!("       docxgen --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn converters(soffice: Option<&Path>) -> ConverterRegistry {
    let mut registry = ConverterRegistry::with_defaults();
    if let Some(program) = soffice {
        registry.register(Arc::new(OfficeConverter::new().with_program(program)));
    }
    registry
}

fn converter_for(
    registry: &ConverterRegistry,
    dest: &str,
) -> Result<Arc<dyn DocumentConverter>, Box<dyn std::error::Error>> {
    registry.for_file_name(dest).ok_or_else(|| {
        format!(
            "No converter produces {} (supported: {})",
            dest,
            registry.supported_extensions().join(", ")
        )
        .into()
    })
}

fn cmd_build(
    store: &ResourceStore,
    request_path: &Path,
    template: Option<String>,
    pdf: bool,
    portrait: bool,
    soffice: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading request...");
    let mut request = DocumentRequest::from_path(request_path)?;
    request.pdf |= pdf;
    pb.inc(1);

    let mut options = LayoutOptions::default();
    if let Some(name) = template {
        options = options.with_template(name);
    }
    if portrait {
        options = options.portrait();
    }

    pb.set_message("Building document...");
    let converter = if request.pdf {
        Some(converter_for(&converters(soffice), &request.pdf_file_name())?)
    } else {
        None
    };
    let outcome = build_and_write(store, &request, options, converter.as_deref())?;
    pb.inc(1);
    pb.finish_with_message("Done!");

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    if !outcome.written {
        return Err(format!("Failed to write {}", outcome.docx_file_name).into());
    }

    println!("\n{}", "Output files:".green().bold());
    match &outcome.pdf_file_name {
        Some(pdf_name) => {
            println!("  {} {}", "├─".dimmed(), outcome.docx_file_name);
            let status = if outcome.converted {
                pdf_name.normal()
            } else {
                format!("{} (conversion failed)", pdf_name).red()
            };
            println!("  {} {}", "└─".dimmed(), status);
        }
        None => println!("  {} {}", "└─".dimmed(), outcome.docx_file_name),
    }

    if !outcome.is_complete() {
        return Err("PDF conversion failed".into());
    }
    Ok(())
}

fn cmd_convert(
    store: &ResourceStore,
    source: &str,
    dest: &str,
    soffice: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let converter = converter_for(&converters(soffice), dest)?;
    if !store.convert_file(converter.as_ref(), source, dest) {
        return Err(format!("Failed to convert {} to {}", source, dest).into());
    }
    println!(
        "{} {}",
        "Saved to".green(),
        store.resolve(dest).display()
    );
    Ok(())
}

fn cmd_download(
    store: &ResourceStore,
    name: &str,
    output: Option<&Path>,
    pdf: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = download(store, name, pdf)?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let stored = if pdf {
                docxgen::request::pdf_file_name(name)
            } else {
                name.to_string()
            };
            let file_name = Path::new(&stored)
                .file_name()
                .ok_or_else(|| format!("Invalid document name: {}", name))?;
            PathBuf::from(file_name)
        }
    };

    fs::write(&output, &bytes)?;
    println!("{} {}", "Saved to".green(), output.display());
    Ok(())
}

fn cmd_info(store: &ResourceStore, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = store.read(name)?;
    let summary = summarize(&bytes)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), store.resolve(name).display());
    println!("{}: {} bytes", "Size".bold(), bytes.len());
    println!("{}: {}", "Paragraphs".bold(), summary.paragraphs);
    println!("{}: {}", "Tables".bold(), summary.tables);
    println!("{}: {}", "Pictures".bold(), summary.pictures);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docxgen".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document generation tool");
    println!();
    println!("License: MIT");
}
