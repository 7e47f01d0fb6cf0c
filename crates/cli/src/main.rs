//! CLI tool for extracting plain text from DOCX files.

use anyhow::{Context, Result};
use clap::Parser;
use docx_core::ExtractedDocument;
use docx_ooxml::{DocxParser, ExtractOptions, ParseOptions};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Extract plain text from DOCX files.
#[derive(Parser, Debug)]
#[command(name = "docx-extract")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input DOCX file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Emit JSON with the paragraphs and the assembled text
    #[arg(short, long)]
    json: bool,

    /// Text appended after every run
    #[arg(short = 's', long, default_value = " ")]
    run_separator: String,

    /// Keep leading and trailing whitespace inside text elements
    #[arg(long)]
    keep_whitespace: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// JSON shape of one extracted file.
#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    filename: &'a str,
    paragraph_count: usize,
    paragraphs: Vec<&'a [String]>,
    text: &'a str,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let parser = DocxParser::with_options(extract_options(&args));

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &parser) {
            Ok(output) => {
                if args.print {
                    println!("{}", output);
                } else {
                    let extension = if args.json { "json" } else { "txt" };
                    let output_path = get_output_path(input_path, args.output.as_ref(), extension)?;
                    write_output(&output_path, &output)?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

fn extract_options(args: &Args) -> ExtractOptions {
    ExtractOptions::new()
        .with_run_separator(args.run_separator.as_str())
        .with_parse_options(ParseOptions::new().with_trim_values(!args.keep_whitespace))
}

/// Process a single DOCX file.
fn process_file(input_path: &Path, args: &Args, parser: &DocxParser) -> Result<String> {
    let bytes = std::fs::read(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;

    let filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let (document, text) = extract_bytes(&bytes, filename, parser)?;

    if args.verbose {
        eprintln!("  Found {} paragraphs", document.paragraph_count());
    }

    if args.json {
        render_json(&document, &text)
    } else {
        Ok(text)
    }
}

/// Parse package bytes and assemble their text.
fn extract_bytes(
    bytes: &[u8],
    filename: &str,
    parser: &DocxParser,
) -> Result<(ExtractedDocument, String)> {
    if !docx_ooxml::looks_like_zip(bytes) {
        log::warn!("{} does not start with a ZIP header", filename);
    }

    let document = parser
        .parse(bytes, filename)
        .with_context(|| format!("Failed to extract text from {}", filename))?;
    let text = parser.writer().render(&document.paragraphs);
    Ok((document, text))
}

fn render_json(document: &ExtractedDocument, text: &str) -> Result<String> {
    let output = JsonOutput {
        filename: &document.filename,
        paragraph_count: document.paragraph_count(),
        paragraphs: document.paragraphs.iter().map(|p| p.runs.as_slice()).collect(),
        text,
    };
    serde_json::to_string_pretty(&output).context("Failed to serialize JSON output")
}

/// Determine the output path for a processed file.
fn get_output_path(
    input_path: &Path,
    output_dir: Option<&PathBuf>,
    extension: &str,
) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.{}", stem, extension);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => match input_path.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        },
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
