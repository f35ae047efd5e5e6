//! docmd CLI - DOCX to Markdown conversion tool.

use clap::Parser;
use colored::*;
use std::fs;
use std::path::PathBuf;
use std::process;

/// Convert a Word document to Markdown
#[derive(Parser)]
#[command(
    name = "docmd",
    version,
    about = "Convert a Word document to Markdown",
    long_about = "docmd - structural DOCX to Markdown conversion.\n\n\
                  Reads one .docx package and writes one Markdown file, preserving\n\
                  headings, lists, tables, hyperlinks, and inline emphasis."
)]
struct Cli {
    /// Input .docx file
    input: PathBuf,

    /// Output Markdown file
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("{} {}", "error:".red().bold(), err);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> docmd::Result<()> {
    // Assemble the full output before touching the destination, so a failed
    // conversion never leaves a truncated file behind.
    let markdown = docmd::to_markdown(&cli.input)?;
    fs::write(&cli.output, markdown)?;
    Ok(())
}
