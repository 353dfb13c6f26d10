//! tra-convert CLI
//!
//! Convert TRA string tables to JSON and back.

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tra_convert::{json_file_to_tra, tra_file_to_json};

#[derive(Parser, Debug)]
#[command(name = "tra-convert")]
#[command(version)]
#[command(about = "TRA string-table conversion tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a TRA file to a flat JSON string table
    Decode {
        /// Input .tra file
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Output .json file (default: input path + ".json")
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Input encoding (win1251/windows-1251/cp1251; anything else is UTF-8)
        #[arg(short = 'e', long, default_value = "utf-8")]
        encoding: String,

        /// Fail on a record left open at end of input instead of dropping it
        #[arg(long)]
        strict: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Convert a JSON string table back to a TRA file
    Encode {
        /// Input .json file
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Output .tra file (default: input path with a .tra extension)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output encoding (win1251/windows-1251/cp1251; anything else is UTF-8)
        #[arg(short = 'e', long, default_value = "utf-8")]
        encoding: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Convert every .tra file under a directory
    Dir {
        /// Source directory to scan
        source: PathBuf,

        /// Output directory (mirrors the source layout)
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Input encoding for all files (win1251/windows-1251/cp1251; anything else is UTF-8)
        #[arg(short = 'e', long, default_value = "utf-8")]
        encoding: String,

        /// Fail on a record left open at end of input instead of dropping it
        #[arg(long)]
        strict: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            input,
            output,
            encoding,
            strict,
            verbose,
        } => decode_file(input, output, &encoding, strict, verbose),
        Commands::Encode {
            input,
            output,
            encoding,
            verbose,
        } => encode_file(input, output, &encoding, verbose),
        Commands::Dir {
            source,
            output,
            encoding,
            strict,
            verbose,
        } => convert_dir(source, output, &encoding, strict, verbose),
    }
}

fn decode_file(
    input: PathBuf,
    output: Option<PathBuf>,
    encoding: &str,
    strict: bool,
    verbose: bool,
) -> Result<()> {
    ensure!(input.is_file(), "input file does not exist: {}", input.display());
    let output = output.unwrap_or_else(|| appended_json_path(&input));

    tra_file_to_json(&input, &output, encoding, strict)?;

    if verbose {
        println!("Converted: {} -> {}", input.display(), output.display());
    }
    Ok(())
}

fn encode_file(
    input: PathBuf,
    output: Option<PathBuf>,
    encoding: &str,
    verbose: bool,
) -> Result<()> {
    ensure!(input.is_file(), "input file does not exist: {}", input.display());
    let output = output.unwrap_or_else(|| input.with_extension("tra"));

    json_file_to_tra(&input, &output, encoding)?;

    if verbose {
        println!("Converted: {} -> {}", input.display(), output.display());
    }
    Ok(())
}

fn convert_dir(
    source: PathBuf,
    output: PathBuf,
    encoding: &str,
    strict: bool,
    verbose: bool,
) -> Result<()> {
    ensure!(source.is_dir(), "source directory does not exist: {}", source.display());

    let mut converted = 0usize;
    let entries = walkdir::WalkDir::new(&source)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file());

    for entry in entries {
        let path = entry.path();
        if !has_tra_extension(path) {
            if verbose {
                println!("Skipped: {}", path.display());
            }
            continue;
        }

        let relative = path
            .strip_prefix(&source)
            .context("failed to get relative path")?;
        let dest = appended_json_path(&output.join(relative));

        tra_file_to_json(path, &dest, encoding, strict)?;
        converted += 1;

        if verbose {
            println!("Converted: {} -> {}", path.display(), dest.display());
        }
    }

    println!("Converted {} file(s)", converted);
    Ok(())
}

fn has_tra_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("tra"))
        .unwrap_or(false)
}

/// `setup.tra` -> `setup.tra.json`, keeping the original name visible
fn appended_json_path(path: &Path) -> PathBuf {
    let mut name = path.to_path_buf().into_os_string();
    name.push(".json");
    PathBuf::from(name)
}
