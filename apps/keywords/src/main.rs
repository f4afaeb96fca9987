use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use keywords_core::{
    KeywordsConfig, LogLogger, find_git_root, load_config, render_module, scan_project,
    write_types,
};
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "keywords")]
#[command(about = "Generate unique-symbol keyword modules from static usage", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan the project and write .keywords/index.d.ts
    Generate(GenerateArgs),
    /// Scan the project and print the runtime module behind the virtual import
    Module(ModuleArgs),
}

#[derive(Debug, Clone, Args)]
struct ScanArgs {
    /// Root directory of the project (defaults to git root)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Directory to exclude from scanning, relative to the root (repeatable)
    #[arg(long = "ignore")]
    ignored_dirs: Vec<PathBuf>,

    /// Extra module name treated like the virtual module (repeatable)
    #[arg(long = "additional-module")]
    additional_modules: Vec<String>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    scan: ScanArgs,

    /// Print the discovered keywords as a JSON array
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ModuleArgs {
    #[command(flatten)]
    scan: ScanArgs,

    /// Label each symbol with its keyword
    #[arg(long)]
    dev: bool,
}

/// Resolves the root and merges command-line modules into the config file.
fn prepare(args: &ScanArgs) -> Result<(PathBuf, KeywordsConfig)> {
    let root = match &args.root {
        Some(r) => {
            debug!("Using provided root directory: {:?}", r);
            r.canonicalize().unwrap_or_else(|_| r.clone())
        }
        None => {
            debug!("No root provided, searching for git root");
            find_git_root()?
        }
    };
    info!("Using root directory: {}", root.display());

    let mut config = load_config(&root)?;
    config.additional_modules_to_scan.extend(args.additional_modules.iter().cloned());
    Ok((root, config))
}

fn summary_line(
    keywords: usize,
    path: &Path,
    elapsed_ms: u128,
    files: usize,
    num_threads: usize,
) -> String {
    format!(
        "{} Wrote {} keywords to {}. Finished in {}ms on {} files (using {} threads).",
        "●".bright_blue(),
        keywords.to_string().cyan(),
        path.display().to_string().cyan(),
        elapsed_ms.to_string().cyan(),
        files.to_string().cyan(),
        num_threads.to_string().cyan()
    )
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Generate(args) => {
            let (root, config) = prepare(&args.scan)?;
            let num_threads = rayon::current_num_threads();
            info!("Generating keyword types (using {} threads)", num_threads);

            let scan = scan_project(&root, &LogLogger, &args.scan.ignored_dirs, &config)?;
            let path = write_types(&root, &scan.keywords)?;
            info!("Found {} keywords in {} files", scan.keywords.len(), scan.files_scanned);
            let elapsed_ms = start.elapsed().as_millis();

            if args.json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&scan.keywords)?)?;
            } else {
                for keyword in &scan.keywords {
                    writeln!(stdout, "  {} {}", "•".dimmed(), keyword)?;
                }
                writeln!(
                    stdout,
                    "\n{}",
                    summary_line(
                        scan.keywords.len(),
                        &path,
                        elapsed_ms,
                        scan.files_scanned,
                        num_threads
                    )
                )?;
            }
            stdout.flush()?;
            Ok(())
        }
        Commands::Module(args) => {
            let (root, config) = prepare(&args.scan)?;
            let scan = scan_project(&root, &LogLogger, &args.scan.ignored_dirs, &config)?;
            debug!("Scanned {} files ({} failed)", scan.files_scanned, scan.files_failed);

            write!(stdout, "{}", render_module(&scan.keywords, args.dev))?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line_reports_files_scanned() {
        colored::control::set_override(false);
        let line = summary_line(3, Path::new("/p/.keywords/index.d.ts"), 12, 40, 8);
        assert_eq!(
            line,
            "● Wrote 3 keywords to /p/.keywords/index.d.ts. Finished in 12ms on 40 files (using 8 threads)."
        );
    }
}
