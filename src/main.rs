use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use require_sort::{
    file_handler::FileHandler, fix_source, lint_source, Configuration, Diagnostic, Settings,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "require-sort")]
#[command(author = "krokorok")]
#[command(version)]
#[command(about = "Checks and fixes the order of require statements", long_about = None)]
struct Cli {
    #[arg(help = "Files, directories or glob patterns to check")]
    paths: Vec<PathBuf>,

    #[arg(long, help = "Apply fixes and write the result back to each file")]
    fix: bool,

    #[arg(long, help = "Print fixed output to stdout instead of writing to file")]
    stdout: bool,

    #[arg(short, long, help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Diagnostic output format")]
    format: OutputFormat,

    #[arg(long, help = "Skip creating backups of original files")]
    no_backup: bool,
}

#[derive(Serialize)]
struct FileReport {
    path: PathBuf,
    changed: bool,
    diagnostics: Vec<Diagnostic>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if cli.paths.is_empty() {
        eprintln!("{}", "Error: No files or directories specified".red());
        std::process::exit(1);
    }

    let settings = match &cli.config {
        Some(path) => Settings::from_path(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display()))?,
        None => Settings::new(Configuration::default())?,
    };

    let file_handler = FileHandler::new(!cli.no_backup);
    let files = file_handler.find_script_files(&cli.paths)?;

    if files.is_empty() {
        eprintln!("{}", "No script files found".yellow());
        return Ok(());
    }

    let results: Vec<_> = files
        .par_iter()
        .map(|file| process_file(&file_handler, file, &settings, &cli))
        .collect();

    let mut reports = Vec::new();
    let mut had_errors = false;

    for (file, result) in files.iter().zip(results) {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                had_errors = true;
                eprintln!("{} {}: {:#}", "✗".red(), file.display(), e);
            }
        }
    }

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text if !cli.stdout => print_text(&reports),
        OutputFormat::Text => {}
    }

    let remaining: usize = reports.iter().map(|report| report.diagnostics.len()).sum();
    let affected = reports.iter().filter(|report| !report.diagnostics.is_empty()).count();
    if remaining > 0 || had_errors {
        if cli.format == OutputFormat::Text {
            eprintln!(
                "\n{}",
                format!("{remaining} problem(s) remaining in {affected} file(s)").red()
            );
        }
        std::process::exit(1);
    }

    Ok(())
}

fn process_file(
    file_handler: &FileHandler,
    path: &Path,
    settings: &Settings,
    cli: &Cli,
) -> Result<FileReport> {
    let content = file_handler.read_file(path)?;
    let filename = path.to_str().unwrap_or("unknown.js");

    if !cli.fix && !cli.stdout {
        let diagnostics = lint_source(&content, filename, settings)?;
        return Ok(FileReport {
            path: path.to_path_buf(),
            changed: false,
            diagnostics,
        });
    }

    let report = fix_source(&content, filename, settings)?;
    let changed = report.changed(&content);

    if cli.stdout {
        print!("{}", report.output);
    } else if changed {
        file_handler.write_file(path, &report.output)?;
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        changed,
        diagnostics: report.remaining,
    })
}

fn print_text(reports: &[FileReport]) {
    for report in reports {
        if report.diagnostics.is_empty() {
            let note = if report.changed { "fixed" } else { "ok" };
            println!("{} {} ({})", "✓".green(), report.path.display(), note);
            continue;
        }

        println!("{} {}", "✗".red(), report.path.display().to_string().bold());
        for diagnostic in &report.diagnostics {
            let fixable = if diagnostic.is_fixable() {
                " (fixable)".dimmed().to_string()
            } else {
                String::new()
            };
            println!(
                "  {}:{}  {}  {}{}",
                diagnostic.position.line,
                diagnostic.position.column,
                diagnostic.message,
                diagnostic.message_id.to_string().yellow(),
                fixable
            );
        }
    }
}
