use abortfix::{apply_builtin, ApplyOptions, GroupOutcome, ReportLine, RunReport};
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "abortfix")]
#[command(about = "Guard aborted fetches in the pegawai pages against AbortError", long_about = None)]
#[command(version)]
struct Cli {
    /// Folder containing kontrakkerja/, kasbon/ and gajian/
    /// (e.g. src/app/dashboard/pegawai/)
    base_dir: PathBuf,

    /// Dry run - report what would change without writing files
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show unified diff of changes
    #[arg(short, long)]
    diff: bool,

    /// Exit non-zero when a file is missing or a pattern is not found
    #[arg(long)]
    strict: bool,

    /// Log progress to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    println!("Applying AbortError fixes to: {}", cli.base_dir.display());
    println!();

    if cli.dry_run {
        println!("{}", "[DRY RUN - no files will be written]".cyan());
    }

    let options = ApplyOptions {
        dry_run: cli.dry_run,
    };
    let report = apply_builtin(&cli.base_dir, options)
        .with_context(|| format!("failed to patch files under {}", cli.base_dir.display()))?;

    for line in report.lines() {
        print_line(&line);
    }

    if cli.diff {
        print_diffs(&report);
    }

    println!();
    println!("Done!");

    if cli.strict && !report.is_clean() {
        eprintln!(
            "{}",
            format!(
                "{} missing file(s), {} pattern(s) not found",
                report.skipped(),
                report.misses()
            )
            .red()
        );
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_line(line: &ReportLine<'_>) {
    let symbol = match line {
        ReportLine::Skip { .. } | ReportLine::Miss { .. } => line.symbol().yellow(),
        ReportLine::Summary { applied, total, .. } if applied < total => line.symbol().yellow(),
        ReportLine::Summary { .. } => line.symbol().green(),
    };
    println!("{}{} {}", line.indent(), symbol, line.body());
}

fn print_diffs(report: &RunReport) {
    for group in report.groups.iter().filter(|g| g.changed()) {
        if let GroupOutcome::Patched { before, after, .. } = &group.outcome {
            display_diff(&group.resolved, before, after);
        }
    }
}

/// Show unified diff between original and modified content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (patched)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for (idx, hunk) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!("{}", "...".dimmed());
        }
        for op in hunk {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => format!("-{}", change).red(),
                    ChangeTag::Insert => format!("+{}", change).green(),
                    ChangeTag::Equal => format!(" {}", change).normal(),
                };
                print!("{}", sign);
                if change.missing_newline() {
                    println!();
                }
            }
        }
    }
}
