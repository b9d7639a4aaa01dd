//! EOW Report CLI - build the weekly calendar report
//!
//! # Commands
//!
//! ```bash
//! eow-report --dir "/mnt/trading/This Week In Markets"   # newest *EOW*.xlsx → clean_report.xlsx
//! eow-report run --input week.xlsx --output reports/     # explicit input, output directory
//! eow-report run --config report.json --json             # options from file, JSON rows on stdout
//! eow-report find --dir data --all                       # list matching exports, newest first
//! ```

use clap::{Args, Parser, Subcommand};
use eow_report::logs::{log_error, LOGGER};
use eow_report::{list_candidates, render_preview, run, to_display_rows, OptionOverrides, ReportOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "eow-report")]
#[command(about = "Clean the newest EOW export into a formatted report", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the newest export, clean it and write the report (default)
    Run(RunArgs),

    /// Show which export would be used
    Find {
        /// Directory to search
        #[arg(short, long, env = "EOW_INPUT_DIR", default_value = ".")]
        dir: PathBuf,

        /// Substring the file name must contain
        #[arg(long, default_value = "EOW")]
        token: String,

        /// Required file extension
        #[arg(long, default_value = "xlsx")]
        extension: String,

        /// List every match, newest first
        #[arg(short, long)]
        all: bool,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Directory searched for exports
    #[arg(short, long, env = "EOW_INPUT_DIR")]
    dir: Option<PathBuf>,

    /// Use this workbook instead of searching
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file or directory (default: ./clean_report.xlsx)
    #[arg(short, long, env = "EOW_OUTPUT")]
    output: Option<PathBuf>,

    /// JSON options file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Substring the file name must contain
    #[arg(long)]
    token: Option<String>,

    /// Required file extension
    #[arg(long)]
    extension: Option<String>,

    /// Source sheet (default: first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Title banner above the header row
    #[arg(long)]
    title: Option<String>,

    /// Number of preview rows
    #[arg(long)]
    preview: Option<usize>,

    /// Transform only, do not write the report
    #[arg(long)]
    dry_run: bool,

    /// Print the report rows as JSON instead of the preview table
    #[arg(long)]
    json: bool,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

impl RunArgs {
    fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            input_dir: self.dir.clone(),
            input_file: self.input.clone(),
            output: self.output.clone(),
            token: self.token.clone(),
            extension: self.extension.clone(),
            sheet: self.sheet.clone(),
            title: self.title.clone(),
            preview_rows: self.preview,
            dry_run: self.dry_run,
        }
    }
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run(args)) => cmd_run(args),
        Some(Commands::Find {
            dir,
            token,
            extension,
            all,
        }) => cmd_find(&dir, &token, &extension, all),
        None => cmd_run(cli.run),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn build_options(args: &RunArgs) -> Result<ReportOptions, Box<dyn std::error::Error>> {
    let options = ReportOptions::load(args.config.as_deref())?;
    Ok(options.with_overrides(args.overrides()))
}

fn cmd_run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    LOGGER.set_quiet(args.quiet);
    let options = build_options(&args)?;

    let summary = run(&options)?;

    if args.json {
        let json = serde_json::to_string_pretty(&to_display_rows(&summary.rows))?;
        println!("{}", json);
    } else if options.preview_rows > 0 && !args.quiet {
        println!("Cleaned Data Preview:");
        print!("{}", render_preview(&summary.rows, options.preview_rows));
    }

    Ok(())
}

fn cmd_find(dir: &Path, token: &str, extension: &str, all: bool) -> Result<(), Box<dyn std::error::Error>> {
    if all {
        let candidates = list_candidates(dir, token, extension)?;
        if candidates.is_empty() {
            eprintln!("📋 No files matching *{}*.{} in {}", token, extension.trim_start_matches('.'), dir.display());
            return Ok(());
        }
        for c in candidates {
            let modified: chrono::DateTime<chrono::Local> = c.modified.into();
            println!("{}  {}", modified.format("%Y-%m-%d %H:%M:%S"), c.path.display());
        }
    } else {
        let latest = eow_report::find_latest_file(dir, token, extension)?;
        println!("{}", latest.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "eow-report", "run", "--dir", "/mnt/weekly", "--output", "out.xlsx", "--preview", "0", "--dry-run",
        ])
        .unwrap();

        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected the run command");
        };
        let overrides = args.overrides();
        assert_eq!(overrides.input_dir, Some(PathBuf::from("/mnt/weekly")));
        assert_eq!(overrides.output, Some(PathBuf::from("out.xlsx")));
        assert_eq!(overrides.preview_rows, Some(0));
        assert!(overrides.dry_run);
        assert_eq!(overrides.title, None);
    }
}
