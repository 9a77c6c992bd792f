use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use fieldlog_core::{
    GroupBy, LogEntry, ReportQuery, TranscriptQuery, build_annual_report, build_transcript,
};
use fieldlog_ingest::{parse_log_csv, read_log_json};

mod config;

#[derive(Parser, Debug)]
#[command(name = "fieldlog", version, about = "Homeschool hour-log reporting")]
struct Cli {
    /// Config TOML path (default: ~/.fieldlog/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Annual hours report: totals plus a subject/course/month breakdown
    Report {
        /// Hour-log CSV export
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Hour-log JSON dump (alternative to --csv)
        #[arg(long = "from-json")]
        from_json: Option<PathBuf>,

        /// Restrict to one student id (default: all students)
        #[arg(long)]
        student: Option<String>,

        /// Restrict to one academic year, labeled by its starting calendar year
        #[arg(long)]
        year: Option<i32>,

        /// Breakdown dimension: subject, course, or month
        #[arg(long, default_value = "subject")]
        group_by: String,

        /// Emit the JSON wire shape instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Transcript rows with credit conversion for one student
    Transcript {
        /// Student id
        student: String,

        /// Hour-log CSV export
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Hour-log JSON dump (alternative to --csv)
        #[arg(long = "from-json")]
        from_json: Option<PathBuf>,

        /// Comma-separated academic years, e.g. 2024,2025 (default: all)
        #[arg(long)]
        years: Option<String>,

        /// Hours per credit (default from config)
        #[arg(long)]
        scale: Option<f64>,

        /// Emit the JSON wire shape instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config to ~/.fieldlog/config.toml
    Init,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Report {
            csv,
            from_json,
            student,
            year,
            group_by,
            json,
        } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let entries = load_entries(csv, from_json)?;
            let query = ReportQuery {
                student_id: student,
                academic_year: year,
                group_by: GroupBy::from_str(&group_by)?,
            };
            let report = build_annual_report(&entries, &query, &cfg);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report, &query);
            }
        }

        Command::Transcript {
            student,
            csv,
            from_json,
            years,
            scale,
            json,
        } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let entries = load_entries(csv, from_json)?;
            let query = TranscriptQuery {
                student_id: student,
                academic_years: years.as_deref().map(parse_years).transpose()?,
                scale,
            };
            let rows = build_transcript(&entries, &query, &cfg)?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({ "rows": rows }))?
                );
            } else {
                print_transcript(&query.student_id, &rows);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config(cli.config.as_deref())?;
                print!("{}", toml::to_string_pretty(&cfg)?);
            }
        },
    }

    Ok(())
}

fn load_entries(csv: Option<PathBuf>, from_json: Option<PathBuf>) -> Result<Vec<LogEntry>> {
    let entries = match (csv, from_json) {
        (Some(path), None) => {
            parse_log_csv(&path).with_context(|| format!("loading {}", path.display()))?
        }
        (None, Some(path)) => {
            read_log_json(&path).with_context(|| format!("loading {}", path.display()))?
        }
        (None, None) => bail!("no log source: pass --csv <file> or --from-json <file>"),
        (Some(_), Some(_)) => bail!("pass either --csv or --from-json, not both"),
    };
    tracing::debug!(count = entries.len(), "loaded log entries");
    Ok(entries)
}

fn parse_years(raw: &str) -> Result<Vec<i32>> {
    let years: Vec<i32> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().with_context(|| format!("invalid year {s:?}")))
        .collect::<Result<_>>()?;
    if years.is_empty() {
        bail!("--years given but no years parsed from {raw:?}");
    }
    Ok(years)
}

fn print_report(report: &fieldlog_core::AnnualReport, query: &ReportQuery) {
    match &query.student_id {
        Some(id) => println!("Annual report for {id}"),
        None => println!("Annual report (all students)"),
    }
    if let Some(y) = query.academic_year {
        println!("Academic year {}-{}", y, y + 1);
    }
    println!();

    let t = &report.totals;
    println!("Total hours:    {:>8.2}", t.total_hours);
    println!("Core hours:     {:>8.2}", t.core_hours);
    println!("Core at home:   {:>8.2}", t.core_at_home_hours);
    println!("Non-core hours: {:>8.2}", t.non_core_hours);

    if report.breakdown.is_empty() {
        return;
    }
    println!();
    println!(
        "{:<24} {:>8} {:>8} {:>10} {:>9}",
        "Group", "Total", "Core", "Core@Home", "Non-Core"
    );
    for row in &report.breakdown {
        println!(
            "{:<24} {:>8.2} {:>8.2} {:>10.2} {:>9.2}",
            row.group, row.total, row.core, row.core_home, row.non_core
        );
    }
}

fn print_transcript(student: &str, rows: &[fieldlog_core::TranscriptRow]) {
    println!("Transcript for {student}");
    println!();
    if rows.is_empty() {
        println!("(no matching log entries)");
        return;
    }
    println!(
        "{:<9} {:<28} {:<18} {:>8} {:>8}",
        "Year", "Course", "Subject", "Hours", "Credits"
    );
    for row in rows {
        println!(
            "{:<9} {:<28} {:<18} {:>8.2} {:>8.2}",
            format!("{}-{}", row.academic_year, row.academic_year + 1),
            row.course_title,
            row.subject,
            row.hours_total,
            row.credits_at_scale
        );
    }
}
