mod classify;
mod collect;
mod context;
mod error;
mod model;
mod nomination;
mod parser;
mod pipeline;
mod report;
mod settings;
mod wiki;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use context::{Overrides, RunContext};
use settings::Settings;
use wiki::WikiClient;

#[derive(Parser)]
#[command(
    name = "fc_importer",
    about = "Drafts the Signpost \"Featured content\" report from a Goings-on page"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the report and publish it
    Run {
        /// Goings-on page to read (default: this week's, from the date page)
        #[arg(short, long)]
        page: Option<String>,
        /// Page to write (default: next issue's Featured content subpage)
        #[arg(short, long)]
        target: Option<String>,
        /// First day of the reported week, YYYY-MM-DD
        #[arg(short, long)]
        week_start: Option<NaiveDate>,
        /// Print the report instead of saving it
        #[arg(long)]
        dry_run: bool,
    },
    /// Render the report without publishing
    Preview {
        #[arg(short, long)]
        page: Option<String>,
        #[arg(short, long)]
        week_start: Option<NaiveDate>,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show which candidates classify as featured content
    Classify {
        #[arg(short, long)]
        page: Option<String>,
        #[arg(short, long)]
        week_start: Option<NaiveDate>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("loading FCI_* settings")?;
    let today = chrono::Local::now().date_naive();

    let result = match cli.command {
        Commands::Run {
            page,
            target,
            week_start,
            dry_run,
        } => {
            let overrides = Overrides {
                page,
                target,
                week_start,
            };
            overrides.validate(settings.account())?;
            let client = WikiClient::new(&settings)?;

            let ctx = RunContext::resolve(&client, &settings, &overrides, today)?;
            let target = context::resolve_target(&client, &settings, &overrides)?;
            let outcome = pipeline::gather(&client, &ctx)?;
            let text = report::render_report(&ctx, &outcome.items);

            if dry_run {
                println!("{}", text);
                println!("\n(dry run: not saved to {})", target);
            } else {
                pipeline::publish(&client, &target, &text)
                    .with_context(|| format!("saving report to {}", target))?;
                println!("Saved report to {}", target);
            }
            outcome.counts.print();
            Ok(())
        }
        Commands::Preview {
            page,
            week_start,
            output,
        } => {
            let overrides = Overrides {
                page,
                week_start,
                ..Default::default()
            };
            overrides.validate(settings.account())?;
            let client = WikiClient::new(&settings)?;

            let ctx = RunContext::resolve(&client, &settings, &overrides, today)?;
            let outcome = pipeline::gather(&client, &ctx)?;
            let text = report::render_report(&ctx, &outcome.items);
            match output {
                Some(path) => {
                    std::fs::write(&path, &text)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => println!("{}", text),
            }
            outcome.counts.print();
            Ok(())
        }
        Commands::Classify { page, week_start } => {
            let overrides = Overrides {
                page,
                week_start,
                ..Default::default()
            };
            overrides.validate(settings.account())?;
            let client = WikiClient::new(&settings)?;

            let ctx = RunContext::resolve(&client, &settings, &overrides, today)?;
            let candidates = collect::collect_candidates(&client, &ctx.source)?;
            let items = classify::classify_all(&client, &candidates);
            if items.is_empty() {
                println!("No featured content linked from {}.", ctx.source);
                return Ok(());
            }

            println!("{:>3} | {:<16} | {:<60}", "#", "Type", "Title");
            println!("{}", "-".repeat(85));
            for (i, item) in items.iter().enumerate() {
                println!(
                    "{:>3} | {:<16} | {:<60}",
                    i + 1,
                    item.content_type.label(),
                    truncate(&item.title, 60)
                );
            }
            println!(
                "\n{} of {} candidates | source: {}",
                items.len(),
                candidates.len(),
                ctx.source
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
