mod commands;
mod core;
mod docs;
mod release;
mod ui;
mod utils;

use clap::Parser;
use crate::core::error::{DocsError, ExitCode, print_error};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Keep CHANGELOG, README and the in-app "What's New" page in step with a release tag
#[derive(Parser)]
#[command(name = "reldocs")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Release tag, with or without the prefix (e.g. v0.4.6 or 0.4.6)
  tag: String,

  /// Date for a new CHANGELOG section (YYYY-MM-DD, default: today)
  #[arg(long)]
  date: Option<String>,

  /// Verify release docs are up to date without writing files
  #[arg(long)]
  check: bool,

  /// Print a unified diff for each outdated file (with --check)
  #[arg(long, requires = "check", conflicts_with = "json")]
  diff: bool,

  /// Output a JSON report
  #[arg(long)]
  json: bool,

  /// Project root (default: current directory)
  #[arg(long, value_name = "DIR")]
  root: Option<PathBuf>,

  /// Config file (default: reldocs.toml in the project root)
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Log to stderr so stdout stays clean for reports
fn init_tracing() {
  let filter = tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "reldocs=warn".into()));

  tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing();

  let root = match cli.root {
    Some(root) => root,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => {
        eprintln!("Error: Failed to get current directory: {}", e);
        std::process::exit(ExitCode::System.as_i32());
      }
    },
  };

  let ctx = match crate::core::context::DocsContext::build(&root, cli.config.as_deref()) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let args = commands::PrepareArgs {
    tag: cli.tag,
    date: cli.date,
    check: cli.check,
    diff: cli.diff,
    json: cli.json,
  };

  if let Err(e) = commands::run_prepare(&ctx, args) {
    handle_error(e);
  }
}

fn handle_error(err: DocsError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
