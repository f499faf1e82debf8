//! Prepare (or check) release docs for a tag
//!
//! Reads the three documents, runs the pure sync and then either writes the
//! changed documents or, with `--check`, reports which ones are out of date.

use crate::core::context::DocsContext;
use crate::core::error::{DocsError, DocsResult, ExitCode, ResultExt};
use crate::release::sync::{DocumentKind, ReleaseDocsSync, ReleaseDocuments, SyncOutcome};
use crate::release::tag::ReleaseTag;
use crate::ui::diff::unified_diff;
use crate::utils::display_path;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::io::Write;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Arguments for `reldocs <TAG>`
#[derive(Debug, Clone, Default)]
pub struct PrepareArgs {
  pub tag: String,
  pub date: Option<String>,
  pub check: bool,
  pub diff: bool,
  pub json: bool,
}

/// Machine-readable run report (`--json`)
#[derive(Debug, Serialize)]
pub struct PrepareReport {
  pub tag: String,
  pub check: bool,
  pub created_section: bool,
  pub previous_tag: Option<String>,
  pub up_to_date: bool,
  /// Outdated documents in check mode, written documents otherwise
  pub documents: Vec<DocumentStatus>,
}

#[derive(Debug, Serialize)]
pub struct DocumentStatus {
  pub document: DocumentKind,
  pub path: String,
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(raw: &str) -> DocsResult<NaiveDate> {
  let invalid = || DocsError::InvalidDate { raw: raw.to_string() };
  if raw.len() != 10 {
    return Err(invalid());
  }
  NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())
}

/// Run prepare, or check with `args.check`
pub fn run_prepare(ctx: &DocsContext, args: PrepareArgs) -> DocsResult<()> {
  let sync = ReleaseDocsSync::from_config(&ctx.config)?;
  let tag = ReleaseTag::normalize(&args.tag, sync.prefix())?;
  let date = match args.date.as_deref() {
    Some(raw) => parse_date(raw)?,
    None => Local::now().date_naive(),
  };
  tracing::debug!(%tag, %date, check = args.check, root = %ctx.root.display(), "preparing release docs");

  let original = ctx.read_documents()?;
  let outcome = sync.apply(&original, &tag, date)?;
  let changed = outcome.documents.changed(&original);

  if args.check {
    run_check(ctx, &args, &original, &outcome, &changed)
  }

  for kind in &changed {
    ctx.write_document(*kind, outcome.documents.get(*kind))?;
  }

  if args.json {
    print_report(ctx, &args, &outcome, &changed)?;
    return Ok(());
  }

  if outcome.created_section {
    println!("📝 Added CHANGELOG template for {} ({}).", tag, date.format(DATE_FORMAT));
  } else {
    println!("🔍 Found existing CHANGELOG section for {}.", tag);
  }

  if changed.is_empty() {
    println!("✅ Release docs are up to date for {}.", tag);
    return Ok(());
  }

  if changed.contains(&DocumentKind::Readme) {
    println!(
      "✅ Updated README release references and top {} sorted summaries.",
      ctx.config.release.readme_window
    );
  }
  if changed.contains(&DocumentKind::Fragment) {
    println!("✅ Updated Welcome Tour release page from CHANGELOG for {}.", tag);
  }

  Ok(())
}

/// Compare candidates with the documents on disk; never writes
fn run_check(
  ctx: &DocsContext,
  args: &PrepareArgs,
  original: &ReleaseDocuments,
  outcome: &SyncOutcome,
  changed: &[DocumentKind],
) -> ! {
  let exit_code = if changed.is_empty() { 0 } else { ExitCode::Validation.as_i32() };

  if args.json {
    if let Err(e) = print_report(ctx, args, outcome, changed) {
      crate::core::error::print_error(&e);
      std::process::exit(e.exit_code().as_i32());
    }
    std::process::exit(exit_code);
  }

  if changed.is_empty() {
    println!("✅ Release docs are up to date for {}.", outcome.tag);
    std::process::exit(0);
  }

  eprintln!("⚠️  Release docs are not up to date for {}.", outcome.tag);
  let date_flag = args.date.as_deref().map(|d| format!(" --date {}", d)).unwrap_or_default();
  eprintln!("Run: reldocs {}{}", outcome.tag, date_flag);
  eprintln!("Outdated files:");
  for kind in changed {
    eprintln!("- {}", display_path(&ctx.root, &ctx.path_for(*kind)));
  }

  if args.diff {
    for kind in changed {
      let label = display_path(&ctx.root, &ctx.path_for(*kind));
      print!("{}", unified_diff(&label, original.get(*kind), outcome.documents.get(*kind)));
    }
    let _ = std::io::stdout().flush();
  }

  std::process::exit(exit_code);
}

fn print_report(ctx: &DocsContext, args: &PrepareArgs, outcome: &SyncOutcome, changed: &[DocumentKind]) -> DocsResult<()> {
  let report = PrepareReport {
    tag: outcome.tag.to_string(),
    check: args.check,
    created_section: outcome.created_section,
    previous_tag: outcome.previous_tag.clone(),
    up_to_date: changed.is_empty(),
    documents: changed
      .iter()
      .map(|kind| DocumentStatus {
        document: *kind,
        path: display_path(&ctx.root, &ctx.path_for(*kind)),
      })
      .collect(),
  };

  let json = serde_json::to_string_pretty(&report).context("Failed to render the JSON report")?;
  println!("{}", json);
  Ok(())
}
