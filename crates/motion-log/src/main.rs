mod bootstrap;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use motion_core::settings::{Command, Settings};
use motion_data::aggregator::ChartBundle;
use motion_runtime::actions;
use motion_runtime::session_state::SessionState;
use motion_ui::app::{batch_notices, App, ShellOptions};
use motion_ui::notices::NoticeLevel;
use motion_ui::table_view::{render_bundle, render_bundle_json, ChartView};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("motion-log v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Format: {}, decimals: {}",
        settings.format,
        settings.decimals
    );

    let options = ShellOptions {
        json: settings.json_output(),
        decimals: settings.decimals,
    };

    match settings.command.clone() {
        Some(Command::Convert { inputs, chart }) => run_convert(&inputs, chart, options),
        Some(Command::Chart { table, view }) => run_chart(&table, &view, options),
        Some(Command::Shell) | None => {
            tracing::info!("Starting interactive shell");
            let mut app = App::new(options);
            app.run(io::stdin().lock(), io::stdout().lock())?;
            Ok(())
        }
    }
}

/// Convert every input, print one notice (or JSON report) per file and
/// optionally chart the last converted table. Fails when any input failed.
fn run_convert(inputs: &[PathBuf], chart: bool, options: ShellOptions) -> Result<()> {
    let mut state = SessionState::new();
    let outcome = actions::convert_batch(&mut state, inputs);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if options.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&outcome.converted)?)?;
        for notice in batch_notices(&outcome)
            .iter()
            .filter(|n| n.level != NoticeLevel::Ok)
        {
            eprintln!("{}", notice);
        }
    } else {
        for notice in batch_notices(&outcome) {
            writeln!(out, "{}", notice)?;
        }
    }

    if chart && state.current_table().is_some() {
        let bundle = actions::chart(&state)?;
        print_bundle(&mut out, &bundle, ChartView::All, options)?;
    }

    if outcome.converted.is_empty() && outcome.failed.is_empty() {
        bail!("no JSON files found in the given inputs");
    }
    if !outcome.failed.is_empty() {
        bail!(
            "{} of {} conversions failed",
            outcome.failed.len(),
            outcome.failed.len() + outcome.converted.len()
        );
    }
    Ok(())
}

/// Print one or all chart views of an existing table.
fn run_chart(table: &Path, view: &str, options: ShellOptions) -> Result<()> {
    let view = ChartView::from_name(view).ok_or_else(|| anyhow!("unknown chart view {view}"))?;
    let bundle = actions::chart_table(table)?;
    if bundle.is_empty() {
        tracing::warn!("{} has no rows", table.display());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_bundle(&mut out, &bundle, view, options)
}

fn print_bundle<W: Write>(
    out: &mut W,
    bundle: &ChartBundle,
    view: ChartView,
    options: ShellOptions,
) -> Result<()> {
    if options.json {
        writeln!(out, "{}", render_bundle_json(bundle, view)?)?;
    } else {
        write!(out, "{}", render_bundle(bundle, view, options.decimals))?;
    }
    Ok(())
}
