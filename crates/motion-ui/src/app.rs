//! Interactive shell for the motion log tools.
//!
//! [`App`] owns the [`SessionState`] and the output options. It reads one
//! command per line, runs the matching action and prints a notice. Failed
//! actions never end the loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use motion_core::formatting::format_number;
use motion_data::conversion::ConversionReport;
use motion_runtime::actions::{self, BatchOutcome, LoadReport};
use motion_runtime::session_state::{SessionState, TableOrigin};

use crate::notices::Notice;
use crate::table_view::{render_bundle, render_bundle_json, ChartView};

const PROMPT: &str = "motion-log> ";

const HELP: &str = "\
Commands:
  convert <path>   convert a session JSON file (or a directory of them) to CSV
  load <path>      use an existing CSV table for charts
  chart [view]     print chart views for the current table
                   views: all, angles, movements, sessions, timeline, times
  status           show the current table
  help             show this message
  quit             leave the shell
";

// ── ShellOptions ──────────────────────────────────────────────────────────────

/// How chart views are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellOptions {
    /// Emit chart views as JSON instead of text tables.
    pub json: bool,
    /// Decimal places for measurements.
    pub decimals: u32,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            json: false,
            decimals: 1,
        }
    }
}

// ── ShellCommand ──────────────────────────────────────────────────────────────

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Convert(PathBuf),
    Load(PathBuf),
    Chart(ChartView),
    Status,
    Help,
    Quit,
    /// Blank line.
    Empty,
}

impl ShellCommand {
    /// Parse a line. The path argument is the rest of the line, so paths may
    /// contain spaces; surrounding quotes are removed.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ShellCommand::Empty);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "convert" => path_arg(word, rest).map(ShellCommand::Convert),
            "load" => path_arg(word, rest).map(ShellCommand::Load),
            "chart" => {
                if rest.is_empty() {
                    return Ok(ShellCommand::Chart(ChartView::All));
                }
                ChartView::from_name(rest)
                    .map(ShellCommand::Chart)
                    .ok_or_else(|| format!("unknown chart view \"{}\"", rest))
            }
            "status" => Ok(ShellCommand::Status),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(format!("unknown command \"{}\" (try \"help\")", other)),
        }
    }
}

fn path_arg(command: &str, rest: &str) -> Result<PathBuf, String> {
    let unquoted = rest
        .strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .unwrap_or(rest);
    if unquoted.is_empty() {
        return Err(format!("{} needs a path", command));
    }
    Ok(PathBuf::from(unquoted))
}

// ── Report formatting ─────────────────────────────────────────────────────────

/// Notice for a successful conversion.
pub fn conversion_notice(report: &ConversionReport) -> Notice {
    let per_modality: Vec<String> = report
        .rows_by_modality
        .iter()
        .map(|(m, n)| format!("{}: {}", m, n))
        .collect();
    Notice::ok(format!(
        "Converted {} -> {} ({} rows in {} sessions; {})",
        report.input.display(),
        report.output.display(),
        format_number(report.rows as f64, 0),
        report.sessions,
        per_modality.join(", ")
    ))
}

/// Notices for a batch conversion, in input order, failures last.
pub fn batch_notices(outcome: &BatchOutcome) -> Vec<Notice> {
    if outcome.is_empty() {
        return vec![Notice::warning("No JSON files found")];
    }
    let mut notices: Vec<Notice> = outcome.converted.iter().map(conversion_notice).collect();
    notices.extend(outcome.failed.iter().map(|(path, err)| {
        let base = Notice::from_error(err);
        Notice {
            level: base.level,
            message: format!("{}: {}", path.display(), base.message),
        }
    }));
    notices
}

/// Notice for a successful load.
pub fn load_notice(report: &LoadReport) -> Notice {
    Notice::ok(format!(
        "Loaded {} ({} rows)",
        report.path.display(),
        format_number(report.rows as f64, 0)
    ))
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Shell state and options.
#[derive(Debug, Default)]
pub struct App {
    state: SessionState,
    options: ShellOptions,
}

impl App {
    pub fn new(options: ShellOptions) -> Self {
        Self {
            state: SessionState::new(),
            options,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run one command and return the text to print. `None` means quit.
    pub fn execute(&mut self, command: ShellCommand) -> Option<String> {
        let text = match command {
            ShellCommand::Empty => String::new(),
            ShellCommand::Quit => return None,
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Status => self.status_line(),
            ShellCommand::Convert(path) => {
                let outcome = actions::convert_batch(&mut self.state, &[path]);
                lines(&batch_notices(&outcome))
            }
            ShellCommand::Load(path) => match actions::load_table(&mut self.state, &path) {
                Ok(report) => lines(&[load_notice(&report)]),
                Err(e) => lines(&[Notice::from_error(&e)]),
            },
            ShellCommand::Chart(view) => self.chart_text(view),
        };
        Some(text)
    }

    /// Read commands from `input` until EOF or `quit`, writing results to
    /// `output`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            let text = match ShellCommand::parse(&line) {
                Ok(command) => {
                    tracing::debug!(?command, "shell command");
                    match self.execute(command) {
                        Some(text) => text,
                        None => break,
                    }
                }
                Err(message) => lines(&[Notice::error(message)]),
            };
            write!(output, "{}", text)?;
            write!(output, "{}", PROMPT)?;
            output.flush()?;
        }
        writeln!(output)?;
        Ok(())
    }

    fn status_line(&self) -> String {
        match (self.state.current_table(), self.state.origin()) {
            (Some(path), Some(origin)) => {
                let how = match origin {
                    TableOrigin::Converted => "converted",
                    TableOrigin::Loaded => "loaded",
                };
                lines(&[Notice::ok(format!(
                    "Current table: {} ({})",
                    path.display(),
                    how
                ))])
            }
            _ => lines(&[Notice::from_error(
                &motion_core::error::LogError::NoTableLoaded,
            )]),
        }
    }

    fn chart_text(&self, view: ChartView) -> String {
        let bundle = match actions::chart(&self.state) {
            Ok(bundle) => bundle,
            Err(e) => return lines(&[Notice::from_error(&e)]),
        };
        if bundle.is_empty() {
            return lines(&[Notice::warning("The current table has no rows")]);
        }
        if self.options.json {
            match render_bundle_json(&bundle, view) {
                Ok(json) => format!("{}\n", json),
                Err(e) => lines(&[Notice::error(e.to_string())]),
            }
        } else {
            render_bundle(&bundle, view, self.options.decimals)
        }
    }
}

fn lines(notices: &[Notice]) -> String {
    notices.iter().map(|n| format!("{}\n", n)).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
