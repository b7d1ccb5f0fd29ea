//! Line-oriented interactive front end.
//!
//! Reads commands from stdin, updates the [`Selection`] and re-renders the
//! whole dashboard after every accepted change.

use anyhow::Result;
use bikeshare_dashboard::config::DashboardConfig;
use bikeshare_dashboard::dashboard::{AppState, Rendered, Selection, render_all};
use bikeshare_dashboard::output::write_dashboard;
use bikeshare_dashboard::schema::Measure;
use bikeshare_dashboard::transforms::Year;
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use tracing::{error, info, warn};

const HELP: &str = "\
commands:
  date <YYYY-MM-DD>       pick the day shown in the hourly chart
  target <cnt|casual|registered>
                          measure the covariates are correlated with
  year <2011|2012|all>    restrict the yearly chart to one year
  show                    render again with the current selection
  help                    this text
  quit                    leave the shell";

#[derive(Debug, PartialEq)]
enum Command {
    Date(NaiveDate),
    Target(Measure),
    Year(Option<Year>),
    Show,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Command, String> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
        let arg = parts.collect::<Vec<_>>().join(" ");

        match verb.as_str() {
            "date" => NaiveDate::parse_from_str(&arg, "%Y-%m-%d")
                .map(Command::Date)
                .map_err(|e| format!("bad date '{arg}': {e}")),
            "target" => arg.parse().map(Command::Target),
            "year" if arg.eq_ignore_ascii_case("all") => Ok(Command::Year(None)),
            "year" => arg.parse().map(|y| Command::Year(Some(y))),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command '{other}' (try 'help')")),
        }
    }
}

/// Renders the dashboard for `selection` into the configured directory.
pub fn render_cycle(
    state: &AppState,
    selection: &Selection,
    config: &DashboardConfig,
) -> Result<Vec<Rendered>> {
    let rendered = render_all(state, selection, config.top_n);
    let written = write_dashboard(&config.output_dir, selection, &rendered)?;
    for path in &written {
        info!(path = %path.display(), "Wrote");
    }
    Ok(rendered)
}

pub fn run(state: &AppState, config: &DashboardConfig) -> Result<()> {
    let (first, last) = state.date_bounds();
    let mut selection = state.default_selection();
    info!(%first, %last, "Interactive shell started; type 'help' for commands");

    render_cycle(state, &selection, config)?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        write!(stdout, "[{selection}]> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let next = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                writeln!(stdout, "{HELP}")?;
                continue;
            }
            Ok(Command::Show) => selection,
            Ok(Command::Date(date)) if !state.contains_date(date) => {
                warn!(%date, %first, %last, "Date outside the data range, selection unchanged");
                continue;
            }
            Ok(Command::Date(date)) => Selection { date, ..selection },
            Ok(Command::Target(target)) => Selection { target, ..selection },
            Ok(Command::Year(year)) => Selection { year, ..selection },
            Err(message) => {
                warn!("{message}");
                continue;
            }
        };

        selection = next;
        if let Err(e) = render_cycle(state, &selection, config) {
            error!(error = %e, "Failed to write dashboard");
        }
    }

    info!("Shell closed");
    Ok(())
}
