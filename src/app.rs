use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;

use crate::config::Config;
use crate::data::filter;
use crate::data::loader;
use crate::data::model::CountyDataset;
use crate::error::OperationError;
use crate::format::repr_f64;
use crate::operation::Operation;
use crate::report::display;
use crate::report::stats::{population_total, WeightedShare};
use crate::state::SessionState;

// ---------------------------------------------------------------------------
// Whole-run entry point
// ---------------------------------------------------------------------------

/// Outcome of a run that did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every script line was processed (some may have reported errors).
    Completed(RunSummary),
    /// The operations file could not be read; nothing was executed.
    ScriptUnreadable,
}

impl RunStatus {
    pub fn exit_code(self) -> ExitCode {
        match self {
            RunStatus::Completed(_) => ExitCode::SUCCESS,
            RunStatus::ScriptUnreadable => ExitCode::FAILURE,
        }
    }
}

/// Load the dataset, announce it, then execute the operations script.
pub fn run(config: &Config, out: &mut impl Write) -> Result<RunStatus> {
    let dataset = loader::load(config)?;
    writeln!(out, "{} records loaded", dataset.len())?;

    let script = match std::fs::read_to_string(&config.operations_path) {
        Ok(script) => script,
        Err(err) => {
            log::error!(
                "Cannot read operations file {}: {err}",
                config.operations_path.display()
            );
            writeln!(
                out,
                "Error: Operations file '{}' not found.",
                config.operations_path.display()
            )?;
            return Ok(RunStatus::ScriptUnreadable);
        }
    };

    log::info!("Running operations from {}", config.operations_path.display());
    let mut app = ReportApp::new(dataset);
    let summary = app.run_script(&script, out)?;
    log::info!(
        "Executed {} operations ({} failed)",
        summary.executed,
        summary.failed
    );
    Ok(RunStatus::Completed(summary))
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

/// Split `text` into lines ended by `\r\n`, `\n` or a lone `\r`.
/// A final terminator does not start an extra empty line.
fn script_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(pos) = rest.find(|c: char| c == '\r' || c == '\n') else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..pos];
        let terminator = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + terminator..];
        Some(line)
    })
}

/// Counts of non-blank lines processed by [`ReportApp::run_script`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Executes operation scripts against a session.
pub struct ReportApp {
    pub state: SessionState,
}

impl ReportApp {
    pub fn new(dataset: CountyDataset) -> Self {
        Self {
            state: SessionState::new(dataset),
        }
    }

    /// Execute every line of `script` in order.
    ///
    /// Blank lines are skipped. A failing line is reported on `out` and
    /// leaves the view untouched; only a failure to write output is
    /// returned as an error.
    pub fn run_script(&mut self, script: &str, out: &mut impl Write) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();

        for (idx, raw) in script_lines(script).enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let line_no = idx + 1;
            summary.executed += 1;

            match self.execute_line(line, out) {
                Ok(()) => {}
                Err(OperationError::Io(err)) => return Err(err),
                Err(err) => {
                    summary.failed += 1;
                    log::warn!("Line {line_no} failed: {err}");
                    if err.is_malformed_line() {
                        writeln!(out, "Error: Malformed line {line_no}: {line}")?;
                    } else {
                        writeln!(out, "Error: {err}")?;
                    }
                }
            }
        }

        Ok(summary)
    }

    /// Parse and execute one trimmed, non-blank line.
    pub fn execute_line(&mut self, line: &str, out: &mut impl Write) -> Result<(), OperationError> {
        let operation = Operation::parse(line)?;
        self.execute(&operation, out)
    }

    /// Execute one operation. Output is written only once the operation
    /// has succeeded, and a failed operation leaves the view unchanged.
    pub fn execute(&mut self, operation: &Operation, out: &mut impl Write) -> Result<(), OperationError> {
        log::debug!(
            "Executing {} over {} records",
            operation.name(),
            self.state.visible_len()
        );

        match operation {
            Operation::Display => {
                display::write_records(out, self.state.visible())?;
            }
            Operation::FilterState { state } => {
                let view =
                    filter::by_state(&self.state.dataset, &self.state.visible_indices, state);
                writeln!(out, "Filter: state == {state} ({} entries)", view.len())?;
                self.state.narrow(view);
            }
            Operation::FilterField {
                field,
                comparison,
                threshold,
            } => {
                let view = filter::by_field(
                    &self.state.dataset,
                    &self.state.visible_indices,
                    field,
                    *comparison,
                    *threshold,
                )
                .map_err(OperationError::Filter)?;
                writeln!(
                    out,
                    "Filter: {field} {} {} ({} entries)",
                    comparison.label(),
                    repr_f64(*threshold),
                    view.len()
                )?;
                self.state.narrow(view);
            }
            Operation::PopulationTotal => {
                let total = population_total(self.state.visible());
                writeln!(out, "2014 population: {total}")?;
            }
            Operation::PopulationOf { field } => {
                let share = WeightedShare::compute(self.state.visible(), field)
                    .map_err(OperationError::Aggregate)?;
                writeln!(
                    out,
                    "2014 {field} population: {}",
                    share.sub_population_text()
                )?;
            }
            Operation::PercentOf { field } => {
                let share = WeightedShare::compute(self.state.visible(), field)
                    .map_err(OperationError::Aggregate)?;
                writeln!(out, "2014 {field} percentage: {}", share.percent_text())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Number, Record, POPULATION_KEY};

    fn dataset() -> CountyDataset {
        let rows = [
            ("Ada County", "ID", 426236, 38.2),
            ("Adams County", "CO", 469193, 23.4),
            ("Teton County", "WY", 22930, 57.0),
        ];
        let records = rows
            .iter()
            .map(|&(county, state, population, bachelors)| {
                let mut r = Record::new(county, state);
                r.population
                    .insert(POPULATION_KEY.to_owned(), Number::Int(population));
                r.education.insert(
                    "Bachelor's Degree or Higher".to_owned(),
                    Number::Float(bachelors),
                );
                r
            })
            .collect();
        CountyDataset::from_records(records)
    }

    fn run_lines(app: &mut ReportApp, script: &str) -> String {
        let mut out = Vec::new();
        app.run_script(script, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn filters_narrow_and_report_counts() {
        let mut app = ReportApp::new(dataset());
        let text = run_lines(
            &mut app,
            "filter-gt:Education.Bachelor's Degree or Higher:30\nfilter-state:WY\n",
        );
        assert_eq!(
            text,
            "Filter: Education.Bachelor's Degree or Higher gt 30.0 (2 entries)\n\
             Filter: state == WY (1 entries)\n"
        );
        assert_eq!(app.state.visible_indices, vec![2]);
    }

    #[test]
    fn malformed_lines_keep_the_view() {
        let mut app = ReportApp::new(dataset());
        let text = run_lines(
            &mut app,
            "\n  frobnicate:1  \nfilter-gt:Education.Nope:3\nfilter-lt:Education.Bachelor's Degree or Higher:abc\n",
        );
        assert_eq!(
            text,
            "Error: Malformed line 2: frobnicate:1\n\
             Error: Malformed line 3: filter-gt:Education.Nope:3\n\
             Error: Malformed line 4: filter-lt:Education.Bachelor's Degree or Higher:abc\n"
        );
        assert_eq!(app.state.visible_len(), 3);
    }

    #[test]
    fn aggregate_errors_skip_line_framing() {
        let mut app = ReportApp::new(dataset());
        let text = run_lines(&mut app, "percent:Age.< 5\npopulation:Income.Per Capita Income\n");
        assert_eq!(
            text,
            "Error: Field 'Age.< 5' not found in entry.\n\
             Error: Key 'Per Capita Income' not found in Income.\n"
        );
    }

    #[test]
    fn script_lines_accept_every_line_ending() {
        let lines: Vec<&str> = script_lines("a\r\nb\rc\n\nd").collect();
        assert_eq!(lines, vec!["a", "b", "c", "", "d"]);
        assert_eq!(script_lines("a\r").collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(script_lines("\r\r").collect::<Vec<_>>(), vec!["", ""]);
        assert_eq!(script_lines("").count(), 0);
    }

    #[test]
    fn carriage_return_only_script_runs_each_line() {
        let mut app = ReportApp::new(dataset());
        let text = run_lines(
            &mut app,
            "filter-gt:Population.2014 Population:100000\rpopulation-total\r",
        );
        assert_eq!(
            text,
            "Filter: Population.2014 Population gt 100000.0 (2 entries)\n\
             2014 population: 895429\n"
        );
    }

    #[test]
    fn summary_counts_non_blank_lines() {
        let mut app = ReportApp::new(dataset());
        let mut out = Vec::new();
        let summary = app
            .run_script("population-total\n\n\nbogus\n", &mut out)
            .unwrap();
        assert_eq!(
            summary,
            RunSummary {
                executed: 2,
                failed: 1
            }
        );
    }

    #[test]
    fn population_total_and_share() {
        let mut app = ReportApp::new(dataset());
        let text = run_lines(&mut app, "filter-state:WY\npopulation-total\npopulation:Education.Bachelor's Degree or Higher\n");
        assert_eq!(
            text,
            "Filter: state == WY (1 entries)\n\
             2014 population: 22930\n\
             2014 Education.Bachelor's Degree or Higher population: 13070.099999999998545\n"
        );
    }
}
