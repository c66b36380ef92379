use crate::data::filter::Comparison;
use crate::error::ParseError;

/// Opcode of the exact-match total, checked before the `population` prefix.
const POPULATION_TOTAL: &str = "population-total";

// ---------------------------------------------------------------------------
// Operation – one classified script line
// ---------------------------------------------------------------------------

/// A script line classified by its opcode.
///
/// Lines have the form `opcode[:arg1[:arg2...]]`; arguments are positional
/// and surplus arguments are ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// `display`
    Display,
    /// `filter-state:<state>`
    FilterState { state: String },
    /// `filter-gt:<field>:<value>` / `filter-lt:<field>:<value>`
    FilterField {
        field: String,
        comparison: Comparison,
        threshold: f64,
    },
    /// `population-total`
    PopulationTotal,
    /// Any other opcode starting with `population`, e.g. `population-of:<field>`
    PopulationOf { field: String },
    /// Any opcode starting with `percent`, e.g. `percent-of:<field>`
    PercentOf { field: String },
}

impl Operation {
    /// Classify a trimmed, non-blank script line.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut parts = line.split(':');
        let op = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let arg = |position: usize| {
            args.get(position - 1)
                .copied()
                .ok_or_else(|| ParseError::MissingArgument {
                    op: op.to_owned(),
                    position,
                })
        };

        match op {
            "display" => Ok(Self::Display),
            "filter-state" => Ok(Self::FilterState {
                state: arg(1)?.to_owned(),
            }),
            "filter-gt" | "filter-lt" => {
                let comparison = if op == "filter-gt" {
                    Comparison::GreaterThan
                } else {
                    Comparison::LessThan
                };
                let field = arg(1)?.to_owned();
                let threshold = parse_threshold(arg(2)?)?;
                Ok(Self::FilterField {
                    field,
                    comparison,
                    threshold,
                })
            }
            POPULATION_TOTAL => Ok(Self::PopulationTotal),
            _ if op.starts_with("population") => Ok(Self::PopulationOf {
                field: arg(1)?.to_owned(),
            }),
            _ if op.starts_with("percent") => Ok(Self::PercentOf {
                field: arg(1)?.to_owned(),
            }),
            _ => Err(ParseError::UnknownOperation(op.to_owned())),
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::FilterState { .. } => "filter-state",
            Self::FilterField {
                comparison: Comparison::GreaterThan,
                ..
            } => "filter-gt",
            Self::FilterField {
                comparison: Comparison::LessThan,
                ..
            } => "filter-lt",
            Self::PopulationTotal => POPULATION_TOTAL,
            Self::PopulationOf { .. } => "population",
            Self::PercentOf { .. } => "percent",
        }
    }
}

fn parse_threshold(raw: &str) -> Result<f64, ParseError> {
    let invalid = || ParseError::InvalidNumber(raw.to_owned());
    let digits = strip_digit_separators(raw.trim()).ok_or_else(invalid)?;
    digits.parse::<f64>().map_err(|_| invalid())
}

/// Remove `_` digit-group separators (`1_000` → `1000`). Every underscore
/// must sit between two ASCII digits, otherwise the text is rejected.
fn strip_digit_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut cleaned = String::with_capacity(text.len());
    for (i, ch) in text.char_indices() {
        if ch != '_' {
            cleaned.push(ch);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| bytes.get(j));
        let after = bytes.get(i + 1);
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(cleaned)
}
