use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::{CountyDataset, Measures, Number, Record};
use crate::config::Config;

/// Dataset compiled into the binary, used when no data file is configured.
const BUILTIN_JSON: &str = include_str!("../../data/county_demographics.json");

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset selected by `config`: its data file when one is set,
/// otherwise the built-in dataset.
pub fn load(config: &Config) -> Result<CountyDataset> {
    let dataset = match &config.data_path {
        Some(path) => load_file(path)
            .with_context(|| format!("loading county data from {}", path.display()))?,
        None => builtin()?,
    };
    log::info!(
        "Loaded {} county records across {} states",
        dataset.len(),
        dataset.states().len()
    );
    Ok(dataset)
}

/// Parse the dataset embedded in the binary.
pub fn builtin() -> Result<CountyDataset> {
    parse_json(BUILTIN_JSON).context("parsing built-in county dataset")
}

/// Load a county dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "county": ..., "state": ..., "population": {...}, ... }, ...]`
/// * `.csv`  – `county`, `state` and flattened `Category.Key` columns
pub fn load_file(path: &Path) -> Result<CountyDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "county": "Autauga County",
///     "state": "AL",
///     "population": { "2014 Population": 55395 },
///     "age": { "< 5": 6.0, "< 18": 25.2, "> 65": 13.8 },
///     "education": { "High School or Higher": 85.6 },
///     "ethnicities": { "Asian Alone": 1.1 },
///     "income": { "Median Household Income": 54366 }
///   }
/// ]
/// ```
///
/// Missing nested objects load as empty groups.
fn load_json(path: &Path) -> Result<CountyDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<CountyDataset> {
    let records: Vec<Record> =
        serde_json::from_str(text).context("Expected a JSON array of county records")?;
    Ok(CountyDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with `county`, `state`, and one column per
/// measurement named `<Group>.<Key>`, e.g. `Population.2014 Population`,
/// `Age.< 5`, `Income.Per Capita Income`.
/// Empty cells mean the value is not available.
fn load_csv(path: &Path) -> Result<CountyDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let county_idx = headers
        .iter()
        .position(|h| h == "county")
        .context("CSV missing 'county' column")?;
    let state_idx = headers
        .iter()
        .position(|h| h == "state")
        .context("CSV missing 'state' column")?;

    let mut columns = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        if idx == county_idx || idx == state_idx {
            continue;
        }
        let Some((group, key)) = header.split_once('.') else {
            bail!("CSV column '{header}' is not of the form Group.Key");
        };
        let group = MeasureGroup::from_name(group)
            .with_context(|| format!("CSV column '{header}': unknown group '{group}'"))?;
        columns.push((idx, group, key.to_owned()));
    }

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut record = Record::new(
            row.get(county_idx).unwrap_or(""),
            row.get(state_idx).unwrap_or(""),
        );

        for (idx, group, key) in &columns {
            let cell = row.get(*idx).unwrap_or("").trim();
            if cell.is_empty() {
                continue;
            }
            let value = parse_number(cell).with_context(|| {
                format!("Row {row_no}, column '{}': '{cell}' is not a number", headers[*idx])
            })?;
            group.measures_mut(&mut record).insert(key.clone(), value);
        }

        records.push(record);
    }

    Ok(CountyDataset::from_records(records))
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::Int(i));
    }
    s.parse::<f64>().ok().map(Number::Float)
}

/// Every nested group a data file may populate, `Age` included.
#[derive(Debug, Clone, Copy)]
enum MeasureGroup {
    Population,
    Age,
    Education,
    Ethnicities,
    Income,
}

impl MeasureGroup {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Population" => Some(Self::Population),
            "Age" => Some(Self::Age),
            "Education" => Some(Self::Education),
            "Ethnicities" => Some(Self::Ethnicities),
            "Income" => Some(Self::Income),
            _ => None,
        }
    }

    fn measures_mut(self, record: &mut Record) -> &mut Measures {
        match self {
            Self::Population => &mut record.population,
            Self::Age => &mut record.age,
            Self::Education => &mut record.education,
            Self::Ethnicities => &mut record.ethnicities,
            Self::Income => &mut record.income,
        }
    }
}
