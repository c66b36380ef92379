use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::format::repr_f64;

/// Key of the county head-count inside the `population` mapping.
pub const POPULATION_KEY: &str = "2014 Population";

// ---------------------------------------------------------------------------
// Number – a single measurement value
// ---------------------------------------------------------------------------

/// A numeric measurement that remembers whether it was loaded as an integer.
///
/// Integers render without a fractional part (`55395`), floats always carry
/// one (`6.0`), so the distinction is kept all the way to the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub const ZERO: Number = Number::Int(0);

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(v) => v,
        }
    }

    pub fn is_positive(self) -> bool {
        match self {
            Number::Int(i) => i > 0,
            Number::Float(v) => v > 0.0,
        }
    }
}

/// Integer addition stays integral unless it overflows.
impl Add for Number {
    type Output = Number;

    fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_add(b) {
                Some(sum) => Number::Int(sum),
                None => Number::Float(a as f64 + b as f64),
            },
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl Sum for Number {
    fn sum<I: Iterator<Item = Number>>(iter: I) -> Number {
        iter.fold(Number::ZERO, Add::add)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(v) => f.write_str(&repr_f64(*v)),
        }
    }
}

/// One nested group of measurements: key label → value. Absent keys mean
/// "not available", which is different from a zero value.
pub type Measures = BTreeMap<String, Number>;

// ---------------------------------------------------------------------------
// Category / FieldPath – `Category.Key` addressing used by scripts
// ---------------------------------------------------------------------------

/// The nested groups a script may address. `age` is reported by `display`
/// but is not addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Population,
    Education,
    Ethnicities,
    Income,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Population,
        Category::Education,
        Category::Ethnicities,
        Category::Income,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Population => "Population",
            Category::Education => "Education",
            Category::Ethnicities => "Ethnicities",
            Category::Income => "Income",
        }
    }

    /// Case-sensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed `Category.Key` reference.
///
/// Only the first `.` separates category from key, so keys may contain dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath<'a> {
    pub category: Category,
    pub key: &'a str,
}

impl<'a> FieldPath<'a> {
    pub fn parse(field: &'a str) -> Result<Self, FieldError> {
        let (prefix, key) = field.split_once('.').unwrap_or((field, ""));
        let category = Category::from_name(prefix)
            .ok_or_else(|| FieldError::UnknownField(field.to_owned()))?;
        Ok(Self { category, key })
    }

    /// Look the key up on `record`; absence is a [`FieldError::MissingKey`].
    pub fn resolve(&self, record: &Record) -> Result<Number, FieldError> {
        record
            .measures(self.category)
            .get(self.key)
            .copied()
            .ok_or_else(|| FieldError::MissingKey {
                category: self.category,
                key: self.key.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// Record – one county
// ---------------------------------------------------------------------------

/// Demographic data for a single county.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub county: String,
    /// Two-letter state code.
    pub state: String,
    #[serde(default)]
    pub population: Measures,
    #[serde(default)]
    pub age: Measures,
    #[serde(default)]
    pub education: Measures,
    #[serde(default)]
    pub ethnicities: Measures,
    #[serde(default)]
    pub income: Measures,
}

impl Record {
    pub fn new(county: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            county: county.into(),
            state: state.into(),
            population: Measures::new(),
            age: Measures::new(),
            education: Measures::new(),
            ethnicities: Measures::new(),
            income: Measures::new(),
        }
    }

    pub fn measures(&self, category: Category) -> &Measures {
        match category {
            Category::Population => &self.population,
            Category::Education => &self.education,
            Category::Ethnicities => &self.ethnicities,
            Category::Income => &self.income,
        }
    }

    /// Head-count used by the aggregates; a missing count weighs nothing.
    pub fn population_count(&self) -> Number {
        self.population
            .get(POPULATION_KEY)
            .copied()
            .unwrap_or(Number::ZERO)
    }
}

// ---------------------------------------------------------------------------
// CountyDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All loaded records, in provider order. Never mutated after loading.
#[derive(Debug, Clone, Default)]
pub struct CountyDataset {
    pub records: Vec<Record>,
}

impl CountyDataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted set of distinct state codes.
    pub fn states(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.state.as_str()).collect()
    }
}
