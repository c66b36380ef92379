use crate::data::model::{FieldPath, Number, Record};
use crate::error::FieldError;
use crate::format::{fixed_trimmed, repr_f64, SUB_POPULATION_PRECISION};

/// Printed as the percentage when the view holds no population at all.
pub const ZERO_PERCENT: &str = "0.000000";

/// Sum of the head-counts of `records`; a missing count adds nothing.
pub fn population_total<'a>(records: impl IntoIterator<Item = &'a Record>) -> Number {
    records.into_iter().map(Record::population_count).sum()
}

/// Float accumulator with Neumaier compensation.
///
/// The first term is taken as-is; the running correction is folded into the
/// result only when it is nonzero and finite, so an overflowed sum never
/// turns into NaN.
#[derive(Debug, Clone, Copy, Default)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
    started: bool,
}

impl CompensatedSum {
    fn add(&mut self, x: f64) {
        if !self.started {
            self.sum += x;
            self.started = true;
            return;
        }
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }

    fn value(self) -> f64 {
        if self.compensation != 0.0 && self.compensation.is_finite() {
            self.sum + self.compensation
        } else {
            self.sum
        }
    }
}

/// Population-weighted aggregate of a percentage field.
///
/// ```text
/// total          = Σ population
/// sub_population = Σ population × (field / 100)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedShare {
    pub total: Number,
    pub sub_population: f64,
}

impl WeightedShare {
    /// Aggregate `field` over `records`. Fails if any record cannot resolve
    /// the field; the field is not inspected when there are no records.
    pub fn compute<'a>(
        records: impl IntoIterator<Item = &'a Record>,
        field: &str,
    ) -> Result<Self, FieldError> {
        let mut records = records.into_iter().peekable();
        if records.peek().is_none() {
            return Ok(Self {
                total: Number::ZERO,
                sub_population: 0.0,
            });
        }
        let path = FieldPath::parse(field)?;

        let mut total = Number::ZERO;
        let mut sub_population = CompensatedSum::default();
        for record in records {
            let count = record.population_count();
            let share = path.resolve(record)?.as_f64();
            total = total + count;
            sub_population.add(count.as_f64() * (share / 100.0));
        }
        Ok(Self {
            total,
            sub_population: sub_population.value(),
        })
    }

    /// `sub_population / total × 100`, or `None` when the total is not
    /// positive.
    pub fn percent(&self) -> Option<f64> {
        self.total
            .is_positive()
            .then(|| (self.sub_population / self.total.as_f64()) * 100.0)
    }

    /// Sub-population text: 15 fractional digits, trailing zeros trimmed.
    pub fn sub_population_text(&self) -> String {
        fixed_trimmed(self.sub_population, SUB_POPULATION_PRECISION)
    }

    /// Percentage text at full precision, or [`ZERO_PERCENT`].
    pub fn percent_text(&self) -> String {
        self.percent()
            .map_or_else(|| ZERO_PERCENT.to_owned(), repr_f64)
    }
}
