use super::model::{CountyDataset, FieldPath};
use crate::error::FieldError;

// ---------------------------------------------------------------------------
// Filter predicates over a view of the dataset
// ---------------------------------------------------------------------------

/// A view is an ordered list of indices into [`CountyDataset::records`].
/// Filters derive a new view; the dataset itself is never touched.
pub type View = Vec<usize>;

/// Strict numeric comparison against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    GreaterThan,
    LessThan,
}

impl Comparison {
    /// Label used in filter summaries (`gt` / `lt`).
    pub fn label(self) -> &'static str {
        match self {
            Comparison::GreaterThan => "gt",
            Comparison::LessThan => "lt",
        }
    }

    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::GreaterThan => value > threshold,
            Comparison::LessThan => value < threshold,
        }
    }
}

/// Every index of `dataset`, in order.
pub fn full_view(dataset: &CountyDataset) -> View {
    (0..dataset.len()).collect()
}

/// Keep the records of `view` whose state code equals `state` exactly.
pub fn by_state(dataset: &CountyDataset, view: &[usize], state: &str) -> View {
    view.iter()
        .copied()
        .filter(|&i| dataset.records.get(i).is_some_and(|r| r.state == state))
        .collect()
}

/// Keep the records of `view` whose `field` value satisfies `comparison`
/// against `threshold`.
///
/// Any record whose field cannot be resolved fails the whole filter. The
/// field is only inspected when the view has at least one record.
pub fn by_field(
    dataset: &CountyDataset,
    view: &[usize],
    field: &str,
    comparison: Comparison,
    threshold: f64,
) -> Result<View, FieldError> {
    if view.is_empty() {
        return Ok(View::new());
    }
    let path = FieldPath::parse(field)?;

    let mut kept = View::with_capacity(view.len());
    for &i in view {
        let Some(record) = dataset.records.get(i) else {
            continue;
        };
        if comparison.holds(path.resolve(record)?.as_f64(), threshold) {
            kept.push(i);
        }
    }
    Ok(kept)
}
