use crate::data::filter::{full_view, View};
use crate::data::model::{CountyDataset, Record};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The loaded dataset plus the current, possibly narrowed, view of it.
pub struct SessionState {
    /// Dataset as loaded; never modified.
    pub dataset: CountyDataset,

    /// Indices of the records that passed every filter so far, in order.
    pub visible_indices: View,
}

impl SessionState {
    /// Start with every record visible.
    pub fn new(dataset: CountyDataset) -> Self {
        let visible_indices = full_view(&dataset);
        Self {
            dataset,
            visible_indices,
        }
    }

    /// Records of the current view, in order.
    pub fn visible(&self) -> impl Iterator<Item = &Record> + '_ {
        self.visible_indices
            .iter()
            .filter_map(|&i| self.dataset.records.get(i))
    }

    /// Number of records in the current view.
    pub fn visible_len(&self) -> usize {
        self.visible_indices.len()
    }

    /// Replace the current view with a narrowed one.
    pub fn narrow(&mut self, view: View) {
        log::debug!(
            "View narrowed from {} to {} records",
            self.visible_indices.len(),
            view.len()
        );
        self.visible_indices = view;
    }
}
