/// Report layer: text produced by the display and statistics operations.
///
/// ```text
///   current view ──► display ──► per-county block
///        │
///        └─────────► stats   ──► totals / weighted sub-populations
/// ```

pub mod display;
pub mod stats;
