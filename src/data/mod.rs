/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  embedded .json  /  .json / .csv file
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → CountyDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ CountyDataset │  Vec<Record>, five measurement groups each
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  state / field predicates → narrowed index view
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
