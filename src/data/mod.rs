/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → CareerDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ CareerDataset  │  Vec<Record>, column index
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  field + GPA predicates → row indices
///   └──────────┘
///        │
///        ▼
///   ┌────────────────────────┐
///   │ aggregate / describe    │  grouped means, counts, samples, summary stats
///   └────────────────────────┘
/// ```

pub mod aggregate;
pub mod describe;
pub mod filter;
pub mod loader;
pub mod model;
