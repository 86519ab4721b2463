/// Data layer: core types, loading, filtering and the derived views.
///
/// Architecture:
/// ```text
///  .csv / .xlsx
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (trimmed headers)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Region / Category / Segment selectors → filtered Dataset
///   └──────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌─────────┐   ┌──────────┐   ┌──────────┐
///   │ metrics │   │  charts  │   │  export  │
///   └─────────┘   └──────────┘   └──────────┘
/// ```

pub mod charts;
pub mod export;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
