/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  local path / https URL
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + normalize → SwimDataset (cached per source)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SwimDataset   │  Vec<Record>, column order, categorical domains
///   └──────────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌──────────┐  ┌──────────┐  ┌──────────┐
///   │  filter   │  │  views    │  │ ranking   │
///   └──────────┘  └──────────┘  └──────────┘
///    five selection   per-(metric,    min T TOTAL per
///    sets → indices   style) charts   (style, distance, swimmer)
/// ```
pub mod export;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod ranking;
pub mod views;
