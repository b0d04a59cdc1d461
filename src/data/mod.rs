/// Data layer: decoding, normalization, time parsing, filtering, projection.
///
/// Architecture:
/// ```text
///   raw bytes (.csv)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode text, read CSV, mangle + repair headers → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ columns   │  resolve the four canonical columns (fail fast)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  time     │  parse timestamps → TimedRow (unparsable rows dropped)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  date / date+time-of-day / instant window
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ project   │  numeric coercion → Record (incomplete rows dropped)
///   └──────────┘
///        │
///        ▼
///   series: ChartSeries / TableView for the UI
/// ```

pub mod columns;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod project;
pub mod series;
pub mod time;
