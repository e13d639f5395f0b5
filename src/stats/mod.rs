// Contributor statistics.
// Record model, cache-or-fetch engine, and display label derivation.

pub mod engine;
pub mod labels;
pub mod record;

pub use engine::{DEFAULT_TTL, Engine, StatsDisplay};
pub use record::StatsRecord;
