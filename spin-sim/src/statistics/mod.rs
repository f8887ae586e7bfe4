pub mod results;
mod stats;

pub use results::{binder_ratio, Measurement};
pub use stats::Statistics;
