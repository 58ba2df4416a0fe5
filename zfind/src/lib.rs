pub mod aggregate;
pub mod config;
pub mod enumerate;
pub mod errors;
pub mod filters;
pub mod matcher;
pub mod metrics;
pub mod picker;
pub mod walker;

pub use aggregate::{Aggregator, AggregatorKind, AggregatorStrategy};
pub use config::ZfindConfig;
pub use enumerate::{enumerate, enumerate_with, EnumerateOptions, Enumeration};
pub use errors::{EnumerateError, EnumerateResult};
pub use matcher::{FuzzyMatcher, NucleoMatcher};
