//! CLI command implementations.

pub mod survey;

pub use survey::{write_prices, SurveyCommand};
