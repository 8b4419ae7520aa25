//! Rule set configuration for the pay calculation engine.
//!
//! The engine itself never performs I/O: it consumes an already-loaded,
//! immutable [`RuleSet`]. This module owns the YAML loading mechanics and
//! the strongly-typed tables.
//!
//! # Example
//!
//! ```no_run
//! use pay_engine::config::RuleSetLoader;
//!
//! let rules = RuleSetLoader::load("./config/sample").unwrap();
//! println!("Loaded rule set: {}", rules.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::RuleSetLoader;
pub use types::{
    AllowanceRate, Classification, ClassificationRate, ClassificationsConfig, OvertimeRates,
    OvertimeTable, PenaltyConfig, PenaltyRates, PenaltyTable, RateTable, RuleSet,
    RuleSetMetadata, WeekdayOvertime, WeekendOvertime,
};
