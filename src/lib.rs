//! Deterministic pay calculation engine for layered wage rules.
//!
//! This crate turns the shifts an employee worked in a pay period into an
//! itemized, auditable pay result under a layered rule set: base rates,
//! casual loading, weekend penalty rates, tiered daily overtime and capped
//! allowances. Overlapping rules are resolved by an explicit precedence,
//! all amounts are exact decimals, and every applied rule is recorded in a
//! replayable audit trace.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
