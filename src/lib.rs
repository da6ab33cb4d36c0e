//! langcover - website language accessibility analyzer.
//!
//! Fetches each organization homepage from a CSV of `name,url` records
//! under a bounded worker pool and classifies its language
//! characteristics: the primary content language, whether a genuine
//! language-switching affordance exists, and whether non-English
//! resources are linked. Results feed aggregate coverage statistics.

pub mod classify;
pub mod cli;
pub mod detect;
pub mod fetch;
pub mod models;
pub mod orchestrator;
pub mod report;
pub mod utils;
