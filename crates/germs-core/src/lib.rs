//! GermEval Core Library
//!
//! Label aggregation, submission validation and scoring for the GermEval
//! ordinal annotation tasks.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod format;
pub mod gold;
pub mod label;
pub mod logging;
pub mod records;
pub mod schema;
pub mod score;
pub mod submission;
pub mod table;
pub mod validate;
