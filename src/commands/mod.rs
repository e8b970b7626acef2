//! CLI commands for germs-eval

pub mod aggregate;
pub mod dispatch;
pub mod evaluate;
pub mod format;
pub mod labels;
pub mod merge;
pub mod score;
pub mod targets;
pub mod validate;
