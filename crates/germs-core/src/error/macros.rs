//! Error macros for germs-eval

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::GermsError::invalid_value($context, $value))
    };
}

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::GermsError::UsageError($msg.to_string()))
    };
}

/// Macro for rejecting a gold target entry
#[macro_export]
macro_rules! bail_target {
    ($id:expr, $column:expr, $reason:expr) => {
        return Err($crate::error::GermsError::invalid_target(
            $id, $column, $reason,
        ))
    };
}
