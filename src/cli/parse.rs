use germs_core::format::OutputFormat;
use germs_core::schema::Subtask;

/// Parse subtask selector from string
pub fn parse_subtask(s: &str) -> std::result::Result<Subtask, String> {
    s.parse::<Subtask>().map_err(|e| e.to_string())
}

/// Parse output format from string
pub fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}
