//! Shared output helpers for commands

use std::path::Path;

use germs_core::bail_usage;
use germs_core::error::Result;
use serde_json::json;

/// Print a JSON status message with extra fields
pub fn print_json_status(status: &str, extra_fields: &[(&str, serde_json::Value)]) -> Result<()> {
    let mut output = json!({ "status": status });

    for (key, value) in extra_fields {
        if let Some(obj) = output.as_object_mut() {
            obj.insert(key.to_string(), value.clone());
        }
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Reject output locations that would overwrite an input or whose parent
/// directory does not exist
pub fn check_output(output: &Path, inputs: &[&Path]) -> Result<()> {
    if inputs.iter().any(|input| *input == output) {
        bail_usage!(format!(
            "output {} would overwrite an input file",
            output.display()
        ));
    }
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            bail_usage!(format!(
                "output directory {} does not exist",
                parent.display()
            ));
        }
    }
    Ok(())
}
