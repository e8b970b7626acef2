//! `germs-eval merge` - attach gold labels to test items

use germs_core::error::Result;
use germs_core::format::OutputFormat;
use germs_core::records::merge::merge_files;
use germs_core::records::write_items_file;
use serde_json::json;

use crate::cli::MergeArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{check_output, print_json_status};

pub fn execute(ctx: &CommandContext, args: &MergeArgs) -> Result<()> {
    check_output(&args.output, &[args.labels.as_path(), args.texts.as_path()])?;

    let items = merge_files(&args.labels, &args.texts)?;
    write_items_file(&args.output, &items)?;

    match ctx.cli.format {
        OutputFormat::Json => print_json_status(
            "ok",
            &[
                ("items", json!(items.len())),
                ("output", json!(args.output.display().to_string())),
            ],
        )?,
        OutputFormat::Human => {
            if ctx.chatty() {
                println!(
                    "Wrote {} annotated items to {}",
                    items.len(),
                    args.output.display()
                );
            }
        }
    }
    Ok(())
}
