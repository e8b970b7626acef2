//! `germs-eval targets` - derive gold targets from annotated records

use germs_core::aggregate::Aggregator;
use germs_core::error::Result;
use germs_core::format::OutputFormat;
use germs_core::gold::build_targets;
use serde_json::json;

use crate::cli::TargetsArgs;
use crate::commands::aggregate::load_items;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{check_output, print_json_status};

pub fn execute(ctx: &CommandContext, args: &TargetsArgs) -> Result<()> {
    check_output(&args.output, &[args.input.as_path()])?;

    let (items, skipped) = load_items(&args.input, args.skip_empty)?;
    let gold = build_targets(&items, &Aggregator::new(ctx.config.tie_break))?;
    gold.save(&args.output)?;

    match ctx.cli.format {
        OutputFormat::Json => print_json_status(
            "ok",
            &[
                ("targets", json!(gold.len())),
                ("skipped", json!(skipped)),
                ("output", json!(args.output.display().to_string())),
            ],
        )?,
        OutputFormat::Human => {
            if ctx.chatty() {
                println!("Wrote {} targets to {}", gold.len(), args.output.display());
                if skipped > 0 {
                    println!("Skipped {} items without annotations", skipped);
                }
            }
        }
    }
    Ok(())
}
