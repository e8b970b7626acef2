//! `germs-eval validate` - check a submission without scoring it

use germs_core::error::Result;
use germs_core::format::OutputFormat;
use germs_core::gold::GoldTargets;
use germs_core::submission::Submission;
use germs_core::validate::ValidationMode;
use serde_json::json;

use crate::cli::ValidateArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::print_json_status;

/// Validation mode selected by `--all-errors`
pub fn mode(all_errors: bool) -> ValidationMode {
    if all_errors {
        ValidationMode::CollectAll
    } else {
        ValidationMode::FailFast
    }
}

pub fn execute(ctx: &CommandContext, args: &ValidateArgs) -> Result<()> {
    let gold = GoldTargets::load(&args.targets)?;
    let submission = Submission::load(args.subtask, &args.submission, &gold, &ctx.config)?;
    submission.validate(&gold, &ctx.config, mode(args.all_errors))?;

    match ctx.cli.format {
        OutputFormat::Json => print_json_status(
            "ok",
            &[
                ("subtask", json!(args.subtask.number())),
                ("rows", json!(submission.table.row_count())),
                ("submission", json!(submission.path.display().to_string())),
            ],
        )?,
        OutputFormat::Human => {
            if ctx.chatty() {
                println!(
                    "{} is a valid subtask {} submission ({} rows)",
                    submission.path.display(),
                    args.subtask,
                    submission.table.row_count()
                );
            }
        }
    }
    Ok(())
}
