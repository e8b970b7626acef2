//! `germs-eval score` - validate and score a submission

use germs_core::error::Result;
use germs_core::format::{human_report, OutputFormat};
use germs_core::gold::GoldTargets;
use germs_core::submission::Submission;
use germs_core::trace_time;

use crate::cli::ScoreArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::check_output;
use crate::commands::validate::mode;

pub fn execute(ctx: &CommandContext, args: &ScoreArgs) -> Result<()> {
    if !args.output.is_dir() {
        check_output(&args.output, &[args.submission.as_path(), args.targets.as_path()])?;
    }

    let gold = GoldTargets::load(&args.targets)?;
    let submission = Submission::load(args.subtask, &args.submission, &gold, &ctx.config)?;
    let report = submission.evaluate(&gold, &ctx.config, mode(args.all_errors))?;
    let path = report.save(&args.output, &ctx.config.report_file)?;
    trace_time!(ctx.start, "score");

    match ctx.cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Human => {
            if ctx.chatty() {
                println!("{}", human_report(&report));
                println!();
                println!("Wrote report to {}", path.display());
            }
        }
    }
    Ok(())
}
