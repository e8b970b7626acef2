//! `germs-eval evaluate` - compare predicted annotations with gold annotations

use germs_core::error::Result;
use germs_core::format::OutputFormat;
use germs_core::records::compare::{compare_items, AnnotationReport};
use germs_core::records::read_items;
use germs_core::trace_time;

use crate::cli::EvaluateArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::check_output;

fn print_human(report: &AnnotationReport) {
    for (name, value) in [
        ("precision", report.precision),
        ("recall", report.recall),
        ("f1", report.f1),
        ("accuracy", report.accuracy),
    ] {
        println!("{:<9}  {:.4}", name, value);
    }
    println!();
    println!(
        "tp {}  fp {}  fn {}",
        report.counts.tp, report.counts.fp, report.counts.fn_
    );
    println!(
        "Compared {} items ({} predictions)",
        report.compared, report.predictions
    );
    if !report.unmatched.is_empty() {
        println!("{} gold items have no prediction", report.unmatched.len());
    }
}

pub fn execute(ctx: &CommandContext, args: &EvaluateArgs) -> Result<()> {
    if let Some(output) = &args.output {
        check_output(output, &[args.predictions.as_path(), args.gold.as_path()])?;
    }

    let gold = read_items(&args.gold)?;
    let predicted = read_items(&args.predictions)?;
    let report = compare_items(&gold, &predicted);
    if let Some(output) = &args.output {
        report.save(output)?;
    }
    trace_time!(ctx.start, "evaluate", compared = report.compared);

    match ctx.cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Human => {
            if ctx.chatty() {
                print_human(&report);
                if let Some(output) = &args.output {
                    println!("Wrote report to {}", output.display());
                }
            }
        }
    }
    Ok(())
}
