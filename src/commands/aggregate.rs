//! `germs-eval aggregate` - reduce annotated records to a subtask file

use germs_core::aggregate::{Aggregator, DistributionRow};
use germs_core::error::Result;
use germs_core::format::OutputFormat;
use germs_core::records::{drop_empty, read_items, AnnotatedItem};
use germs_core::schema::Subtask;
use germs_core::table::{write_table_file, Table};
use germs_core::trace_time;
use serde_json::json;
use tracing::debug;

use crate::cli::AggregateArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{check_output, print_json_status};

/// Read annotated records, honouring `--skip-empty`
pub fn load_items(path: &std::path::Path, skip_empty: bool) -> Result<(Vec<AnnotatedItem>, usize)> {
    let items = read_items(path)?;
    if skip_empty {
        Ok(drop_empty(items))
    } else {
        Ok((items, 0))
    }
}

fn build_table(ctx: &CommandContext, subtask: Subtask, items: &[AnnotatedItem]) -> Result<Table> {
    let aggregator = Aggregator::new(ctx.config.tie_break);
    match subtask {
        Subtask::Categorical => Ok(Table::from_records(&aggregator.categorical_rows(items)?)),
        Subtask::Distributional => {
            let rows = aggregator.distribution_rows(items)?;
            let rows: Vec<DistributionRow> = match ctx.config.decimal_places {
                Some(places) => rows.iter().map(|row| row.rounded(places)).collect(),
                None => rows,
            };
            Ok(Table::from_records(&rows))
        }
    }
}

pub fn execute(ctx: &CommandContext, args: &AggregateArgs) -> Result<()> {
    check_output(&args.output, &[args.input.as_path()])?;

    let (items, skipped) = load_items(&args.input, args.skip_empty)?;
    debug!(items = items.len(), skipped, "loaded items");

    let table = build_table(ctx, args.subtask, &items)?;
    write_table_file(&args.output, &table)?;
    trace_time!(ctx.start, "aggregate", rows = table.row_count());

    match ctx.cli.format {
        OutputFormat::Json => print_json_status(
            "ok",
            &[
                ("subtask", json!(args.subtask.number())),
                ("rows", json!(table.row_count())),
                ("skipped", json!(skipped)),
                ("output", json!(args.output.display().to_string())),
            ],
        )?,
        OutputFormat::Human => {
            if ctx.chatty() {
                println!(
                    "Wrote {} subtask {} rows to {}",
                    table.row_count(),
                    args.subtask,
                    args.output.display()
                );
                if skipped > 0 {
                    println!("Skipped {} items without annotations", skipped);
                }
            }
        }
    }
    Ok(())
}
