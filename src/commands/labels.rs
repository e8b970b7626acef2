//! `germs-eval labels` - count labels per annotated record file

use germs_core::aggregate::LabelCounts;
use germs_core::error::Result;
use germs_core::format::OutputFormat;
use germs_core::records::read_items;
use serde_json::json;

use crate::cli::LabelsArgs;
use crate::commands::dispatch::CommandContext;

pub fn execute(ctx: &CommandContext, args: &LabelsArgs) -> Result<()> {
    let mut files = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let items = read_items(path)?;
        files.push((path, items.len(), LabelCounts::from_items(&items)));
    }

    match ctx.cli.format {
        OutputFormat::Json => {
            let files: Vec<_> = files
                .iter()
                .map(|(path, items, counts)| {
                    json!({
                        "path": path.display().to_string(),
                        "items": items,
                        "counts": counts,
                        "total": counts.total(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json!({ "files": files }))?);
        }
        OutputFormat::Human => {
            for (i, (path, items, counts)) in files.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{} ({} items)", path.display(), items);
                for (label, count) in counts.iter() {
                    println!("  {:<12} {}", label.as_str(), count);
                }
                println!("  {:<12} {}", "Total", counts.total());
            }
        }
    }
    Ok(())
}
