//! Chassis validation commands.

use anyhow::Result;
use console::style;

use parts_catalog::fitment::{ChassisRef, ValidationResult};

use super::{ChassisArgs, ChassisCommand};
use crate::context::Context;

/// Run the chassis command.
pub async fn run(args: ChassisArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let validator = ctx.chassis_validator(&catalog);

    match args.command {
        ChassisCommand::Validate {
            make,
            model,
            start,
            end,
        } => {
            let result = validator.validate(&make, &model, &start, end.as_deref()).await?;
            if ctx.output.is_json() {
                ctx.output.json(&result);
                return Ok(());
            }
            print_validation(&result, ctx);
        }
        ChassisCommand::Summary { make, model, limit } => {
            let summary = validator.chassis_summary(&make, &model, limit).await?;
            if ctx.output.is_json() {
                ctx.output.json(&summary);
                return Ok(());
            }

            ctx.output.header(&format!("{} {}", summary.make, summary.model));
            ctx.output.kv("Total chassis", &summary.total_chassis.to_string());
            if let (Some(earliest), Some(latest)) =
                (&summary.sample_range.earliest, &summary.sample_range.latest)
            {
                ctx.output.kv("Range", &format!("{} - {}", earliest, latest));
            }

            ctx.output.header("Earliest");
            for chassis in &summary.first_chassis {
                ctx.output.list_item(&describe(chassis));
            }
            ctx.output.header("Latest");
            for chassis in &summary.last_chassis {
                ctx.output.list_item(&describe(chassis));
            }
        }
    }

    Ok(())
}

fn print_validation(result: &ValidationResult, ctx: &Context) {
    ctx.output.header(&format!(
        "{} {}: {} - {}",
        result.make, result.model, result.chassis_start, result.chassis_end
    ));

    if result.valid {
        ctx.output.success("Chassis range is valid");
    }
    if let Some(coverage) = result.year_coverage {
        ctx.output.kv("Years", &format!("{} - {}", coverage.from, coverage.to));
    }

    for issue in &result.issues {
        if issue.kind.is_blocking() {
            ctx.output.error(&issue.message);
        } else {
            ctx.output.warn(&issue.message);
        }
    }

    for (label, suggestions) in [
        ("Did you mean (start)", &result.start_suggestions),
        ("Did you mean (end)", &result.end_suggestions),
    ] {
        if suggestions.is_empty() {
            continue;
        }
        ctx.output.info(&style(label).bold().to_string());
        for chassis in suggestions {
            ctx.output.list_item(&describe(chassis));
        }
    }
}

fn describe(chassis: &ChassisRef) -> String {
    match chassis.year_end {
        Some(end) if end != chassis.year_start => {
            format!("{} ({}-{})", chassis.chassis, chassis.year_start, end)
        }
        _ => format!("{} ({})", chassis.chassis, chassis.year_start),
    }
}
