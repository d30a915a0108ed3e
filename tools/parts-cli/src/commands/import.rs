//! Bulk product update command.

use std::fs;

use anyhow::{bail, Context as _, Result};

use parts_catalog::catalog::PRODUCTS_FILE;
use parts_catalog::import::{self, FieldValue, HeaderMapping, ImportPlan, UnknownHeaderPolicy};

use super::ImportArgs;
use crate::context::Context;

/// Run the import command.
pub async fn run(args: ImportArgs, ctx: &Context) -> Result<()> {
    let content =
        fs::read_to_string(&args.file).with_context(|| format!("Failed to read {}", args.file))?;
    let rows: Vec<Vec<String>> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse rows from {}", args.file))?;

    let Some((headers, rows)) = rows.split_first() else {
        bail!("{} has no header row", args.file);
    };

    let policy = if args.strict {
        UnknownHeaderPolicy::Reject
    } else {
        UnknownHeaderPolicy::Ignore
    };
    let mapping = HeaderMapping::resolve(headers, policy)?;
    for header in mapping.ignored() {
        ctx.output.warn(&format!("Ignoring unknown column '{}'", header));
    }

    let catalog = ctx.catalog()?;
    let mut products = catalog.products().to_vec();
    let plan = import::plan_updates(&products, &mapping, rows);

    if ctx.output.is_json() {
        ctx.output.json(&plan);
    } else {
        print_plan(&plan, ctx);
    }

    let Some(out) = &args.apply else {
        if !plan.is_empty() {
            ctx.output.info(&format!(
                "Dry run. Use --apply <file> to write the updated {}",
                PRODUCTS_FILE
            ));
        }
        return Ok(());
    };

    let updated = import::apply(&mut products, &plan);
    let json = serde_json::to_string_pretty(&products)?;
    fs::write(out, json).with_context(|| format!("Failed to write {}", out))?;
    ctx.output.success(&format!("Updated {} product(s), wrote {}", updated, out));

    Ok(())
}

fn print_plan(plan: &ImportPlan, ctx: &Context) {
    ctx.output.header("Import plan");
    ctx.output.kv("Rows", &plan.total_rows.to_string());
    ctx.output.kv("Products to update", &plan.updates.len().to_string());
    ctx.output.kv("SKUs not found", &plan.not_found.len().to_string());
    ctx.output.kv("Errors", &plan.errors.len().to_string());

    for update in &plan.updates {
        ctx.output.list_item(&update.sku);
        for change in &update.changes {
            let old = change.old.as_ref().map(display).unwrap_or_else(|| "-".to_string());
            ctx.output.kv(
                &format!("    {}", change.field.as_str()),
                &format!("{} -> {}", old, display(&change.new)),
            );
        }
    }

    for error in &plan.errors {
        ctx.output.warn(&format!("Row {}: {}", error.row, error.error));
    }
    if !plan.not_found.is_empty() {
        ctx.output.warn(&format!("Not found: {}", plan.not_found.join(", ")));
    }
}

fn display(value: &FieldValue) -> String {
    match value {
        FieldValue::Flag(flag) => flag.to_string(),
        FieldValue::Integer(n) => n.to_string(),
        FieldValue::Decimal(n) => n.to_string(),
        FieldValue::Text(text) => text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_values() {
        assert_eq!(display(&FieldValue::Flag(true)), "true");
        assert_eq!(display(&FieldValue::Integer(3)), "3");
        assert_eq!(display(&FieldValue::Decimal(12.5)), "12.5");
        assert_eq!(display(&FieldValue::Text("Uprated".to_string())), "Uprated");
    }
}
