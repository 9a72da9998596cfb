use anyhow::Result;

use crate::commands::{CommandReport, GuideContext, rule};

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub query: String,
}

pub fn run(ctx: &GuideContext, opts: &SearchOptions) -> Result<CommandReport> {
    let catalog = ctx.open_catalog()?;
    let found = catalog.search(&opts.query)?;
    let mut report = CommandReport::new("search");

    report.detail("");
    report.detail(format!("Searching for: {}", opts.query));
    report.detail(rule('='));

    if found.is_empty() {
        report.detail("No matches found!");
        return Ok(report);
    }

    for record in found {
        report.detail(format!("• {}", record.title));
        report.detail(format!("  File: {}", record.filename));
        report.detail(format!("  Category: {}", record.category));
        report.detail("");
    }
    Ok(report)
}
