use anyhow::Result;

use crate::commands::{CommandReport, GuideContext};

pub fn run(ctx: &GuideContext) -> Result<CommandReport> {
    let catalog = ctx.open_catalog()?;
    let listing = catalog.list_grouped()?;
    let mut report = CommandReport::new("list");

    if listing.total_lines == 0 {
        report.detail("No articles found!");
        return Ok(report);
    }

    report.banner("GUIDE ARTICLES");
    for (category, records) in &listing.groups {
        report.detail("");
        report.detail(format!("{category}:"));
        for record in records {
            report.detail(format!("  • {} ({})", record.title, record.filename));
        }
    }

    // Counts every non-blank index line, malformed ones included.
    report.detail("");
    report.detail(format!("Total articles: {}", listing.total_lines));
    Ok(report)
}
