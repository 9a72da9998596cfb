use anyhow::Result;

use crate::commands::{CommandReport, GuideContext, rule};
use crate::guide::catalog::ViewOutcome;

#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub query: String,
}

pub fn run(ctx: &GuideContext, opts: &ViewOptions) -> Result<CommandReport> {
    let catalog = ctx.open_catalog()?;
    let mut report = CommandReport::new("view");

    match catalog.view(&opts.query)? {
        ViewOutcome::Found { record, content } => {
            report.banner(&record.title.to_uppercase());
            report.detail(content);
            report.detail("");
            report.detail(rule('='));
            report.detail(format!("Category: {}", record.category));
        }
        // A dangling record reads the same as no match at all.
        ViewOutcome::NoMatch | ViewOutcome::MissingFile { .. } => {
            report.detail(format!("Article not found: {}", opts.query));
        }
    }
    Ok(report)
}
