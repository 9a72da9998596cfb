use anyhow::Result;

use crate::commands::{CommandReport, GuideContext};

/// Render `n` with comma thousands separators.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn run(ctx: &GuideContext) -> Result<CommandReport> {
    let catalog = ctx.open_catalog()?;
    let stats = catalog.stats()?;
    let mut report = CommandReport::new("stats");

    report.banner("GUIDE STATISTICS");
    report.detail("");
    report.detail(format!("Total articles: {}", stats.total_articles));
    report.detail(format!("Total words: {}", group_thousands(stats.total_words)));
    report.detail(format!(
        "Average words per article: {}",
        stats.average_words()
    ));

    report.detail("");
    report.detail("Articles by category:");
    for (category, count) in &stats.by_category {
        report.detail(format!("  {category}: {count}"));
    }
    Ok(report)
}
