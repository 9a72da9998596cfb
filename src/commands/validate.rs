use anyhow::Result;

use crate::commands::{CommandReport, GuideContext};

#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    pub strict: bool,
}

pub fn run(ctx: &GuideContext) -> Result<CommandReport> {
    let checker = ctx.open_checker()?;
    let result = checker.validate()?;
    let mut report = CommandReport::new("validate");

    report.banner("VALIDATING GUIDE DATABASE");
    report.detail("");
    report.detail(format!("Articles in index: {}", result.records_examined));

    for issue in &result.issues {
        report.issue(issue.to_string());
    }
    if result.is_clean() {
        report.detail("");
        report.detail("✓ All checks passed!");
    }
    Ok(report)
}
