use anyhow::Result;

use crate::commands::{CommandReport, GuideContext};

pub fn run(ctx: &GuideContext) -> Result<CommandReport> {
    let catalog = ctx.open_catalog()?;
    let outcome = catalog.compact()?;
    let mut report = CommandReport::new("compact");

    report.detail(format!("index_file={}", ctx.paths.index_file.display()));
    report.detail(format!("records_kept={}", outcome.records_kept));
    report.detail(format!("malformed_kept={}", outcome.malformed_kept));
    if outcome.malformed_kept > 0 {
        report.detail("malformed lines were kept as-is; run `guide validate` to locate them");
    }
    Ok(report)
}
