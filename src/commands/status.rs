use anyhow::Result;
use std::env;

use crate::commands::{CommandReport, GuideContext};
use crate::guide::config::{ENV_VARS, resolve_config_path};

fn env_overrides() -> Vec<&'static str> {
    ENV_VARS
        .iter()
        .copied()
        .filter(|key| env::var_os(key).is_some())
        .collect()
}

pub fn run(ctx: &GuideContext) -> Result<CommandReport> {
    let mut report = CommandReport::new("status");
    let cfg = &ctx.config.config;

    report.detail(format!(
        "build={} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GUIDE_BUILD_ID")
    ));
    report.detail(format!("guide_dir={}", ctx.paths.guide_dir.display()));
    report.detail(format!("index_file={}", ctx.paths.index_file.display()));
    match (&ctx.config.source, resolve_config_path()) {
        (Some(path), _) => report.detail(format!("config_file={} (loaded)", path.display())),
        (None, Some(path)) => report.detail(format!("config_file={} (absent)", path.display())),
        (None, None) => report.detail("config_file=none"),
    }
    report.detail(format!("categories={}", cfg.catalog.categories.len()));
    report.detail(format!("export.sd_folder={}", cfg.export.sd_folder));
    report.detail(format!("export.device_name={}", cfg.export.device_name));

    let overrides = env_overrides();
    report.detail(format!(
        "env_overrides={}",
        if overrides.is_empty() {
            "none".to_string()
        } else {
            overrides.join(",")
        }
    ));

    if !ctx.paths.guide_dir.is_dir() {
        report.issue("missing guide dir (created by any data command, or set GUIDE_DIR)");
    } else if !ctx.paths.index_file.is_file() {
        report.issue("missing index file (created by any data command)");
    }

    Ok(report)
}
