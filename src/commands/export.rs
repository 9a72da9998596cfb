use anyhow::Result;

use crate::commands::{CommandReport, GuideContext};

/// Static instructions for copying the guide onto the device's SD card.
pub fn run(ctx: &GuideContext) -> Result<CommandReport> {
    let export = &ctx.config.config.export;
    let folder = &export.sd_folder;
    let mut report = CommandReport::new("export");

    report.banner("EXPORT TO SD CARD");
    report.detail("");
    report.detail("1. Format SD card as FAT32");
    report.detail(format!("2. Create folder '{folder}' on the SD card"));
    report.detail(format!(
        "3. Copy all files from '{}/' to SD card's '{folder}/' folder",
        ctx.paths.guide_dir.display()
    ));
    report.detail(format!("4. Insert SD card into {}", export.device_name));
    report.detail("");
    report.detail("SD card structure should be:");
    report.detail("  SD_CARD/");
    report.detail(format!("  └── {folder}/"));
    report.detail("      ├── index.txt");
    report.detail("      ├── earth.txt");
    report.detail("      ├── towel.txt");
    report.detail("      └── [more articles...]");
    Ok(report)
}
