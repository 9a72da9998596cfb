use crate::error::{GuideError, Result};
use crate::guide::categories::Categories;
use crate::guide::record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub categories: Categories,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub sd_folder: String,
    pub device_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sd_folder: "guide".to_string(),
            device_name: "PicoCalc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GuideConfig {
    pub catalog: CatalogConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialGuideConfig {
    catalog: Option<CatalogConfig>,
    export: Option<ExportConfig>,
}

/// Where the effective configuration came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: GuideConfig,
    pub source: Option<PathBuf>,
}

/// Every environment variable the binary reads.
pub const ENV_VARS: &[&str] = &[
    "GUIDE_HOME",
    "GUIDE_DIR",
    "GUIDE_CONFIG_PATH",
    "GUIDE_CATEGORIES",
    "GUIDE_EXPORT_FOLDER",
    "GUIDE_DEVICE_NAME",
];

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn env_or_csv(var: &str) -> Option<Vec<String>> {
    let raw = env::var(var).ok()?;
    let out = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect::<Vec<_>>();
    if out.is_empty() { None } else { Some(out) }
}

fn validate(cfg: &GuideConfig) -> Result<()> {
    let categories = &cfg.catalog.categories;
    if categories.is_empty() {
        return Err(GuideError::InvalidConfig(
            "catalog.categories cannot be empty".to_string(),
        ));
    }

    let mut seen = BTreeSet::new();
    for name in categories.iter() {
        if name.trim().is_empty() {
            return Err(GuideError::InvalidConfig(
                "catalog.categories contains a blank name".to_string(),
            ));
        }
        if !record::is_encodable_field(name) {
            return Err(GuideError::InvalidConfig(format!(
                "category `{name}` cannot contain '{}' or line breaks",
                record::FIELD_DELIMITER
            )));
        }
        if !seen.insert(name) {
            return Err(GuideError::InvalidConfig(format!(
                "category `{name}` is listed twice"
            )));
        }
    }

    if cfg.export.sd_folder.trim().is_empty() {
        return Err(GuideError::InvalidConfig(
            "export.sd_folder cannot be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("GUIDE_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    let base = dirs::config_dir()?;
    Some(base.join("guide").join("guide.toml"))
}

fn merge_file_config(base: &mut GuideConfig, path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    let raw = fs::read_to_string(path).map_err(|err| {
        GuideError::InvalidConfig(format!("failed to read {}: {err}", path.display()))
    })?;
    let parsed: PartialGuideConfig = toml::from_str(&raw).map_err(|err| {
        GuideError::InvalidConfig(format!("failed to parse {}: {err}", path.display()))
    })?;
    if let Some(catalog) = parsed.catalog {
        base.catalog = catalog;
    }
    if let Some(export) = parsed.export {
        base.export = export;
    }
    Ok(true)
}

fn apply_env_overrides(cfg: &mut GuideConfig) {
    if let Some(names) = env_or_csv("GUIDE_CATEGORIES") {
        cfg.catalog.categories = Categories::new(names);
    }
    cfg.export.sd_folder = env_or_string("GUIDE_EXPORT_FOLDER", &cfg.export.sd_folder);
    cfg.export.device_name = env_or_string("GUIDE_DEVICE_NAME", &cfg.export.device_name);
}

/// Defaults, then the TOML file, then `GUIDE_*` environment overrides.
pub fn load_config() -> Result<LoadedConfig> {
    let mut cfg = GuideConfig::default();
    let mut source = None;
    if let Some(path) = resolve_config_path()
        && merge_file_config(&mut cfg, &path)?
    {
        debug!(path = %path.display(), "merged config file");
        source = Some(path);
    }

    apply_env_overrides(&mut cfg);
    validate(&cfg)?;
    Ok(LoadedConfig {
        config: cfg,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_are_valid() {
        let cfg = GuideConfig::default();
        validate(&cfg).expect("defaults validate");
        assert_eq!(cfg.catalog.categories.len(), 15);
        assert_eq!(cfg.export.sd_folder, "guide");
    }

    #[test]
    fn file_sections_replace_defaults() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("guide.toml");
        fs::write(
            &path,
            "[catalog]\ncategories = [\"Planets\", \"Towels\"]\n\n[export]\nsd_folder = \"hhgttg\"\ndevice_name = \"Sub-Etha\"\n",
        )
        .expect("write config");

        let mut cfg = GuideConfig::default();
        assert!(merge_file_config(&mut cfg, &path).expect("merge"));
        assert_eq!(cfg.catalog.categories.by_number(2), Some("Towels"));
        assert_eq!(cfg.export.sd_folder, "hhgttg");
        assert_eq!(cfg.export.device_name, "Sub-Etha");
        validate(&cfg).expect("valid");
    }

    #[test]
    fn missing_file_keeps_defaults() {
        let tmp = tempdir().expect("tempdir");
        let mut cfg = GuideConfig::default();
        let merged = merge_file_config(&mut cfg, &tmp.path().join("absent.toml")).expect("merge");
        assert!(!merged);
        assert_eq!(cfg.catalog.categories, Categories::default());
    }

    #[test]
    fn unparsable_file_is_invalid_config() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("guide.toml");
        fs::write(&path, "[catalog\ncategories = 3").expect("write config");

        let mut cfg = GuideConfig::default();
        let err = merge_file_config(&mut cfg, &path).expect_err("parse failure");
        assert!(matches!(err, GuideError::InvalidConfig(_)));
    }

    #[test]
    fn env_vars_cover_every_override() {
        for var in ["GUIDE_DIR", "GUIDE_CONFIG_PATH", "GUIDE_CATEGORIES", "GUIDE_HOME"] {
            assert!(ENV_VARS.contains(&var), "{var} missing");
        }
    }

    #[test]
    fn validate_rejects_bad_category_sets() {
        let mut cfg = GuideConfig::default();
        cfg.catalog.categories = Categories::new(Vec::new());
        assert!(validate(&cfg).is_err());

        cfg.catalog.categories = Categories::new(["A|B".to_string()]);
        assert!(validate(&cfg).is_err());

        cfg.catalog.categories = Categories::new(["Planets".to_string(), "Planets".to_string()]);
        assert!(validate(&cfg).is_err());
    }
}
