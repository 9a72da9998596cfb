pub mod compact;
pub mod create;
pub mod export;
pub mod list;
pub mod search;
pub mod stats;
pub mod status;
pub mod validate;
pub mod view;

use anyhow::Result;
use serde::Serialize;

use crate::guide::catalog::Catalog;
use crate::guide::checker::Checker;
use crate::guide::config::{self, LoadedConfig};
use crate::guide::paths::{self, GuidePaths};

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub issues: Vec<String>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }

    /// Blank line, rule, heading, rule.
    pub fn banner(&mut self, heading: &str) {
        self.detail("");
        self.detail(rule('='));
        self.detail(heading);
        self.detail(rule('='));
    }
}

pub fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

/// Resolved storage layout plus effective configuration for one invocation.
#[derive(Debug, Clone)]
pub struct GuideContext {
    pub paths: GuidePaths,
    pub config: LoadedConfig,
}

impl GuideContext {
    pub fn load() -> Result<Self> {
        Ok(Self {
            paths: paths::resolve_paths(),
            config: config::load_config()?,
        })
    }

    fn catalog(&self) -> Catalog {
        Catalog::new(
            &self.paths,
            self.config.config.catalog.categories.clone(),
        )
    }

    /// Catalog over a storage directory that is guaranteed to exist.
    pub fn open_catalog(&self) -> Result<Catalog> {
        let catalog = self.catalog();
        catalog.ensure_exists()?;
        Ok(catalog)
    }

    pub fn open_checker(&self) -> Result<Checker> {
        self.catalog().ensure_exists()?;
        Ok(Checker::new(
            &self.paths,
            self.config.config.catalog.categories.clone(),
        ))
    }
}
