use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, Result};

/// Host-keyed pattern used to pull a price out of page content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRule {
    pub host: String,
    pub pattern: String,
    /// Capture-group indices checked in order; the last group that captured
    /// a non-empty value wins.
    pub groups: Vec<usize>,
}

#[derive(Debug)]
pub struct CompiledRule {
    pub host: String,
    pub regex: Regex,
    pub groups: Vec<usize>,
}

/// Immutable set of extraction rules, at most one per host.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<ExtractionRule>) -> Result<Self> {
        let mut compiled: Vec<CompiledRule> = Vec::with_capacity(rules.len());
        for rule in rules {
            if compiled.iter().any(|existing| existing.host == rule.host) {
                return Err(AppError::Rule {
                    host: rule.host,
                    message: "duplicate host".to_string(),
                });
            }
            if rule.groups.is_empty() {
                return Err(AppError::Rule {
                    host: rule.host,
                    message: "at least one capture group is required".to_string(),
                });
            }
            let regex = Regex::new(&rule.pattern).map_err(|e| AppError::Rule {
                host: rule.host.clone(),
                message: e.to_string(),
            })?;
            compiled.push(CompiledRule {
                host: rule.host,
                regex,
                groups: rule.groups,
            });
        }
        Ok(Self { rules: compiled })
    }

    /// Exact host match; hosts are compared as loaded, without normalization.
    pub fn lookup(&self, host: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|rule| rule.host == host)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Loads a JSON list of extraction rules.
pub fn load_rules(path: &Path) -> Result<Vec<ExtractionRule>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
