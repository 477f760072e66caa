use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::trackers::price::parse_amount;
use crate::utils::error::Result;

/// One monitored URL plus its notification condition and recipient.
///
/// Targets are immutable once loaded and live only for the run that
/// loaded them.
#[derive(Debug, Clone)]
pub enum Target {
    Price(PriceTarget),
    Keyword(KeywordTarget),
}

/// Watches a page for a price at or below `target_price`. The extraction
/// rule is looked up by the URL's host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTarget {
    pub url: Url,
    pub notify_address: String,
    #[serde(deserialize_with = "amount_from_value")]
    pub target_price: i64,
}

/// Watches a page for the presence of any of an ordered list of keywords.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordTarget {
    pub url: Url,
    pub notify_address: String,
    pub keywords: Vec<String>,
}

impl Target {
    pub fn url(&self) -> &Url {
        match self {
            Target::Price(t) => &t.url,
            Target::Keyword(t) => &t.url,
        }
    }

    pub fn notify_address(&self) -> &str {
        match self {
            Target::Price(t) => &t.notify_address,
            Target::Keyword(t) => &t.notify_address,
        }
    }

    pub fn host(&self) -> &str {
        self.url().host_str().unwrap_or_default()
    }
}

impl From<PriceTarget> for Target {
    fn from(target: PriceTarget) -> Self {
        Target::Price(target)
    }
}

impl From<KeywordTarget> for Target {
    fn from(target: KeywordTarget) -> Self {
        Target::Keyword(target)
    }
}

/// Loads a JSON list of price targets.
pub fn load_price_targets(path: &Path) -> Result<Vec<PriceTarget>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Loads a JSON list of keyword targets.
pub fn load_keyword_targets(path: &Path) -> Result<Vec<KeywordTarget>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Target prices arrive as strings in user-supplied files; accept plain
/// numbers too and parse strings the same way extracted prices are parsed.
fn amount_from_value<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => parse_amount(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid target price {s:?}"))),
    }
}
