pub mod keyword;
pub mod price;

pub use keyword::KeywordProbe;
pub use price::PriceProbe;

use crate::models::{RuleSet, Target};

/// What a probe pulled out of a fetched page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A price in whole units, currency symbols stripped.
    Price(i64),
    /// Keywords found on the page, in the order they were configured.
    Keywords(Vec<String>),
    /// A rule exists for the host but its pattern found nothing usable.
    NotFound,
    /// No extraction rule is configured for the host.
    RuleMissing,
}

/// Whether an extraction warrants a notification, and to whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Notify(Alert),
    NoAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub route: Route,
    pub message: String,
}

/// Recipient class for an alert. Match alerts go to the target's
/// subscriber; data-quality alerts go to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Subscriber,
    Operator,
}

/// Extraction and match decision for one target variant.
pub trait Probe {
    fn extract(&self, body: &str) -> Extraction;
    fn decide(&self, extraction: &Extraction) -> Decision;
}

/// Builds the probe matching the target variant.
pub fn probe_for<'a>(target: &'a Target, rules: &'a RuleSet) -> Box<dyn Probe + 'a> {
    match target {
        Target::Price(t) => Box::new(PriceProbe::new(t, rules)),
        Target::Keyword(t) => Box::new(KeywordProbe::new(t)),
    }
}
