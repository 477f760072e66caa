use tracing::debug;

use super::{Alert, Decision, Extraction, Probe, Route};
use crate::models::{PriceTarget, RuleSet};

/// Price extraction against the rule configured for the target's host,
/// and the threshold decision against the desired price.
pub struct PriceProbe<'a> {
    target: &'a PriceTarget,
    rules: &'a RuleSet,
}

impl<'a> PriceProbe<'a> {
    pub fn new(target: &'a PriceTarget, rules: &'a RuleSet) -> Self {
        Self { target, rules }
    }
}

impl Probe for PriceProbe<'_> {
    fn extract(&self, body: &str) -> Extraction {
        let host = self.target.url.host_str().unwrap_or_default();
        let Some(rule) = self.rules.lookup(host) else {
            return Extraction::RuleMissing;
        };
        let Some(captures) = rule.regex.captures(body) else {
            return Extraction::NotFound;
        };

        // Pages can carry several candidate prices; the rule lists capture
        // groups in precedence order and the last non-empty capture wins.
        let mut raw = None;
        for &index in &rule.groups {
            if let Some(capture) = captures.get(index) {
                if !capture.as_str().is_empty() {
                    raw = Some(capture.as_str());
                }
            }
        }

        match raw.and_then(parse_amount) {
            Some(amount) => {
                debug!("Current price in {} is {}", self.target.url, amount);
                Extraction::Price(amount)
            }
            None => Extraction::NotFound,
        }
    }

    fn decide(&self, extraction: &Extraction) -> Decision {
        match extraction {
            Extraction::Price(current) => {
                if *current <= self.target.target_price {
                    Decision::Notify(Alert {
                        route: Route::Subscriber,
                        message: format!(
                            "\"{}\" is reached in {}",
                            self.target.target_price, self.target.url
                        ),
                    })
                } else {
                    Decision::NoAction
                }
            }
            Extraction::NotFound => Decision::Notify(Alert {
                route: Route::Operator,
                message: format!(
                    "Extraction pattern for {} matched nothing on the page",
                    self.target.url
                ),
            }),
            Extraction::RuleMissing => Decision::Notify(Alert {
                route: Route::Operator,
                message: format!("No extraction rule is configured for {}", self.target.url),
            }),
            Extraction::Keywords(_) => Decision::NoAction,
        }
    }
}

/// Parses a price as a whole number, disregarding surrounding non-digit
/// characters such as currency symbols. Thousands-separator commas inside
/// the digit run are skipped; anything else ends it.
pub fn parse_amount(raw: &str) -> Option<i64> {
    let mut digits = String::new();
    for c in raw.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if digits.is_empty() || c == ',' {
            continue;
        } else {
            break;
        }
    }
    digits.parse().ok()
}
