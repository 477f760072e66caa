use super::{Alert, Decision, Extraction, Probe, Route};
use crate::models::KeywordTarget;

/// Case-insensitive keyword search over the page body.
pub struct KeywordProbe<'a> {
    target: &'a KeywordTarget,
}

impl<'a> KeywordProbe<'a> {
    pub fn new(target: &'a KeywordTarget) -> Self {
        Self { target }
    }
}

impl Probe for KeywordProbe<'_> {
    fn extract(&self, body: &str) -> Extraction {
        Extraction::Keywords(find_matches(body, &self.target.keywords))
    }

    fn decide(&self, extraction: &Extraction) -> Decision {
        match extraction {
            Extraction::Keywords(found) if !found.is_empty() => Decision::Notify(Alert {
                route: Route::Subscriber,
                message: format!("\"{}\" found in {}", found.join(", "), self.target.url),
            }),
            _ => Decision::NoAction,
        }
    }
}

/// Returns the keywords present in the body as substrings, case-insensitive,
/// preserving the configured order.
pub fn find_matches(body: &str, keywords: &[String]) -> Vec<String> {
    let haystack = body.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .cloned()
        .collect()
}
