pub mod outcome;
pub mod rule;
pub mod target;

pub use outcome::{RunReport, RunStatus, TaskOutcome, TaskRecord};
pub use rule::{CompiledRule, ExtractionRule, RuleSet};
pub use target::{KeywordTarget, PriceTarget, Target};
