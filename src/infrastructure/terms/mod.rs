mod csv_rule_source;

pub use csv_rule_source::{CsvRuleSource, parse_ruleset};
