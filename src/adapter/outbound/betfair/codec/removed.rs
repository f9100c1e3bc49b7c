//! Parsing of the `removedRunners` field of market prices.
//!
//! The field is a `;`-separated list of `name,price,...` entries. Only the
//! name is used.

use super::tokenizer::{split_unescaped_trimmed, unescape};

const ENTRY_DELIMITER: char = ';';
const FIELD_DELIMITER: char = ',';

/// Names of runners withdrawn from a market, in listed order.
#[must_use]
pub fn removed_runner_names(removed_runners: &str) -> Vec<String> {
    split_unescaped_trimmed(removed_runners, ENTRY_DELIMITER)
        .into_iter()
        .filter_map(|entry| split_unescaped_trimmed(entry, FIELD_DELIMITER).first().copied())
        .filter(|name| !name.is_empty())
        .map(|name| unescape(name, &[ENTRY_DELIMITER, FIELD_DELIMITER]).into_owned())
        .collect()
}
