//! Decoder for compressed market prices.
//!
//! The payload is a `:`-separated list of segments. Segment 0 describes the
//! market and is ignored here; every other non-empty segment is one runner:
//!
//! ```text
//! details|back ladder|lay ladder
//! ```
//!
//! `details` is exactly ten `~`-separated fields:
//!
//! ```text
//! selectionId~sortOrder~totalMatched~lastPriceMatched~handicap~
//! reductionFactor~vacant~farSP~nearSP~actualSP
//! ```
//!
//! Each ladder is a flat `~`-separated list of `price~amount~side~depth`
//! groups, best price first. Both ladders are optional.

use std::str::FromStr;

use super::tokenizer::{split_unescaped, split_unescaped_trimmed};
use crate::domain::{BetSide, PriceLevel, RunnerPrices, SelectionId};
use crate::error::DecodeError;

const SEGMENT_DELIMITER: char = ':';
const LADDER_DELIMITER: char = '|';
const FIELD_DELIMITER: char = '~';

/// Number of fields in a runner's detail section.
pub const RUNNER_DETAIL_FIELDS: usize = 10;

/// Number of fields in one price ladder entry.
pub const PRICE_LEVEL_FIELDS: usize = 4;

/// Decode a compressed market prices payload into per-runner records.
///
/// Runners come back in the order they appear in the payload.
///
/// # Errors
///
/// Fails if a runner's detail section does not have exactly ten fields or a
/// field holds a value that does not parse.
pub fn decode_market_prices(compressed: &str) -> Result<Vec<RunnerPrices>, DecodeError> {
    split_unescaped(compressed, SEGMENT_DELIMITER)
        .into_iter()
        .enumerate()
        .skip(1)
        .filter(|(_, segment)| !segment.is_empty())
        .map(|(index, segment)| decode_runner(index, segment))
        .collect()
}

fn decode_runner(index: usize, segment: &str) -> Result<RunnerPrices, DecodeError> {
    let parts = split_unescaped_trimmed(segment, LADDER_DELIMITER);
    let details = split_unescaped(parts.first().copied().unwrap_or_default(), FIELD_DELIMITER);
    if details.len() != RUNNER_DETAIL_FIELDS {
        return Err(DecodeError::FieldCount {
            segment: index,
            expected: RUNNER_DETAIL_FIELDS,
            found: details.len(),
        });
    }

    let best_to_back = match parts.get(1) {
        Some(ladder) => decode_ladder(ladder)?,
        None => Vec::new(),
    };
    let best_to_lay = match parts.get(2) {
        Some(ladder) => decode_ladder(ladder)?,
        None => Vec::new(),
    };

    Ok(RunnerPrices {
        selection_id: SelectionId::new(parse("selection id", details[0])?),
        sort_order: parse("sort order", details[1])?,
        total_amount_matched: parse("total amount matched", details[2])?,
        last_price_matched: parse_optional("last price matched", details[3])?.unwrap_or(0.0),
        handicap: parse_optional("handicap", details[4])?,
        reduction_factor: parse("reduction factor", details[5])?,
        vacant: vacant_flag(details[5], details[6]),
        far_starting_price: parse_optional("far starting price", details[7])?,
        near_starting_price: parse_optional("near starting price", details[8])?,
        actual_starting_price: parse_optional("actual starting price", details[9])?,
        best_to_back,
        best_to_lay,
    })
}

/// Decode one ladder. Anything other than whole four-field groups yields an
/// empty ladder rather than an error.
fn decode_ladder(input: &str) -> Result<Vec<PriceLevel>, DecodeError> {
    let fields = split_unescaped_trimmed(input, FIELD_DELIMITER);
    if fields.is_empty() || fields.len() % PRICE_LEVEL_FIELDS != 0 {
        return Ok(Vec::new());
    }

    fields
        .chunks_exact(PRICE_LEVEL_FIELDS)
        .map(|level| -> Result<PriceLevel, DecodeError> {
            Ok(PriceLevel {
                price: parse("price", level[0])?,
                amount_available: parse("amount available", level[1])?,
                side: level[2].parse::<BetSide>()?,
                depth: parse("depth", level[3])?,
            })
        })
        .collect()
}

/// The vacant flag is absent when the reduction factor field is empty, and
/// otherwise read from the vacant field. The emptiness check is on the
/// reduction factor field, not the vacant field.
fn vacant_flag(reduction_factor: &str, vacant: &str) -> Option<bool> {
    if reduction_factor.is_empty() {
        None
    } else {
        Some(vacant.eq_ignore_ascii_case("true"))
    }
}

fn parse<T: FromStr>(field: &'static str, value: &str) -> Result<T, DecodeError> {
    value.parse().map_err(|_| DecodeError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_optional<T: FromStr>(field: &'static str, value: &str) -> Result<Option<T>, DecodeError> {
    if value.is_empty() {
        Ok(None)
    } else {
        parse(field, value).map(Some)
    }
}
