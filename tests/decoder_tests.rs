//! Compressed market price decoding against realistic payloads.

use paddock::adapter::outbound::betfair::codec::{decode_market_prices, removed_runner_names};
use paddock::domain::{BetSide, SelectionId};
use paddock::error::DecodeError;
use paddock::testkit::fixture::{COMPRESSED_MARKET_DATA, FIRST_SELECTION_ID};

#[test]
fn fixture_decodes_thirteen_runners() {
    let runners = decode_market_prices(COMPRESSED_MARKET_DATA).unwrap();
    assert_eq!(runners.len(), 13);

    let first = &runners[0];
    assert_eq!(first.selection_id, SelectionId::new(FIRST_SELECTION_ID));
    assert_eq!(first.best_to_back[0].amount_available, 54.64);
    assert_eq!(first.best_to_lay[1].price, 1.82);
}

#[test]
fn runners_keep_payload_order() {
    let runners = decode_market_prices(COMPRESSED_MARKET_DATA).unwrap();
    let sort_orders: Vec<i32> = runners.iter().map(|runner| runner.sort_order).collect();
    assert_eq!(sort_orders, (0..13).collect::<Vec<_>>());
    assert_eq!(runners[1].selection_id, SelectionId::new(3_594_826));
    assert_eq!(runners[12].selection_id, SelectionId::new(3_102_765));
}

#[test]
fn ladders_are_best_price_first_with_depth() {
    let runners = decode_market_prices(COMPRESSED_MARKET_DATA).unwrap();
    let first = &runners[0];

    let back: Vec<(f64, u32)> = first.best_to_back.iter().map(|l| (l.price, l.depth)).collect();
    assert_eq!(back, vec![(1.79, 1), (1.78, 2), (1.77, 3)]);
    assert!(first.best_to_back.iter().all(|l| l.side == BetSide::Lay));

    let lay: Vec<f64> = first.best_to_lay.iter().map(|l| l.price).collect();
    assert_eq!(lay, vec![1.8, 1.82, 1.84]);
    assert!(first.best_to_lay.iter().all(|l| l.side == BetSide::Back));
}

#[test]
fn optional_fields_decode_to_absent_values() {
    let runners = decode_market_prices(COMPRESSED_MARKET_DATA).unwrap();

    let with_starting_prices = &runners[3];
    assert_eq!(with_starting_prices.far_starting_price, Some(8.5));
    assert_eq!(with_starting_prices.near_starting_price, Some(9.1));
    assert_eq!(with_starting_prices.actual_starting_price, None);

    let unmatched = &runners[11];
    assert_eq!(unmatched.last_price_matched, 0.0);
    assert_eq!(unmatched.handicap, None);
    assert_eq!(unmatched.vacant, Some(true));
    assert!(unmatched.best_to_back.is_empty());
    assert!(unmatched.best_to_lay.is_empty());
}

#[test]
fn runner_count_matches_non_empty_segments() {
    let runner = "7~0~1.0~2.0~~0.0~false~~~|2.0~1.0~L~1~";
    for (payload, expected) in [
        ("meta".to_string(), 0),
        (format!("meta:{runner}"), 1),
        (format!("meta:{runner}:{runner}"), 2),
        (format!("meta::{runner}::{runner}:"), 2),
        (format!(r"me\:ta:{runner}"), 1),
    ] {
        let runners = decode_market_prices(&payload).unwrap();
        assert_eq!(runners.len(), expected, "{payload}");
    }
}

#[test]
fn ladder_entries_are_whole_groups_of_four_or_nothing() {
    let details = "7~0~1.0~2.0~~0.0~false~~~";
    let level = "2.0~1.5~L~1";
    for groups in 1..=4 {
        let ladder = vec![level; groups].join("~");
        let runners = decode_market_prices(&format!("m:{details}|{ladder}")).unwrap();
        assert_eq!(runners[0].best_to_back.len(), groups);
    }
    for partial in ["2.0", "2.0~1.5", "2.0~1.5~L", "2.0~1.5~L~1~3.0"] {
        let runners = decode_market_prices(&format!("m:{details}|{partial}")).unwrap();
        assert!(runners[0].best_to_back.is_empty(), "{partial}");
    }
}

#[test]
fn short_detail_section_fails_the_whole_payload() {
    let payload = format!("{COMPRESSED_MARKET_DATA}:99~1~2.0");
    let err = decode_market_prices(&payload).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::FieldCount {
            segment: 14,
            expected: 10,
            found: 3
        }
    ));
}

#[test]
fn removed_runners_yield_names_only() {
    assert_eq!(removed_runner_names("A,10,2;B,9,6"), vec!["A", "B"]);
    assert_eq!(
        removed_runner_names("Half Term (res),5.2,0.0;"),
        vec!["Half Term (res)"]
    );
}
