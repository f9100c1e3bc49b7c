//! The horse racing facade over scripted exchange and global services.

mod support;

use chrono::{Duration, NaiveDate};
use paddock::application::racing::render_events_map;
use paddock::domain::{BetId, MarketId, SelectionId};
use paddock::error::{DecodeError, Error};
use paddock::port::PlaceBetResult;
use paddock::testkit::exchange::{ScriptedExchange, ScriptedGlobal};
use paddock::testkit::fixture::{
    bet, event, event_listing, market_listing, market_summary, race_time, COMPRESSED_MARKET_DATA,
    FIRST_SELECTION_ID,
};
use paddock::testkit::results::StaticResultsFeed;
use paddock::testkit::script::{failed, ok};
use support::harness::{config, harness, harness_with};

const GB: u32 = 298_251;
const IRE: u32 = 298_252;
const KEMPTON: u32 = 27_000_001;

const SMALL_MARKET: &str = "meta:4056154~0~10.0~1.8~~0.0~false~~~|1.79~54.64~L~1~|1.8~12.5~B~1~";

fn race_day() -> NaiveDate {
    race_time(0, 0).date_naive()
}

fn kempton_markets() -> ScriptedGlobal {
    ScriptedGlobal::new().with_events(
        KEMPTON,
        vec![ok(market_listing(vec![
            market_summary(501, "7f Hcap", race_time(14, 5)),
            market_summary(502, "Forecast", race_time(14, 5)),
            market_summary(503, "1m Mdn", race_time(15, 10) + Duration::days(1)),
        ]))],
    )
}

#[tokio::test]
async fn events_log_in_once_and_honour_inclusion_patterns() {
    let mut config = config();
    config.racing.event_inclusion_patterns = vec!["^Kempton".into(), "^Leopardstown".into()];
    let h = harness_with(
        config,
        ScriptedGlobal::new()
            .with_events(
                GB,
                vec![ok(event_listing(vec![
                    event(KEMPTON, "Kempton 19th Oct"),
                    event(27_000_002, "Ascot 19th Oct"),
                ]))],
            )
            .with_events(
                IRE,
                vec![ok(event_listing(vec![event(27_000_003, "Leopardstown 19th Oct")]))],
            ),
        ScriptedExchange::new(),
        StaticResultsFeed::new(),
    );
    let racing = &h.services.racing;
    assert!(!racing.is_logged_in());

    let events = racing.get_events().await.unwrap();
    let names: Vec<_> = events.iter().map(|event| event.name.as_str()).collect();
    assert_eq!(names, vec!["Kempton 19th Oct", "Leopardstown 19th Oct"]);
    assert!(racing.is_logged_in());

    racing.get_events().await.unwrap();
    assert_eq!(h.global.login_count(), 1);
    assert_eq!(h.global.call_count("getEvents"), 4);
}

#[tokio::test]
async fn every_event_is_kept_without_inclusion_patterns() {
    let h = harness(
        ScriptedGlobal::new()
            .with_events(GB, vec![ok(event_listing(vec![event(1, "Ascot 19th Oct")]))])
            .with_events(IRE, vec![ok(event_listing(vec![event(2, "Naas 19th Oct")]))]),
        ScriptedExchange::new(),
    );

    let events = h.services.racing.get_events().await.unwrap();

    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn failed_login_is_returned_and_not_remembered() {
    let h = harness(
        ScriptedGlobal::new().with_logins(vec![failed("INVALID_USERNAME_OR_PASSWORD")]),
        ScriptedExchange::new(),
    );

    assert!(h.services.racing.login().await.is_err());
    assert!(!h.services.racing.is_logged_in());
    assert!(h.services.racing.get_events().await.is_err());
}

#[tokio::test]
async fn markets_are_filtered_by_date_and_name() {
    let mut config = config();
    config.racing.market_exclusion_patterns = vec!["Forecast".into()];
    let h = harness_with(
        config,
        kempton_markets(),
        ScriptedExchange::new()
            .with_compressed(501, vec![ok(COMPRESSED_MARKET_DATA.to_string())])
            .with_compressed(503, vec![ok(SMALL_MARKET.to_string())]),
        StaticResultsFeed::new(),
    );
    let kempton = event(KEMPTON, "Kempton 19th Oct");

    let today = h
        .services
        .racing
        .get_markets_for_event(&kempton, Some(race_day()))
        .await
        .unwrap();
    assert_eq!(today.len(), 1);
    let (summary, runners) = &today[0];
    assert_eq!(summary.market_id, MarketId::new(501));
    assert_eq!(runners.len(), 13);
    assert_eq!(runners[0].selection_id, SelectionId::new(FIRST_SELECTION_ID));

    let any_day = h
        .services
        .racing
        .get_markets_for_event(&kempton, None)
        .await
        .unwrap();
    let ids: Vec<_> = any_day.iter().map(|(summary, _)| summary.market_id).collect();
    assert_eq!(ids, vec![MarketId::new(501), MarketId::new(503)]);
    assert_eq!(h.exchange.call_count("getMarketPricesCompressed"), 3);
}

#[tokio::test]
async fn inclusion_patterns_override_exclusions() {
    let mut config = config();
    config.racing.market_inclusion_patterns = vec!["Forecast".into()];
    config.racing.market_exclusion_patterns = vec!["Forecast".into()];
    let h = harness_with(
        config,
        kempton_markets(),
        ScriptedExchange::new().with_compressed(502, vec![ok(SMALL_MARKET.to_string())]),
        StaticResultsFeed::new(),
    );

    let markets = h
        .services
        .racing
        .get_markets_for_event(&event(KEMPTON, "Kempton 19th Oct"), None)
        .await
        .unwrap();

    assert_eq!(markets.len(), 1);
    assert_eq!(markets[0].0.name, "Forecast");
}

#[tokio::test]
async fn unreachable_prices_leave_the_market_out() {
    let h = harness(
        kempton_markets(),
        ScriptedExchange::new()
            .with_compressed(501, vec![failed("MARKET_CLOSED")])
            .with_compressed(502, vec![ok(SMALL_MARKET.to_string())])
            .with_compressed(503, vec![ok(SMALL_MARKET.to_string())]),
    );

    assert_eq!(
        h.services.racing.get_runners(MarketId::new(501)).await.unwrap(),
        None
    );

    let markets = h
        .services
        .racing
        .get_markets_for_event(&event(KEMPTON, "Kempton 19th Oct"), None)
        .await
        .unwrap();
    let ids: Vec<_> = markets.iter().map(|(summary, _)| summary.market_id).collect();
    assert_eq!(ids, vec![MarketId::new(502), MarketId::new(503)]);
}

#[tokio::test]
async fn undecodable_prices_are_an_error() {
    let h = harness(
        ScriptedGlobal::new(),
        ScriptedExchange::new().with_compressed(501, vec![ok("meta:4056154~0~1.0".to_string())]),
    );

    let err = h.services.racing.get_runners(MarketId::new(501)).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Decode(DecodeError::FieldCount { segment: 1, expected: 10, found: 3 })
    ));
}

#[tokio::test]
async fn events_map_renders_every_selected_market() {
    let h = harness(
        ScriptedGlobal::new()
            .with_events(GB, vec![ok(event_listing(vec![event(KEMPTON, "Kempton 19th Oct")]))])
            .with_events(IRE, vec![ok(event_listing(vec![]))])
            .with_events(
                KEMPTON,
                vec![ok(market_listing(vec![market_summary(
                    501,
                    "7f Hcap",
                    race_time(14, 5),
                )]))],
            ),
        ScriptedExchange::new().with_compressed(501, vec![ok(SMALL_MARKET.to_string())]),
    );

    let map = h.services.racing.get_events_map(Some(race_day())).await.unwrap();

    assert_eq!(map.len(), 1);
    assert_eq!(
        render_events_map(&map),
        concat!(
            "Event: Kempton 19th Oct\n",
            "  Market: 7f Hcap 14:05\n",
            "    Selection ID: 4056154\n",
            "    > Best prices to back <\n",
            "      P: 1.79; A: 54.64\n",
            "    > Best prices to lay <\n",
            "      P: 1.8; A: 12.5\n",
        )
    );
}

#[tokio::test]
async fn non_runners_are_unescaped() {
    let h = harness(
        ScriptedGlobal::new(),
        ScriptedExchange::new()
            .with_removed_runners(501, r"Rock\;n\,Roll,10.5;Shergar,3.2;"),
    );

    let names = h.services.racing.get_non_runners(MarketId::new(501)).await.unwrap();

    assert_eq!(names, vec!["Rock;n,Roll", "Shergar"]);
    assert!(h.services.racing.is_logged_in());
}

#[tokio::test]
async fn results_use_the_configured_sport() {
    let mut config = config();
    config.results.sport_id = 9;
    let h = harness_with(
        config,
        ScriptedGlobal::new(),
        ScriptedExchange::new(),
        StaticResultsFeed::new().with_line(501, "Winner(s): Shergar, Nijinsky"),
    );
    let racing = &h.services.racing;

    assert_eq!(
        racing.get_winners(MarketId::new(501)).await.unwrap(),
        vec!["Shergar", "Nijinsky"]
    );
    assert_eq!(racing.get_position(MarketId::new(501), "Nijinsky").await.unwrap(), 2);
    assert_eq!(racing.get_position(MarketId::new(501), "Frankel").await.unwrap(), 0);
    assert!(h.feed.requests().iter().all(|&(sport_id, _)| sport_id == 9));
    assert_eq!(h.global.login_count(), 0);
}

#[tokio::test]
async fn mock_bets_are_logged_not_placed() {
    let h = harness(ScriptedGlobal::new(), ScriptedExchange::new());
    assert!(h.services.racing.mock_bets());

    let results = h.services.racing.place_bets(&[bet(501, 10, 4.0)]).await.unwrap();

    assert!(results.is_empty());
    assert!(h.exchange.placed().is_empty());
    assert_eq!(h.global.login_count(), 0);
}

#[tokio::test]
async fn real_bets_are_placed_after_logging_in() {
    let mut config = config();
    config.racing.mock_bets = false;
    let result = PlaceBetResult {
        bet_id: Some(BetId::new(9001)),
        success: true,
        result_code: "OK".into(),
        size_matched: 0.0,
        average_price_matched: 0.0,
    };
    let h = harness_with(
        config,
        ScriptedGlobal::new(),
        ScriptedExchange::new().with_place_results(vec![ok(vec![result.clone()])]),
        StaticResultsFeed::new(),
    );

    let results = h.services.racing.place_bets(&[bet(501, 10, 4.0)]).await.unwrap();

    assert_eq!(results, vec![result]);
    assert_eq!(h.exchange.placed().len(), 1);
    assert_eq!(h.global.login_count(), 1);
}

#[tokio::test]
async fn logout_forgets_the_session() {
    let h = harness(ScriptedGlobal::new(), ScriptedExchange::new());
    let racing = &h.services.racing;

    racing.login().await.unwrap();
    assert!(racing.is_logged_in());
    assert!(h.services.session.is_active());

    racing.logout().await.unwrap();
    assert!(!racing.is_logged_in());
    assert!(!h.services.session.is_active());
}
