//! Fixtures: compressed payloads, markets and bets.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{Bet, BetId, BetSide, EventId, MarketId, SelectionId};
use crate::port::{EventListing, EventSummary, MarketDetails, MarketSummary, Runner};

/// A thirteen-runner compressed market prices payload.
///
/// The metadata segment holds escaped colons. The first runner is 4056154
/// with 54.64 available at the best back price and 1.82 as its second lay
/// price. Runner 4701829 has no ladders at all.
pub const COMPRESSED_MARKET_DATA: &str = concat!(
    r"102873781~GBP~ACTIVE~0~1~NR\: 9.40 Half Term (res)~true~5.0~1360854000000~NR\: 9.40 Half Term (res)~Y~1",
    ":4056154~0~1843.12~1.8~~0.0~false~~~|1.79~54.64~L~1~1.78~120.5~L~2~1.77~88.0~L~3~|1.8~12.5~B~1~1.82~40.0~B~2~1.84~15.3~B~3~",
    ":3594826~1~962.4~4.5~~12.3~false~~~|4.4~31.0~L~1~4.3~18.25~L~2~4.2~60.0~L~3~|4.6~9.4~B~1~4.7~25.0~B~2~4.8~11.0~B~3~",
    ":2784523~2~410.0~7.2~~8.1~false~~~|7.0~14.0~L~1~6.8~22.0~L~2~6.6~5.5~L~3~|7.4~6.0~B~1~7.6~13.2~B~2~",
    ":4422815~3~355.75~9.0~~6.4~false~8.5~9.1~|8.8~10.0~L~1~8.6~17.5~L~2~|9.2~4.0~B~1~9.4~8.0~B~2~9.6~30.0~B~3~",
    ":2917461~4~201.3~12.0~~4.9~false~~~|11.5~7.25~L~1~11.0~15.0~L~2~10.5~20.0~L~3~|12.5~3.0~B~1~13.0~9.5~B~2~",
    ":3810274~5~150.0~15.5~~3.8~false~~~|15.0~5.0~L~1~14.5~12.0~L~2~|16.0~2.5~B~1~17.0~6.0~B~2~18.0~4.0~B~3~",
    ":4190356~6~98.6~19.0~~3.1~false~~~|18.5~4.2~L~1~18.0~9.0~L~2~17.5~3.3~L~3~|20.0~2.0~B~1~21.0~7.0~B~2~",
    ":3377082~7~75.0~23.0~~2.6~false~~~|22.0~3.0~L~1~21.0~6.5~L~2~|24.0~1.5~B~1~26.0~4.0~B~2~",
    ":4560911~8~40.2~29.0~~2.0~false~~~|28.0~2.2~L~1~27.0~5.0~L~2~26.0~8.0~L~3~|30.0~1.0~B~1~32.0~3.5~B~2~",
    ":2650037~9~22.0~36.0~~1.6~false~~~|34.0~2.0~L~1~32.0~4.0~L~2~|38.0~1.2~B~1~40.0~2.0~B~2~",
    ":3938146~10~12.5~50.0~~1.2~false~~~|48.0~1.5~L~1~46.0~3.0~L~2~|55.0~1.0~B~1~60.0~2.5~B~2~",
    ":4701829~11~0.0~~~0.0~true~~~",
    ":3102765~12~5.0~100.0~~0.6~false~~~|95.0~1.0~L~1~90.0~2.0~L~2~|110.0~0.5~B~1~",
);

/// Selection id of the first runner in [`COMPRESSED_MARKET_DATA`].
pub const FIRST_SELECTION_ID: u32 = 4_056_154;

/// Static market data listing `runners` as `(selection id, name)`.
pub fn market(name: &str, runners: &[(u32, &str)]) -> MarketDetails {
    MarketDetails {
        name: name.to_string(),
        start_time: Some(race_time(14, 5)),
        runners: runners
            .iter()
            .map(|&(selection_id, name)| Runner {
                selection_id: SelectionId::new(selection_id),
                name: name.to_string(),
            })
            .collect(),
    }
}

/// A back bet of 2.0 at `price`, not yet placed.
pub fn bet(market_id: u32, selection_id: u32, price: f64) -> Bet {
    Bet::new(
        MarketId::new(market_id),
        SelectionId::new(selection_id),
        BetSide::Back,
        price,
        50.0,
    )
    .with_size(2.0)
}

/// A placed bet with id `bet_id`.
pub fn placed_bet(bet_id: u64, market_id: u32, selection_id: u32, price: f64) -> Bet {
    bet(market_id, selection_id, price).with_bet_id(BetId::new(bet_id))
}

/// 19 October 2026 at `hour:minute` UTC.
pub fn race_time(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

pub fn event(event_id: u32, name: &str) -> EventSummary {
    EventSummary {
        event_id: EventId::new(event_id),
        name: name.to_string(),
    }
}

pub fn market_summary(market_id: u32, name: &str, start_time: DateTime<Utc>) -> MarketSummary {
    MarketSummary {
        market_id: MarketId::new(market_id),
        name: name.to_string(),
        start_time,
    }
}

/// A listing of child events only.
pub fn event_listing(events: Vec<EventSummary>) -> EventListing {
    EventListing {
        events,
        markets: Vec::new(),
    }
}

/// A listing of markets only.
pub fn market_listing(markets: Vec<MarketSummary>) -> EventListing {
    EventListing {
        events: Vec::new(),
        markets,
    }
}
