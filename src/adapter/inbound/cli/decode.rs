//! `paddock decode`

use std::io::Read;

use crate::adapter::outbound::betfair::codec::decode_market_prices;
use crate::error::Result;

use super::command::DecodeArgs;

pub fn execute(args: &DecodeArgs) -> Result<()> {
    let input = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    println!("{}", render(input.trim(), args.compact)?);
    Ok(())
}

fn render(compressed: &str, compact: bool) -> Result<String> {
    let runners = decode_market_prices(compressed)?;
    let json = if compact {
        serde_json::to_string(&runners)?
    } else {
        serde_json::to_string_pretty(&runners)?
    };
    Ok(json)
}
