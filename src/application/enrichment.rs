//! Bet enrichment.
//!
//! Bets come back from the exchange without most of the facts needed to
//! settle them. Each pass here fills in one group of fields in place and
//! reports, per bet, whether it was enriched, skipped after a failure, or
//! left untouched because there was nothing to do.
//!
//! The passes are independent, but runner names should be resolved first:
//! non-runner and outcome lookups are keyed by name. [`BetEnrichment::run_all`]
//! runs them in that order.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use super::racing::HorseRacing;
use crate::adapter::outbound::betfair::ExchangeGateway;
use crate::domain::{profit_or_loss, Bet, BetStatus, MarketId, SelectionId};
use crate::error::Result;

/// What a pass did to one bet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Enriched,
    /// A lookup failed; the bet can be enriched again later.
    Skipped { reason: String },
    /// Nothing to do for this bet.
    Untouched,
}

/// Per-bet outcomes of one pass, indexed like the input batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    outcomes: Vec<ItemOutcome>,
}

impl EnrichmentReport {
    fn new(len: usize) -> Self {
        Self {
            outcomes: vec![ItemOutcome::Untouched; len],
        }
    }

    fn set(&mut self, index: usize, outcome: ItemOutcome) {
        self.outcomes[index] = outcome;
    }

    fn skip(&mut self, index: usize, reason: &str) {
        self.set(
            index,
            ItemOutcome::Skipped {
                reason: reason.to_string(),
            },
        );
    }

    #[must_use]
    pub fn outcome(&self, index: usize) -> Option<&ItemOutcome> {
        self.outcomes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ItemOutcome)> {
        self.outcomes.iter().enumerate()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    #[must_use]
    pub fn enriched(&self) -> usize {
        self.count(|outcome| matches!(outcome, ItemOutcome::Enriched))
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, ItemOutcome::Skipped { .. }))
    }

    #[must_use]
    pub fn untouched(&self) -> usize {
        self.count(|outcome| matches!(outcome, ItemOutcome::Untouched))
    }

    fn count(&self, pred: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|&outcome| pred(outcome)).count()
    }
}

/// Reports of every pass run by [`BetEnrichment::run_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub runner_names: EnrichmentReport,
    pub non_runners: EnrichmentReport,
    pub matched_size: EnrichmentReport,
    pub outcomes: EnrichmentReport,
    pub profit_or_loss: EnrichmentReport,
}

pub struct BetEnrichment {
    exchange: Arc<ExchangeGateway>,
    racing: Arc<HorseRacing>,
}

impl BetEnrichment {
    pub fn new(exchange: Arc<ExchangeGateway>, racing: Arc<HorseRacing>) -> Self {
        Self { exchange, racing }
    }

    /// Set runner name and runner count from each market's runner list.
    ///
    /// Each distinct market is fetched once. A market that cannot be fetched
    /// is skipped and the remaining markets are still looked up.
    pub async fn enrich_runner_names(&self, bets: &mut [Bet]) -> EnrichmentReport {
        let mut report = EnrichmentReport::new(bets.len());

        for (market_id, indices) in group_by_market(bets) {
            info!(market_id = %market_id, "Looking up runners");
            let market = match self.exchange.get_market(market_id).await {
                Ok(market) => market,
                Err(err) => {
                    warn!(market_id = %market_id, error = %err, "Skipping runner names");
                    let reason = err.to_string();
                    for &index in &indices {
                        report.skip(index, &reason);
                    }
                    continue;
                }
            };

            let names: HashMap<SelectionId, &str> = market
                .runners
                .iter()
                .map(|runner| (runner.selection_id, runner.name.as_str()))
                .collect();

            for index in indices {
                let bet = &mut bets[index];
                if let Some(name) = names.get(&bet.selection_id) {
                    bet.runner_name = Some((*name).to_string());
                    bet.number_of_runners = Some(market.runners.len());
                    report.set(index, ItemOutcome::Enriched);
                }
            }
        }
        report
    }

    /// Flag bets whose runner was withdrawn.
    ///
    /// A market whose withdrawn runners cannot be fetched is skipped. Bets
    /// without a runner name are skipped.
    pub async fn enrich_non_runners(&self, bets: &mut [Bet]) -> EnrichmentReport {
        let mut report = EnrichmentReport::new(bets.len());

        for (market_id, indices) in group_by_market(bets) {
            let non_runners = match self.racing.get_non_runners(market_id).await {
                Ok(names) => names,
                Err(err) => {
                    warn!(market_id = %market_id, error = %err, "Skipping non-runner lookup");
                    let reason = err.to_string();
                    for &index in &indices {
                        report.skip(index, &reason);
                    }
                    continue;
                }
            };

            for index in indices {
                let bet = &mut bets[index];
                let Some(name) = bet.runner_name.as_deref() else {
                    report.skip(index, "runner name unknown");
                    continue;
                };
                bet.non_runner = Some(non_runners.iter().any(|n| n == name));
                report.set(index, ItemOutcome::Enriched);
            }
        }
        report
    }

    /// Copy the matched amount of settled bets. Unplaced bets are left
    /// alone. The first failure is returned.
    pub async fn enrich_matched_size(&self, bets: &mut [Bet]) -> Result<EnrichmentReport> {
        let mut report = EnrichmentReport::new(bets.len());

        for (index, bet) in bets.iter_mut().enumerate() {
            let Some(bet_id) = bet.bet_id else {
                continue;
            };
            let details = self.exchange.get_bet(bet_id).await?;
            if details.status == BetStatus::Settled {
                bet.amount_matched = Some(details.matched_size);
                report.set(index, ItemOutcome::Enriched);
            }
        }
        Ok(report)
    }

    /// Set each bet's finishing position from the results feed.
    pub async fn enrich_outcomes(&self, bets: &mut [Bet]) -> EnrichmentReport {
        let mut report = EnrichmentReport::new(bets.len());

        for (index, bet) in bets.iter_mut().enumerate() {
            let Some(name) = bet.runner_name.as_deref() else {
                report.skip(index, "runner name unknown");
                continue;
            };
            match self.racing.get_position(bet.market_id, name).await {
                Ok(position) => {
                    bet.event_outcome = Some(position);
                    report.set(index, ItemOutcome::Enriched);
                }
                Err(err) => {
                    warn!(market_id = %bet.market_id, runner = name, error = %err, "Skipping outcome lookup");
                    report.skip(index, &err.to_string());
                }
            }
        }
        report
    }

    /// Run every pass in dependency order.
    pub async fn run_all(&self, bets: &mut [Bet]) -> Result<PipelineReport> {
        let runner_names = self.enrich_runner_names(bets).await;
        let non_runners = self.enrich_non_runners(bets).await;
        let matched_size = self.enrich_matched_size(bets).await?;
        let outcomes = self.enrich_outcomes(bets).await;
        let profit_or_loss = enrich_profit_or_loss(bets);

        Ok(PipelineReport {
            runner_names,
            non_runners,
            matched_size,
            outcomes,
            profit_or_loss,
        })
    }
}

/// Compute profit or loss for bets whose non-runner flag and outcome are
/// both known.
pub fn enrich_profit_or_loss(bets: &mut [Bet]) -> EnrichmentReport {
    let mut report = EnrichmentReport::new(bets.len());

    for (index, bet) in bets.iter_mut().enumerate() {
        let (Some(non_runner), Some(outcome)) = (bet.non_runner, bet.event_outcome) else {
            continue;
        };
        bet.profit_or_loss = Some(profit_or_loss(bet.side, non_runner, outcome, bet.price));
        info!(bet = %bet, "Enriched bet with profit or loss");
        report.set(index, ItemOutcome::Enriched);
    }
    report
}

/// Indices of bets per market, markets in first-seen order.
fn group_by_market(bets: &[Bet]) -> Vec<(MarketId, Vec<usize>)> {
    let mut groups: Vec<(MarketId, Vec<usize>)> = Vec::new();
    for (index, bet) in bets.iter().enumerate() {
        match groups.iter_mut().find(|(market_id, _)| *market_id == bet.market_id) {
            Some((_, indices)) => indices.push(index),
            None => groups.push((bet.market_id, vec![index])),
        }
    }
    groups
}
