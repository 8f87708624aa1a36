//! Deal command: one hand, played street by street by a strategy.
//!
//! Prints the player's cards, what the hole information reveals and the
//! action taken on every street, then the dealer's hand and the settlement.
//! The same seed always deals the same hand.

use std::io::Write;

use serde::Serialize;

use holecard_engine::rules::{Action, Street};
use holecard_sim::practice::{PracticeHand, Settlement};
use holecard_sim::trial::Deal;
use holecard_strategy::{create_strategy, RangePolicy, StrategyKind};

use crate::cli::TableArgs;
use crate::commands::{default_challenger, load_config, table_spec};
use crate::error::CliError;
use crate::formatters::{format_board, format_hole};
use crate::io_utils::write_json;

#[derive(Debug, Serialize)]
struct Decision {
    street: Street,
    action: Action,
}

#[derive(Debug, Serialize)]
struct DealRecord {
    seed: u64,
    strategy: String,
    deal: Deal,
    decisions: Vec<Decision>,
    settlement: Settlement,
}

/// Handle the deal command.
///
/// # Examples
///
/// ```ignore
/// // Internal command handler - not part of public API
/// let mut out = Vec::new();
/// handle_deal_command(table, None, false, &mut out, &mut std::io::sink()).unwrap();
/// ```
pub fn handle_deal_command(
    table: TableArgs,
    strategy: Option<StrategyKind>,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = load_config(err)?;
    let game = table.game.unwrap_or(cfg.game);
    let kind = strategy.unwrap_or_else(|| default_challenger(game));
    let spec = table_spec(&table, game, kind, err)?;
    let strategy = create_strategy(spec.rules(), kind, RangePolicy::default())?;
    let seed = table.seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut hand = PracticeHand::deal(&spec, seed)?;
    let deal = hand.cards().clone();
    let mut decisions = Vec::new();
    let settlement = loop {
        let street = match hand.next_decision_point() {
            Some(point) => point.street(),
            None => return Err(CliError::Engine("hand ended without settling".into())),
        };
        let action = match hand.recommended(strategy.as_ref())? {
            Some(a) => a,
            None => return Err(CliError::Engine("no decision to make".into())),
        };
        decisions.push(Decision { street, action });
        let (next, done) = hand.apply_action(action)?;
        if let Some(s) = done {
            break s;
        }
        hand = next;
    };

    if json {
        let record = DealRecord {
            seed,
            strategy: strategy.name().to_string(),
            deal,
            decisions,
            settlement,
        };
        write_json(out, &record)?;
        return Ok(());
    }

    writeln!(out, "Game: {} strategy={} seed={}", game, strategy.name(), seed)?;
    writeln!(out, "Player: {}", format_board(&deal.hand))?;
    for (i, cards) in deal.partners.iter().enumerate() {
        writeln!(out, "Partner {}: {}", i + 1, format_board(cards))?;
    }
    writeln!(out, "Dealer shows: {}", format_hole(&deal.hole))?;
    if let Some(card) = deal.peek {
        writeln!(out, "Flashed flop card: {}", format_board(&[card]))?;
    }
    for d in &decisions {
        let board = &deal.board[..d.street.board_len()];
        if board.is_empty() {
            writeln!(out, "{}: {}", d.street, d.action)?;
        } else {
            writeln!(out, "{} {}: {}", d.street, format_board(board), d.action)?;
        }
    }
    if !settlement.board.is_empty() {
        writeln!(out, "Board: {}", format_board(&settlement.board))?;
    }
    writeln!(
        out,
        "Dealer: {} {}{}",
        format_board(&settlement.dealer),
        settlement.dealer_category,
        if settlement.dealer_qualified {
            ""
        } else {
            " (does not qualify)"
        }
    )?;
    writeln!(
        out,
        "Result: {:+.2} ({} vs {})",
        settlement.net, settlement.player_category, settlement.dealer_category
    )?;
    Ok(())
}
