//! # Play Command
//!
//! Practice hole-carding at a simulated table. Each hand shows the player's
//! cards and what the dealer exposed, then asks for an action on every
//! street. The coach strategy plays the same cards alongside, so the summary
//! reports how much the player's deviations cost.
//!
//! Input `hint` shows the coach's action; `q`, `quit` or EOF ends the session.

use std::io::{BufRead, Write};

use holecard_sim::practice::{PracticeHand, PracticeSummary, Settlement};
use holecard_strategy::{create_strategy, RangePolicy, StrategyKind};

use crate::cli::TableArgs;
use crate::commands::{default_challenger, load_config, table_spec};
use crate::error::CliError;
use crate::formatters::{format_board, format_choices, format_hole};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_practice_action};

/// Handle the play command: interactive practice over `stdin`.
///
/// # Errors
///
/// `CliError::InvalidInput` when `hands` is zero, configuration errors for
/// an impossible table, and I/O errors.
pub fn handle_play_command(
    table: TableArgs,
    hands: Option<u32>,
    coach: Option<StrategyKind>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let hands = hands.unwrap_or(1);
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = load_config(err)?;
    let game = table.game.unwrap_or(cfg.game);
    let kind = coach.unwrap_or_else(|| default_challenger(game));
    let spec = table_spec(&table, game, kind, err)?;
    let coach = create_strategy(spec.rules(), kind, RangePolicy::default())?;
    let seed = table.seed.or(cfg.seed).unwrap_or_else(rand::random);

    writeln!(
        out,
        "play: game={} coach={} hands={} seed={}",
        game,
        coach.name(),
        hands,
        seed
    )?;

    let mut summary = PracticeSummary::default();
    'hands: for i in 0..hands {
        let mut hand = PracticeHand::deal(&spec, seed.wrapping_add(u64::from(i)))?;
        let deal = hand.cards().clone();
        writeln!(out, "Hand {}", i + 1)?;
        writeln!(out, "Your cards: {}", format_board(&deal.hand))?;
        for (p, cards) in deal.partners.iter().enumerate() {
            writeln!(out, "Partner {}: {}", p + 1, format_board(cards))?;
        }
        writeln!(out, "Dealer shows: {}", format_hole(&deal.hole))?;
        if let Some(card) = deal.peek {
            writeln!(out, "Flashed flop card: {}", format_board(&[card]))?;
        }

        let mut mistakes = 0u64;
        let settlement = loop {
            let Some(point) = hand.next_decision_point() else {
                return Err(CliError::Engine("hand ended without settling".into()));
            };
            if !point.observation.board.is_empty() {
                writeln!(
                    out,
                    "{}: {}",
                    point.street(),
                    format_board(&point.observation.board)
                )?;
            }
            let advice = hand.recommended(coach.as_ref())?;
            write!(out, "Action ({} / hint / q): ", format_choices(&point.legal))?;
            out.flush()?;

            let Some(input) = read_stdin_line(stdin) else {
                break 'hands;
            };
            let action = match parse_practice_action(&input, &point.legal) {
                ParseResult::Action(action) => action,
                ParseResult::Hint => {
                    if let Some(a) = advice {
                        writeln!(out, "Coach: {}", a)?;
                    }
                    continue;
                }
                ParseResult::Quit => break 'hands,
                ParseResult::Invalid(msg) => {
                    ui::write_error(err, &msg)?;
                    continue;
                }
            };
            if let Some(a) = advice
                && a != action
            {
                mistakes += 1;
                writeln!(out, "Coach would {} here.", a)?;
            }
            let (next, done) = hand.apply_action(action)?;
            if let Some(s) = done {
                break s;
            }
            hand = next;
        };

        let computer = PracticeHand::from_deal(&spec, deal).autoplay(coach.as_ref())?;
        write_settlement(out, &settlement, &computer)?;
        summary.record(&settlement, &computer, mistakes);
    }

    write_summary(out, &summary)?;
    Ok(())
}

fn write_settlement(
    out: &mut dyn Write,
    player: &Settlement,
    computer: &Settlement,
) -> Result<(), CliError> {
    if !player.board.is_empty() {
        writeln!(out, "Board: {}", format_board(&player.board))?;
    }
    writeln!(
        out,
        "Dealer: {} {}{}",
        format_board(&player.dealer),
        player.dealer_category,
        if player.dealer_qualified {
            ""
        } else {
            " (does not qualify)"
        }
    )?;
    writeln!(
        out,
        "You {} on the {}: {:+.2} ({})",
        player.action, player.street, player.net, player.player_category
    )?;
    writeln!(
        out,
        "Coach {} on the {}: {:+.2}",
        computer.action, computer.street, computer.net
    )?;
    Ok(())
}

fn write_summary(out: &mut dyn Write, summary: &PracticeSummary) -> Result<(), CliError> {
    if summary.hands == 0 {
        writeln!(out, "No hands completed.")?;
        return Ok(());
    }
    let total = |s: &holecard_sim::stats::RunningStats| s.mean() * s.count() as f64;
    writeln!(
        out,
        "Session: {} hands, {} decisions differed from the coach",
        summary.hands, summary.mistakes
    )?;
    writeln!(
        out,
        "You: {:+.2} antes  coach: {:+.2} antes  cost of deviations: {:+.2}",
        total(&summary.player),
        total(&summary.strategy),
        summary.cost_of_mistakes()
    )?;
    Ok(())
}
