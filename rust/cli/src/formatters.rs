//! Card, hand and report formatters for terminal display.
//!
//! Suits print as Unicode symbols where the terminal supports them and fall
//! back to the `h d c s` letters otherwise.
//!
//! ## Example
//!
//! ```rust
//! use holecard_engine::cards::{Card, Rank, Suit};
//! use holecard_cli::formatters::{format_card, format_board};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//!
//! let board = vec![ace_spades];
//! assert!(format_board(&board).starts_with("[A"));
//! ```

use holecard_engine::cards::{Card, Suit};
use holecard_engine::hole::HoleInfo;
use holecard_engine::rules::ActionSpace;
use holecard_sim::runner::{Comparison, EvReport};
use holecard_sim::ruin::RuinReport;

/// Windows consoles other than Windows Terminal and VS Code get ASCII suits.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.symbol().to_string()
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.symbol(), format_suit(&card.suit))
}

/// Cards in bracket notation, `[]` when empty.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// What the player knows about the dealer, in words.
pub fn format_hole(hole: &HoleInfo) -> String {
    match hole {
        HoleInfo::Unknown => "nothing".to_string(),
        HoleInfo::ExactCard(card) => format!("first card {}", format_card(card)),
        HoleInfo::ExactRank(rank) => format!("first card rank {}", rank.symbol()),
        HoleInfo::RankRange(ranks) => format!("first card in {}", ranks),
        HoleInfo::FullHand(cards) => format!("whole hand {}", format_board(cards)),
    }
}

/// Legal actions as the prompt lists them, e.g. `check / bet 4x`.
pub fn format_choices(legal: &ActionSpace) -> String {
    legal
        .actions()
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(" / ")
}

fn signed(x: f64) -> String {
    format!("{:+.4}", x)
}

/// Human-readable EV report.
pub fn format_report(report: &EvReport) -> String {
    let mut lines = vec![
        format!(
            "{} {} (hole info: {}) seed={}",
            report.game, report.strategy, report.hole_info, report.seed
        ),
        format!("Trials: {}/{}", report.completed, report.requested),
        format!(
            "EV per ante: {}  std err: {:.4}  95% CI: [{}, {}]",
            signed(report.mean),
            report.std_err,
            signed(report.ci95.0),
            signed(report.ci95.1)
        ),
        format!(
            "Std dev: {:.4}  variance: {:.4}",
            report.std_dev, report.variance
        ),
    ];
    if let (Some(min), Some(max)) = (report.min, report.max) {
        lines.push(format!("Range: {} .. {}", signed(min), signed(max)));
    }
    if let Some(team) = report.team_mean {
        lines.push(format!("Team EV per hand: {}", signed(team)));
    }
    let total = report.tally.total().max(1) as f64;
    let actions: Vec<String> = report
        .tally
        .actions
        .iter()
        .map(|(a, n)| format!("{} {:.1}%", a, 100.0 * *n as f64 / total))
        .collect();
    lines.push(format!("Actions: {}", actions.join(", ")));
    let streets: Vec<String> = report
        .tally
        .streets
        .iter()
        .map(|(s, n)| format!("{} {:.1}%", s, 100.0 * *n as f64 / total))
        .collect();
    lines.push(format!("Committed on: {}", streets.join(", ")));
    lines.push(format!("Elapsed: {} ms", report.elapsed_ms));
    lines.join("\n")
}

pub fn format_comparison(cmp: &Comparison) -> String {
    format!(
        "Baseline:   {} {} ± {:.4}\nChallenger: {} {} ± {:.4}\nGain per ante: {} ± {:.4} over {} paired hands",
        cmp.baseline.strategy,
        signed(cmp.baseline.mean),
        cmp.baseline.std_err,
        cmp.challenger.strategy,
        signed(cmp.challenger.mean),
        cmp.challenger.std_err,
        signed(cmp.gain),
        cmp.gain_std_err,
        cmp.challenger.completed
    )
}

pub fn format_ruin(report: &RuinReport) -> String {
    format!(
        "Bankroll: {} antes{} over {} runs (seed={})\nRisk of ruin: {:.2}%\nDoubled: {}  ruined: {}  unfinished: {}\nMean hands per run: {:.1}",
        report.bankroll,
        if report.team { " (team)" } else { "" },
        report.runs,
        report.seed,
        100.0 * report.risk,
        report.doubled,
        report.ruined,
        report.unfinished,
        report.mean_hands
    )
}
