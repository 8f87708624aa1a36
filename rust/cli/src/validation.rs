//! Parsing of practice-mode input.
//!
//! Players type what they would say at the table; the words are mapped onto
//! the legal actions of the current street so `call` on the hold'em river
//! means the 1x play bet and a bare `bet` is the only bet on offer.

use holecard_engine::rules::{Action, ActionSpace};

/// What one line of practice input asks for.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Legal action for the current street
    Action(Action),
    /// Show the coach's recommendation
    Hint,
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parses `input` against the actions legal right now.
///
/// # Example
///
/// ```rust
/// use holecard_engine::game::Variant;
/// use holecard_engine::rules::{Action, ActionSpace, Street};
/// # use holecard_cli::validation::{parse_practice_action, ParseResult};
///
/// let river = ActionSpace::for_street(Variant::UltimateHoldem, Street::River).unwrap();
/// assert_eq!(parse_practice_action("call", &river), ParseResult::Action(Action::Bet1x));
/// assert_eq!(parse_practice_action("q", &river), ParseResult::Quit);
/// assert!(matches!(parse_practice_action("check", &river), ParseResult::Invalid(_)));
/// ```
pub fn parse_practice_action(input: &str, legal: &ActionSpace) -> ParseResult {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }
    match input.as_str() {
        "q" | "quit" | "exit" => return ParseResult::Quit,
        "?" | "h" | "hint" => return ParseResult::Hint,
        _ => {}
    }

    let bets: Vec<Action> = legal
        .actions()
        .iter()
        .copied()
        .filter(|a| a.stake() > 0)
        .collect();
    let parsed = match input.as_str() {
        "bet" | "b" | "play" if bets.len() == 1 => Ok(bets[0]),
        other => other.parse::<Action>(),
    };
    let action = match parsed {
        Ok(a) => a,
        Err(e) => return ParseResult::Invalid(format!("{}. Valid actions: {}", e, choices(legal))),
    };

    let action = match action {
        Action::Call if !legal.contains(Action::Call) && legal.contains(Action::Bet1x) => {
            Action::Bet1x
        }
        Action::Bet1x if !legal.contains(Action::Bet1x) && legal.contains(Action::Call) => {
            Action::Call
        }
        other => other,
    };
    if legal.contains(action) {
        ParseResult::Action(action)
    } else {
        ParseResult::Invalid(format!(
            "{} is not allowed on the {}. Valid actions: {}",
            action,
            legal.street(),
            choices(legal)
        ))
    }
}

fn choices(legal: &ActionSpace) -> String {
    let mut names: Vec<String> = legal.actions().iter().map(|a| a.to_string()).collect();
    names.push("hint".to_string());
    names.push("q".to_string());
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use holecard_engine::game::Variant;
    use holecard_engine::rules::Street;

    fn space(variant: Variant, street: Street) -> ActionSpace {
        ActionSpace::for_street(variant, street).unwrap()
    }

    #[test]
    fn three_card_accepts_call_and_fold() {
        let legal = space(Variant::ThreeCardPoker, Street::Decision);
        assert_eq!(parse_practice_action("Call", &legal), ParseResult::Action(Action::Call));
        assert_eq!(parse_practice_action(" f ", &legal), ParseResult::Action(Action::Fold));
        assert_eq!(parse_practice_action("bet", &legal), ParseResult::Action(Action::Call));
        assert_eq!(parse_practice_action("1x", &legal), ParseResult::Action(Action::Call));
    }

    #[test]
    fn bare_bet_is_the_street_bet() {
        let preflop = space(Variant::UltimateHoldem, Street::Preflop);
        assert_eq!(parse_practice_action("bet", &preflop), ParseResult::Action(Action::Bet4x));
        let flop = space(Variant::UltimateHoldem, Street::Flop);
        assert_eq!(parse_practice_action("b", &flop), ParseResult::Action(Action::Bet2x));
        assert_eq!(parse_practice_action("x", &flop), ParseResult::Action(Action::Check));
    }

    #[test]
    fn wrong_size_is_rejected_with_choices() {
        let flop = space(Variant::UltimateHoldem, Street::Flop);
        match parse_practice_action("4x", &flop) {
            ParseResult::Invalid(msg) => {
                assert!(msg.contains("not allowed on the flop"), "{}", msg);
                assert!(msg.contains("check, bet 2x"), "{}", msg);
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn specials_and_garbage() {
        let legal = space(Variant::ThreeCardPoker, Street::Decision);
        assert_eq!(parse_practice_action("?", &legal), ParseResult::Hint);
        assert_eq!(parse_practice_action("QUIT", &legal), ParseResult::Quit);
        assert_eq!(
            parse_practice_action("", &legal),
            ParseResult::Invalid("Empty input".to_string())
        );
        assert!(matches!(parse_practice_action("allin", &legal), ParseResult::Invalid(_)));
    }
}
