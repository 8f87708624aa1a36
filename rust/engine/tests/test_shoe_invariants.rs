use std::collections::HashSet;

use holecard_engine::cards::{full_deck, parse_cards, Card};
use holecard_engine::errors::StateError;
use holecard_engine::shoe::Shoe;

#[test]
fn remaining_tracks_exclusions_and_draws() {
    let excluded = parse_cards("As Kd 7c").unwrap();
    for n in [0usize, 1, 5, 20, 49] {
        let mut shoe = Shoe::seeded(n as u64, &excluded).unwrap();
        let drawn = shoe.draw_random(n).unwrap();
        assert_eq!(drawn.len(), n);
        assert_eq!(shoe.remaining(), 52 - excluded.len() - n);
    }
}

#[test]
fn no_card_is_drawn_twice_in_a_trial() {
    let mut shoe = Shoe::seeded(2024, &[]).unwrap();
    let mut seen = HashSet::new();
    while !shoe.is_empty() {
        for c in shoe.draw_random(3.min(shoe.remaining())).unwrap() {
            assert!(seen.insert(c), "card {} drawn twice", c);
        }
    }
    assert_eq!(seen.len(), 52);
}

#[test]
fn excluded_cards_are_never_drawn() {
    let excluded = parse_cards("2c 2d 2h 2s").unwrap();
    let mut shoe = Shoe::seeded(5, &excluded).unwrap();
    let drawn = shoe.draw_random(48).unwrap();
    assert!(drawn.iter().all(|c| !excluded.contains(c)));
}

#[test]
fn duplicate_exclusion_is_rejected() {
    let excluded = parse_cards("As Kd As").unwrap();
    let err = Shoe::seeded(1, &excluded).unwrap_err();
    assert_eq!(err, StateError::DuplicateCard("As".parse().unwrap()));
}

#[test]
fn more_than_a_deck_of_exclusions_is_rejected() {
    let mut excluded = full_deck();
    excluded.push(excluded[0]);
    assert_eq!(
        Shoe::seeded(1, &excluded).unwrap_err(),
        StateError::TooManyExcluded(53)
    );
}

#[test]
fn overdraw_fails_without_mutating() {
    let excluded: Vec<Card> = full_deck().into_iter().take(50).collect();
    let mut shoe = Shoe::seeded(3, &excluded).unwrap();
    let err = shoe.draw_random(3).unwrap_err();
    assert_eq!(
        err,
        StateError::InsufficientCards {
            requested: 3,
            remaining: 2
        }
    );
    assert_eq!(shoe.remaining(), 2);
}

#[test]
fn remove_takes_a_specific_card_once() {
    let mut shoe = Shoe::seeded(8, &[]).unwrap();
    let ace: Card = "Ah".parse().unwrap();
    shoe.remove(ace).unwrap();
    assert!(!shoe.contains(ace));
    assert_eq!(shoe.remove(ace), Err(StateError::CardNotInShoe(ace)));
    assert_eq!(shoe.remaining(), 51);
}

#[test]
fn reset_restores_construction_set() {
    let excluded = parse_cards("Qs Qh").unwrap();
    let mut shoe = Shoe::seeded(11, &excluded).unwrap();
    shoe.draw_random(30).unwrap();
    shoe.reset();
    assert_eq!(shoe.remaining(), 50);
    assert!(excluded.iter().all(|c| !shoe.contains(*c)));
}

#[test]
fn same_seed_same_draws() {
    let mut a = Shoe::seeded(12345, &[]).unwrap();
    let mut b = Shoe::seeded(12345, &[]).unwrap();
    let mut c = Shoe::seeded(12346, &[]).unwrap();
    let da = a.draw_random(10).unwrap();
    assert_eq!(da, b.draw_random(10).unwrap());
    assert_ne!(da, c.draw_random(10).unwrap());
}
