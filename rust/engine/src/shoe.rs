use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card, CardMask};
use crate::errors::StateError;

/// Working set of undealt cards for one trial.
///
/// A shoe is the 52-card deck minus a fixed set of excluded cards. Draws are
/// uniform without replacement and come from the shoe's own ChaCha20 stream,
/// so two shoes built from the same seed and exclusions deal identically.
///
/// ```rust
/// use holecard_engine::shoe::Shoe;
///
/// let mut a = Shoe::seeded(7, &[]).unwrap();
/// let mut b = Shoe::seeded(7, &[]).unwrap();
/// assert_eq!(a.draw_random(5).unwrap(), b.draw_random(5).unwrap());
/// assert_eq!(a.remaining(), 47);
/// ```
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    excluded: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Shoe {
    /// Builds the deck minus `excluded`, drawing from `rng`.
    ///
    /// # Errors
    ///
    /// * [`StateError::TooManyExcluded`] when more than 52 cards are excluded
    /// * [`StateError::DuplicateCard`] when a card is excluded twice
    pub fn new(excluded: &[Card], rng: ChaCha20Rng) -> Result<Self, StateError> {
        if excluded.len() > 52 {
            return Err(StateError::TooManyExcluded(excluded.len()));
        }
        let mut mask = CardMask::new();
        for &c in excluded {
            if !mask.insert(c) {
                return Err(StateError::DuplicateCard(c));
            }
        }
        let cards = full_deck()
            .into_iter()
            .filter(|c| !mask.contains(*c))
            .collect();
        Ok(Self {
            cards,
            excluded: excluded.to_vec(),
            rng,
        })
    }

    pub fn seeded(seed: u64, excluded: &[Card]) -> Result<Self, StateError> {
        Self::new(excluded, ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn excluded(&self) -> &[Card] {
        &self.excluded
    }

    /// Takes a specific card out of the draw pool, keeping the order of the rest.
    pub fn remove(&mut self, card: Card) -> Result<(), StateError> {
        match self.cards.iter().position(|&c| c == card) {
            Some(i) => {
                self.cards.remove(i);
                Ok(())
            }
            None => Err(StateError::CardNotInShoe(card)),
        }
    }

    /// Removes and returns `n` uniformly random cards.
    pub fn draw_random(&mut self, n: usize) -> Result<Vec<Card>, StateError> {
        if n > self.cards.len() {
            return Err(StateError::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            let i = self.rng.random_range(0..self.cards.len());
            out.push(self.cards.swap_remove(i));
        }
        Ok(out)
    }

    /// Like [`draw_random`](Self::draw_random) but never returns a card in `excluding`.
    /// The skipped cards stay in the shoe.
    ///
    /// Draws keep the order of the remaining cards, so two shoes whose pools
    /// differ only in cards that are skipped here deal the same cards.
    pub fn draw_random_excluding(
        &mut self,
        n: usize,
        excluding: &[Card],
    ) -> Result<Vec<Card>, StateError> {
        let skip = CardMask::from_cards(excluding);
        let available = self.cards.iter().filter(|c| !skip.contains(**c)).count();
        if n > available {
            return Err(StateError::InsufficientCards {
                requested: n,
                remaining: available,
            });
        }
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            let candidates: Vec<usize> = (0..self.cards.len())
                .filter(|&i| !skip.contains(self.cards[i]))
                .collect();
            let pick = candidates[self.rng.random_range(0..candidates.len())];
            out.push(self.cards.remove(pick));
        }
        Ok(out)
    }

    /// Restores the construction-time card set. The RNG stream continues.
    pub fn reset(&mut self) {
        let mask = CardMask::from_cards(&self.excluded);
        self.cards = full_deck()
            .into_iter()
            .filter(|c| !mask.contains(*c))
            .collect();
    }
}
