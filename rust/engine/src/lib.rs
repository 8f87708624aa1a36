//! # holecard-engine: Table Game Core
//!
//! Cards, shoes, hand ranking, payout tables and settlement for the two
//! banked poker games the simulator supports: three card poker and Ultimate
//! Texas Hold'em. Everything here is deterministic; randomness enters only
//! through a seeded [`shoe::Shoe`].
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card), rank sets and card masks
//! - [`shoe`] - Per-trial shoe with removal tracking and seeded ChaCha20 draws
//! - [`hand`] - [`hand::HandRanker`] trait with standard and three-card rankers
//! - [`payout`] - Payout tables per (category, bet type) with setup validation
//! - [`game`] - Variants, [`game::GameRules`], settlement and observations
//! - [`rules`] - Streets, actions, action spaces and action validation
//! - [`hole`] - Hole-card information and reveal granularity
//! - [`errors`] - Configuration and state error types
//!
//! ## Quick Start
//!
//! ```rust
//! use holecard_engine::cards::parse_cards;
//! use holecard_engine::hand::{Category, HandRanker, StandardRanker, ThreeCardRanker};
//!
//! let seven = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! assert_eq!(StandardRanker.rank(&seven).category, Category::RoyalFlush);
//!
//! // Three card poker ranks trips above a straight.
//! let trips = ThreeCardRanker.rank(&parse_cards("5s 5d 5c").unwrap());
//! let straight = ThreeCardRanker.rank(&parse_cards("Qs Kd Ac").unwrap());
//! assert!(trips > straight);
//! ```
//!
//! ## Deterministic Dealing
//!
//! ```rust
//! use holecard_engine::cards::parse_cards;
//! use holecard_engine::shoe::Shoe;
//!
//! let known = parse_cards("As Kd").unwrap();
//! let mut shoe = Shoe::seeded(42, &known).unwrap();
//! let drawn = shoe.draw_random(3).unwrap();
//! assert_eq!(shoe.remaining(), 52 - 2 - 3);
//! assert!(drawn.iter().all(|c| !known.contains(c)));
//! ```

pub mod cards;
pub mod errors;
pub mod game;
pub mod hand;
pub mod hole;
pub mod payout;
pub mod rules;
pub mod shoe;
