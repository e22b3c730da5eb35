//! # craft_core
//!
//! Deterministic game logic for the finger-steered dodge game.
//!
//! A player craft is steered horizontally by the tip of the user's index
//! finger while obstacles fall from the top of the screen.  This crate owns
//! everything that must be exact and testable:
//!
//! * the mapping from raw hand-landmark samples to a steering target
//!   ([`adapter`]),
//! * the obstacle lifecycle — interval spawning, fixed-step fall, culling
//!   ([`obstacle`]),
//! * strict AABB collision ([`geometry`]),
//! * the clock-driven score ([`score`]),
//! * and the `Idle → Playing → GameOver → Playing…` state machine that gates
//!   all of them ([`game`]).
//!
//! Nothing here touches a window, a camera, or the wall clock: time enters as
//! millisecond timestamps, randomness as `&mut impl rand::Rng`, and perception
//! as already-captured [`adapter::HandSample`] values.  The interactive
//! `hand_craft` crate supplies all three at ~60 Hz.

pub mod adapter;
pub mod craft;
pub mod game;
pub mod geometry;
pub mod obstacle;
pub mod score;

/// Monotonic timestamps and intervals, in milliseconds.
pub type Millis = u64;

pub use adapter::{HandSample, Landmark, PlayerTarget, PoseSampleAdapter};
pub use craft::PlayerCraft;
pub use game::{Game, GameConfig, GameEvent, GamePhase};
pub use geometry::{Rect, Vec2};
pub use obstacle::{Obstacle, ObstacleField, ObstacleKind, Spawner};
pub use score::ScoreTracker;
