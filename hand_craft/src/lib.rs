//! # hand_craft
//!
//! Finger-steered dodge game: a craft follows the tip of your index finger
//! while asteroid debris falls from the top of the screen.  Survive as long
//! as you can — one point every two seconds.
//!
//! ## Architecture
//!
//! | Piece | Role |
//! |---|---|
//! | [`hand`] | perception sources (`Ready`/`Sample`/`Failed` over a channel) |
//! | `craft_core` | deterministic game logic — state machine, field, score |
//! | [`app`] | single scheduling authority: input → samples → tick → render |
//! | [`visualizer`] | `minifb` software renderer + keyboard/pointer input |
//! | [`cue`] | one-shot start/impact MIDI cues on their own thread |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the mouse pointer plays the finger;
//!   leaving the window simulates losing the hand.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via
//!   LeapC; the first tracked hand steers, all others are ignored.
//!
//! ## Controls
//!
//! | Input | Action |
//! |---|---|
//! | Finger / mouse x | Steer the craft (y is fixed mid-screen) |
//! | `R` | Restart after game over (no-op while playing) |
//! | `Q` | Quit |

pub mod app;
pub mod cue;
pub mod hand;
pub mod visualizer;
