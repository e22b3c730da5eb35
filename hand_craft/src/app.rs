//! Top-level application loop.
//!
//! `AppState` owns the [`Game`], the pose adapter, and the cue player, and is
//! the single scheduling authority: every frame it polls window input, drains
//! whatever the hand-source thread produced, applies the newest steering
//! target, advances the game one tick, and forwards one-shot events to the
//! cue thread.  Perception latency therefore never stalls the tick — a slow
//! estimation just means the craft steers on older data for a frame or two.

use std::sync::mpsc::{self, TryRecvError};
use std::time::Instant;

use rand::Rng;

use craft_core::{Game, GameConfig, GameEvent, Millis, PoseSampleAdapter};

use crate::cue::{CueConfig, CuePlayer};
use crate::hand::{spawn_hand_source, HandEvent};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Copy, Debug, Default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub cues: CueConfig,
}

// ════════════════════════════════════════════════════════════════════════════
// Hand-source status
// ════════════════════════════════════════════════════════════════════════════

/// Where the perception subsystem stands.  `Failed` is persistent: there is
/// no retry, the game simply never leaves idle.
#[derive(Clone, Debug, PartialEq)]
pub enum HandStatus {
    Loading,
    Ready,
    Failed(String),
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    game: Game,
    adapter: PoseSampleAdapter,
    hand_status: HandStatus,
    cues: CuePlayer,

    // ── status message shown in the window's bottom bar ──────────────────
    pub status: String,
}

impl AppState {
    pub fn new(cfg: AppConfig) -> Self {
        AppState {
            game: Game::new(cfg.game),
            adapter: PoseSampleAdapter::new(cfg.game.screen_w, cfg.game.screen_h),
            hand_status: HandStatus::Loading,
            cues: CuePlayer::spawn(cfg.cues),
            status: "Waiting for the hand tracker...".to_string(),
        }
    }

    // ── process one HandEvent ────────────────────────────────────────────

    pub fn handle_hand_event(&mut self, event: HandEvent, now: Millis) {
        match event {
            HandEvent::Ready => {
                if self.hand_status != HandStatus::Ready {
                    self.hand_status = HandStatus::Ready;
                    self.game.start(now);
                }
            }
            HandEvent::Failed(err) => {
                eprintln!("[app] hand source failed: {}", err);
                self.status = format!("NOT READY - {}", err);
                self.hand_status = HandStatus::Failed(err.to_string());
            }
            HandEvent::Sample(sample) => {
                if let Some(target) = self.adapter.map(&sample) {
                    self.game.steer(target);
                }
                // No target → the craft holds its last position.
            }
        }
    }

    // ── per-frame logic ──────────────────────────────────────────────────

    pub fn frame<R: Rng>(&mut self, now: Millis, rng: &mut R) {
        self.game.tick(now, rng);

        for event in self.game.drain_events() {
            match event {
                GameEvent::Started => {
                    self.cues.game_start(self.game.generation());
                    self.status = "Dodge the debris - steer with your finger".to_string();
                }
                GameEvent::Collision => {
                    self.cues.collision(self.game.generation());
                    self.status = format!("Impact! Final score {}", self.game.score());
                }
            }
        }
    }

    /// Control surface: acts only when the session is over.
    pub fn restart(&mut self, now: Millis) {
        if self.game.restart(now) {
            eprintln!("[app] restart, generation {}", self.game.generation());
        }
    }

    pub fn shutdown(&self) {
        self.cues.quit();
    }

    // ── accessors for the render loop ────────────────────────────────────

    pub fn game(&self) -> &Game {
        &self.game
    }
    pub fn hand_visible(&self) -> bool {
        self.adapter.hand_visible()
    }
    pub fn hand_status(&self) -> &HandStatus {
        &self.hand_status
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the visualizer window, spawns the hand source (pointer simulation
/// by default, LeapMotion hardware with `--features leap`), and drives the
/// event/tick/render loop at ~60 fps until the window closes or `Q` is
/// pressed.
pub fn run(cfg: AppConfig) -> Result<(), String> {
    // ── Sim pointer channel (visualizer → sim hand source) ───────────────
    let (sim_tx, sim_rx) = mpsc::channel();

    #[cfg(not(feature = "leap"))]
    let hand_rx = spawn_hand_source(crate::hand::SimHandSource::new(
        sim_rx,
        cfg.game.screen_w,
        cfg.game.screen_h,
    ));
    #[cfg(feature = "leap")]
    let hand_rx = {
        drop(sim_rx); // pointer events are ignored in hardware mode
        spawn_hand_source(crate::hand::LeapHandSource)
    };

    let mut vis = Visualizer::new(cfg.game.screen_w, cfg.game.screen_h, sim_tx)?;
    let mut app = AppState::new(cfg);

    let started = Instant::now();
    let mut rng = rand::thread_rng();

    while vis.is_open() {
        // 1. Window input: pointer → sim source, keys → control surface.
        let input = vis.poll_input();
        if input.quit {
            break;
        }

        let now = started.elapsed().as_millis() as Millis;
        if input.restart {
            app.restart(now);
        }

        // 2. Drain hand events (non-blocking — a stalled source skips this
        //    frame's contribution and nothing else).
        loop {
            match hand_rx.try_recv() {
                Ok(event) => app.handle_hand_event(event, now),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        // 3. One fixed-cadence tick.
        app.frame(now, &mut rng);

        // 4. Render the read-only surface.
        vis.render(app.game(), app.hand_visible(), &app.status);
    }

    app.shutdown();
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
