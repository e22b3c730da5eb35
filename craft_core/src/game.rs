//! The game state machine and per-tick schedule.
//!
//! [`Game`] owns every play-state component — craft, obstacle field, spawner,
//! score — and is the only writer to any of them.  The embedding loop calls
//! three things: [`steer`](Game::steer) when perception produces a target,
//! [`tick`](Game::tick) at a fixed cadence, and [`restart`](Game::restart)
//! from the control surface.  Within one tick the order is fixed: spawn,
//! advance, collide, cull, score — collision is always evaluated against
//! fully-advanced, not-yet-culled obstacles.

use rand::Rng;

use crate::adapter::PlayerTarget;
use crate::craft::PlayerCraft;
use crate::geometry::Vec2;
use crate::obstacle::{ObstacleField, Spawner, Obstacle};
use crate::score::ScoreTracker;
use crate::Millis;

// ════════════════════════════════════════════════════════════════════════════
// GamePhase / GameEvent
// ════════════════════════════════════════════════════════════════════════════

/// Authoritative game phase.  Exactly one value is live at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    /// Before perception is ready.  Nothing spawns, moves, or scores.
    Idle,
    /// Active play.
    Playing,
    /// Terminal until restart: obstacles frozen, score frozen, message set.
    GameOver,
}

/// Discrete one-shot events for external subsystems (audio cues, overlays).
/// Each occurrence is emitted exactly once; consumers drain them per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// Play began (initial start and every restart).
    Started,
    /// The craft hit an obstacle.  At most one per play session.
    Collision,
}

// ════════════════════════════════════════════════════════════════════════════
// GameConfig
// ════════════════════════════════════════════════════════════════════════════

/// Screen bounds and cadences.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub screen_w: f32,
    pub screen_h: f32,
    /// A new obstacle whenever more than this has passed since the last one.
    pub spawn_interval_ms: Millis,
    /// One score point per this much elapsed play time.
    pub score_interval_ms: Millis,
    /// Pixels every obstacle falls per tick at the reference ~60 Hz cadence.
    pub fall_step: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_w: 960.0,
            screen_h: 540.0,
            spawn_interval_ms: 5000,
            score_interval_ms: 2000,
            fall_step: 10.0,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Game
// ════════════════════════════════════════════════════════════════════════════

pub struct Game {
    config: GameConfig,
    phase: GamePhase,
    craft: PlayerCraft,
    field: ObstacleField,
    spawner: Spawner,
    score: ScoreTracker,
    message: Option<String>,
    /// One-shot guard: set by the first collision of a session, cleared only
    /// by restart.  While set, collision results are never re-evaluated.
    collision_latched: bool,
    /// Bumped on every (re)start; stale asynchronous continuations compare
    /// against it and self-terminate.
    generation: u64,
    /// Obstacles that fell past the bottom edge this session.
    dodged: u32,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Game {
            config,
            phase: GamePhase::Idle,
            craft: PlayerCraft::default(),
            field: ObstacleField::new(),
            spawner: Spawner::new(config.spawn_interval_ms),
            score: ScoreTracker::new(config.score_interval_ms),
            message: None,
            collision_latched: false,
            generation: 0,
            dodged: 0,
            events: Vec::new(),
        }
    }

    // ── transitions ──────────────────────────────────────────────────────

    /// Idle → Playing, once perception is ready.  No-op in any other phase.
    pub fn start(&mut self, now: Millis) {
        if self.phase != GamePhase::Idle {
            return;
        }
        self.begin_session(now);
    }

    /// GameOver → Playing.  A no-op in any other phase — the control surface
    /// may invoke it at any time, but it only acts on a finished session.
    /// Returns whether a new session actually began.
    pub fn restart(&mut self, now: Millis) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.craft = PlayerCraft::default();
        self.field.clear();
        self.message = None;
        self.collision_latched = false;
        self.dodged = 0;
        self.begin_session(now);
        true
    }

    fn begin_session(&mut self, now: Millis) {
        self.phase = GamePhase::Playing;
        self.spawner.re_arm(now);
        self.score.reset(now);
        self.generation += 1;
        self.events.push(GameEvent::Started);
    }

    fn end_session(&mut self) {
        self.collision_latched = true;
        self.phase = GamePhase::GameOver;
        self.message = Some("Game Over!".to_string());
        self.events.push(GameEvent::Collision);
    }

    // ── per-cycle inputs ─────────────────────────────────────────────────

    /// Move the craft to a steering target.  Ignored unless playing — the
    /// craft never moves in idle or game over.
    pub fn steer(&mut self, target: PlayerTarget) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.craft.pos = Vec2::from(target);
    }

    /// One fixed-cadence tick.  A no-op outside `Playing`, which is what
    /// freezes obstacles and score in game over: the spawn and score clocks
    /// are not consulted at all, and both are re-armed on the next start.
    pub fn tick<R: Rng>(&mut self, now: Millis, rng: &mut R) {
        if self.phase != GamePhase::Playing {
            return;
        }

        if let Some(obstacle) = self.spawner.try_spawn(now, self.config.screen_w, rng) {
            self.field.push(obstacle);
        }

        self.field.advance(self.config.fall_step);

        if !self.collision_latched && self.craft_hit() {
            self.end_session();
        }

        self.dodged += self.field.cull(self.config.screen_h) as u32;

        if self.phase == GamePhase::Playing {
            self.score.tick(now);
        }
    }

    fn craft_hit(&self) -> bool {
        let hitbox = self.craft.hitbox();
        self.field
            .obstacles()
            .iter()
            .any(|o| hitbox.intersects(&o.rect()))
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ── read-only surface for the presentation layer ─────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn phase(&self) -> GamePhase {
        self.phase
    }
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
    pub fn craft(&self) -> &PlayerCraft {
        &self.craft
    }
    pub fn obstacles(&self) -> &[Obstacle] {
        self.field.obstacles()
    }
    pub fn score(&self) -> u32 {
        self.score.score()
    }
    pub fn dodged(&self) -> u32 {
        self.dodged
    }
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle::ObstacleKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn playing_game() -> Game {
        let mut game = Game::new(GameConfig::default());
        game.start(0);
        game.drain_events();
        game
    }

    fn obstacle_at(x: f32, y: f32) -> Obstacle {
        Obstacle { x, y, kind: ObstacleKind::Boulder }
    }

    #[test]
    fn idle_game_ignores_ticks_and_steering() {
        let mut game = Game::new(GameConfig::default());
        let mut rng = rng();
        game.steer(PlayerTarget { x: 300.0, y: 270.0 });
        for now in 0..100 {
            game.tick(now * 16, &mut rng);
        }
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.craft().pos, Vec2::ZERO);
        assert_eq!(game.score(), 0);
        assert!(game.obstacles().is_empty());
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn start_begins_play_and_emits_started_once() {
        let mut game = Game::new(GameConfig::default());
        game.start(0);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.drain_events(), vec![GameEvent::Started]);
        // start is Idle-only; a second call does nothing.
        game.start(100);
        assert!(game.drain_events().is_empty());
        assert_eq!(game.generation(), 1);
    }

    #[test]
    fn steering_moves_the_craft_while_playing() {
        let mut game = playing_game();
        game.steer(PlayerTarget { x: 480.0, y: 270.0 });
        assert_eq!(game.craft().pos, Vec2::new(480.0, 270.0));
    }

    #[test]
    fn score_follows_the_clock_while_playing() {
        let mut game = playing_game();
        let mut rng = rng();
        game.tick(1999, &mut rng);
        assert_eq!(game.score(), 0);
        game.tick(2000, &mut rng);
        assert_eq!(game.score(), 1);
        game.tick(4500, &mut rng);
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn collision_ends_the_session_exactly_once() {
        let mut game = playing_game();
        let mut rng = rng();
        game.steer(PlayerTarget { x: 400.0, y: 100.0 });
        game.field.push(obstacle_at(400.0, 80.0));

        game.tick(16, &mut rng);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.message(), Some("Game Over!"));
        assert_eq!(game.drain_events(), vec![GameEvent::Collision]);

        // Still overlapping; further ticks must not re-fire or mutate.
        let frozen_y = game.obstacles()[0].y;
        let frozen_score = game.score();
        for i in 0..5 {
            game.tick(10_000 + i * 2000, &mut rng);
        }
        assert!(game.drain_events().is_empty());
        assert_eq!(game.obstacles()[0].y, frozen_y);
        assert_eq!(game.score(), frozen_score);
        assert_eq!(game.message(), Some("Game Over!"));
    }

    #[test]
    fn craft_does_not_steer_in_game_over() {
        let mut game = playing_game();
        let mut rng = rng();
        game.steer(PlayerTarget { x: 400.0, y: 100.0 });
        game.field.push(obstacle_at(400.0, 80.0));
        game.tick(16, &mut rng);
        assert!(game.is_game_over());

        game.steer(PlayerTarget { x: 50.0, y: 270.0 });
        assert_eq!(game.craft().pos, Vec2::new(400.0, 100.0));
    }

    #[test]
    fn end_to_end_fall_and_impact() {
        let mut game = playing_game();
        let mut rng = rng();

        // An obstacle spawned at (400, -50) falls 10 px per tick.
        game.field.push(obstacle_at(400.0, -50.0));
        for i in 1..=10 {
            game.tick(i * 16, &mut rng);
        }
        assert_eq!(game.obstacles()[0].y, 50.0);
        assert_eq!(game.phase(), GamePhase::Playing);

        // The craft slides underneath it; next tick is the impact.
        game.steer(PlayerTarget { x: 380.0, y: 50.0 });
        game.tick(11 * 16, &mut rng);
        assert_eq!(game.phase(), GamePhase::GameOver);

        // Five further ticks: still game over, score untouched.
        let score = game.score();
        for i in 12..17 {
            game.tick(i * 16, &mut rng);
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.score(), score);
    }

    #[test]
    fn culled_obstacles_count_as_dodged_and_leave_no_stragglers() {
        let mut game = playing_game();
        let mut rng = rng();
        let h = game.config().screen_h;
        game.field.push(obstacle_at(500.0, h - 5.0));
        game.tick(16, &mut rng);
        assert!(game.obstacles().is_empty());
        assert_eq!(game.dodged(), 1);
    }

    #[test]
    fn spawned_obstacles_stay_inside_the_spawn_band() {
        let mut game = playing_game();
        let mut rng = rng();
        let w = game.config().screen_w;
        let h = game.config().screen_h;
        // Craft parked far left so nothing collides with spawns.
        game.steer(PlayerTarget { x: 50.0, y: 270.0 });

        for frame in 0..3600u64 {
            game.tick(frame * 16, &mut rng);
            for o in game.obstacles() {
                assert!(o.x >= w / 2.0 && o.x < w - 50.0);
                assert!(o.y < h);
            }
        }
        assert!(game.dodged() > 0, "an hour of frames should cull something");
    }

    #[test]
    fn restart_resets_the_whole_session() {
        let mut game = playing_game();
        let mut rng = rng();
        game.tick(2000, &mut rng);
        assert_eq!(game.score(), 1);
        game.steer(PlayerTarget { x: 400.0, y: 100.0 });
        game.field.push(obstacle_at(400.0, 80.0));
        game.field.push(obstacle_at(700.0, 10.0));
        game.tick(2016, &mut rng);
        assert!(game.is_game_over());
        assert_eq!(game.score(), 1);
        let generation = game.generation();
        game.drain_events();

        assert!(game.restart(60_000));
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.obstacles().is_empty());
        assert_eq!(game.score(), 0);
        assert_eq!(game.dodged(), 0);
        assert_eq!(game.message(), None);
        assert_eq!(game.craft().pos, Vec2::ZERO);
        assert!(!game.collision_latched);
        assert_eq!(game.generation(), generation + 1);
        assert_eq!(game.drain_events(), vec![GameEvent::Started]);

        // Timers re-armed from the restart instant: no instant spawn burst,
        // no banked score.
        game.tick(60_016, &mut rng);
        assert!(game.obstacles().is_empty());
        assert_eq!(game.score(), 0);
        game.tick(62_000, &mut rng);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn restart_is_a_no_op_outside_game_over() {
        let mut idle = Game::new(GameConfig::default());
        assert!(!idle.restart(0));
        assert_eq!(idle.phase(), GamePhase::Idle);

        let mut playing = playing_game();
        playing.steer(PlayerTarget { x: 333.0, y: 270.0 });
        assert!(!playing.restart(0));
        assert_eq!(playing.phase(), GamePhase::Playing);
        assert_eq!(playing.craft().pos, Vec2::new(333.0, 270.0));
        assert!(playing.drain_events().is_empty());
    }

    #[test]
    fn collision_fires_again_in_the_next_session() {
        let mut game = playing_game();
        let mut rng = rng();
        game.steer(PlayerTarget { x: 400.0, y: 100.0 });
        game.field.push(obstacle_at(400.0, 80.0));
        game.tick(16, &mut rng);
        assert!(game.is_game_over());
        game.drain_events();

        game.restart(1000);
        game.drain_events();
        game.steer(PlayerTarget { x: 400.0, y: 100.0 });
        game.field.push(obstacle_at(400.0, 80.0));
        game.tick(1016, &mut rng);
        assert_eq!(game.drain_events(), vec![GameEvent::Collision]);
    }
}
