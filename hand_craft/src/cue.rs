//! One-shot audio cues, played as short MIDI figures on a dedicated thread.
//!
//! The game emits `Started` and `Collision` exactly once per occurrence; the
//! cue player turns them into sound.  Commands carry the game generation that
//! produced them, and a [`CueGate`] refuses to fire the same cue twice for one
//! generation — a stale command from a finished session dies here instead of
//! replaying.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

// ════════════════════════════════════════════════════════════════════════════
// CueCommand — sent to the cue thread
// ════════════════════════════════════════════════════════════════════════════

pub enum CueCommand {
    /// Play the session-start figure.
    GameStart { generation: u64 },
    /// Play the impact figure.
    Collision { generation: u64 },
    /// Terminate the thread.
    Quit,
}

/// Cue voicing.
#[derive(Clone, Copy, Debug)]
pub struct CueConfig {
    pub channel: u8,
    /// MIDI program for the cue voice (default: square lead).
    pub program: u8,
    pub velocity: u8,
}

impl Default for CueConfig {
    fn default() -> Self {
        CueConfig {
            channel: 0,
            program: 80,
            velocity: 100,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CueGate — at most one firing per cue per generation
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct CueGate {
    last_start: Option<u64>,
    last_collision: Option<u64>,
}

impl CueGate {
    pub fn new() -> Self {
        CueGate::default()
    }

    /// True exactly once per generation.
    pub fn fire_start(&mut self, generation: u64) -> bool {
        if self.last_start == Some(generation) {
            return false;
        }
        self.last_start = Some(generation);
        true
    }

    /// True exactly once per generation.
    pub fn fire_collision(&mut self, generation: u64) -> bool {
        if self.last_collision == Some(generation) {
            return false;
        }
        self.last_collision = Some(generation);
        true
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MidiOut — abstraction over midir / null (for machines with no synth)
// ════════════════════════════════════════════════════════════════════════════

trait MidiOut: Send {
    fn program_change(&mut self, channel: u8, program: u8);
    fn note_on(&mut self, channel: u8, note: u8, velocity: u8);
    fn note_off(&mut self, channel: u8, note: u8);
}

// ── midir backend ─────────────────────────────────────────────────────────

struct MidirOut {
    conn: midir::MidiOutputConnection,
}

impl MidiOut for MidirOut {
    fn program_change(&mut self, channel: u8, program: u8) {
        let _ = self.conn.send(&[0xC0 | (channel & 0x0F), program]);
    }
    fn note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        let _ = self.conn.send(&[0x90 | (channel & 0x0F), note, velocity]);
    }
    fn note_off(&mut self, channel: u8, note: u8) {
        let _ = self.conn.send(&[0x80 | (channel & 0x0F), note, 0]);
    }
}

// ── null backend ──────────────────────────────────────────────────────────

struct NullOut;
impl MidiOut for NullOut {
    fn program_change(&mut self, _ch: u8, _p: u8) {}
    fn note_on(&mut self, _ch: u8, _n: u8, _v: u8) {}
    fn note_off(&mut self, _ch: u8, _n: u8) {}
}

// ════════════════════════════════════════════════════════════════════════════
// open_midi_output — enumerate ports and pick first available
// ════════════════════════════════════════════════════════════════════════════

/// Try to open the first available MIDI output port, preferring a softsynth.
/// Falls back to `NullOut` with a warning if none found — the game is fully
/// playable silent.
fn open_midi_output() -> Box<dyn MidiOut> {
    let midi_out = match midir::MidiOutput::new("hand_craft_cues") {
        Ok(m) => m,
        Err(e) => {
            eprintln!("[cue] MIDI init error: {} — running silent", e);
            return Box::new(NullOut);
        }
    };

    let ports = midi_out.ports();
    if ports.is_empty() {
        eprintln!("[cue] no MIDI output ports found — running silent");
        return Box::new(NullOut);
    }

    let port_idx = ports
        .iter()
        .enumerate()
        .find(|(_, p)| {
            midi_out
                .port_name(p)
                .map(|n| {
                    let n = n.to_lowercase();
                    n.contains("fluid")
                        || n.contains("timidity")
                        || n.contains("microsoft")
                        || n.contains("gm")
                        || n.contains("synth")
                })
                .unwrap_or(false)
        })
        .map(|(i, _)| i)
        .unwrap_or(0);

    let port = &ports[port_idx];
    let name = midi_out.port_name(port).unwrap_or_else(|_| "Unknown".to_string());
    eprintln!("[cue] opening MIDI port: {}", name);

    match midi_out.connect(port, "hand-craft-cue") {
        Ok(conn) => Box::new(MidirOut { conn }),
        Err(e) => {
            eprintln!("[cue] failed to connect: {} — running silent", e);
            Box::new(NullOut)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CuePlayer — handle to the cue thread
// ════════════════════════════════════════════════════════════════════════════

pub struct CuePlayer {
    cmd_tx: Sender<CueCommand>,
}

impl CuePlayer {
    /// Spawn the cue thread.  MIDI port probing happens on the thread, so a
    /// slow or absent synth never delays the caller.
    pub fn spawn(cfg: CueConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<CueCommand>();
        thread::spawn(move || cue_thread(cfg, cmd_rx));
        CuePlayer { cmd_tx }
    }

    pub fn game_start(&self, generation: u64) {
        let _ = self.cmd_tx.send(CueCommand::GameStart { generation });
    }

    pub fn collision(&self, generation: u64) {
        let _ = self.cmd_tx.send(CueCommand::Collision { generation });
    }

    pub fn quit(&self) {
        let _ = self.cmd_tx.send(CueCommand::Quit);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// cue_thread — the actual loop
// ════════════════════════════════════════════════════════════════════════════

fn cue_thread(cfg: CueConfig, cmd_rx: Receiver<CueCommand>) {
    let mut midi = open_midi_output();
    let mut gate = CueGate::new();

    midi.program_change(cfg.channel, cfg.program);

    for cmd in cmd_rx {
        match cmd {
            CueCommand::GameStart { generation } => {
                if gate.fire_start(generation) {
                    // Rising triad: lift-off.
                    play_figure(&mut *midi, &cfg, &[(60, 90), (64, 90), (67, 160)]);
                }
            }
            CueCommand::Collision { generation } => {
                if gate.fire_collision(generation) {
                    // Low cluster: impact.
                    play_figure(&mut *midi, &cfg, &[(38, 70), (32, 260)]);
                }
            }
            CueCommand::Quit => return,
        }
    }
}

/// Play `(note, millis)` pairs back to back.
fn play_figure(midi: &mut dyn MidiOut, cfg: &CueConfig, notes: &[(u8, u64)]) {
    for &(note, ms) in notes {
        midi.note_on(cfg.channel, note, cfg.velocity);
        thread::sleep(Duration::from_millis(ms));
        midi.note_off(cfg.channel, note);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_fires_once_per_generation() {
        let mut gate = CueGate::new();
        assert!(gate.fire_collision(1));
        assert!(!gate.fire_collision(1));
        assert!(!gate.fire_collision(1));
        assert!(gate.fire_collision(2));
        assert!(!gate.fire_collision(2));
    }

    #[test]
    fn start_and_collision_gates_are_independent() {
        let mut gate = CueGate::new();
        assert!(gate.fire_start(1));
        assert!(gate.fire_collision(1));
        assert!(!gate.fire_start(1));
        // A new session re-arms both cues.
        assert!(gate.fire_start(2));
        assert!(gate.fire_collision(2));
    }
}
