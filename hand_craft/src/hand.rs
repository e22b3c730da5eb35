//! Hand-tracking sources — both real hardware and pointer simulation.
//!
//! The public interface is [`HandEvent`] delivered over an `mpsc` channel.
//! Consumers don't need to know whether samples came from a tracking device
//! or from the mouse pointer: a source announces `Ready` once (or `Failed`
//! once, and never `Ready`), then streams one [`HandSample`] per completed
//! estimation cycle.  The source thread re-arms itself only after each cycle
//! finishes, so estimations never overlap; if a cycle is slow, samples just
//! arrive late and the game loop keeps ticking.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use craft_core::{HandSample, Landmark};

/// Capture frame size the sources normalize their coordinates to.
pub const FRAME_W: f32 = 640.0;
pub const FRAME_H: f32 = 480.0;

// ════════════════════════════════════════════════════════════════════════════
// HandEvent / HandError
// ════════════════════════════════════════════════════════════════════════════

/// Everything a hand source can tell the game loop.
#[derive(Clone, Debug, PartialEq)]
pub enum HandEvent {
    /// The source is up; play can begin.
    Ready,
    /// One estimation result (a hand, or nothing in frame).
    Sample(HandSample),
    /// Startup failed; the game stays idle with a visible error.  Sent at
    /// most once, instead of `Ready`.
    Failed(HandError),
}

/// Why a source could not start.  One attempt only — no retry policy here;
/// callers that want retry wrap the spawn.
#[derive(Clone, Debug, PartialEq)]
pub enum HandError {
    /// The tracking backend itself failed to initialize.
    ModelUnavailable(String),
    /// The capture device refused the connection.
    CaptureDenied(String),
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::ModelUnavailable(e) => write!(f, "hand tracker unavailable: {}", e),
            HandError::CaptureDenied(e) => write!(f, "capture device denied: {}", e),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`HandEvent`]s over a channel.
pub trait HandSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<HandEvent>);
}

/// Spawn a hand source on its own thread and return the receiving end.
pub fn spawn_hand_source<S: HandSource>(source: S) -> Receiver<HandEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource — pointer simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Pointer position reported by the window, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimPointer {
    /// The pointer is inside the window at (x, y).
    At { x: f32, y: f32 },
    /// The pointer left the window — simulates "no hand in frame".
    Gone,
}

/// Hand source driven by [`SimPointer`] events from the visualizer window.
///
/// Plays the part of the camera: it emits *raw* frame coordinates, chosen so
/// that after the adapter's mirror-and-offset mapping the craft lands under
/// the pointer.  That means pre-mirroring here (`raw_x = screen_w - x - 25`),
/// which is exactly what a camera watching the screen's reflection would see.
pub struct SimHandSource {
    pub rx: Receiver<SimPointer>,
    pub screen_w: f32,
    pub screen_h: f32,
}

impl SimHandSource {
    pub fn new(rx: Receiver<SimPointer>, screen_w: f32, screen_h: f32) -> Self {
        SimHandSource { rx, screen_w, screen_h }
    }
}

impl HandSource for SimHandSource {
    fn run(self: Box<Self>, tx: Sender<HandEvent>) {
        if tx.send(HandEvent::Ready).is_err() {
            return;
        }
        for pointer in self.rx {
            let sample = match pointer {
                SimPointer::At { x, y } => {
                    let raw_x = self.screen_w - x - 25.0;
                    let raw_y = (y / self.screen_h) * FRAME_H;
                    HandSample::Detected(synthetic_hand(raw_x, raw_y))
                }
                SimPointer::Gone => HandSample::NotDetected,
            };
            if tx.send(HandEvent::Sample(sample)).is_err() {
                return;
            }
        }
    }
}

/// A full 21-landmark layout around a given index-finger tip, so consumers
/// that inspect more than the tip still see a plausible hand.
pub fn synthetic_hand(tip_x: f32, tip_y: f32) -> Vec<Landmark> {
    (0..21)
        .map(|i| {
            let d = i as f32 - 8.0;
            Landmark::new(tip_x + d * 4.0, tip_y + d.abs() * 6.0, -10.0)
        })
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// LeapHandSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hand source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
/// Startup failures are reported as [`HandEvent::Failed`] — the game stays
/// idle and the process lives on.  If several hands are tracked, only the
/// first is used; the rest are ignored.
#[cfg(feature = "leap")]
pub struct LeapHandSource;

#[cfg(feature = "leap")]
impl HandSource for LeapHandSource {
    fn run(self: Box<Self>, tx: Sender<HandEvent>) {
        use leaprs::*;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("[hand] LeapC init failed: {}", e);
                let _ = tx.send(HandEvent::Failed(HandError::ModelUnavailable(e.to_string())));
                return;
            }
        };
        if let Err(e) = connection.open() {
            eprintln!("[hand] device open failed: {}", e);
            let _ = tx.send(HandEvent::Failed(HandError::CaptureDenied(e.to_string())));
            return;
        }
        if tx.send(HandEvent::Ready).is_err() {
            return;
        }

        loop {
            let msg = match connection.poll(100) {
                Ok(m) => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands: Vec<_> = frame.hands().collect();
                let sample = match hands.first() {
                    Some(hand) => HandSample::Detected(leap_landmarks(hand)),
                    None => HandSample::NotDetected,
                };
                if tx.send(HandEvent::Sample(sample)).is_err() {
                    return;
                }
            }
        }
    }
}

/// Map LeapC joints into the 21-point layout, in frame pixels.
///
/// Order: wrist, then per digit (thumb first) knuckle → tip, which puts the
/// index tip at position 8.
#[cfg(feature = "leap")]
fn leap_landmarks(hand: &leaprs::Hand) -> Vec<Landmark> {
    let mut out = Vec::with_capacity(21);
    let palm = hand.palm().position();
    out.push(leap_point(palm.x, palm.y, palm.z));

    for digit in hand.digits() {
        let joints = [
            digit.proximal().prev_joint(),
            digit.proximal().next_joint(),
            digit.intermediate().next_joint(),
            digit.distal().next_joint(),
        ];
        for j in joints {
            out.push(leap_point(j.x, j.y, j.z));
        }
    }
    out
}

/// LeapC interaction volume (mm, x ∈ ±200, y 100–400 above the device) →
/// capture-frame pixels, x mirrored the way a camera sees the hand.
#[cfg(feature = "leap")]
fn leap_point(x: f32, y: f32, z: f32) -> Landmark {
    let fx = (1.0 - (x + 200.0) / 400.0).clamp(0.0, 1.0) * FRAME_W;
    let fy = (1.0 - (y - 100.0) / 300.0).clamp(0.0, 1.0) * FRAME_H;
    Landmark::new(fx, fy, z)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use craft_core::adapter::INDEX_FINGER_TIP;

    #[test]
    fn sim_source_reports_ready_first() {
        let (ptr_tx, ptr_rx) = mpsc::channel();
        let rx = spawn_hand_source(SimHandSource::new(ptr_rx, 960.0, 540.0));
        drop(ptr_tx);
        assert_eq!(rx.recv().unwrap(), HandEvent::Ready);
        // Pointer channel closed → source ends, no stray events.
        assert!(rx.recv().is_err());
    }

    #[test]
    fn pointer_position_becomes_a_pre_mirrored_sample() {
        let (ptr_tx, ptr_rx) = mpsc::channel();
        let rx = spawn_hand_source(SimHandSource::new(ptr_rx, 960.0, 540.0));
        assert_eq!(rx.recv().unwrap(), HandEvent::Ready);

        ptr_tx.send(SimPointer::At { x: 400.0, y: 270.0 }).unwrap();
        match rx.recv().unwrap() {
            HandEvent::Sample(HandSample::Detected(landmarks)) => {
                assert_eq!(landmarks.len(), 21);
                // raw = 960 - 400 - 25, so the adapter maps back to x = 400.
                assert_eq!(landmarks[INDEX_FINGER_TIP].x, 535.0);
            }
            other => panic!("expected a detected sample, got {:?}", other),
        }
    }

    #[test]
    fn pointer_gone_becomes_not_detected() {
        let (ptr_tx, ptr_rx) = mpsc::channel();
        let rx = spawn_hand_source(SimHandSource::new(ptr_rx, 960.0, 540.0));
        assert_eq!(rx.recv().unwrap(), HandEvent::Ready);

        ptr_tx.send(SimPointer::Gone).unwrap();
        assert_eq!(rx.recv().unwrap(), HandEvent::Sample(HandSample::NotDetected));
    }

    #[test]
    fn synthetic_hand_puts_the_tip_at_index_8() {
        let hand = synthetic_hand(123.0, 45.0);
        assert_eq!(hand.len(), 21);
        assert_eq!(hand[INDEX_FINGER_TIP], Landmark::new(123.0, 45.0, -10.0));
    }

    #[test]
    fn errors_display_their_cause() {
        let e = HandError::CaptureDenied("no device".into());
        assert_eq!(e.to_string(), "capture device denied: no device");
        let e = HandError::ModelUnavailable("lib missing".into());
        assert!(e.to_string().contains("lib missing"));
    }
}
