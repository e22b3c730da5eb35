//! hand_craft — interactive entry point.

use hand_craft::app::{run, AppConfig};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Hand Craft — steer with your finger, dodge debris     ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hand tracking");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Pointer simulation  (use --features leap for hardware)");
    println!();
    println!("  Keep your hand in frame; the craft follows your index finger.");
    println!("  R restarts after a crash, Q quits.");
    println!();
    println!("  Opening game window…");
    println!();

    if let Err(e) = run(AppConfig::default()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
