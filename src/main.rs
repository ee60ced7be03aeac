//! Deadline headless runner
//!
//! Plays a scripted session against logging ports and prints a JSON summary.
//!
//! Usage: `deadline [settings.json] [frames]`. `RUST_LOG=debug` shows every
//! sound and HUD update.

use deadline::platform::{Direction, InputEvent, ManualClock};
use deadline::{Game, Ports, Settings};

const DEFAULT_FRAMES: u64 = 60 * 90;

/// Input for a given frame of the demo script
fn scripted_inputs(frame: u64) -> Vec<InputEvent> {
    let mut events = Vec::new();
    match frame {
        0 => {
            events.push(InputEvent::ControlsLocked(true));
            events.push(InputEvent::Move {
                direction: Direction::Forward,
                pressed: true,
            });
        }
        240 => events.push(InputEvent::Run(true)),
        480 => events.push(InputEvent::Run(false)),
        600 => events.push(InputEvent::Aim(true)),
        900 => events.push(InputEvent::Aim(false)),
        _ => {}
    }

    // Sweep the view and keep shooting
    events.push(InputEvent::Look { dx: 0.004, dy: 0.0 });
    if frame % 12 == 0 {
        events.push(InputEvent::Fire);
    }
    if frame % 300 == 150 {
        events.push(InputEvent::Jump);
    }
    if frame % 30 == 0 {
        events.push(InputEvent::Interact);
    }
    events
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_from(&path)?,
        None => Settings::default(),
    };
    let frames = match args.next() {
        Some(n) => n.parse::<u64>()?,
        None => DEFAULT_FRAMES,
    };

    log::info!("Deadline (headless) starting: {} frames", frames);

    let clock = ManualClock::fixed(1.0 / 60.0);
    let mut game = Game::new(&settings, Box::new(clock), Ports::logging());

    for frame in 0..frames {
        for event in scripted_inputs(frame) {
            game.handle_input(event);
        }
        game.frame();
        if game.state().is_over() {
            break;
        }
    }

    let summary = game.summary();
    game.shutdown();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
