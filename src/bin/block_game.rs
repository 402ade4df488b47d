//! Block Game - Headless Simulation
//!
//! Plays the falling-block game without a window: pieces fall under gravity
//! in world space while a scripted player nudges and turns them. Prints the
//! final field and, when a save path is configured, stores the game so the
//! next run continues it.
//!
//! Run with: `cargo run --bin block_game [config.json]`
//!
//! Set `RUST_LOG=debug` to see every spawn, landing and cleared line.

use std::error::Error;
use std::process::ExitCode;

use glam::Vec3;
use log::{debug, info};

use playground_engine::game::{
    BlockGameConfig, EventQueue, GameFieldState, GameSnapshot, JsonFileSlot, MoveOutcome, PersistentSlot,
    RotateDirection, create_spawner, load_json,
};
use playground_engine::world::GridPosition;

/// Simulation step (seconds)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Hard stop for the simulation (ten minutes of play)
const MAX_FRAMES: u32 = 60 * 60 * 10;
/// Sideways shift the scripted player applies to each new piece, in cells
const SCRIPTED_SHIFTS: [i32; 9] = [-4, -2, 0, 2, 4, -3, 3, -1, 1];

fn main() -> ExitCode {
    env_logger::init();

    println!("===========================================");
    println!("   Block Game - Headless Simulation");
    println!("===========================================");
    println!();

    let config = match std::env::args().nth(1) {
        Some(path) => match load_json::<BlockGameConfig>(&path) {
            Ok(config) => {
                println!("[Block Game] Loaded config from {}", path);
                config
            }
            Err(err) => {
                eprintln!("[Block Game] {}", err);
                return ExitCode::FAILURE;
            }
        },
        None => BlockGameConfig::default(),
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[Block Game] {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &BlockGameConfig) -> Result<(), Box<dyn Error>> {
    config.validate()?;
    let mut slot = config.save_path.as_ref().map(JsonFileSlot::new);
    let continuing = slot.as_ref().is_some_and(|s| s.can_continue());

    let spawner_kind = match &slot {
        Some(slot) if continuing => slot.spawner_kind(),
        _ => config.spawner,
    };
    let spawner = create_spawner(spawner_kind, config.seed);
    let mut field = GameFieldState::new(config.transform(), config.floor_mode, spawner);
    let mut events = EventQueue::new();

    match &slot {
        Some(slot) if continuing => {
            slot.restore()?.restore_into(&mut field)?;
            println!("[Block Game] Continuing saved game from {:?}", slot.path());
        }
        _ => field.start_new_game(&mut events),
    }
    println!("[Block Game] Spawner: {}, floor: {:?}", spawner_kind, config.floor_mode);

    let (per_row, per_col) = field.transform().cell_size();
    let fall = Vec3::new(0.0, -config.gravity_step * per_col * FRAME_DT, 0.0);

    let mut piece_world = field.transform().grid_to_world(field.detached_grid().origin());
    let mut pieces = 0usize;
    let mut cleared = 0usize;
    let mut pending_shift = SCRIPTED_SHIFTS[0];
    let mut topped_out = false;

    for frame in 0..MAX_FRAMES {
        if pending_shift != 0 {
            let step = pending_shift.signum();
            match field.attempt_step(GridPosition::new(step, 0), &mut events)? {
                MoveOutcome::Moved => {
                    piece_world.x += step as f32 * per_row;
                    pending_shift -= step;
                }
                _ => pending_shift = 0,
            }
        }

        match field.attempt_move(piece_world, fall, &mut events)? {
            outcome if outcome.accepted() => piece_world += fall,
            MoveOutcome::Landed {
                cleared_rows,
                topped_out: field_full,
            } => {
                pieces += 1;
                cleared += cleared_rows;
                piece_world = field.transform().grid_to_world(field.detached_grid().origin());
                pending_shift = SCRIPTED_SHIFTS[pieces % SCRIPTED_SHIFTS.len()];
                if pieces % 3 == 0 {
                    field.attempt_rotate(RotateDirection::Clockwise, &mut events)?;
                }
                if field_full {
                    info!("Field topped out after {} frames", frame);
                    topped_out = true;
                    break;
                }
            }
            _ => {}
        }

        for event in events.drain() {
            debug!("View event: {:?}", event);
        }
    }

    println!();
    println!("{}", field);
    println!();
    println!("[Block Game] Pieces placed: {}", pieces);
    println!("[Block Game] Lines cleared: {}", cleared);
    println!("[Block Game] Cells on the floor: {}", field.placed_cell_count());

    let piece = field.detached_grid();
    let color = piece.cells().next().map(|cell| cell.value).unwrap_or_default();
    println!(
        "[Block Game] Next piece: {:?} (rgb {:?}) centered at {:?}",
        color,
        color.rgb(),
        piece.world_centroid(field.transform())
    );

    if let Some(slot) = slot.as_mut() {
        if topped_out {
            slot.clear()?;
            println!("[Block Game] Game over, save cleared");
        } else {
            slot.store(&GameSnapshot::capture(&field))?;
            println!("[Block Game] Saved to {:?}", slot.path());
        }
    }
    Ok(())
}
