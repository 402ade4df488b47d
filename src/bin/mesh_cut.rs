//! Mesh Cut - Slicing Demo
//!
//! Splits a cube by a plane and prints the fragments, then runs a scripted
//! round of the slicing game: slashes are fed to the gesture recognizer,
//! each long enough slash cuts the current target and scores a point until
//! the round clock runs out. Between slashes the player taps at the targets
//! circling the racetrack; a tap close enough to one scores it as a hit.
//!
//! Run with: `cargo run --bin mesh_cut [cutting_config.json]`

use std::error::Error;
use std::process::ExitCode;

use glam::{Affine3A, Vec2, Vec3};
use log::debug;

use playground_engine::game::{
    CuttingConfig, FlowInput, FlowState, GameFlow, GameModel, Racetrack, SlashGesture, TargetCutter, load_json,
};
use playground_engine::mesh::{MeshData, Plane, Vertex, split_mesh};

/// Simulation step (seconds)
const FRAME_DT: f32 = 1.0 / 60.0;
/// A slash is drawn over this many frames
const SLASH_FRAMES: u32 = 12;
/// Frames between slashes
const SLASH_INTERVAL: u32 = 90;
/// Frame within each interval at which the player taps
const TAP_FRAME: u32 = 45;
/// Largest tap distance that still hits a target
const HIT_THRESHOLD: f32 = 0.2;

fn main() -> ExitCode {
    env_logger::init();

    println!("===========================================");
    println!("   Mesh Cut - Slicing Demo");
    println!("===========================================");
    println!();

    let config = match std::env::args().nth(1) {
        Some(path) => match load_json::<CuttingConfig>(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("[Mesh Cut] {}", err);
                return ExitCode::FAILURE;
            }
        },
        None => CuttingConfig::default(),
    };

    if let Err(err) = split_cube().and_then(|()| play_round(&config)) {
        eprintln!("[Mesh Cut] {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn split_cube() -> Result<(), Box<dyn Error>> {
    let cube = MeshData::unit_cube();
    let plane = Plane::from_normal_and_point(Vec3::new(0.3, 1.0, 0.2), Vec3::new(0.0, 0.1, 0.0));
    let split = split_mesh(&cube, &plane)?;

    println!("[Mesh Cut] Cube: {} vertices, {} triangles", cube.vertex_count(), cube.triangle_count());
    for (name, fragment) in [("above", &split.above), ("below", &split.below)] {
        let vertices: Vec<Vertex> = fragment.interleaved();
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        println!(
            "[Mesh Cut] {:>5}: {} vertices, {} triangles, {} bytes interleaved",
            name,
            fragment.vertex_count(),
            fragment.triangle_count(),
            bytes.len()
        );
        if let Some((lo, hi)) = fragment.bounds() {
            println!("[Mesh Cut]        bounds {:?} .. {:?}", lo, hi);
        }
    }
    println!();
    Ok(())
}

fn play_round(config: &CuttingConfig) -> Result<(), Box<dyn Error>> {
    let templates = vec![
        MeshData::unit_cube(),
        MeshData::cube(Vec3::ZERO, 0.75),
        MeshData::cube(Vec3::new(0.1, 0.0, 0.0), 0.4),
    ];
    let mut cutter = TargetCutter::new(templates, Affine3A::IDENTITY, config.clone());
    let mut gesture = SlashGesture::new(config.slash_min_distance);
    let mut flow = GameFlow::new();
    let track = Racetrack::new(vec![
        Vec3::new(-2.0, 1.0, -2.0),
        Vec3::new(2.0, 1.0, -2.0),
        Vec3::new(2.0, 1.0, 2.0),
        Vec3::new(-2.0, 1.0, 2.0),
    ])?;
    let mut model = GameModel::new(config.game_length).with_tracks(vec![track]);

    flow.handle(FlowInput::TrackingStarted, &mut model);
    flow.handle(FlowInput::StartPressed, &mut model);
    println!("[Mesh Cut] Round started: {:.0}s on the clock", model.time_left());

    let mut frame = 0u32;
    let mut slashes = 0u32;
    let mut hits = 0u32;
    while flow.state() == FlowState::InProgress {
        let phase = frame % SLASH_INTERVAL;
        if phase < SLASH_FRAMES {
            // Alternate rising and falling diagonal strokes
            let t = phase as f32 / SLASH_FRAMES as f32;
            let tilt = if slashes % 2 == 0 { 0.5 } else { -0.5 };
            gesture.drag(Vec2::new(-8.0 + 16.0 * t, tilt * (-8.0 + 16.0 * t)));
        } else if phase == SLASH_FRAMES {
            slashes += 1;
            if let Some(plane) = gesture.release() {
                if let Some(debris) = cutter.cut(&plane)? {
                    model.add_score(1);
                    debug!("Debris forces: {:?} / {:?}", debris[0].force, debris[1].force);
                }
            }
        } else if phase == TAP_FRAME {
            // Taps alternate between on target and a near miss
            let aim = Vec3::new(0.0, 0.0, if (frame / SLASH_INTERVAL) % 2 == 0 { 0.05 } else { 0.5 });
            let taps: Vec<Vec3> = model.target_positions().map(|(_, pos)| pos + aim).collect();
            for tap in taps {
                if let Some(idx) = model.test_user_hit(tap, HIT_THRESHOLD) {
                    if model.commit_user_hit(idx) {
                        hits += 1;
                    }
                }
            }
        }

        cutter.tick(FRAME_DT);
        flow.update(FRAME_DT, &mut model);
        frame += 1;
    }

    println!("[Mesh Cut] Round over after {} slashes", slashes);
    println!("[Mesh Cut] Track hits: {}", hits);
    println!("[Mesh Cut] Score: {}", model.score());
    Ok(())
}
