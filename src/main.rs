use anyhow::Result;
use log::info;

use rusted_collider::{CollisionBody, Engine, ShapeKind};

const GAME_WIDTH: f64 = 800.0;
const GAME_HEIGHT: f64 = 600.0;
const GAME_SPEED: f64 = 100.0;
const GAME_ACCELERATION: f64 = 10.0;

/// Fixed update rate of the demo loop (60 updates per second)
const FIXED_TIMESTEP: f64 = 1.0 / 60.0;

/// Upper bound on simulated frames
const MAX_FRAMES: u32 = 600;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Collider demo...");

    let mut engine = Engine::new(GAME_WIDTH, GAME_HEIGHT, GAME_SPEED, GAME_ACCELERATION)?;
    info!("Board: {}", engine.get_dimensions_json()?);

    let coll_body = CollisionBody::new(ShapeKind::Rect, 100.0, 100.0, 0.0, 0.0)?;
    let coll_body2 = CollisionBody::new(ShapeKind::Rect, 100.0, 100.0, 0.0, 0.0)?;
    engine.create_element("banana", coll_body, 160.0, 100.0)?;
    engine.create_element("abacate", coll_body2, 100.0, 100.0)?;

    let mut context = engine.get_context();
    engine.draw_element("banana", &mut context);
    engine.draw_element("abacate", &mut context);
    engine.draw_element("missing", &mut context);
    info!(
        "Debug overlay: {} segments, {} labels",
        context.segment_count(),
        context.labels().len()
    );

    let touching = engine.get_collision_between_two_colliders("banana", "abacate")?;
    info!("banana vs abacate: {}", touching);

    // Walk banana to the right until it clears abacate, one fixed step per frame
    let mut frame = 0;
    let mut elapsed = 0.0;
    while frame < MAX_FRAMES && engine.get_collision_between_two_colliders("banana", "abacate")? {
        frame += 1;
        elapsed += FIXED_TIMESTEP;
        let distance = engine.kinematic_profile().displacement(elapsed);
        engine.update_element_position("banana", 160.0 + distance, 100.0);
    }
    if let Some(banana) = engine.get_element("banana") {
        info!(
            "banana cleared abacate after {} frames at {}",
            frame,
            banana.position_json()?
        );
    }

    engine.update_element_position("banana", 400.0, 100.0);
    info!(
        "banana at (400, 100) vs abacate: {}",
        engine.get_collision_between_two_colliders("banana", "abacate")?
    );

    // abacate heads right along its orientation toward banana
    let approaching =
        engine.get_collision_between_collider_and_moving_object("banana", "abacate")?;
    info!("abacate moving toward banana: {}", approaching);

    context.clear();
    engine.draw_all(&mut context);
    info!(
        "Final overlay: {} vertices ({} bytes)",
        context.vertices().len(),
        context.vertex_bytes().len()
    );

    Ok(())
}
