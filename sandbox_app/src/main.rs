//! Sandbox demo application
//!
//! Spawns a small scene over the headless backends and runs a short frame
//! loop: a camera rig, a bouncing crate with physics and a render node, a
//! positional audio emitter and a directional sun light.

use unit_engine::physics::PhysicsBackend as _;
use unit_engine::prelude::*;

fn build_scene() -> Result<(Scene, GameObjectKey), EngineError> {
    let mut scene = Scene::headless();

    let camera_rig = scene.spawn("camera_rig");
    scene.add_component(
        camera_rig,
        ComponentId::Transform,
        &ConfigView::new().with("position", Vec3::new(0.0, 3.0, 12.0)),
    )?;
    scene.add_component(
        camera_rig,
        ComponentId::Camera,
        &ConfigView::new().with("fov_y", 60.0).with("near", 0.1),
    )?;
    scene.add_component(camera_rig, ComponentId::Listener, &ConfigView::new())?;

    let crate_obj = scene.spawn("crate");
    scene.add_component(
        crate_obj,
        ComponentId::Transform,
        &ConfigView::new().with("position", Vec3::new(0.0, 5.0, 0.0)),
    )?;
    scene.add_component(
        crate_obj,
        ComponentId::RigidBody,
        &ConfigView::new()
            .with("shape", "box")
            .with("mass", 50.0)
            .with("restitution", 0.6),
    )?;
    scene.add_component(
        crate_obj,
        ComponentId::RenderObject,
        &ConfigView::new()
            .with("mesh", "crate.mesh")
            .with("name", "crate_01")
            .with("material", "rusted_metal"),
    )?;
    scene.add_component(
        crate_obj,
        ComponentId::AudioSource,
        &ConfigView::new()
            .with("sound", "creak.wav")
            .with("looping", true)
            .with("autoplay", true),
    )?;

    let sun = scene.spawn("sun");
    scene.add_component(
        sun,
        ComponentId::Light,
        &ConfigView::new()
            .with("kind", "directional")
            .with("direction", Vec3::new(-0.3, -1.0, -0.2)),
    )?;

    Ok((scene, crate_obj))
}

fn main() -> Result<(), EngineError> {
    unit_engine::foundation::logging::init();
    log::info!("starting sandbox scene");

    let (mut scene, crate_obj) = build_scene()?;
    let mut timer = Timer::new();

    for frame in 0..300u32 {
        timer.update();
        // Fixed step keeps the demo deterministic regardless of host speed.
        let dt = 1.0 / 60.0;

        // Give the crate a sideways kick once it has settled for a second.
        if frame == 60 {
            let handle = scene
                .get(crate_obj)
                .and_then(|go| go.component_as::<RigidBodyComponent>(ComponentId::RigidBody))
                .and_then(RigidBodyComponent::handle);
            if let Some(handle) = handle {
                if let Err(e) = scene
                    .engines_mut()
                    .physics
                    .add_impulse(handle, Vec3::new(120.0, 0.0, 0.0))
                {
                    log::warn!("impulse rejected: {e}");
                }
            }
        }

        scene.frame(dt);

        if frame == 240 {
            log::info!("despawning the crate");
            scene.despawn_deferred(crate_obj);
        }
    }

    log::info!(
        "sandbox finished after {} frames ({:.2}s wall time)",
        timer.frame_count(),
        timer.total_time()
    );
    Ok(())
}
