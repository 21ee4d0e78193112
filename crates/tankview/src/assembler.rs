//! Builds the tank scene from options.

use tankview_core::SceneOptions;
use tankview_render::{Camera, OrbitControls, Scene, SceneBuilder};
use tankview_structures::{Particle, Tank};

/// Name under which the tank is stored in the scene.
pub const TANK_NAME: &str = "tank";
/// Name under which the particle is stored in the scene.
pub const PARTICLE_NAME: &str = "particle";

/// A scene together with the controls that move its camera.
pub struct AssembledScene {
    pub scene: Scene,
    pub controls: OrbitControls,
}

impl AssembledScene {
    /// Returns the tank.
    #[must_use]
    pub fn tank(&self) -> Option<&Tank> {
        self.scene.get::<Tank>(TANK_NAME)
    }

    /// Returns the particle.
    #[must_use]
    pub fn particle(&self) -> Option<&Particle> {
        self.scene.get::<Particle>(PARTICLE_NAME)
    }
}

/// Assembles the scene for a viewport of `width` x `height` pixels.
///
/// The particle gets the lower render order so it is drawn first and the
/// tank walls blend over it.
#[must_use]
pub fn assemble_scene(options: &SceneOptions, width: u32, height: u32) -> AssembledScene {
    let aspect = width.max(1) as f32 / height.max(1) as f32;

    let mut tank = Tank::new(options.tank.width, options.tank.height, options.tank.depth)
        .with_name(TANK_NAME);
    tank.set_render_order(options.tank.render_order);

    let mut particle = Particle::new()
        .with_name(PARTICLE_NAME)
        .with_scale(options.particle.scale)
        .with_position(options.particle.position);
    particle.set_render_order(options.particle.render_order);

    let scene = SceneBuilder::new(Camera::from_options(&options.camera, aspect))
        .background(options.background_color)
        .add(tank)
        .add(particle)
        .light(options.ambient_light)
        .light(options.point_light)
        .build();

    log::info!(
        "assembled scene {} for {width}x{height} viewport",
        scene.id()
    );

    AssembledScene {
        scene,
        controls: OrbitControls::from_options(&options.controls),
    }
}
