//! Projectile launch settings and directional fire.
//!
//! The projectile only carries its movement configuration and the velocity
//! it was fired with. Integrating that velocity, bouncing and despawning are
//! left to whatever simulation consumes it.

use glam::Vec3;
use serde::Deserialize;

/// Movement and collision settings for a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectileSettings {
    /// Radius of the collision sphere, in world units.
    pub collision_radius: f32,

    /// Speed the projectile is fired at, in units per second.
    pub initial_speed: f32,

    /// Speed limit enforced by the simulation. 0 means unlimited.
    pub max_speed: f32,

    /// Orient the projectile along its velocity every step.
    pub rotation_follows_velocity: bool,

    /// Bounce on impact instead of stopping.
    pub should_bounce: bool,

    /// Fraction of velocity kept along the hit normal after a bounce.
    pub bounciness: f32,

    /// Multiplier applied to world gravity. 0 flies straight.
    pub gravity_scale: f32,
}

impl Default for ProjectileSettings {
    fn default() -> Self {
        Self {
            collision_radius: 15.0,
            initial_speed: 5000.0,
            max_speed: 5000.0,
            rotation_follows_velocity: true,
            should_bounce: true,
            bounciness: 0.2,
            gravity_scale: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectileError {
    #[error("{field} must be a finite non-negative number, got {value}")]
    Invalid { field: &'static str, value: f32 },
}

impl ProjectileSettings {
    /// Rejects negative or non-finite radius, speeds and bounciness.
    pub fn validate(&self) -> Result<(), ProjectileError> {
        let fields = [
            ("collision_radius", self.collision_radius),
            ("initial_speed", self.initial_speed),
            ("max_speed", self.max_speed),
            ("bounciness", self.bounciness),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ProjectileError::Invalid { field, value });
            }
        }
        Ok(())
    }
}

/// A configured projectile and the velocity it was last fired with.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projectile {
    settings: ProjectileSettings,
    velocity: Vec3,
}

impl Projectile {
    pub fn new(settings: ProjectileSettings) -> Self {
        Self {
            settings,
            velocity: Vec3::ZERO,
        }
    }

    pub fn settings(&self) -> &ProjectileSettings {
        &self.settings
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Sets the velocity to `direction` scaled by the initial speed.
    ///
    /// `direction` is expected to be normalized; it is not checked.
    pub fn fire_in_direction(&mut self, direction: Vec3) {
        self.velocity = direction * self.settings.initial_speed;
    }

    /// Unit vector the projectile faces, when its rotation tracks velocity
    /// and it is moving.
    pub fn facing(&self) -> Option<Vec3> {
        if !self.settings.rotation_follows_velocity {
            return None;
        }
        self.velocity.try_normalize()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
