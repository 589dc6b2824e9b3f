//! Explicit per-frame view state: globe rotation and light.

use glam::{DMat4, DVec3};

use crate::GlobeError;

/// Distance of the light from the globe center, in globe radii.
pub const LIGHT_DISTANCE_RADII: f64 = 25.0;

/// Rotation and lighting of a globe.
///
/// Rotation angles are in degrees about the X, Y and Z axes. The light
/// direction points from the light toward the globe and is stored normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobeState {
    rotation: DVec3,
    light_direction: DVec3,
}

impl Default for GlobeState {
    fn default() -> Self {
        Self {
            rotation: DVec3::ZERO,
            light_direction: DVec3::new(1.0, 0.0, -1.0).normalize(),
        }
    }
}

impl GlobeState {
    /// State with the given rotation (degrees) and light direction.
    pub fn new(rotation_degrees: DVec3, light_direction: DVec3) -> Result<Self, GlobeError> {
        let mut state = Self {
            rotation: rotation_degrees,
            ..Self::default()
        };
        state.set_light_direction(light_direction)?;
        Ok(state)
    }

    /// Rotation about X, Y and Z in degrees.
    #[must_use]
    pub fn rotation(&self) -> DVec3 {
        self.rotation
    }

    /// Replace the rotation (degrees).
    pub fn set_rotation(&mut self, degrees: DVec3) {
        self.rotation = degrees;
    }

    /// Add `delta` degrees to the rotation, keeping each angle in `[0, 360)`.
    pub fn rotate_by(&mut self, delta: DVec3) {
        let r = self.rotation + delta;
        self.rotation = DVec3::new(r.x.rem_euclid(360.0), r.y.rem_euclid(360.0), r.z.rem_euclid(360.0));
    }

    /// Normalized light direction.
    #[must_use]
    pub fn light_direction(&self) -> DVec3 {
        self.light_direction
    }

    /// Set the light direction, normalizing the input.
    pub fn set_light_direction(&mut self, direction: DVec3) -> Result<(), GlobeError> {
        let normalized = direction.try_normalize().ok_or(GlobeError::InvalidLightDirection(
            direction.to_array(),
        ))?;
        self.light_direction = normalized;
        Ok(())
    }

    /// Position of a point light for a globe of `radius`: opposite the light
    /// direction, [`LIGHT_DISTANCE_RADII`] radii from the center.
    #[must_use]
    pub fn light_position(&self, radius: f64) -> DVec3 {
        -self.light_direction * (LIGHT_DISTANCE_RADII * radius)
    }

    /// Model matrix `Rx · Rz · Ry`, so the Y (polar) rotation applies first.
    #[must_use]
    pub fn model_matrix(&self) -> DMat4 {
        let r = DVec3::new(
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        );
        DMat4::from_rotation_x(r.x) * DMat4::from_rotation_z(r.z) * DMat4::from_rotation_y(r.y)
    }
}
