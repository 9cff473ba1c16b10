#![warn(missing_docs)]
//! Input capabilities: where picking rays come from and who receives clicks.

use glam::Vec3;
use holosnap_core::{Ray, Tick};
use serde::Serialize;

/// Anything that can supply the current picking ray.
pub trait RaySource {
    /// Ray for this tick, `None` when the source has nothing to aim with.
    fn current_ray(&self) -> Option<Ray>;
}

/// A discrete click, carrying the point the snapper selected at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClickEvent {
    /// Tick the click was delivered on.
    pub tick: Tick,
    /// Selected snap point, `None` when the snapper had no hit.
    pub point: Option<Vec3>,
}

/// Anything that reacts to discrete clicks.
pub trait ClickHandler {
    /// Handle one click.
    fn on_click(&mut self, event: &ClickEvent);
}

/// A ray that never moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRay(pub Ray);

impl RaySource for FixedRay {
    fn current_ray(&self) -> Option<Ray> {
        Some(self.0)
    }
}

/// Exponentially smoothed ray, for jittery head-gaze or hand input.
///
/// Each new sample moves the stable ray by `weight` toward it; a weight of
/// 1.0 disables smoothing.
#[derive(Debug, Clone)]
pub struct StabilizedRay {
    weight: f32,
    current: Option<Ray>,
}

impl StabilizedRay {
    /// Create an empty stabilizer. `weight` is clamped to `(0, 1]`.
    pub fn new(weight: f32) -> Self {
        let weight = if weight.is_finite() {
            weight.clamp(f32::EPSILON, 1.0)
        } else {
            1.0
        };
        Self {
            weight,
            current: None,
        }
    }

    /// Smoothing weight in use.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Blend a new raw sample into the stable ray and return it.
    pub fn push(&mut self, sample: Ray) -> Ray {
        let next = match self.current {
            Some(prev) if self.weight < 1.0 => {
                let origin = prev.origin().lerp(sample.origin(), self.weight);
                let direction = prev.direction().lerp(sample.direction(), self.weight);
                // Opposite directions can cancel out; jump to the sample then
                Ray::new(origin, direction).unwrap_or(sample)
            }
            _ => sample,
        };
        self.current = Some(next);
        next
    }

    /// Forget the history.
    pub fn reset(&mut self) {
        self.current = None;
    }
}

impl RaySource for StabilizedRay {
    fn current_ray(&self) -> Option<Ray> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, direction: Vec3) -> Ray {
        Ray::new(origin, direction).unwrap()
    }

    #[test]
    fn fixed_ray_always_answers() {
        let r = ray(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(FixedRay(r).current_ray(), Some(r));
    }

    #[test]
    fn first_sample_passes_through() {
        let mut stable = StabilizedRay::new(0.25);
        assert!(stable.current_ray().is_none());
        let r = ray(Vec3::ONE, Vec3::X);
        assert_eq!(stable.push(r), r);
    }

    #[test]
    fn later_samples_are_blended() {
        let mut stable = StabilizedRay::new(0.5);
        stable.push(ray(Vec3::ZERO, Vec3::NEG_Z));
        let blended = stable.push(ray(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Z));
        assert!((blended.origin() - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
        assert!((blended.direction() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn full_weight_disables_smoothing() {
        let mut stable = StabilizedRay::new(1.0);
        stable.push(ray(Vec3::ZERO, Vec3::NEG_Z));
        let r = ray(Vec3::new(3.0, 1.0, 0.0), Vec3::X);
        assert_eq!(stable.push(r), r);
    }

    #[test]
    fn opposite_directions_fall_back_to_sample() {
        let mut stable = StabilizedRay::new(0.5);
        stable.push(ray(Vec3::ZERO, Vec3::X));
        let r = ray(Vec3::ZERO, Vec3::NEG_X);
        assert_eq!(stable.push(r).direction(), Vec3::NEG_X);
        stable.reset();
        assert!(stable.current_ray().is_none());
    }

    #[test]
    fn weight_is_clamped() {
        assert_eq!(StabilizedRay::new(3.0).weight(), 1.0);
        assert_eq!(StabilizedRay::new(f32::NAN).weight(), 1.0);
        assert!(StabilizedRay::new(0.0).weight() > 0.0);
    }
}
