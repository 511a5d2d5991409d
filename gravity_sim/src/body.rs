//! Point masses and their per-step update

use std::collections::VecDeque;
use std::fmt;

use common::{DVec3, Positioned};

use crate::error::{SimError, SimResult};

/// 8-bit RGB color tag carried for the renderer
pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [250, 250, 250];

/// A point mass with position, velocity and a trail of past positions
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    mass: f64,
    pub pos: DVec3,
    pub vel: DVec3,
    radius: f64,
    pub color: Rgb,
    trajectory: VecDeque<DVec3>,
    trail_max_length: Option<usize>,
}

impl Body {
    /// Create a body. Fails unless `mass` is positive and finite.
    pub fn new(mass: f64, pos: DVec3, vel: DVec3, color: Rgb) -> SimResult<Self> {
        if !(mass > 0.0) || !mass.is_finite() {
            return Err(SimError::invalid("mass", mass));
        }

        Ok(Self {
            mass,
            pos,
            vel,
            radius: radius_for_mass(mass),
            color,
            trajectory: VecDeque::new(),
            trail_max_length: None,
        })
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Override the derived radius. Fails unless `radius` is non-negative and finite.
    pub fn with_radius(mut self, radius: f64) -> SimResult<Self> {
        if !(radius >= 0.0) || !radius.is_finite() {
            return Err(SimError::invalid("radius", radius));
        }
        self.radius = radius;
        Ok(self)
    }

    /// Keep at most `length` past positions, dropping the oldest first
    pub fn with_trail_length(mut self, length: usize) -> Self {
        self.trail_max_length = Some(length);
        self.trim_trajectory();
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Past positions, oldest first
    pub fn trajectory(&self) -> impl ExactSizeIterator<Item = &DVec3> + '_ {
        self.trajectory.iter()
    }

    pub fn trail_max_length(&self) -> Option<usize> {
        self.trail_max_length
    }

    pub fn trail_len(&self) -> usize {
        self.trajectory.len()
    }

    /// Advance one step under `field`.
    ///
    /// Order matters: record the trail, move with the old velocity, then
    /// accelerate.
    pub fn update(&mut self, field: DVec3, dt: f64) {
        self.trajectory.push_back(self.pos);
        self.trim_trajectory();

        self.pos += self.vel * dt;
        self.vel += field * dt;
    }

    fn trim_trajectory(&mut self) {
        if let Some(max) = self.trail_max_length {
            while self.trajectory.len() > max {
                self.trajectory.pop_front();
            }
        }
    }
}

impl Positioned for Body {
    fn position(&self) -> DVec3 {
        self.pos
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Body at ({}, {}, {})", self.pos.x, self.pos.y, self.pos.z)
    }
}

/// Radius proportional to cube root of mass (for volume scaling)
fn radius_for_mass(mass: f64) -> f64 {
    (mass / 1000.0).cbrt() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body() {
        let pos = DVec3::new(1.0, 2.0, 3.0);
        let vel = DVec3::new(3.0, 2.0, 1.0);
        let b = Body::new(1e10, pos, vel, WHITE).unwrap();

        assert_eq!(b.mass(), 1e10);
        assert_eq!(b.pos, pos);
        assert_eq!(b.vel, vel);
        assert_eq!(b.color, WHITE);
        assert_eq!(b.trail_len(), 0);
        assert_eq!(b.to_string(), "Body at (1, 2, 3)");
    }

    #[test]
    fn rejects_non_positive_mass() {
        for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Body::new(mass, DVec3::ZERO, DVec3::ZERO, WHITE);
            assert!(matches!(err, Err(SimError::InvalidConstruction { what: "mass", .. })));
        }
    }

    #[test]
    fn update_moves_before_accelerating() {
        let mut b = Body::new(10.0, DVec3::ZERO, DVec3::new(5.0, 0.0, 0.0), WHITE).unwrap();
        b.update(DVec3::new(0.0, 4.0, 0.0), 0.1);

        assert_eq!(b.pos, DVec3::new(0.5, 0.0, 0.0));
        assert!((b.vel - DVec3::new(5.0, 0.4, 0.0)).length() < 1e-15);
        assert_eq!(b.trajectory().copied().collect::<Vec<_>>(), vec![DVec3::ZERO]);
    }

    #[test]
    fn radius_grows_with_mass() {
        let light = Body::new(100.0, DVec3::ZERO, DVec3::ZERO, WHITE).unwrap();
        let heavy = Body::new(8000.0, DVec3::ZERO, DVec3::ZERO, WHITE).unwrap();
        assert!(heavy.radius() > light.radius());
        assert!((heavy.radius() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn radius_override_is_validated() {
        let b = Body::new(1.0, DVec3::ZERO, DVec3::ZERO, WHITE).unwrap();
        assert_eq!(b.clone().with_radius(2.5).unwrap().radius(), 2.5);
        assert_eq!(b.clone().with_radius(0.0).unwrap().radius(), 0.0);

        for radius in [-1.0, f64::NAN, f64::INFINITY] {
            let err = b.clone().with_radius(radius);
            assert!(matches!(err, Err(SimError::InvalidConstruction { what: "radius", .. })));
        }
    }

    #[test]
    fn capped_trail_drops_oldest() {
        let mut b = Body::new(1.0, DVec3::ZERO, DVec3::X, WHITE)
            .unwrap()
            .with_trail_length(3);

        for _ in 0..5 {
            b.update(DVec3::ZERO, 1.0);
        }

        let trail: Vec<_> = b.trajectory().map(|p| p.x).collect();
        assert_eq!(trail, vec![2.0, 3.0, 4.0]);
        assert_eq!(b.pos.x, 5.0);
    }
}
