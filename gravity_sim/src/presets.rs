//! Ready-made initial body sets

use common::DVec3;
use rand::Rng;
use std::f64::consts::TAU;

use crate::body::{Body, Rgb};
use crate::error::SimResult;

const RED: Rgb = [200, 20, 20];
const GREEN: Rgb = [20, 200, 20];
const BLUE: Rgb = [20, 20, 200];
const STAR: Rgb = [255, 230, 150];

/// Named starting configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    TwoBody,
    ThreeBody,
    FigureEight,
    SolarSystem,
    Disk,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::TwoBody,
        Preset::ThreeBody,
        Preset::FigureEight,
        Preset::SolarSystem,
        Preset::Disk,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::TwoBody => "two_body",
            Preset::ThreeBody => "three_body",
            Preset::FigureEight => "figure_eight",
            Preset::SolarSystem => "solar_system",
            Preset::Disk => "disk",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Build the bodies; `g` only matters for presets that compute orbital speeds
    pub fn bodies<R: Rng>(self, rng: &mut R, g: f64) -> SimResult<Vec<Body>> {
        match self {
            Preset::TwoBody => two_body(),
            Preset::ThreeBody => three_body(),
            Preset::FigureEight => figure_eight(),
            Preset::SolarSystem => solar_system(rng, g),
            Preset::Disk => disk(rng, g, 200),
        }
    }
}

/// Two equal masses swinging around each other
pub fn two_body() -> SimResult<Vec<Body>> {
    Ok(vec![
        Body::new(5000.0, DVec3::new(20.0, 0.0, 0.0), DVec3::new(-5.0, -5.0, 0.0), RED)?,
        Body::new(5000.0, DVec3::new(-20.0, 0.0, 0.0), DVec3::new(5.0, 5.0, 0.0), GREEN)?,
    ])
}

/// Three equal masses with unrelated initial velocities
pub fn three_body() -> SimResult<Vec<Body>> {
    Ok(vec![
        Body::new(1000.0, DVec3::new(50.0, 0.0, 0.0), DVec3::new(-10.0, 5.0, 0.0), RED)?,
        Body::new(1000.0, DVec3::new(5.0, -15.0, 0.0), DVec3::new(7.0, 0.0, 0.0), GREEN)?,
        Body::new(1000.0, DVec3::new(0.0, 30.0, 0.0), DVec3::new(1.0, -5.0, 0.0), BLUE)?,
    ])
}

/// The three-body figure-eight choreography, scaled for `G = 1`
pub fn figure_eight() -> SimResult<Vec<Body>> {
    let pos = 10.0 * DVec3::new(-0.97000436, 0.24308753, 0.0);
    let vel_center = 10.0 * DVec3::new(-0.93240737, -0.86473146, 0.0);
    let vel_outer = 10.0 * DVec3::new(0.4662036850, 0.4323657300, 0.0);

    Ok(vec![
        Body::new(1000.0, pos, vel_outer, RED)?,
        Body::new(1000.0, DVec3::ZERO, vel_center, GREEN)?,
        Body::new(1000.0, -pos, vel_outer, BLUE)?,
    ])
}

/// Circular orbit velocity around `central_mass` at `offset` from it
fn orbital_velocity(g: f64, central_mass: f64, offset: DVec3) -> DVec3 {
    let distance = offset.length();
    if distance == 0.0 {
        return DVec3::ZERO;
    }
    // v = sqrt(G*M/r), perpendicular to the radius in the x/y plane
    let speed = (g * central_mass / distance).sqrt();
    DVec3::new(-offset.y, offset.x, 0.0) / distance * speed
}

/// A star with six planets on circular orbits at random phases
pub fn solar_system<R: Rng>(rng: &mut R, g: f64) -> SimResult<Vec<Body>> {
    let star_mass = 10000.0;
    let mut bodies = vec![Body::new(star_mass, DVec3::ZERO, DVec3::ZERO, STAR)?];

    for i in 0..6 {
        let distance = 20.0 + (i as f64) * 15.0;
        let angle: f64 = rng.gen::<f64>() * TAU;
        let position = DVec3::new(angle.cos() * distance, angle.sin() * distance, 0.0);

        let mass = 50.0 + rng.gen::<f64>() * 200.0;
        let color = [
            rng.gen_range(80..=250),
            rng.gen_range(80..=250),
            rng.gen_range(80..=250),
        ];
        bodies.push(Body::new(mass, position, orbital_velocity(g, star_mass, position), color)?);
    }

    Ok(bodies)
}

/// A heavy center with `count` light particles on roughly circular orbits
pub fn disk<R: Rng>(rng: &mut R, g: f64, count: usize) -> SimResult<Vec<Body>> {
    let central_mass = 50000.0;
    let mut bodies = vec![Body::new(central_mass, DVec3::ZERO, DVec3::ZERO, STAR)?];

    for _ in 0..count {
        let distance = 15.0 + rng.gen::<f64>() * 80.0;
        let angle: f64 = rng.gen::<f64>() * TAU;
        let position = DVec3::new(angle.cos() * distance, angle.sin() * distance, 0.0);

        let speed_variation = 0.9 + rng.gen::<f64>() * 0.2;
        let velocity = orbital_velocity(g, central_mass, position) * speed_variation;

        let mass = 10.0 + rng.gen::<f64>() * 50.0;
        bodies.push(Body::new(mass, position, velocity, BLUE)?);
    }

    Ok(bodies)
}
