//! The gravitational engine: an owned body set advanced in fixed time steps

use common::{DVec3, VectorExt};
use log::{debug, warn};

use crate::body::Body;
use crate::config::{validate_dt, validate_gravitational_constant, SimConfig};
use crate::error::{SimError, SimResult};

/// The universe being simulated.
///
/// Bodies are kept sorted by depth (`pos.z`) after every insertion so a
/// renderer can draw them back to front. The order carries no physical
/// meaning.
///
/// Every mutator takes `&mut self`, so a step can never interleave with an
/// edit. Hosts that share a world across threads put the whole value behind
/// one `Mutex`.
#[derive(Debug, Clone)]
pub struct World {
    bodies: Vec<Body>,
    dt: f64,
    gravitational_constant: f64,
    trail_max_length: Option<usize>,
    elapsed: f64,
    steps: u64,
}

impl World {
    /// An empty world stepping by `dt` under gravitational constant `g`
    pub fn new(dt: f64, g: f64) -> SimResult<Self> {
        validate_dt(dt)?;
        validate_gravitational_constant(g)?;

        Ok(Self {
            bodies: Vec::new(),
            dt,
            gravitational_constant: g,
            trail_max_length: None,
            elapsed: 0.0,
            steps: 0,
        })
    }

    pub fn from_config(config: &SimConfig) -> SimResult<Self> {
        config.validate()?;

        let mut world = Self::new(config.dt, config.gravitational_constant)?;
        world.trail_max_length = config.trail_max_length;
        Ok(world)
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn gravitational_constant(&self) -> f64 {
        self.gravitational_constant
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Simulated time since the world was created
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Replace every body. An empty set is rejected and the world is left as it was.
    pub fn set_bodies(&mut self, bodies: Vec<Body>) -> SimResult<()> {
        if bodies.is_empty() {
            warn!("rejected empty body set");
            return Err(SimError::EmptyUniverse);
        }

        self.bodies = bodies.into_iter().map(|b| self.apply_trail_cap(b)).collect();
        self.sort_by_depth();
        debug!("body set replaced, {} bodies", self.bodies.len());
        Ok(())
    }

    pub fn add_body(&mut self, body: Body) {
        debug!("adding {body}");
        let body = self.apply_trail_cap(body);
        self.bodies.push(body);
        self.sort_by_depth();
    }

    /// Remove the body at `index`. Stale indices are ignored.
    pub fn remove_body(&mut self, index: usize) -> Option<Body> {
        if index >= self.bodies.len() {
            debug!("ignoring removal of stale index {index}");
            return None;
        }
        Some(self.bodies.remove(index))
    }

    /// Overwrite one body's velocity. Returns `false` for a stale index.
    pub fn set_velocity(&mut self, index: usize, vel: DVec3) -> bool {
        match self.bodies.get_mut(index) {
            Some(body) => {
                body.vel = vel;
                true
            }
            None => {
                debug!("ignoring velocity edit of stale index {index}");
                false
            }
        }
    }

    /// Advance every body by exactly one `dt`.
    ///
    /// All fields are computed from the state at the start of the step before
    /// any body moves, so the result does not depend on body order.
    pub fn step_time(&mut self) {
        let fields: Vec<DVec3> = (0..self.bodies.len()).map(|i| self.field_on_body(i)).collect();

        for (body, field) in self.bodies.iter_mut().zip(fields) {
            body.update(field, self.dt);
        }

        self.elapsed += self.dt;
        self.steps += 1;
    }

    /// Net field acting on the body at `index` from all the others
    pub fn field_at(&self, index: usize) -> Option<DVec3> {
        (index < self.bodies.len()).then(|| self.field_on_body(index))
    }

    fn field_on_body(&self, target: usize) -> DVec3 {
        let target_pos = self.bodies[target].pos;

        self.bodies
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != target)
            .map(|(_, source)| self.gravitational_field(source.mass(), source.pos - target_pos))
            .sum()
    }

    /// Field of a point mass `m` seen from displacement `r` (source minus target).
    /// Coincident points contribute nothing.
    fn gravitational_field(&self, m: f64, r: DVec3) -> DVec3 {
        let norm2 = r.norm_squared();
        if norm2 == 0.0 {
            return DVec3::ZERO;
        }
        (self.gravitational_constant * m / norm2) * r.versor()
    }

    /// Deep copy of the whole world, independent of it from here on
    pub fn snapshot(&self) -> World {
        self.clone()
    }

    /// Get the center of mass of all bodies
    pub fn center_of_mass(&self) -> DVec3 {
        let total_mass: f64 = self.bodies.iter().map(Body::mass).sum();
        if total_mass > 0.0 {
            self.bodies.iter().map(|b| b.pos * b.mass()).sum::<DVec3>() / total_mass
        } else {
            DVec3::ZERO
        }
    }

    pub fn total_momentum(&self) -> DVec3 {
        self.bodies.iter().map(|b| b.vel * b.mass()).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| 0.5 * b.mass() * b.vel.norm_squared()).sum()
    }

    /// Pairwise potential energy; coincident pairs are skipped like in the field
    pub fn potential_energy(&self) -> f64 {
        let mut energy = 0.0;
        for (i, a) in self.bodies.iter().enumerate() {
            for b in &self.bodies[i + 1..] {
                let dist = (b.pos - a.pos).length();
                if dist > 0.0 {
                    energy -= self.gravitational_constant * a.mass() * b.mass() / dist;
                }
            }
        }
        energy
    }

    fn apply_trail_cap(&self, body: Body) -> Body {
        match (self.trail_max_length, body.trail_max_length()) {
            (Some(max), None) => body.with_trail_length(max),
            _ => body,
        }
    }

    fn sort_by_depth(&mut self) {
        self.bodies.sort_by(|a, b| a.pos.z.total_cmp(&b.pos.z));
    }
}
