//! Interactive session: build a universe, then run it
//!
//! A session owns the [`World`], the camera that frames it and the snapshot
//! taken when the run started. Structural edits are only accepted during
//! [`Phase::Construction`]; once running, the world only changes by stepping.

use std::time::Duration;

use common::{Camera2D, DVec3};
use log::{debug, info};

use crate::body::{Body, Rgb};
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::instance::MARKER_RADIUS;
use crate::world::World;

/// Mass given to bodies placed with the pointer
pub const NEW_BODY_MASS: f64 = 100.0;

/// A drag shorter than this many body radii does not set a velocity
const DRAG_DEAD_ZONE: f64 = 1.2;

/// Velocity per unit of drag length
const DRAG_VELOCITY_SCALE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Construction,
    Running,
}

#[derive(Debug)]
pub struct Session {
    world: World,
    initial: Option<World>,
    camera: Camera2D,
    phase: Phase,
    paused: bool,
    tick_rate: u32,
    selected: Option<usize>,
}

impl Session {
    pub fn new(config: &SimConfig) -> SimResult<Self> {
        Ok(Self {
            world: World::from_config(config)?,
            initial: None,
            camera: config.camera(),
            phase: Phase::Construction,
            paused: false,
            tick_rate: config.tick_rate,
            selected: None,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    /// Pan and zoom are allowed in every phase
    pub fn camera_mut(&mut self) -> &mut Camera2D {
        &mut self.camera
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// Wall-clock time between ticks at the current rate
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate as f64)
    }

    pub fn tick_rate_up(&mut self) {
        self.tick_rate = self.tick_rate.saturating_add(1);
    }

    pub fn tick_rate_down(&mut self) {
        self.tick_rate = self.tick_rate.saturating_sub(1).max(1);
    }

    fn constructing(&self, action: &str) -> bool {
        if self.phase != Phase::Construction {
            debug!("ignoring {action} while running");
            return false;
        }
        true
    }

    /// Replace the whole body set
    pub fn set_bodies(&mut self, bodies: Vec<Body>) -> SimResult<bool> {
        if !self.constructing("body set replacement") {
            return Ok(false);
        }
        self.world.set_bodies(bodies)?;
        self.selected = None;
        Ok(true)
    }

    /// Place a resting body at the world position under a pixel
    pub fn add_body_at(&mut self, px: i32, py: i32, color: Rgb) -> SimResult<bool> {
        if !self.constructing("body placement") {
            return Ok(false);
        }

        let pos = self.camera.screen_to_world(px, py).extend(0.0);
        self.world.add_body(Body::new(NEW_BODY_MASS, pos, DVec3::ZERO, color)?);
        self.selected = None;
        Ok(true)
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.world.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Select the body whose on-screen disc is nearest to the pixel
    pub fn select_at(&mut self, px: i32, py: i32) -> Option<usize> {
        let reach = (MARKER_RADIUS as i64).pow(2);

        let hit = self
            .world
            .bodies()
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let (bx, by) = self.camera.world_to_screen(b.pos.truncate());
                let (dx, dy) = (bx as i64 - px as i64, by as i64 - py as i64);
                (i, dx * dx + dy * dy)
            })
            .filter(|&(_, d2)| d2 <= reach)
            .min_by_key(|&(_, d2)| d2)
            .map(|(i, _)| i);

        self.selected = hit;
        hit
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Aim the selected body's velocity at the pixel.
    ///
    /// Drags inside the body's own dead zone are ignored and keep the
    /// selection; a successful edit clears it.
    pub fn drag_velocity_to(&mut self, px: i32, py: i32) -> bool {
        if !self.constructing("velocity edit") {
            return false;
        }
        let Some(index) = self.selected else {
            return false;
        };
        let Some(body) = self.world.body(index) else {
            self.selected = None;
            return false;
        };

        let target = self.camera.screen_to_world(px, py).extend(body.pos.z);
        let drag = target - body.pos;
        if !(drag.length() > DRAG_DEAD_ZONE * body.radius()) {
            return false;
        }

        let applied = self.world.set_velocity(index, DRAG_VELOCITY_SCALE * drag);
        self.selected = None;
        applied
    }

    /// Remove the selected body, if any
    pub fn remove_selected(&mut self) -> Option<Body> {
        if !self.constructing("body removal") {
            return None;
        }
        let index = self.selected.take()?;
        self.world.remove_body(index)
    }

    /// Leave construction and start running from a captured snapshot
    pub fn start(&mut self) -> SimResult<()> {
        if self.phase == Phase::Running {
            return Ok(());
        }
        if self.world.is_empty() {
            return Err(SimError::EmptyUniverse);
        }

        self.initial = Some(self.world.snapshot());
        self.camera.ensure_fitted(self.world.bodies());
        self.phase = Phase::Running;
        self.selected = None;
        info!("simulation started with {} bodies", self.world.len());
        Ok(())
    }

    /// Advance one tick. Returns whether the world was stepped.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Running || self.paused {
            return false;
        }
        self.camera.ensure_fitted(self.world.bodies());
        self.world.step_time();
        true
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!("simulation {}", if self.paused { "paused" } else { "resumed" });
    }

    /// Restore the world captured by [`Session::start`]
    pub fn reset(&mut self) -> bool {
        match &self.initial {
            Some(initial) => {
                self.world = initial.snapshot();
                info!("simulation reset to its initial state");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::WHITE;
    use common::DVec2;

    fn session() -> Session {
        Session::new(&SimConfig::interactive()).unwrap()
    }

    #[test]
    fn placed_body_lands_under_pointer() {
        let mut s = session();
        assert!(s.add_body_at(400, 300, WHITE).unwrap());

        let body = &s.world().bodies()[0];
        assert_eq!(body.mass(), NEW_BODY_MASS);
        assert!(body.pos.truncate().length() < 0.1);
        assert_eq!(body.vel, DVec3::ZERO);
    }

    #[test]
    fn select_nearest_disc() {
        let mut s = session();
        s.add_body_at(400, 300, WHITE).unwrap();
        s.add_body_at(600, 300, WHITE).unwrap();

        assert_eq!(s.select_at(598, 303), Some(1));
        assert_eq!(s.select_at(100, 100), None);
        assert_eq!(s.selected(), None);
        assert!(!s.select(7));
    }

    #[test]
    fn drag_sets_velocity_outside_dead_zone() {
        let mut s = session();
        s.add_body_at(400, 300, WHITE).unwrap();
        s.select(0);

        assert!(!s.drag_velocity_to(400, 300));
        assert_eq!(s.selected(), Some(0));

        assert!(s.drag_velocity_to(560, 300));
        assert_eq!(s.selected(), None);
        let vel = s.world().bodies()[0].vel;
        assert!((vel.x - 5.0).abs() < 0.1, "vel {vel}");
        assert!(vel.y.abs() < 0.1);
    }

    #[test]
    fn start_keeps_manual_framing() {
        let mut s = session();
        s.add_body_at(300, 300, WHITE).unwrap();
        s.add_body_at(500, 300, WHITE).unwrap();
        s.camera_mut().pan(DVec2::new(40.0, 0.0));
        s.camera_mut().zoom(-5.0);
        let before = (s.camera().center, s.camera().extent());

        s.start().unwrap();
        assert_eq!((s.camera().center, s.camera().extent()), before);

        s.tick();
        assert_eq!((s.camera().center, s.camera().extent()), before);
    }

    #[test]
    fn start_fits_untouched_camera() {
        let mut s = session();
        s.add_body_at(300, 300, WHITE).unwrap();
        s.add_body_at(500, 300, WHITE).unwrap();
        assert!(!s.camera().fitted());

        s.start().unwrap();
        assert!(s.camera().fitted());
        assert!(s.camera().center.length() < 1e-9);
    }

    #[test]
    fn remove_selected_body() {
        let mut s = session();
        s.add_body_at(400, 300, WHITE).unwrap();
        assert!(s.remove_selected().is_none());

        s.select(0);
        assert!(s.remove_selected().is_some());
        assert!(s.world().is_empty());
    }

    #[test]
    fn cannot_start_empty() {
        let mut s = session();
        assert_eq!(s.start(), Err(SimError::EmptyUniverse));
        assert_eq!(s.phase(), Phase::Construction);
        assert!(!s.tick());
    }

    #[test]
    fn edits_ignored_while_running() {
        let mut s = session();
        s.add_body_at(400, 300, WHITE).unwrap();
        s.start().unwrap();

        assert!(!s.add_body_at(10, 10, WHITE).unwrap());
        s.select(0);
        assert!(s.remove_selected().is_none());
        assert_eq!(s.world().len(), 1);
    }

    #[test]
    fn pause_and_reset() {
        let mut s = session();
        s.add_body_at(300, 300, WHITE).unwrap();
        s.add_body_at(500, 300, WHITE).unwrap();
        s.start().unwrap();
        let start = s.world().bodies()[0].pos;

        assert!(s.tick());
        s.toggle_pause();
        assert!(!s.tick());
        assert_eq!(s.world().steps(), 1);

        s.toggle_pause();
        s.tick();
        assert_ne!(s.world().bodies()[0].pos, start);

        assert!(s.reset());
        assert_eq!(s.world().steps(), 0);
        assert_eq!(s.world().bodies()[0].pos, start);
    }

    #[test]
    fn tick_rate_stays_positive() {
        let mut s = session();
        for _ in 0..100 {
            s.tick_rate_down();
        }
        assert_eq!(s.tick_rate(), 1);
        s.tick_rate_up();
        assert_eq!(s.tick_interval(), Duration::from_millis(500));
    }
}
