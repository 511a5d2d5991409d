//! Simulation configuration

use common::constants::{DEFAULT_VIEWPORT, G, MIN_CAMERA_EXTENT};
use common::Camera2D;

use crate::error::{SimError, SimResult};

/// Fixed time step used by the interactive app
pub const DEFAULT_DT: f64 = 0.1;

/// Ticks per second of the interactive app
pub const DEFAULT_TICK_RATE: u32 = 30;

/// Knobs consumed by [`crate::World`], [`crate::Session`] and the camera
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub dt: f64,
    pub gravitational_constant: f64,
    pub tick_rate: u32,
    pub viewport: (u32, u32),
    pub min_camera_extent: f64,
    /// Maximum trail points kept per body, `None` keeps everything
    pub trail_max_length: Option<usize>,
}

impl SimConfig {
    /// Defaults with `G = 1`, which keeps orbits visible at pixel scales
    pub fn interactive() -> Self {
        Self {
            gravitational_constant: 1.0,
            ..Self::default()
        }
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = (width, height);
        self
    }

    pub fn with_min_camera_extent(mut self, extent: f64) -> Self {
        self.min_camera_extent = extent;
        self
    }

    pub fn with_trail_length(mut self, length: usize) -> Self {
        self.trail_max_length = Some(length);
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        validate_dt(self.dt)?;
        validate_gravitational_constant(self.gravitational_constant)?;
        if self.tick_rate == 0 {
            return Err(SimError::invalid("tick rate", 0.0));
        }
        if self.viewport.0 == 0 || self.viewport.1 == 0 {
            return Err(SimError::invalid("viewport size", 0.0));
        }
        if !(self.min_camera_extent > 0.0) || !self.min_camera_extent.is_finite() {
            return Err(SimError::invalid("minimum camera extent", self.min_camera_extent));
        }
        Ok(())
    }

    /// Camera sized and floored according to this configuration
    pub fn camera(&self) -> Camera2D {
        Camera2D::new(self.viewport.0, self.viewport.1).with_min_extent(self.min_camera_extent)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            gravitational_constant: G,
            tick_rate: DEFAULT_TICK_RATE,
            viewport: DEFAULT_VIEWPORT,
            min_camera_extent: MIN_CAMERA_EXTENT,
            trail_max_length: None,
        }
    }
}

pub(crate) fn validate_dt(dt: f64) -> SimResult<()> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid("time step", dt))
    }
}

pub(crate) fn validate_gravitational_constant(g: f64) -> SimResult<()> {
    if g >= 0.0 && g.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid("gravitational constant", g))
    }
}
