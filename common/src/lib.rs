//! Common utilities for gravity simulations
//!
//! This crate provides the shared vector helpers and the 2D camera projection
//! used by the gravity simulation engine and whatever renders it.

pub mod camera;
pub mod vector;

pub use camera::*;
pub use vector::*;

/// Physical constants and view defaults used in simulations
pub mod constants {
    /// Newtonian gravitational constant in SI units
    pub const G: f64 = 6.67408e-11;

    /// Smallest world-space span the camera may show
    pub const MIN_CAMERA_EXTENT: f64 = 50.0;

    /// Default viewport in pixels
    pub const DEFAULT_VIEWPORT: (u32, u32) = (800, 600);
}
