//! 2D N-body gravity simulation engine
//!
//! Point masses interact through Newtonian gravity with direct pairwise
//! summation and a fixed-step Euler update. Rendering, windowing and input
//! live outside this crate; they read the [`World`] through [`instance`] and
//! the shared [`common::Camera2D`], and edit it through [`Session`].

pub mod body;
pub mod config;
pub mod error;
pub mod instance;
pub mod presets;
pub mod session;
pub mod world;

pub use body::{Body, Rgb};
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use presets::Preset;
pub use session::{Phase, Session};
pub use world::World;
