//! 2D camera mapping world space onto a pixel viewport

use glam::{DVec2, DVec3};
use log::debug;

use crate::constants::{DEFAULT_VIEWPORT, MIN_CAMERA_EXTENT};

/// Fraction of the extent removed per unit of zoom delta
const ZOOM_STEP: f64 = 0.1;

/// Anything with a world-space position the camera can frame
pub trait Positioned {
    fn position(&self) -> DVec3;
}

impl Positioned for DVec3 {
    fn position(&self) -> DVec3 {
        *self
    }
}

/// Orthographic 2D camera
///
/// `extent` is the world-space span shown across both viewport axes, so a
/// non-square viewport stretches the two axes independently. World +y points
/// up the screen.
#[derive(Debug, Clone)]
pub struct Camera2D {
    pub center: DVec2,
    extent: f64,
    min_extent: f64,
    viewport: (u32, u32),
    fitted: bool,
}

impl Camera2D {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            center: DVec2::ZERO,
            extent: MIN_CAMERA_EXTENT,
            min_extent: MIN_CAMERA_EXTENT,
            viewport: (width.max(1), height.max(1)),
            fitted: false,
        }
    }

    /// Override the smallest extent the camera will ever show
    pub fn with_min_extent(mut self, min_extent: f64) -> Self {
        self.min_extent = min_extent.max(f64::MIN_POSITIVE);
        self.extent = self.extent.max(self.min_extent);
        self
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }

    pub fn min_extent(&self) -> f64 {
        self.min_extent
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Whether the camera has been framed on a body set yet
    pub fn fitted(&self) -> bool {
        self.fitted
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
    }

    /// Frame the bounding box of the given points.
    ///
    /// Returns `false` and leaves the camera untouched when there are no points.
    pub fn fit_to_points<I>(&mut self, points: I) -> bool
    where
        I: IntoIterator<Item = DVec2>,
    {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            debug!("camera fit skipped: no points");
            return false;
        };

        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        let size = max - min;

        self.center = (min + max) / 2.0;
        self.extent = size.x.max(size.y).max(self.min_extent);
        self.fitted = true;

        debug!("camera fit: center={}, extent={}", self.center, self.extent);
        true
    }

    /// Frame the x/y bounding box of a body set
    pub fn fit_to_bodies<T: Positioned>(&mut self, bodies: &[T]) -> bool {
        self.fit_to_points(bodies.iter().map(|b| b.position().truncate()))
    }

    /// Fit on first use only; later calls keep the user's pan and zoom
    pub fn ensure_fitted<T: Positioned>(&mut self, bodies: &[T]) {
        if !self.fitted {
            self.fit_to_bodies(bodies);
        }
    }

    /// World position of the viewport's bottom-left corner
    fn lower_left(&self) -> DVec2 {
        self.center - DVec2::splat(self.extent / 2.0)
    }

    fn scale(&self) -> DVec2 {
        DVec2::new(self.viewport.0 as f64, self.viewport.1 as f64) / self.extent
    }

    /// Project a world position to pixel coordinates.
    ///
    /// Coordinates truncate toward zero, so anything less than a pixel past
    /// the left or top edge still lands on pixel 0.
    pub fn world_to_screen(&self, pos: DVec2) -> (i32, i32) {
        let scaled = (pos - self.lower_left()) * self.scale();
        let x = scaled.x;
        let y = self.viewport.1 as f64 - scaled.y;
        (x.trunc() as i32, y.trunc() as i32)
    }

    /// Inverse of [`Camera2D::world_to_screen`]
    pub fn screen_to_world(&self, px: i32, py: i32) -> DVec2 {
        let scaled = DVec2::new(px as f64, self.viewport.1 as f64 - py as f64);
        self.lower_left() + scaled / self.scale()
    }

    /// Move the camera center by a world-space displacement.
    ///
    /// Counts as framing: a later [`Camera2D::ensure_fitted`] keeps the view.
    pub fn pan(&mut self, displacement: DVec2) {
        if !displacement.is_finite() {
            return;
        }
        self.center += displacement;
        self.fitted = true;
    }

    /// Move the camera by a pixel displacement, screen y pointing down
    pub fn pan_pixels(&mut self, dx: i32, dy: i32) {
        let delta = DVec2::new(dx as f64, -(dy as f64)) / self.scale();
        self.pan(delta);
    }

    /// Positive delta zooms in. Never shrinks the extent below the minimum;
    /// a zoom that would make it non-finite is ignored.
    pub fn zoom(&mut self, delta: f64) {
        let extent = self.extent * (1.0 - delta * ZOOM_STEP);
        if !extent.is_finite() {
            return;
        }
        self.extent = extent.max(self.min_extent);
        self.fitted = true;
    }

    /// Whether a pixel lies inside the viewport, edges included
    pub fn is_visible(&self, (px, py): (i32, i32)) -> bool {
        px >= 0 && px as i64 <= self.viewport.0 as i64 && py >= 0 && py as i64 <= self.viewport.1 as i64
    }

    /// Whether a world position projects inside the viewport
    pub fn is_in_view(&self, pos: DVec2) -> bool {
        self.is_visible(self.world_to_screen(pos))
    }

    /// Pin a pixel to the nearest viewport edge
    pub fn clamp_to_viewport(&self, (px, py): (i32, i32)) -> (i32, i32) {
        let w = i32::try_from(self.viewport.0).unwrap_or(i32::MAX);
        let h = i32::try_from(self.viewport.1).unwrap_or(i32::MAX);
        (px.clamp(0, w), py.clamp(0, h))
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1)
    }
}
