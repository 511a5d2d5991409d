//! Vector helpers on top of glam's double precision types
//!
//! `DVec3` is the simulation vector; `DVec2` is the planar variant the camera
//! projects onto. Arithmetic, component-wise division and exact equality are
//! glam's own operators and `PartialEq`.

pub use glam::{DVec2, DVec3};

/// Extra operations the gravity engine needs from a vector type
pub trait VectorExt: Copy {
    /// Sum of the squared components
    fn norm_squared(self) -> f64;

    /// Unit vector in the same direction, or zero when the input has zero length
    fn versor(self) -> Self;
}

impl VectorExt for DVec3 {
    #[inline]
    fn norm_squared(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    fn versor(self) -> Self {
        let norm2 = self.norm_squared();
        if norm2 == 0.0 {
            return DVec3::ZERO;
        }
        self / norm2.sqrt()
    }
}

impl VectorExt for DVec2 {
    #[inline]
    fn norm_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    fn versor(self) -> Self {
        let norm2 = self.norm_squared();
        if norm2 == 0.0 {
            return DVec2::ZERO;
        }
        self / norm2.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versor_has_unit_length() {
        let samples = [
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(3.0, 4.0, 0.0),
            DVec3::new(-2.5, 7.0, 1e-3),
            DVec3::new(1e-8, -1e-8, 1e-8),
            DVec3::new(1e8, 2e8, -3e8),
        ];

        for v in samples {
            let n2 = v.versor().norm_squared();
            assert!((n2 - 1.0).abs() < 1e-12, "|versor({v})|^2 = {n2}");
        }
    }

    #[test]
    fn versor_of_zero_is_zero() {
        assert_eq!(DVec3::ZERO.versor(), DVec3::ZERO);
        assert_eq!(DVec2::ZERO.versor(), DVec2::ZERO);
    }

    #[test]
    fn versor_keeps_direction() {
        let v = DVec3::new(0.0, -4.0, 0.0);
        assert_eq!(v.versor(), DVec3::new(0.0, -1.0, 0.0));

        let p = DVec2::new(3.0, 4.0).versor();
        assert!((p.x - 0.6).abs() < 1e-15);
        assert!((p.y - 0.8).abs() < 1e-15);
    }

    #[test]
    fn norm_squared_sums_components() {
        assert_eq!(DVec3::new(1.0, 2.0, 3.0).norm_squared(), 14.0);
        assert_eq!(DVec2::new(-3.0, 4.0).norm_squared(), 25.0);
    }

    #[test]
    fn equality_is_exact() {
        let a = DVec3::new(0.1, 0.2, 0.3);
        let b = DVec3::new(0.1, 0.2, 0.3 + 1e-15);
        assert_ne!(a, b);
        assert_eq!(a, DVec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn component_divide() {
        let v = DVec3::new(4.0, 9.0, -8.0) / DVec3::new(2.0, 3.0, 4.0);
        assert_eq!(v, DVec3::new(2.0, 3.0, -2.0));
    }
}
