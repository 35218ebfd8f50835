//! Vector helpers layered over glam's `Vec3`.
//!
//! glam already provides dot, cross and the arithmetic operators. This module
//! adds the zero-safe normalisation the tracer relies on, a bounded component
//! accessor, and mirror reflection.

use crate::Vec3;

/// Extension methods for `Vec3`.
pub trait VectorExt {
    /// Euclidean length.
    fn norm(self) -> f32;

    /// Unit vector in the same direction.
    ///
    /// A zero-length (or non-finite) input returns `Vec3::ZERO` instead of
    /// NaN, so degenerate directions never poison later dot products.
    fn normalized(self) -> Vec3;

    /// Component by index: 0 = x, 1 = y, 2 = z. Any other index is `None`.
    fn component(self, index: usize) -> Option<f32>;
}

impl VectorExt for Vec3 {
    #[inline]
    fn norm(self) -> f32 {
        self.length()
    }

    #[inline]
    fn normalized(self) -> Vec3 {
        self.normalize_or_zero()
    }

    #[inline]
    fn component(self, index: usize) -> Option<f32> {
        match index {
            0 => Some(self.x),
            1 => Some(self.y),
            2 => Some(self.z),
            _ => None,
        }
    }
}

/// Reflect `incident` about the unit normal `normal`.
///
/// `reflect(I, N) = I - N * 2 * (I . N)`
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - normal * 2.0 * incident.dot(normal)
}
