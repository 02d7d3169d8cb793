//! Axis-aligned bounding boxes
//!
//! Every entity uses the same convention: the box center is the entity
//! position and the half-extents are half of its size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box stored as center + half-extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    /// Square box of side `size`
    pub fn square(center: Vec2, size: f32) -> Self {
        Self::new(center, Vec2::splat(size))
    }

    /// Box circumscribing a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            half_extents: Vec2::splat(radius),
        }
    }

    /// Build from a bottom-left corner (layouts authored corner-anchored)
    pub fn from_corner(corner: Vec2, size: Vec2) -> Self {
        Self::new(corner + size * 0.5, size)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    /// Overlap test with half-open intervals: touching edges do not intersect
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}
