use glam::Vec3;

/// Axis-aligned bounding box. An empty box has `min > max` on every axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box containing nothing; extending it with a point yields that point.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        points.into_iter().fold(Self::empty(), |mut bounds, point| {
            bounds.extend(point);
            bounds
        })
    }

    pub fn is_empty(&self) -> bool {
        self.max.cmplt(self.min).any()
    }

    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis, zero for an empty box.
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        self.max - self.min
    }

    /// True when the box spans some distance on at least one axis.
    pub fn has_extent(&self) -> bool {
        self.size().length_squared() > 0.0
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_center() {
        let aabb = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_aabb_size() {
        let aabb = AABB::new(Vec3::new(-1.0, 2.0, -3.0), Vec3::new(1.0, 5.0, 3.0));
        assert_eq!(aabb.size(), Vec3::new(2.0, 3.0, 6.0));
    }

    #[test]
    fn test_empty_aabb_has_no_size() {
        let aabb = AABB::empty();
        assert!(aabb.is_empty());
        assert_eq!(aabb.size(), Vec3::ZERO);
        assert_eq!(aabb.center(), Vec3::ZERO);
        assert!(!aabb.has_extent());
    }

    #[test]
    fn test_single_point_has_no_extent() {
        let aabb = AABB::from_points([Vec3::new(3.0, 3.0, 3.0)]);
        assert!(!aabb.is_empty());
        assert!(!aabb.has_extent());
    }

    #[test]
    fn test_flat_box_has_extent() {
        let aabb = AABB::from_points([Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0)]);
        assert!(aabb.has_extent());
        assert_eq!(aabb.size().z, 0.0);
    }

    #[test]
    fn test_aabb_union_contained() {
        let aabb1 = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(5.0, 5.0, 5.0));
        let aabb2 = AABB::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(2.0, 2.0, 2.0));
        let union = aabb1.union(&aabb2);
        assert_eq!(union.min, aabb1.min);
        assert_eq!(union.max, aabb1.max);
    }
}
