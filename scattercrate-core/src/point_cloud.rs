//! Ordered point sequences

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Points in the order the loader produced them
///
/// Once a cloud has been handed to a [`PointCloudStore`](crate::PointCloudStore)
/// it is only ever replaced as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud<T> {
    pub points: Vec<T>,
}

impl<T> PointCloud<T> {
    pub fn new() -> Self {
        Self::from_points(Vec::new())
    }

    pub fn from_points(points: Vec<T>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point after the existing ones
    pub fn push(&mut self, point: T) {
        self.points.push(point);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.points.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.points.get(index)
    }
}

impl<T> Default for PointCloud<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for PointCloud<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.points[index]
    }
}

impl<'a, T> IntoIterator for &'a PointCloud<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for PointCloud<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point3f;

    #[test]
    fn test_collect_keeps_order() {
        let cloud: PointCloud<Point3f> = (0..4)
            .map(|i| Point3f::new(i as f32, 0.0, 0.0))
            .collect();
        assert_eq!(cloud.len(), 4);
        for (i, point) in (&cloud).into_iter().enumerate() {
            assert_eq!(point.x, i as f32);
        }
        assert_eq!(cloud[2], Point3f::new(2.0, 0.0, 0.0));
        assert!(cloud.get(4).is_none());
    }
}
