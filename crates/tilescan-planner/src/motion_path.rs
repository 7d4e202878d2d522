//! The planned stage path.
//!
//! Rows are stored top to bottom in visiting order. Even rows run left to
//! right and odd rows run right to left, so consecutive points are always
//! neighbours on the stage.

use crate::coverage::AxisPlan;
use serde::{Deserialize, Serialize};
use tilescan_core::Point2D;

/// Immutable snake-ordered grid of stage targets in micrometres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionPath {
    rows: Vec<Vec<Point2D>>,
    /// Horizontal axis geometry
    pub x: AxisPlan,
    /// Vertical axis geometry
    pub y: AxisPlan,
}

impl MotionPath {
    pub(crate) fn new(rows: Vec<Vec<Point2D>>, x: AxisPlan, y: AxisPlan) -> Self {
        debug_assert_eq!(rows.len(), y.steps);
        debug_assert!(rows.iter().all(|row| row.len() == x.steps));
        Self { rows, x, y }
    }

    /// Rows in visiting order, each in travel order
    pub fn rows(&self) -> &[Vec<Point2D>] {
        &self.rows
    }

    /// Number of rows (`n_y`)
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of points per row (`n_x`)
    pub fn num_columns(&self) -> usize {
        self.x.steps
    }

    /// Total number of stage targets
    pub fn len(&self) -> usize {
        self.num_rows() * self.num_columns()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All points in the order the stage visits them
    pub fn points(&self) -> impl Iterator<Item = &Point2D> + '_ {
        self.rows.iter().flatten()
    }

    /// Physical column of the `travel_index`-th point visited in `row`, or
    /// `None` if the row has no such point
    pub fn column_index(&self, row: usize, travel_index: usize) -> Option<usize> {
        if row >= self.num_rows() || travel_index >= self.num_columns() {
            return None;
        }
        if row % 2 == 0 {
            Some(travel_index)
        } else {
            Some(self.num_columns() - travel_index - 1)
        }
    }

    /// Row `row` rearranged left to right, or `None` if out of range
    pub fn row_in_physical_order(&self, row: usize) -> Option<Vec<Point2D>> {
        let points = self.rows.get(row)?;
        let mut ordered = points.clone();
        if row % 2 == 1 {
            ordered.reverse();
        }
        Some(ordered)
    }

    /// Total stage travel from the first to the last point (um)
    pub fn travel_distance_um(&self) -> f64 {
        self.points()
            .zip(self.points().skip(1))
            .map(|(a, b)| a.distance_to(b))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MotionPath {
        let x = AxisPlan::new(10.0, 20.0);
        let y = AxisPlan::new(10.0, 10.0);
        let rows = vec![
            vec![
                Point2D::new(0.0, 10.0),
                Point2D::new(10.0, 10.0),
                Point2D::new(20.0, 10.0),
            ],
            vec![
                Point2D::new(20.0, 0.0),
                Point2D::new(10.0, 0.0),
                Point2D::new(0.0, 0.0),
            ],
        ];
        MotionPath::new(rows, x, y)
    }

    #[test]
    fn test_dimensions() {
        let path = sample();
        assert_eq!(path.num_rows(), 2);
        assert_eq!(path.num_columns(), 3);
        assert_eq!(path.len(), 6);
        assert!(!path.is_empty());
        assert_eq!(path.points().count(), 6);
    }

    #[test]
    fn test_column_index() {
        let path = sample();
        assert_eq!(path.column_index(0, 0), Some(0));
        assert_eq!(path.column_index(0, 2), Some(2));
        assert_eq!(path.column_index(1, 0), Some(2));
        assert_eq!(path.column_index(1, 2), Some(0));
    }

    #[test]
    fn test_column_index_out_of_range() {
        let path = sample();
        assert_eq!(path.column_index(1, 3), None);
        assert_eq!(path.column_index(0, usize::MAX), None);
        assert_eq!(path.column_index(2, 0), None);
    }

    #[test]
    fn test_row_in_physical_order() {
        let path = sample();
        let row = path.row_in_physical_order(1).unwrap();
        assert_eq!(row[0], Point2D::new(0.0, 0.0));
        assert_eq!(row[2], Point2D::new(20.0, 0.0));
        assert!(path.row_in_physical_order(2).is_none());
    }

    #[test]
    fn test_travel_distance() {
        // 20 across, 10 down, 20 back
        assert_eq!(sample().travel_distance_um(), 50.0);
    }
}
