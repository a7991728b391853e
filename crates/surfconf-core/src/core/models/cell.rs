use nalgebra::{Matrix3, Point3, Vector3};

/// A periodic simulation cell.
///
/// The three lattice vectors are stored as the rows of `vectors`, so a point with
/// fractional coordinates `f` sits at `f[0] * a + f[1] * b + f[2] * c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    vectors: Matrix3<f64>,
    pbc: [bool; 3],
}

impl Cell {
    pub fn new(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>, pbc: [bool; 3]) -> Self {
        Self {
            vectors: Matrix3::from_rows(&[a.transpose(), b.transpose(), c.transpose()]),
            pbc,
        }
    }

    /// Creates a cell with mutually orthogonal lattice vectors along x, y and z.
    #[cfg(test)]
    pub(crate) fn orthorhombic(a: f64, b: f64, c: f64, pbc: [bool; 3]) -> Self {
        Self::new(
            Vector3::new(a, 0.0, 0.0),
            Vector3::new(0.0, b, 0.0),
            Vector3::new(0.0, 0.0, c),
            pbc,
        )
    }

    pub fn vector(&self, axis: usize) -> Vector3<f64> {
        self.vectors.row(axis).transpose()
    }

    pub fn pbc(&self) -> [bool; 3] {
        self.pbc
    }

    pub fn is_periodic(&self) -> bool {
        self.pbc.iter().any(|&p| p)
    }

    pub fn lengths(&self) -> [f64; 3] {
        [
            self.vector(0).norm(),
            self.vector(1).norm(),
            self.vector(2).norm(),
        ]
    }

    /// Returns the cell angles `[alpha, beta, gamma]` in degrees.
    pub fn angles(&self) -> [f64; 3] {
        let angle = |u: Vector3<f64>, v: Vector3<f64>| u.angle(&v).to_degrees();
        [
            angle(self.vector(1), self.vector(2)),
            angle(self.vector(0), self.vector(2)),
            angle(self.vector(0), self.vector(1)),
        ]
    }

    pub fn volume(&self) -> f64 {
        self.vectors.determinant().abs()
    }

    /// Returns the distance between opposite faces of the cell along each lattice direction.
    pub fn perpendicular_widths(&self) -> [f64; 3] {
        let volume = self.volume();
        let (a, b, c) = (self.vector(0), self.vector(1), self.vector(2));
        [
            volume / b.cross(&c).norm(),
            volume / a.cross(&c).norm(),
            volume / a.cross(&b).norm(),
        ]
    }

    /// Converts a cartesian position into fractional coordinates.
    ///
    /// Returns `None` for a degenerate cell.
    pub fn to_fractional(&self, position: &Point3<f64>) -> Option<Vector3<f64>> {
        let inverse = self.vectors.transpose().try_inverse()?;
        Some(inverse * position.coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn orthorhombic_cell_has_right_angles_and_volume() {
        let cell = Cell::orthorhombic(2.0, 3.0, 4.0, [true, true, false]);

        assert_eq!(cell.lengths(), [2.0, 3.0, 4.0]);
        for angle in cell.angles() {
            assert!(f64_approx_equal(angle, 90.0));
        }
        assert!(f64_approx_equal(cell.volume(), 24.0));
    }

    #[test]
    fn hexagonal_cell_reports_gamma_of_sixty_degrees() {
        let cell = Cell::new(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.5, 3f64.sqrt() / 2.0, 0.0),
            Vector3::new(0.0, 0.0, 5.0),
            [true, true, false],
        );

        let [alpha, beta, gamma] = cell.angles();
        assert!(f64_approx_equal(alpha, 90.0));
        assert!(f64_approx_equal(beta, 90.0));
        assert!(f64_approx_equal(gamma, 60.0));
    }

    #[test]
    fn perpendicular_widths_of_sheared_cell() {
        let cell = Cell::new(
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(1.0, 2.0, 0.0),
            Vector3::new(0.0, 0.0, 3.0),
            [true, true, true],
        );

        let [wa, wb, wc] = cell.perpendicular_widths();
        assert!(f64_approx_equal(wa, 4.0 / 5f64.sqrt()));
        assert!(f64_approx_equal(wb, 2.0));
        assert!(f64_approx_equal(wc, 3.0));
    }

    #[test]
    fn lattice_points_map_to_integer_fractional_coordinates() {
        let cell = Cell::new(
            Vector3::new(4.0, 0.0, 0.0),
            Vector3::new(2.0, 3.0, 0.0),
            Vector3::new(0.0, 0.0, 10.0),
            [true, true, false],
        );
        let point = Point3::from(cell.vector(0) * 2.0 + cell.vector(1) + cell.vector(2) * 0.5);

        let frac = cell.to_fractional(&point).unwrap();

        assert!((frac - Vector3::new(2.0, 1.0, 0.5)).norm() < TOLERANCE);
    }

    #[test]
    fn degenerate_cell_has_no_fractional_coordinates() {
        let cell = Cell::orthorhombic(1.0, 0.0, 1.0, [true, true, true]);
        assert!(cell.to_fractional(&Point3::origin()).is_none());
    }
}
