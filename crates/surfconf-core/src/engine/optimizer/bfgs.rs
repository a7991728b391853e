use super::{StepRule, cap_step};
use nalgebra::{DMatrix, DVector, SymmetricEigen};

// Initial Hessian guess in eV/Å².
const INITIAL_CURVATURE: f64 = 70.0;
const CURVATURE_EPSILON: f64 = 1e-12;

/// Quasi-Newton minimizer with a dense Hessian estimate.
///
/// Steps are taken along the Newton direction of the current Hessian with absolute
/// eigenvalues, which keeps the step downhill even when the estimate is indefinite.
pub(super) struct Bfgs {
    hessian: DMatrix<f64>,
    previous: Option<(DVector<f64>, DVector<f64>)>,
    max_step: f64,
}

impl Bfgs {
    pub(super) fn new(dimension: usize, max_step: f64) -> Self {
        Self {
            hessian: DMatrix::identity(dimension, dimension) * INITIAL_CURVATURE,
            previous: None,
            max_step,
        }
    }

    fn update(&mut self, positions: &DVector<f64>, forces: &DVector<f64>) {
        let Some((r0, f0)) = &self.previous else {
            return;
        };
        let dr = positions - r0;
        if dr.amax() < 1e-7 {
            return;
        }
        let df = forces - f0;
        let a = dr.dot(&df);
        let dg = &self.hessian * &dr;
        let b = dr.dot(&dg);
        if a.abs() < CURVATURE_EPSILON || b.abs() < CURVATURE_EPSILON {
            return;
        }
        self.hessian -= (&df * df.transpose()) / a + (&dg * dg.transpose()) / b;
    }
}

impl StepRule for Bfgs {
    fn step(&mut self, positions: &DVector<f64>, forces: &DVector<f64>) -> DVector<f64> {
        self.update(positions, forces);

        let eigen = SymmetricEigen::new(self.hessian.clone());
        let projected = eigen.eigenvectors.transpose() * forces;
        let scaled = projected.zip_map(&eigen.eigenvalues, |f, omega| {
            f / omega.abs().max(CURVATURE_EPSILON)
        });
        let mut step = &eigen.eigenvectors * scaled;
        cap_step(&mut step, self.max_step);

        self.previous = Some((positions.clone(), forces.clone()));
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_follows_force_over_initial_curvature() {
        let mut bfgs = Bfgs::new(3, 0.2);
        let forces = DVector::from_vec(vec![0.7, 0.0, -1.4]);

        let step = bfgs.step(&DVector::zeros(3), &forces);

        assert!((step[0] - 0.01).abs() < 1e-12);
        assert!((step[2] + 0.02).abs() < 1e-12);
    }

    #[test]
    fn large_forces_are_capped_per_atom() {
        let mut bfgs = Bfgs::new(3, 0.2);
        let forces = DVector::from_vec(vec![700.0, 0.0, 0.0]);

        let step = bfgs.step(&DVector::zeros(3), &forces);

        assert!((step.norm() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn update_learns_curvature_of_quadratic_well() {
        // E = k/2 x^2 with k = 2; force = -2x.
        let k = 2.0;
        let mut bfgs = Bfgs::new(1, 10.0);
        let mut x = DVector::from_vec(vec![1.0]);

        for _ in 0..3 {
            let f = &x * -k;
            let dx = bfgs.step(&x, &f);
            x += dx;
        }

        assert!((bfgs.hessian[(0, 0)] - k).abs() < 1e-9);
        assert!(x[0].abs() < 1e-9);
    }
}
