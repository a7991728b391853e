use super::{StepRule, cap_step};
use nalgebra::DVector;

const DT_START: f64 = 0.1;
const DT_MAX: f64 = 1.0;
const N_MIN: usize = 5;
const F_INC: f64 = 1.1;
const F_DEC: f64 = 0.5;
const ALPHA_START: f64 = 0.1;
const F_ALPHA: f64 = 0.99;

/// Fast inertial relaxation engine (Bitzek et al., PRL 97, 170201) with unit masses.
pub(super) struct Fire {
    velocity: Option<DVector<f64>>,
    dt: f64,
    alpha: f64,
    downhill_steps: usize,
    max_step: f64,
}

impl Fire {
    pub(super) fn new(max_step: f64) -> Self {
        Self {
            velocity: None,
            dt: DT_START,
            alpha: ALPHA_START,
            downhill_steps: 0,
            max_step,
        }
    }
}

impl StepRule for Fire {
    fn step(&mut self, _positions: &DVector<f64>, forces: &DVector<f64>) -> DVector<f64> {
        let mut velocity = match self.velocity.take() {
            None => DVector::zeros(forces.len()),
            Some(v) => {
                let power = v.dot(forces);
                if power > 0.0 {
                    let force_norm = forces.norm();
                    let mixed = if force_norm > 0.0 {
                        &v * (1.0 - self.alpha) + forces * (self.alpha * v.norm() / force_norm)
                    } else {
                        v
                    };
                    if self.downhill_steps > N_MIN {
                        self.dt = (self.dt * F_INC).min(DT_MAX);
                        self.alpha *= F_ALPHA;
                    }
                    self.downhill_steps += 1;
                    mixed
                } else {
                    self.dt *= F_DEC;
                    self.alpha = ALPHA_START;
                    self.downhill_steps = 0;
                    DVector::zeros(forces.len())
                }
            }
        };

        velocity += forces * self.dt;
        let mut step = &velocity * self.dt;
        cap_step(&mut step, self.max_step);
        self.velocity = Some(velocity);
        step
    }
}
