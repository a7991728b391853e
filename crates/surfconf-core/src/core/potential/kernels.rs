/// Energy and radial derivative `dE/dr` of the 12-6 Lennard-Jones potential
/// `4ε[(σ/r)^12 - (σ/r)^6]`.
#[inline]
pub fn lennard_jones_12_6(dist: f64, sigma: f64, epsilon: f64) -> (f64, f64) {
    if dist < 1e-6 {
        return (1e10, -1e10);
    }
    let s6 = (sigma / dist).powi(6);
    let s12 = s6 * s6;
    let energy = 4.0 * epsilon * (s12 - s6);
    let derivative = 4.0 * epsilon * (-12.0 * s12 + 6.0 * s6) / dist;
    (energy, derivative)
}

/// Lorentz-Berthelot combination of two `(sigma, epsilon)` pairs.
#[inline]
pub fn lorentz_berthelot(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    ((a.0 + b.0) / 2.0, (a.1 * b.1).sqrt())
}
