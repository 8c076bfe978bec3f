use crate::state::idx;
use super::core::divergence_at;

/// Sum of a scalar field over interior cells.
pub fn total_mass(field: &[f64], size: usize) -> f64 {
    let mut sum = 0.0;
    for i in 1..(size - 1) {
        for j in 1..(size - 1) {
            sum += field[idx(i, j, size)];
        }
    }
    sum
}

/// Smallest interior value. Dye should never dip below zero unless negative
/// amounts were injected.
pub fn min_value(field: &[f64], size: usize) -> f64 {
    let mut min = f64::INFINITY;
    for i in 1..(size - 1) {
        for j in 1..(size - 1) {
            min = min.min(field[idx(i, j, size)]);
        }
    }
    min
}

/// Compute interior-averaged kinetic energy: KE = 0.5 * <vx² + vy²>.
pub fn kinetic_energy(vx: &[f64], vy: &[f64], size: usize) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for i in 1..(size - 1) {
        for j in 1..(size - 1) {
            let ii = idx(i, j, size);
            sum += vx[ii] * vx[ii] + vy[ii] * vy[ii];
            count += 1;
        }
    }
    if count > 0 { 0.5 * sum / count as f64 } else { 0.0 }
}

/// L2 norm over interior cells of the same discrete divergence the projection removes.
pub fn divergence_l2(vx: &[f64], vy: &[f64], size: usize) -> f64 {
    let mut sum = 0.0;
    for i in 1..(size - 1) {
        for j in 1..(size - 1) {
            let d = divergence_at(vx, vy, i, j, size);
            sum += d * d;
        }
    }
    sum.sqrt()
}
