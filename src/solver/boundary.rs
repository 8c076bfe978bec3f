use crate::state::idx;

/// Field type for boundary condition dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Mirrored at every wall (density, pressure, divergence).
    Scalar,
    /// Normal component at the left/right walls: sign flips there.
    Vx,
    /// Normal component at the top/bottom walls: sign flips there.
    Vy,
}

/// Closed-box boundary conditions. Rewrites the ghost ring from the interior.
///   - left/right columns (`i = 0`, `i = size-1`): negate for `Vx`, copy otherwise
///   - top/bottom rows (`j = 0`, `j = size-1`): negate for `Vy`, copy otherwise
///   - corners: mean of the two adjacent edge ghosts
pub fn set_bnd(field_type: FieldType, x: &mut [f64], size: usize) {
    let n = size;
    let sx = if field_type == FieldType::Vx { -1.0 } else { 1.0 };
    let sy = if field_type == FieldType::Vy { -1.0 } else { 1.0 };

    for k in 1..(n - 1) {
        x[idx(0, k, n)] = sx * x[idx(1, k, n)];
        x[idx(n - 1, k, n)] = sx * x[idx(n - 2, k, n)];
        x[idx(k, 0, n)] = sy * x[idx(k, 1, n)];
        x[idx(k, n - 1, n)] = sy * x[idx(k, n - 2, n)];
    }

    x[idx(0, 0, n)] = 0.5 * (x[idx(1, 0, n)] + x[idx(0, 1, n)]);
    x[idx(0, n - 1, n)] = 0.5 * (x[idx(1, n - 1, n)] + x[idx(0, n - 2, n)]);
    x[idx(n - 1, 0, n)] = 0.5 * (x[idx(n - 2, 0, n)] + x[idx(n - 1, 1, n)]);
    x[idx(n - 1, n - 1, n)] = 0.5 * (x[idx(n - 2, n - 1, n)] + x[idx(n - 1, n - 2, n)]);
}
