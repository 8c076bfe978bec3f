mod boundary;
mod core;
pub mod diagnostics;
mod params;

// Re-export public API
pub use boundary::{set_bnd, FieldType};
pub use self::core::{advect, diffuse, lin_solve, project, STENCIL_WEIGHT};
pub use params::SolverParams;

use crate::state::FluidState;

/// Full fluid simulation step: velocity first, then dye.
/// Each sub-step's output is the next one's input, so the order is fixed.
pub fn fluid_step(state: &mut FluidState) {
    let n = state.size();
    let SolverParams { dt, diff, visc, iter } = *state.params();

    // Diffuse velocity into the scratch pair
    diffuse(FieldType::Vx, state.vx0.as_mut_slice(), state.vx.as_slice(), visc, dt, iter, n);
    diffuse(FieldType::Vy, state.vy0.as_mut_slice(), state.vy.as_slice(), visc, dt, iter, n);

    // Project to make diffused velocity divergence-free (live pair is scratch here)
    project(
        state.vx0.as_mut_slice(),
        state.vy0.as_mut_slice(),
        state.vx.as_mut_slice(),
        state.vy.as_mut_slice(),
        iter,
        n,
    );

    // Self-advect velocity
    advect(FieldType::Vx, state.vx.as_mut_slice(), state.vx0.as_slice(), state.vx0.as_slice(), state.vy0.as_slice(), dt, n);
    advect(FieldType::Vy, state.vy.as_mut_slice(), state.vy0.as_slice(), state.vx0.as_slice(), state.vy0.as_slice(), dt, n);

    // Advection reintroduces divergence
    project(
        state.vx.as_mut_slice(),
        state.vy.as_mut_slice(),
        state.vx0.as_mut_slice(),
        state.vy0.as_mut_slice(),
        iter,
        n,
    );

    // Diffuse + advect dye along the final velocity
    diffuse(FieldType::Scalar, state.density0.as_mut_slice(), state.density.as_slice(), diff, dt, iter, n);
    advect(FieldType::Scalar, state.density.as_mut_slice(), state.density0.as_slice(), state.vx.as_slice(), state.vy.as_slice(), dt, n);
}
