use crate::error::{SimError, SimResult};
use crate::snapshot::DensitySnapshot;
use crate::solver::{self, SolverParams};

/// Default grid side length, ghost ring included.
pub const DEFAULT_SIZE: usize = 64;

/// Smallest grid that still has one interior cell inside the ghost ring.
pub const MIN_SIZE: usize = 3;

/// Convert 2D cell coordinates to a flat index.
/// `i` is the slow axis, so sweeping `j` inside `i` walks memory linearly.
/// No bounds check: use only when 0 <= i, j < size.
#[inline(always)]
pub const fn idx(i: usize, j: usize, size: usize) -> usize {
    i * size + j
}

/// Square scalar grid of side `size`, including a one-cell ghost ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    size: usize,
    data: Vec<f64>,
}

impl Field {
    /// Zero-initialised field.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> SimResult<f64> {
        let k = self.checked_idx(i, j)?;
        Ok(self.data[k])
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) -> SimResult<()> {
        let k = self.checked_idx(i, j)?;
        self.data[k] = value;
        Ok(())
    }

    /// Accumulate `delta` into a cell.
    pub fn add(&mut self, i: usize, j: usize, delta: f64) -> SimResult<()> {
        let k = self.checked_idx(i, j)?;
        self.data[k] += delta;
        Ok(())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    fn checked_idx(&self, i: usize, j: usize) -> SimResult<usize> {
        if i >= self.size || j >= self.size {
            return Err(SimError::OutOfBounds {
                x: i as i64,
                y: j as i64,
                size: self.size,
            });
        }
        Ok(idx(i, j, self.size))
    }
}

/// The simulation object: owns every grid buffer plus the fixed solver settings.
///
/// `vx0`, `vy0` and `density0` are scratch: their content is only meaningful
/// inside a single `step()` call. External impulses go into the live fields.
pub struct FluidState {
    size: usize,
    params: SolverParams,
    pub(crate) density: Field,
    pub(crate) density0: Field,
    pub(crate) vx: Field,
    pub(crate) vy: Field,
    pub(crate) vx0: Field,
    pub(crate) vy0: Field,
    steps: u64,
}

impl FluidState {
    /// Allocate a zeroed simulation. Fails with `InvalidConfiguration` when the
    /// grid is too small for the stencil or a solver parameter is out of range.
    pub fn new(size: usize, params: SolverParams) -> SimResult<Self> {
        if size < MIN_SIZE {
            return Err(SimError::InvalidConfiguration(format!(
                "size must be at least {MIN_SIZE}, got {size}"
            )));
        }
        params.validate()?;
        log::debug!(
            "fluid state {size}x{size}: dt={} diff={} visc={} iter={}",
            params.dt,
            params.diff,
            params.visc,
            params.iter
        );

        Ok(Self {
            size,
            params,
            density: Field::new(size),
            density0: Field::new(size),
            vx: Field::new(size),
            vy: Field::new(size),
            vx0: Field::new(size),
            vy0: Field::new(size),
            steps: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Number of completed `step()` calls.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn density(&self) -> &Field {
        &self.density
    }

    pub fn velocity_x(&self) -> &Field {
        &self.vx
    }

    pub fn velocity_y(&self) -> &Field {
        &self.vy
    }

    /// Inject dye at a cell. Coordinates outside `[0, size)` are rejected.
    pub fn add_density(&mut self, x: i32, y: i32, amount: f64) -> SimResult<()> {
        let (i, j) = self.cell(x, y)?;
        self.density.add(i, j, amount)
    }

    /// Inject momentum at a cell. Coordinates outside `[0, size)` are rejected.
    pub fn add_velocity(&mut self, x: i32, y: i32, amount_x: f64, amount_y: f64) -> SimResult<()> {
        let (i, j) = self.cell(x, y)?;
        self.vx.add(i, j, amount_x)?;
        self.vy.add(i, j, amount_y)
    }

    /// Advance the simulation by one fixed `dt`.
    pub fn step(&mut self) {
        solver::fluid_step(self);
        self.steps += 1;
    }

    /// Copy the density field into a pre-allocated snapshot, avoiding allocation.
    pub fn snapshot_into(&self, dst: &mut DensitySnapshot) {
        dst.size = self.size;
        dst.density.resize(self.size * self.size, 0.0);
        dst.density.copy_from_slice(self.density.as_slice());
    }

    /// Allocating snapshot convenience method.
    pub fn snapshot(&self) -> DensitySnapshot {
        let mut snap = DensitySnapshot::new_empty(self.size);
        self.snapshot_into(&mut snap);
        snap
    }

    fn cell(&self, x: i32, y: i32) -> SimResult<(usize, usize)> {
        let n = self.size as i64;
        let (xl, yl) = (x as i64, y as i64);
        if xl < 0 || yl < 0 || xl >= n || yl >= n {
            return Err(SimError::OutOfBounds {
                x: xl,
                y: yl,
                size: self.size,
            });
        }
        Ok((x as usize, y as usize))
    }
}
