use std::f64::consts::TAU;

use crate::error::SimResult;
use crate::state::FluidState;

/// Pointer device reporting in grid coordinates.
pub trait PointerSource {
    fn pointer_position(&self) -> (i32, i32);
    fn pointer_pressed(&self) -> bool;
}

/// Turns pointer strokes into impulses.
///
/// While the pointer is held, every frame drops `density_amount` of dye under
/// it; once a previous position is known, the pointer delta scaled by
/// `velocity_scale` is added as velocity at the same cell.
#[derive(Debug, Clone)]
pub struct Brush {
    pub density_amount: f64,
    pub velocity_scale: f64,
    prev: Option<(i32, i32)>,
}

impl Brush {
    pub fn new(density_amount: f64, velocity_scale: f64) -> Self {
        Self {
            density_amount,
            velocity_scale,
            prev: None,
        }
    }

    /// Apply one frame of pointer input. Positions outside the grid are
    /// clamped onto it, so this only fails if the state itself is inconsistent.
    pub fn apply<P: PointerSource + ?Sized>(&mut self, pointer: &P, state: &mut FluidState) -> SimResult<()> {
        if !pointer.pointer_pressed() {
            self.prev = None;
            return Ok(());
        }

        let max = state.size() as i32 - 1;
        let (px, py) = pointer.pointer_position();
        let (x, y) = (px.clamp(0, max), py.clamp(0, max));

        if let Some((x0, y0)) = self.prev {
            let dx = (x - x0) as f64 * self.velocity_scale;
            let dy = (y - y0) as f64 * self.velocity_scale;
            state.add_velocity(x, y, dx, dy)?;
        }
        state.add_density(x, y, self.density_amount)?;
        self.prev = Some((x, y));
        Ok(())
    }

    /// Whether a stroke is in progress.
    pub fn is_stroking(&self) -> bool {
        self.prev.is_some()
    }
}

/// Deterministic pointer for headless runs: circles the grid centre, held for
/// `press_frames` then released for `release_frames`, repeating.
#[derive(Debug, Clone)]
pub struct ScriptedPointer {
    center: (f64, f64),
    radius: f64,
    period: u64,
    press_frames: u64,
    release_frames: u64,
    frame: u64,
}

impl ScriptedPointer {
    pub fn new(size: usize, press_frames: u64, release_frames: u64) -> Self {
        let c = size as f64 / 2.0;
        Self {
            center: (c, c),
            radius: size as f64 / 4.0,
            period: 120,
            press_frames,
            release_frames,
            frame: 0,
        }
    }

    pub fn advance(&mut self) {
        self.frame += 1;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl PointerSource for ScriptedPointer {
    fn pointer_position(&self) -> (i32, i32) {
        let theta = TAU * (self.frame % self.period) as f64 / self.period as f64;
        let x = self.center.0 + self.radius * theta.cos();
        let y = self.center.1 + self.radius * theta.sin();
        (x as i32, y as i32)
    }

    fn pointer_pressed(&self) -> bool {
        let cycle = self.press_frames + self.release_frames;
        cycle > 0 && self.frame % cycle < self.press_frames
    }
}
