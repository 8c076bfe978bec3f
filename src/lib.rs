//! Stable-fluids dye tank.
//!
//! A closed 2D box of incompressible fluid carrying a passive dye. Each
//! [`FluidState::step`] diffuses, projects and self-advects the velocity, then
//! diffuses and advects the dye along it.
//!
//! ```
//! use dyetank::{FluidState, SolverParams};
//!
//! let mut sim = FluidState::new(32, SolverParams::default()).unwrap();
//! sim.add_density(16, 16, 100.0).unwrap();
//! sim.add_velocity(16, 16, 1.0, 0.0).unwrap();
//! sim.step();
//! assert!(sim.density().get(16, 16).unwrap() >= 0.0);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod snapshot;
pub mod solver;
pub mod state;

pub use error::{SimError, SimResult};
pub use input::{Brush, PointerSource, ScriptedPointer};
pub use snapshot::{DensitySink, DensitySnapshot, JsonLinesSink};
pub use solver::{FieldType, SolverParams};
pub use state::{Field, FluidState};
