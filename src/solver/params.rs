use crate::error::{SimError, SimResult};

/// Solver parameters, fixed for the lifetime of a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverParams {
    /// Time step.
    pub dt: f64,
    /// Dye diffusion rate.
    pub diff: f64,
    /// Kinematic viscosity.
    pub visc: f64,
    /// Gauss-Seidel sweeps per implicit solve (diffusion and pressure).
    pub iter: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            dt: 0.1,
            diff: 0.0001,
            visc: 0.0001,
            iter: 4,
        }
    }
}

impl SolverParams {
    /// Reject values that leave the stencil undefined.
    ///
    /// Stability is not checked: a `dt` that is large for the grid resolution
    /// oscillates or blows up, and choosing a stable one is up to the caller.
    pub fn validate(&self) -> SimResult<()> {
        for (name, value) in [("dt", self.dt), ("diff", self.diff), ("visc", self.visc)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::InvalidConfiguration(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.iter < 1 {
            return Err(SimError::InvalidConfiguration("iter must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SolverParams::default();
        assert_eq!(params.dt, 0.1);
        assert_eq!(params.diff, 0.0001);
        assert_eq!(params.visc, 0.0001);
        assert_eq!(params.iter, 4);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_rates_are_valid() {
        let params = SolverParams { dt: 0.0, diff: 0.0, visc: 0.0, iter: 1 };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_negative_rates_rejected() {
        for params in [
            SolverParams { dt: -0.1, ..Default::default() },
            SolverParams { diff: -1e-6, ..Default::default() },
            SolverParams { visc: -1.0, ..Default::default() },
        ] {
            assert!(
                matches!(params.validate(), Err(SimError::InvalidConfiguration(_))),
                "{:?} should be rejected",
                params
            );
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let params = SolverParams { dt: f64::NAN, ..Default::default() };
        assert!(params.validate().is_err());
        let params = SolverParams { visc: f64::INFINITY, ..Default::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_zero_iter_rejected() {
        let params = SolverParams { iter: 0, ..Default::default() };
        let err = params.validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration: iter must be at least 1");
    }
}
