use traj_core::error::TrajResult;
use traj_core::geom::Vec3;
use traj_core::trajectory::{Trajectory, TrajectoryKind};

use crate::correlators::{correlate, LagSettings, Observable};
use crate::executor::{Plan, PlanOutput, PlanRequirements, TimeAxisMode};

/// Velocity autocorrelation `<v(t0 + t) . v(t0)>`. Velocities are not folded
/// into the box.
pub struct VelocityAutoCorrPlan {
    lag: LagSettings,
    normalize: bool,
}

impl VelocityAutoCorrPlan {
    pub fn new() -> Self {
        Self {
            lag: LagSettings::starting_at(0),
            normalize: false,
        }
    }

    pub fn with_max_lag(mut self, max_lag: Option<usize>) -> Self {
        self.lag = self.lag.with_max_lag(max_lag);
        self
    }

    /// Divide by the lag-0 value so the curve starts at 1.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

impl Default for VelocityAutoCorrPlan {
    fn default() -> Self {
        Self::new()
    }
}

struct VelocityProduct;

impl Observable for VelocityProduct {
    fn sample(&self, current: Vec3, origin: Vec3, out: &mut [f64]) {
        out[0] = current.dot(origin);
    }
}

impl Plan for VelocityAutoCorrPlan {
    fn name(&self) -> &'static str {
        "cvv"
    }

    fn requirements(&self) -> PlanRequirements {
        PlanRequirements::new(TrajectoryKind::Velocities, Some(TimeAxisMode::Zeroed))
    }

    fn first_lag(&self) -> usize {
        self.lag.min_lag
    }

    fn run(&self, traj: &Trajectory) -> TrajResult<PlanOutput> {
        let mut stats = correlate(traj, &VelocityProduct, self.lag)?;
        if self.normalize {
            let zero_value = stats
                .first()
                .filter(|s| s.lag == 0)
                .map(|s| s.mean)
                .unwrap_or(0.0);
            if zero_value > 0.0 {
                for s in &mut stats {
                    s.mean /= zero_value;
                    s.variance /= zero_value * zero_value;
                }
            } else {
                log::warn!("cvv normalization skipped: lag-0 value is {zero_value}");
            }
        }
        Ok(PlanOutput::TimeSeries(stats))
    }
}
