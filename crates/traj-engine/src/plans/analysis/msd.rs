use traj_core::error::TrajResult;
use traj_core::geom::Vec3;
use traj_core::pbc::CubicBox;
use traj_core::trajectory::{Trajectory, TrajectoryKind};

use crate::correlators::{correlate, LagSettings, Observable};
use crate::executor::{Plan, PlanOutput, PlanRequirements, TimeAxisMode};

/// Mean squared minimum-image displacement versus lag, lags from 0.
pub struct MsdPlan {
    pbc: CubicBox,
    lag: LagSettings,
}

impl MsdPlan {
    pub fn new(pbc: CubicBox) -> Self {
        Self {
            pbc,
            lag: LagSettings::starting_at(0),
        }
    }

    pub fn with_max_lag(mut self, max_lag: Option<usize>) -> Self {
        self.lag = self.lag.with_max_lag(max_lag);
        self
    }
}

struct SquaredDisplacement {
    pbc: CubicBox,
}

impl Observable for SquaredDisplacement {
    fn sample(&self, current: Vec3, origin: Vec3, out: &mut [f64]) {
        out[0] = self.pbc.delta(current, origin).norm_squared();
    }
}

impl Plan for MsdPlan {
    fn name(&self) -> &'static str {
        "msd"
    }

    fn requirements(&self) -> PlanRequirements {
        PlanRequirements::new(TrajectoryKind::Positions, Some(TimeAxisMode::Zeroed))
    }

    fn first_lag(&self) -> usize {
        self.lag.min_lag
    }

    fn run(&self, traj: &Trajectory) -> TrajResult<PlanOutput> {
        let obs = SquaredDisplacement { pbc: self.pbc };
        Ok(PlanOutput::TimeSeries(correlate(traj, &obs, self.lag)?))
    }
}
