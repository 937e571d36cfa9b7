use traj_core::error::{TrajError, TrajResult};
use traj_core::geom::Vec3;
use traj_core::pbc::CubicBox;
use traj_core::trajectory::{Trajectory, TrajectoryKind};

use crate::correlators::{correlate, LagSettings, Observable, Reduction};
use crate::executor::{Plan, PlanOutput, PlanRequirements, TimeAxisMode};

pub const DEFAULT_K_INDICES: [[i32; 3]; 3] = [[3, 3, 10], [6, -9, 1], [9, -6, -1]];

/// Self intermediate scattering function `<cos(k . dr)>` at fixed reciprocal
/// lattice vectors, lags from 1.
pub struct FskPlan {
    pbc: CubicBox,
    wavevectors: Vec<Vec3>,
    lag: LagSettings,
}

impl FskPlan {
    pub fn new(pbc: CubicBox) -> Self {
        Self {
            pbc,
            wavevectors: DEFAULT_K_INDICES
                .iter()
                .map(|&n| pbc.wavevector(n))
                .collect(),
            lag: LagSettings::starting_at(1),
        }
    }

    /// Replaces the wavevectors with `(2π/L)·n` for each lattice index `n`.
    pub fn with_k_indices(mut self, indices: &[[i32; 3]]) -> TrajResult<Self> {
        if indices.is_empty() {
            return Err(TrajError::Invalid("at least one wavevector is required".into()));
        }
        let pbc = self.pbc;
        self.wavevectors = indices.iter().map(|&n| pbc.wavevector(n)).collect();
        Ok(self)
    }

    pub fn with_max_lag(mut self, max_lag: Option<usize>) -> Self {
        self.lag = self.lag.with_max_lag(max_lag);
        self
    }

    pub fn wavevectors(&self) -> &[Vec3] {
        &self.wavevectors
    }
}

struct CosineOverlap<'a> {
    pbc: CubicBox,
    wavevectors: &'a [Vec3],
}

impl Observable for CosineOverlap<'_> {
    fn channels(&self) -> usize {
        self.wavevectors.len()
    }

    fn reduction(&self) -> Reduction {
        Reduction::ParticleAverages
    }

    fn sample(&self, current: Vec3, origin: Vec3, out: &mut [f64]) {
        let dr = self.pbc.delta(current, origin);
        for (slot, k) in out.iter_mut().zip(self.wavevectors) {
            *slot = k.dot(dr).cos();
        }
    }
}

impl Plan for FskPlan {
    fn name(&self) -> &'static str {
        "fsk"
    }

    fn requirements(&self) -> PlanRequirements {
        PlanRequirements::new(TrajectoryKind::Positions, Some(TimeAxisMode::Elapsed))
    }

    fn first_lag(&self) -> usize {
        self.lag.min_lag
    }

    fn run(&self, traj: &Trajectory) -> TrajResult<PlanOutput> {
        let obs = CosineOverlap {
            pbc: self.pbc,
            wavevectors: &self.wavevectors,
        };
        Ok(PlanOutput::TimeSeries(correlate(traj, &obs, self.lag)?))
    }
}
