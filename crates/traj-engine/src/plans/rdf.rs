use rayon::prelude::*;
use traj_core::error::{TrajError, TrajResult};
use traj_core::geom::{mean_and_variance, Vec3};
use traj_core::pbc::CubicBox;
use traj_core::trajectory::{Trajectory, TrajectoryKind};

use crate::executor::{Plan, PlanOutput, PlanRequirements, RdfOutput};

/// Radial distribution function from minimum-image pair distances of every
/// `stride`-th snapshot, binned over `[0, L)`.
pub struct RdfPlan {
    pbc: CubicBox,
    n_active: usize,
    stride: usize,
    bins: usize,
}

impl RdfPlan {
    pub fn new(pbc: CubicBox, n_active: usize, stride: usize, bins: usize) -> TrajResult<Self> {
        if n_active < 2 {
            return Err(TrajError::Invalid(format!(
                "g(r) needs at least two active particles, got {n_active}"
            )));
        }
        if stride == 0 {
            return Err(TrajError::Invalid("g(r) snapshot stride must be positive".into()));
        }
        if bins == 0 {
            return Err(TrajError::Invalid("g(r) bin count must be positive".into()));
        }
        Ok(Self {
            pbc,
            n_active,
            stride,
            bins,
        })
    }

    pub fn bin_width(&self) -> f64 {
        self.pbc.length() / self.bins as f64
    }

    pub fn centers(&self) -> Vec<f64> {
        let dr = self.bin_width();
        (0..self.bins).map(|b| (b as f64 + 0.5) * dr).collect()
    }

    /// Expected unique-pair count per shell for an ideal gas at the active
    /// density: `2π ρ (Na - 1) r² Δr` with `ρ = Na / L³`.
    pub fn ideal_counts(&self) -> Vec<f64> {
        let dr = self.bin_width();
        let na = self.n_active as f64;
        let rho = na / self.pbc.volume();
        let pref = 2.0 * std::f64::consts::PI * rho * (na - 1.0) * dr;
        self.centers().into_iter().map(|r| pref * r * r).collect()
    }

    /// Pair-distance histogram of one snapshot.
    pub fn snapshot_histogram(&self, frame: &[[f64; 3]]) -> Vec<u64> {
        let mut counts = vec![0u64; self.bins];
        let scale = self.bins as f64 / self.pbc.length();
        let mut dropped = 0usize;
        for i in 0..self.n_active {
            let pi = Vec3::from_array(frame[i]);
            for pj in &frame[i + 1..self.n_active] {
                let r = self.pbc.distance(pi, Vec3::from_array(*pj));
                let bin = (r * scale).floor() as usize;
                match counts.get_mut(bin) {
                    Some(slot) => *slot += 1,
                    None => dropped += 1,
                }
            }
        }
        if dropped > 0 {
            log::debug!("{dropped} pair distances fell outside the histogram range");
        }
        counts
    }
}

impl Plan for RdfPlan {
    fn name(&self) -> &'static str {
        "gr"
    }

    fn requirements(&self) -> PlanRequirements {
        PlanRequirements::new(TrajectoryKind::Positions, None)
    }

    fn run(&self, traj: &Trajectory) -> TrajResult<PlanOutput> {
        if self.n_active > traj.n_particles() {
            return Err(TrajError::Shape(format!(
                "{} active particles requested from a trajectory of {}",
                self.n_active,
                traj.n_particles()
            )));
        }
        let snapshots: Vec<usize> = (0..traj.n_frames()).step_by(self.stride).collect();
        log::debug!(
            "g(r) over {} snapshots, {} pairs each",
            snapshots.len(),
            self.n_active * (self.n_active - 1) / 2
        );
        let histograms: Vec<Vec<u64>> = snapshots
            .par_iter()
            .map(|&t| self.snapshot_histogram(traj.frame(t)))
            .collect();

        let ideal = self.ideal_counts();
        let mut g_r = Vec::with_capacity(self.bins);
        let mut variance = Vec::with_capacity(self.bins);
        let mut counts = Vec::with_capacity(self.bins);
        let mut column = Vec::with_capacity(histograms.len());
        for (b, norm) in ideal.iter().enumerate() {
            column.clear();
            column.extend(histograms.iter().map(|h| h[b] as f64 / norm));
            let (mean, var) = mean_and_variance(&column);
            g_r.push(mean);
            variance.push(var);
            counts.push(histograms.iter().map(|h| h[b]).sum());
        }

        Ok(PlanOutput::Rdf(RdfOutput {
            r: self.centers(),
            g_r,
            variance,
            counts,
        }))
    }
}
