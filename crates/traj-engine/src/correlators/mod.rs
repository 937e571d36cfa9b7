//! All-origins time correlation over an in-memory trajectory.
//!
//! For lag `t` every frame `w` in `t..T` is paired with the origin frame
//! `w - t`; each pair contributes one value per particle and channel. There is
//! no wrap-around: the pairing is an explicit index offset.

use rayon::prelude::*;
use traj_core::error::{TrajError, TrajResult};
use traj_core::geom::{mean_and_variance, RunningMoments, Vec3};
use traj_core::trajectory::Trajectory;

/// How the per-sample values of one lag are collapsed into mean and variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Statistics over every (window, particle, channel) sample.
    Samples,
    /// Average each (channel, particle) over windows first, then take
    /// statistics over the `channels * N` averages.
    ParticleAverages,
}

/// Quantity correlated between a frame and its lagged origin.
pub trait Observable: Sync {
    fn channels(&self) -> usize {
        1
    }

    fn reduction(&self) -> Reduction {
        Reduction::Samples
    }

    /// Writes `channels()` values for one particle into `out`.
    fn sample(&self, current: Vec3, origin: Vec3, out: &mut [f64]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LagSettings {
    pub min_lag: usize,
    pub max_lag: Option<usize>,
}

impl Default for LagSettings {
    fn default() -> Self {
        Self {
            min_lag: 0,
            max_lag: None,
        }
    }
}

impl LagSettings {
    pub fn starting_at(min_lag: usize) -> Self {
        Self {
            min_lag,
            max_lag: None,
        }
    }

    pub fn with_max_lag(mut self, max_lag: Option<usize>) -> Self {
        self.max_lag = max_lag;
        self
    }

    /// Lags evaluated for a trajectory of `n_frames` frames, ascending.
    pub fn lags(&self, n_frames: usize) -> std::ops::Range<usize> {
        let mut end = n_frames;
        if let Some(max) = self.max_lag {
            end = end.min(max.saturating_add(1));
        }
        self.min_lag..end.max(self.min_lag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagStats {
    pub lag: usize,
    pub mean: f64,
    pub variance: f64,
    pub count: u64,
}

pub fn correlate<O: Observable>(
    traj: &Trajectory,
    observable: &O,
    lag: LagSettings,
) -> TrajResult<Vec<LagStats>> {
    let channels = observable.channels();
    if channels == 0 {
        return Err(TrajError::Invalid("observable must emit at least one channel".into()));
    }
    let lags = lag.lags(traj.n_frames());
    log::debug!(
        "correlating lags {}..{} over {} frames x {} particles",
        lags.start,
        lags.end,
        traj.n_frames(),
        traj.n_particles()
    );
    lags.into_par_iter()
        .map(|t| correlate_lag(traj, observable, channels, t))
        .collect()
}

fn correlate_lag<O: Observable>(
    traj: &Trajectory,
    observable: &O,
    channels: usize,
    lag: usize,
) -> TrajResult<LagStats> {
    let n = traj.n_particles();
    let n_windows = traj.n_frames() - lag;
    let count = (n_windows as u64) * (n as u64) * (channels as u64);
    let mut scratch = vec![0.0f64; channels];

    let (mean, variance) = match observable.reduction() {
        Reduction::Samples => {
            let mut moments = RunningMoments::new();
            for w in lag..traj.n_frames() {
                for i in 0..n {
                    observable.sample(traj.get(w, i), traj.get(w - lag, i), &mut scratch);
                    scratch.iter().for_each(|&v| moments.push(v));
                }
            }
            moments.mean_and_variance()
        }
        Reduction::ParticleAverages => {
            // channel-major: index c * n + i
            let mut sums = Vec::new();
            sums.try_reserve_exact(channels * n).map_err(|e| {
                TrajError::ResourceExhausted(format!(
                    "lag {lag} needs {} particle averages: {e}",
                    channels * n
                ))
            })?;
            sums.resize(channels * n, 0.0f64);
            for w in lag..traj.n_frames() {
                for i in 0..n {
                    observable.sample(traj.get(w, i), traj.get(w - lag, i), &mut scratch);
                    for (c, v) in scratch.iter().enumerate() {
                        sums[c * n + i] += v;
                    }
                }
            }
            let inv = 1.0 / n_windows as f64;
            sums.iter_mut().for_each(|s| *s *= inv);
            mean_and_variance(&sums)
        }
    };

    Ok(LagStats {
        lag,
        mean,
        variance,
        count,
    })
}
