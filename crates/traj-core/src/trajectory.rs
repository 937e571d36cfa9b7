use crate::error::{TrajError, TrajResult};
use crate::geom::Vec3;

/// What the per-particle vectors of a [`Trajectory`] represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrajectoryKind {
    Positions,
    Velocities,
}

impl TrajectoryKind {
    pub fn label(self) -> &'static str {
        match self {
            TrajectoryKind::Positions => "positions",
            TrajectoryKind::Velocities => "velocities",
        }
    }
}

/// Dense (T, N, 3) tensor stored frame-major: frame `t`, particle `i` lives at
/// `data[t * n_particles + i]`.
#[derive(Debug, Clone)]
pub struct Trajectory {
    kind: TrajectoryKind,
    n_frames: usize,
    n_particles: usize,
    data: Vec<[f64; 3]>,
}

impl Trajectory {
    pub fn from_rows(
        kind: TrajectoryKind,
        n_particles: usize,
        data: Vec<[f64; 3]>,
    ) -> TrajResult<Self> {
        if n_particles == 0 {
            return Err(TrajError::Invalid("particle count must be positive".into()));
        }
        if data.len() % n_particles != 0 {
            return Err(TrajError::Shape(format!(
                "{} rows is not a multiple of {} particles",
                data.len(),
                n_particles
            )));
        }
        Ok(Self {
            kind,
            n_frames: data.len() / n_particles,
            n_particles,
            data,
        })
    }

    /// Builds a trajectory from explicit per-frame particle lists.
    pub fn from_frames(kind: TrajectoryKind, frames: Vec<Vec<[f64; 3]>>) -> TrajResult<Self> {
        let n_particles = frames.first().map(|f| f.len()).unwrap_or(0);
        if frames.iter().any(|f| f.len() != n_particles) {
            return Err(TrajError::Shape(
                "all frames must hold the same particle count".into(),
            ));
        }
        let data = frames.into_iter().flatten().collect();
        Self::from_rows(kind, n_particles, data)
    }

    pub fn kind(&self) -> TrajectoryKind {
        self.kind
    }

    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    pub fn n_particles(&self) -> usize {
        self.n_particles
    }

    pub fn frame(&self, t: usize) -> &[[f64; 3]] {
        let start = t * self.n_particles;
        &self.data[start..start + self.n_particles]
    }

    pub fn get(&self, t: usize, i: usize) -> Vec3 {
        Vec3::from_array(self.data[t * self.n_particles + i])
    }

    pub fn as_rows(&self) -> &[[f64; 3]] {
        &self.data
    }
}
