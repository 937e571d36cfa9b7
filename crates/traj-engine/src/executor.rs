use std::io::Write;

use traj_core::error::{TrajError, TrajResult};
use traj_core::time_axis::TimeAxis;
use traj_core::trajectory::{Trajectory, TrajectoryKind};
use traj_io::{
    write_table, Column, CsvTrajReader, EnergyLogReader, ResultTable, TimestampSource, TrajReader,
};

use crate::config::{AnalysisConfig, AnalysisKind};
use crate::correlators::LagStats;
use crate::stopwatch::Stopwatch;

/// How lag indices are labelled with physical time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeAxisMode {
    /// Time elapsed since the reference row before the first emitted lag.
    Elapsed,
    /// Same axis shifted so the first emitted lag sits at zero.
    Zeroed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanRequirements {
    pub input: TrajectoryKind,
    pub time_axis: Option<TimeAxisMode>,
}

impl PlanRequirements {
    pub const fn new(input: TrajectoryKind, time_axis: Option<TimeAxisMode>) -> Self {
        Self { input, time_axis }
    }
}

pub trait Plan {
    fn name(&self) -> &'static str;
    fn requirements(&self) -> PlanRequirements;
    /// Smallest lag emitted; the time axis covers lags `first_lag()..n_frames`.
    fn first_lag(&self) -> usize {
        0
    }
    fn run(&self, traj: &Trajectory) -> TrajResult<PlanOutput>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutput {
    TimeSeries(Vec<LagStats>),
    Rdf(RdfOutput),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RdfOutput {
    pub r: Vec<f64>,
    pub g_r: Vec<f64>,
    pub variance: Vec<f64>,
    pub counts: Vec<u64>,
}

impl PlanOutput {
    pub fn n_rows(&self) -> usize {
        match self {
            PlanOutput::TimeSeries(stats) => stats.len(),
            PlanOutput::Rdf(rdf) => rdf.r.len(),
        }
    }

    /// Lays the output out as `[axis, mean, variance, count]`. A time axis
    /// longer than the output (lags capped by `max_lag`) keeps its leading
    /// points.
    pub fn into_table(self, time: Option<TimeAxis>) -> TrajResult<ResultTable> {
        match self {
            PlanOutput::TimeSeries(stats) => {
                let axis = match time {
                    Some(axis) => axis.truncated(stats.len()),
                    None => TimeAxis::from_values(stats.iter().map(|s| s.lag as f64).collect()),
                }
                .into_values();
                ResultTable::new(axis)
                    .with_column(Column::Real(stats.iter().map(|s| s.mean).collect()))?
                    .with_column(Column::Real(stats.iter().map(|s| s.variance).collect()))?
                    .with_column(Column::Count(stats.iter().map(|s| s.count).collect()))
            }
            PlanOutput::Rdf(rdf) => ResultTable::new(rdf.r)
                .with_column(Column::Real(rdf.g_r))?
                .with_column(Column::Real(rdf.variance))?
                .with_column(Column::Count(rdf.counts)),
        }
    }
}

pub struct Executor {
    config: AnalysisConfig,
}

impl Executor {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Loads the plan's input, runs it and attaches the time axis.
    pub fn run_plan(
        plan: &dyn Plan,
        traj: &mut dyn TrajReader,
        timestamps: Option<&mut dyn TimestampSource>,
    ) -> TrajResult<ResultTable> {
        let req = plan.requirements();
        if traj.kind() != req.input {
            return Err(TrajError::Invalid(format!(
                "{} needs {} but reader provides {}",
                plan.name(),
                req.input.label(),
                traj.kind().label()
            )));
        }
        let trajectory = traj.read_trajectory()?;

        // full-length axis, checked before the correlation runs
        let time = match (req.time_axis, timestamps) {
            (Some(mode), Some(source)) => {
                let stamps = source.read_timestamps()?;
                let points = trajectory.n_frames().saturating_sub(plan.first_lag());
                let axis = TimeAxis::from_timestamps(&stamps, points)?;
                Some(match mode {
                    TimeAxisMode::Elapsed => axis,
                    TimeAxisMode::Zeroed => axis.zeroed(),
                })
            }
            (Some(_), None) => {
                log::warn!("{}: no timestamp log, labelling rows by lag index", plan.name());
                None
            }
            (None, _) => None,
        };

        let output = plan.run(&trajectory)?;
        drop(trajectory);
        output.into_table(time)
    }

    /// Runs one configured analysis end to end and writes its table.
    pub fn run_analysis(&self, kind: AnalysisKind) -> TrajResult<()> {
        let cfg = &self.config;
        let plan = cfg.build_plan(kind)?;
        let req = plan.requirements();
        let input = match req.input {
            TrajectoryKind::Positions => &cfg.positions,
            TrajectoryKind::Velocities => &cfg.velocities,
        };
        let mut reader = CsvTrajReader::new(cfg.input_path(input), req.input, cfg.n_particles)
            .with_remainder(cfg.remainder);
        let mut log_reader = EnergyLogReader::new(cfg.input_path(&cfg.energies));
        let timestamps: Option<&mut dyn TimestampSource> = match req.time_axis {
            Some(_) => Some(&mut log_reader),
            None => None,
        };
        let table = Self::run_plan(plan.as_ref(), &mut reader, timestamps)?;
        let path = cfg.output_path(kind);
        write_table(&path, &table)?;
        log::info!("{}: wrote {} rows to {}", plan.name(), table.n_rows(), path.display());
        Ok(())
    }

    /// Runs every configured analysis in order, reporting progress to `out`.
    ///
    /// The first failure aborts the batch unless `isolate_failures` is set, in
    /// which case the remaining analyses still run and the first error is
    /// returned at the end.
    pub fn run_all<W: Write>(&self, out: W) -> TrajResult<W> {
        let mut watch = Stopwatch::launch(out)?;
        let mut first_err: Option<TrajError> = None;
        for &kind in &self.config.analyses {
            watch.start_stage(kind.title())?;
            match self.run_analysis(kind) {
                Ok(()) => {
                    watch.complete_stage()?;
                }
                Err(err) => {
                    let err = err.in_stage(kind.stage());
                    watch.fail_stage(&err.to_string())?;
                    if !self.config.isolate_failures {
                        return Err(err);
                    }
                    log::error!("{err}");
                    first_err.get_or_insert(err);
                }
            }
        }
        let out = watch.finish()?;
        match first_err {
            Some(err) => Err(err),
            None => Ok(out),
        }
    }
}
