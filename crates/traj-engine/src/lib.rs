pub mod config;
pub mod correlators;
pub mod executor;
pub mod plans;
pub mod stopwatch;

pub use config::{AnalysisConfig, AnalysisKind};
pub use correlators::{correlate, LagSettings, LagStats, Observable, Reduction};
pub use executor::{Executor, Plan, PlanOutput, PlanRequirements, RdfOutput, TimeAxisMode};
pub use plans::{FskPlan, MsdPlan, RdfPlan, VelocityAutoCorrPlan};
pub use stopwatch::Stopwatch;

#[cfg(test)]
mod tests;
