pub mod fsk;
pub mod msd;
pub mod velocity_autocorr;

pub use fsk::FskPlan;
pub use msd::MsdPlan;
pub use velocity_autocorr::VelocityAutoCorrPlan;
