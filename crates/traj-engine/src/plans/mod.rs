pub mod analysis;
pub mod rdf;

pub use analysis::{FskPlan, MsdPlan, VelocityAutoCorrPlan};
pub use rdf::RdfPlan;
