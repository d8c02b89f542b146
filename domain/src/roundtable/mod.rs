//! Round table domain.
//!
//! - [`participant::Participant`] / [`participant::RoundTableConfig`]: who speaks, who summarizes
//! - [`plan::TurnPlan`]: the fixed turn order of a run

pub mod participant;
pub mod plan;

pub use participant::{Participant, RoundTableConfig};
pub use plan::{Turn, TurnPlan};
