//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns every item record and executes commands one
//! at a time. Regeneration timers are small helper tasks that feed it.

mod regen;
mod simulation;

pub(crate) use simulation::{Command, SimulationWorker, WorkerSetup};
