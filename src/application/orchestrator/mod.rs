//! Orchestrator - the fetch, compile and retry engine

mod bounded;
mod flight;
mod options;
mod resolution;
mod use_case;


pub use bounded::run_bounded;
pub use flight::{BatchClaim, Claim, Flight, FlightGuard, FlightTable, WaitOutcome};
pub use options::OrchestratorOptions;
pub use resolution::Resolution;
pub use use_case::Orchestrator;
