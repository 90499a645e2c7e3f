//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `Orchestrator` - Resolve names on demand (fetch, compile, re-check) and
//!   compile explicit batches without redundant backend work

pub mod orchestrator;

pub use orchestrator::{
    run_bounded, BatchClaim, Claim, Flight, FlightGuard, FlightTable, Orchestrator,
    OrchestratorOptions, Resolution, WaitOutcome,
};
