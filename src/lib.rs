//! Turn-based simulation of a four-tier supply chain (retailer, wholesaler,
//! distributor, factory) that reproduces the bullwhip effect under a fixed
//! anchor-and-maintain ordering rule.
//!
//! The engine in [`simulation::engine`] yields one [`WeekSnapshot`] per week;
//! recording and export live in [`io`] and never feed back into the chain.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{Result, SimulationError};
pub use model::agent::AgentRole;
pub use simulation::config::SimulationConfig;
pub use simulation::engine::{ChainSimulation, RunSummary, WeekSnapshot};
