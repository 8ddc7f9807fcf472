// src/strategy/traits.rs

use std::fmt::Debug;

/// Defines the ordering (or, for the factory, production) rule of a tier.
///
/// We require `Debug` so we can print the agent state if needed.
/// We require `Send` + `Sync` so a whole chain can be moved across threads
/// between runs.
pub trait OrderPolicy: Debug + Send + Sync {
    /// Calculates how much to order from upstream this week.
    ///
    /// # Arguments
    /// * `week` - Zero-based week index.
    /// * `stock` - Units on hand after this week's delivery went out.
    /// * `backlog` - Units still owed downstream.
    fn calculate_order(&mut self, week: usize, stock: f64, backlog: f64) -> f64;
}
