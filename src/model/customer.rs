// src/model/customer.rs

use crate::simulation::config::SimulationConfig;

/// The end customer. Orders follow a one-time step and deliveries are
/// simply tallied.
#[derive(Debug, Clone)]
pub struct Customer {
    initial_demand: f64,
    subsequent_demand: f64,
    step_week: usize,
    total_received: f64,
}

impl Customer {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            initial_demand: config.initial_demand,
            subsequent_demand: config.subsequent_demand,
            step_week: config.demand_step_week,
            total_received: 0.0,
        }
    }

    /// Demand for `week`: the low level up to and including the step week,
    /// the high level from then on.
    pub fn next_order_quantity(&self, week: usize) -> f64 {
        if week <= self.step_week {
            self.initial_demand
        } else {
            self.subsequent_demand
        }
    }

    pub fn record_delivery(&mut self, units: f64) {
        self.total_received += units;
    }

    pub fn total_received(&self) -> f64 {
        self.total_received
    }
}
