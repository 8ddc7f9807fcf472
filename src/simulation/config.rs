// src/simulation/config.rs

use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};

/// Every constant the chain runs with. Built once before the run and only
/// ever read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub weeks: usize,
    /// Length of every order, delivery and production pipe, in weeks.
    pub queue_delay: usize,

    // Costs per unit per week
    pub storage_cost: f64,
    pub backorder_cost: f64,

    pub initial_stock: f64,
    pub target_stock: f64,

    // Customer step demand
    pub initial_demand: f64,
    pub subsequent_demand: f64,
    /// Last week that still sees `initial_demand`.
    pub demand_step_week: usize,

    // Warm-up window (weeks 0..=warmup_weeks)
    pub warmup_weeks: usize,
    pub warmup_order: f64,
    pub warmup_delivery: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            weeks: 41,
            queue_delay: 2,
            storage_cost: 0.5,
            backorder_cost: 1.0,
            initial_stock: 12.0,
            target_stock: 12.0,
            initial_demand: 5.0,
            subsequent_demand: 9.0,
            demand_step_week: 5,
            warmup_weeks: 4,
            warmup_order: 4.0,
            warmup_delivery: 4.0,
        }
    }
}

impl SimulationConfig {
    /// Rejects parameter sets the engine cannot run meaningfully.
    pub fn validate(&self) -> Result<()> {
        if self.weeks == 0 {
            return Err(SimulationError::InvalidConfig(
                "weeks must be at least 1".to_string(),
            ));
        }
        if self.queue_delay == 0 {
            return Err(SimulationError::InvalidConfig(
                "queue_delay must be at least 1".to_string(),
            ));
        }

        let quantities = [
            ("storage_cost", self.storage_cost),
            ("backorder_cost", self.backorder_cost),
            ("initial_stock", self.initial_stock),
            ("target_stock", self.target_stock),
            ("initial_demand", self.initial_demand),
            ("subsequent_demand", self.subsequent_demand),
            ("warmup_order", self.warmup_order),
            ("warmup_delivery", self.warmup_delivery),
        ];
        for (name, value) in quantities {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// True while the chain still runs on constant orders and deliveries.
    pub fn in_warmup(&self, week: usize) -> bool {
        week <= self.warmup_weeks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.weeks, 41);
        assert_eq!(config.queue_delay, 2);
    }

    #[test]
    fn zero_delay_is_rejected() {
        let config = SimulationConfig {
            queue_delay: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn negative_or_nan_costs_are_rejected() {
        let negative = SimulationConfig {
            storage_cost: -0.5,
            ..SimulationConfig::default()
        };
        assert!(negative.validate().is_err());

        let nan = SimulationConfig {
            backorder_cost: f64::NAN,
            ..SimulationConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn warmup_window_is_inclusive() {
        let config = SimulationConfig::default();
        assert!(config.in_warmup(4));
        assert!(!config.in_warmup(5));
    }
}
