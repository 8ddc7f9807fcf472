// src/strategy/implementations.rs

use crate::simulation::config::SimulationConfig;
use crate::strategy::traits::OrderPolicy;

// =========================================================================
// Anchor-and-Maintain
// =========================================================================

/// The heuristic every tier runs by default.
///
/// During warm-up it orders a constant amount. After that:
/// Order = 0.5 * Backlog + (TargetStock - Stock), where the second term is
/// only added when stock is below target. Nothing is rounded.
#[derive(Debug, Clone)]
pub struct AnchorAndMaintain {
    warmup_weeks: usize,
    warmup_order: f64,
    target_stock: f64,
    backlog_weight: f64,
}

impl AnchorAndMaintain {
    pub fn new(warmup_weeks: usize, warmup_order: f64, target_stock: f64) -> Self {
        Self {
            warmup_weeks,
            warmup_order,
            target_stock,
            backlog_weight: 0.5,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.warmup_weeks, config.warmup_order, config.target_stock)
    }
}

impl OrderPolicy for AnchorAndMaintain {
    fn calculate_order(&mut self, week: usize, stock: f64, backlog: f64) -> f64 {
        if week <= self.warmup_weeks {
            return self.warmup_order;
        }

        // Anchor: follow half of what is owed downstream
        let mut order = self.backlog_weight * backlog;

        // Maintain: top the shelf back up to target
        let shortfall = self.target_stock - stock;
        if shortfall > 0.0 {
            order += shortfall;
        }

        order
    }
}
