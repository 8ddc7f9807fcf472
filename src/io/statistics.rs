// src/io/statistics.rs

use crate::io::reporting::HistoryRecord;
use crate::model::agent::AgentRole;
use crate::simulation::engine::WeekSnapshot;

/// Anything that wants to observe a run week by week.
pub trait StatisticsSink {
    fn record_week(&mut self, snapshot: &WeekSnapshot);

    /// Called once after the last week with the customer's total.
    fn record_final(&mut self, _customer_received: f64) {}
}

/// Keeping the raw snapshots is a sink too.
impl StatisticsSink for Vec<WeekSnapshot> {
    fn record_week(&mut self, snapshot: &WeekSnapshot) {
        self.push(snapshot.clone());
    }
}

/// Time series of one tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleSeries {
    pub costs: Vec<f64>,
    pub orders: Vec<f64>,
    pub effective_inventory: Vec<f64>,
}

/// Collects cost, order and effective inventory series for every tier.
#[derive(Debug, Clone, Default)]
pub struct SupplyChainStatistics {
    series: [RoleSeries; 4],
    // Week index of each recorded entry; a sink may be attached mid-run
    weeks: Vec<usize>,
    customer_demand: Vec<f64>,
    history: Vec<HistoryRecord>,
    customer_received: Option<f64>,
}

impl SupplyChainStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weeks_recorded(&self) -> usize {
        self.customer_demand.len()
    }

    pub fn series(&self, role: AgentRole) -> &RoleSeries {
        &self.series[role as usize]
    }

    /// Week numbers of the recorded entries, aligned with every series.
    pub fn weeks(&self) -> &[usize] {
        &self.weeks
    }

    pub fn customer_demand(&self) -> &[f64] {
        &self.customer_demand
    }

    /// One row per tier per week, ready for CSV export.
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    pub fn customer_received(&self) -> Option<f64> {
        self.customer_received
    }

    /// Cumulative cost of each tier at the last recorded week.
    pub fn cost_breakdown(&self) -> Vec<(AgentRole, f64)> {
        AgentRole::ALL
            .iter()
            .map(|role| {
                let cost = self.series(*role).costs.last().copied().unwrap_or(0.0);
                (*role, cost)
            })
            .collect()
    }

    /// Calculate the total cost for the entire supply chain
    pub fn total_supply_chain_cost(&self) -> f64 {
        self.cost_breakdown().iter().map(|(_, cost)| cost).sum()
    }

    /// Variance of each tier's orders relative to the variance of customer
    /// demand. Values above 1 mean the tier amplifies the signal.
    ///
    /// `None` when customer demand never varied.
    pub fn order_amplification(&self) -> Option<Vec<(AgentRole, f64)>> {
        let demand_variance = variance(&self.customer_demand)?;
        if demand_variance == 0.0 {
            return None;
        }

        Some(
            AgentRole::ALL
                .iter()
                .map(|role| {
                    let orders = variance(&self.series(*role).orders).unwrap_or(0.0);
                    (*role, orders / demand_variance)
                })
                .collect(),
        )
    }

    /// First week in which a tier's effective inventory went below zero.
    pub fn first_shortage_week(&self, role: AgentRole) -> Option<usize> {
        self.series(role)
            .effective_inventory
            .iter()
            .position(|inventory| *inventory < 0.0)
            .map(|index| self.weeks[index])
    }
}

impl StatisticsSink for SupplyChainStatistics {
    fn record_week(&mut self, snapshot: &WeekSnapshot) {
        self.weeks.push(snapshot.week);
        self.customer_demand.push(snapshot.customer_demand);

        for report in &snapshot.reports {
            let series = &mut self.series[report.role as usize];
            series.costs.push(report.cumulative_cost);
            series.orders.push(report.last_order);
            series.effective_inventory.push(report.effective_inventory);

            self.history.push(HistoryRecord::from_report(snapshot.week, report));
        }
    }

    fn record_final(&mut self, customer_received: f64) {
        self.customer_received = Some(customer_received);
    }
}

/// Population variance; `None` for an empty series.
fn variance(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    Some(values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n)
}
