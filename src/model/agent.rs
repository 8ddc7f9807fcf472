// src/model/agent.rs

use crate::model::queues::DelayQueue;
use crate::strategy::traits::OrderPolicy;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AgentRole {
    Retailer,
    Wholesaler,
    Distributor,
    Factory,
}

impl AgentRole {
    /// Turn order within a week, downstream first.
    pub const ALL: [AgentRole; 4] = [
        AgentRole::Retailer,
        AgentRole::Wholesaler,
        AgentRole::Distributor,
        AgentRole::Factory,
    ];
}

/// Per-unit weekly costs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRates {
    pub storage: f64,
    pub backorder: f64,
}

/// The state of a single node in the supply chain.
#[derive(Debug)]
pub struct SupplyChainAgent {
    // Identity
    pub role: AgentRole,

    // State Variables
    pub stock: f64,
    pub backlog: f64,
    pub cumulative_cost: f64,
    pub last_order_placed: f64, // Order, or production start for the factory

    // Tracking for Analysis/Logging
    pub last_order_received: f64,
    pub last_delivery_received: f64,
    pub last_shipment_sent: f64,

    costs: CostRates,

    // The "Brain" - interchangeable decision logic
    policy: Box<dyn OrderPolicy>,
}

impl SupplyChainAgent {
    pub fn new(
        role: AgentRole,
        initial_stock: f64,
        costs: CostRates,
        policy: Box<dyn OrderPolicy>,
    ) -> Self {
        Self {
            role,
            stock: initial_stock,
            backlog: 0.0,
            cumulative_cost: 0.0,
            last_order_placed: 0.0,
            last_order_received: 0.0,
            last_delivery_received: 0.0,
            last_shipment_sent: 0.0,
            costs,
            policy,
        }
    }

    /// Step 1: Take whatever arrives at the front of the incoming pipe.
    pub fn receive_delivery(&mut self, source: &mut DelayQueue) -> f64 {
        let quantity = source.pop_front();
        self.stock += quantity;
        self.last_delivery_received = quantity;
        quantity
    }

    /// Step 2: A downstream order joins the backlog.
    pub fn receive_order(&mut self, units: f64) {
        self.backlog += units;
        self.last_order_received = units;
    }

    /// Step 3: Ship as much of the backlog as stock allows.
    ///
    /// Returns the quantity shipped downstream. Afterwards either the backlog
    /// or the stock is zero.
    pub fn fulfill_orders(&mut self) -> f64 {
        let shipped = if self.stock >= self.backlog {
            // We can fill everything
            let shipped = self.backlog;
            self.stock -= shipped;
            self.backlog = 0.0;
            shipped
        } else {
            // We are short! Ship what we have, backlog the rest.
            let shipped = self.stock;
            self.backlog -= shipped;
            self.stock = 0.0;
            shipped
        };

        self.last_shipment_sent = shipped;
        shipped
    }

    /// Warm-up deliveries skip the allocation rule entirely: stock and
    /// backlog stay as they are.
    pub fn ship_fixed(&mut self, quantity: f64) -> f64 {
        self.last_shipment_sent = quantity;
        quantity
    }

    /// Step 4: Run the policy to decide what to order from upstream.
    pub fn place_order(&mut self, week: usize) -> f64 {
        let quantity = self.policy.calculate_order(week, self.stock, self.backlog);
        self.last_order_placed = quantity;
        quantity
    }

    /// Step 5: Charge this week's holding and backorder costs.
    pub fn accrue_cost(&mut self) -> f64 {
        let cost = self.current_cost();
        self.cumulative_cost += cost;
        cost
    }

    /// What this week would cost given the current position.
    pub fn current_cost(&self) -> f64 {
        (self.stock * self.costs.storage) + (self.backlog * self.costs.backorder)
    }

    /// Stock minus backlog. Negative means a net shortage.
    pub fn effective_inventory(&self) -> f64 {
        self.stock - self.backlog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::implementations::AnchorAndMaintain;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const COSTS: CostRates = CostRates {
        storage: 0.5,
        backorder: 1.0,
    };

    fn agent(stock: f64) -> SupplyChainAgent {
        SupplyChainAgent::new(
            AgentRole::Wholesaler,
            stock,
            COSTS,
            Box::new(AnchorAndMaintain::new(4, 4.0, 12.0)),
        )
    }

    #[test]
    fn full_fulfillment_clears_backlog() {
        let mut a = agent(12.0);
        a.receive_order(5.0);
        assert_eq!(a.fulfill_orders(), 5.0);
        assert_eq!(a.stock, 7.0);
        assert_eq!(a.backlog, 0.0);
    }

    #[test]
    fn partial_fulfillment_backorders_the_rest() {
        let mut a = agent(3.0);
        a.receive_order(9.0);
        assert_eq!(a.fulfill_orders(), 3.0);
        assert_eq!(a.stock, 0.0);
        assert_eq!(a.backlog, 6.0);
        assert_eq!(a.effective_inventory(), -6.0);
    }

    #[test]
    fn empty_shelf_ships_nothing() {
        let mut a = agent(0.0);
        a.receive_order(4.0);
        assert_eq!(a.fulfill_orders(), 0.0);
        assert_eq!(a.backlog, 4.0);
    }

    #[test]
    fn delivery_adds_to_stock() {
        let mut a = agent(12.0);
        let mut pipe = DelayQueue::seeded(2, 5.0);
        assert_eq!(a.receive_delivery(&mut pipe), 5.0);
        assert_eq!(a.stock, 17.0);

        pipe.pop_front();
        assert_eq!(a.receive_delivery(&mut pipe), 0.0);
        assert_eq!(a.stock, 17.0);
    }

    #[test]
    fn fixed_shipment_leaves_position_alone() {
        let mut a = agent(12.0);
        a.receive_order(5.0);
        assert_eq!(a.ship_fixed(4.0), 4.0);
        assert_eq!(a.stock, 12.0);
        assert_eq!(a.backlog, 5.0);
        assert_eq!(a.last_shipment_sent, 4.0);
    }

    #[test]
    fn cost_accrues_storage_and_backorder() {
        let mut a = agent(17.0);
        a.receive_order(5.0);
        assert_eq!(a.accrue_cost(), 13.5);
        assert_eq!(a.accrue_cost(), 13.5);
        assert_eq!(a.cumulative_cost, 27.0);
    }

    #[test]
    fn place_order_records_the_quantity() {
        let mut a = agent(3.0);
        a.receive_order(2.0);
        assert_eq!(a.place_order(8), 10.0);
        assert_eq!(a.last_order_placed, 10.0);
    }

    #[test]
    fn fulfillment_never_leaves_both_stock_and_backlog() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let stock = f64::from(rng.gen_range(0u32..200)) * 0.5;
            let order = f64::from(rng.gen_range(0u32..200)) * 0.5;

            let mut a = agent(stock);
            a.receive_order(order);
            let shipped = a.fulfill_orders();

            assert!(a.stock >= 0.0 && a.backlog >= 0.0);
            assert!(a.stock == 0.0 || a.backlog == 0.0);
            assert_eq!(shipped, stock.min(order));
            assert_eq!(a.stock + shipped, stock);
            assert_eq!(a.backlog + shipped, order);
        }
    }
}
