// src/model/tier.rs

use crate::model::agent::{AgentRole, SupplyChainAgent};
use crate::model::customer::Customer;
use crate::model::links::{LinkId, Links};
use crate::model::queues::DelayQueue;
use crate::simulation::config::SimulationConfig;
use log::{debug, trace, warn};
use serde::Serialize;

/// Which pipes a tier pulls from and pushes into.
#[derive(Debug)]
pub enum Wiring {
    /// Faces the customer directly: no order pipe below, no delivery pipe to
    /// the customer.
    Retailer {
        inbound_deliveries: LinkId,
        outbound_orders: LinkId,
    },
    /// Wholesaler and distributor. Only their place in the chain differs.
    Intermediate {
        inbound_orders: LinkId,
        inbound_deliveries: LinkId,
        outbound_orders: LinkId,
        outbound_deliveries: LinkId,
    },
    /// No upstream supplier. Production runs through a pipe the factory owns.
    Factory {
        inbound_orders: LinkId,
        outbound_deliveries: LinkId,
        production: DelayQueue,
    },
}

/// Everything a tier touches during its turn besides its own state.
pub struct TurnContext<'a> {
    pub week: usize,
    pub config: &'a SimulationConfig,
    pub links: &'a mut Links,
    pub customer: &'a mut Customer,
}

/// The three figures every tier reports after its turn, plus the raw
/// position behind them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActorReport {
    pub role: AgentRole,
    pub cumulative_cost: f64,
    pub last_order: f64,
    pub effective_inventory: f64,
    pub stock: f64,
    pub backlog: f64,
    pub order_received: f64,
    pub delivery_received: f64,
    pub shipment_sent: f64,
}

/// One participant of the chain: shared agent state plus its wiring.
#[derive(Debug)]
pub struct Tier {
    pub agent: SupplyChainAgent,
    wiring: Wiring,
}

impl Tier {
    pub fn new(agent: SupplyChainAgent, wiring: Wiring) -> Self {
        Self { agent, wiring }
    }

    pub fn role(&self) -> AgentRole {
        self.agent.role
    }

    pub fn wiring(&self) -> &Wiring {
        &self.wiring
    }

    /// The factory's production pipe, if this tier is the factory.
    pub fn production_queue(&self) -> Option<&DelayQueue> {
        match &self.wiring {
            Wiring::Factory { production, .. } => Some(production),
            _ => None,
        }
    }

    /// Runs one week for this tier. The step order is fixed:
    /// receive delivery, receive order, deliver, order (or produce), cost.
    pub fn take_turn(&mut self, ctx: &mut TurnContext<'_>) -> ActorReport {
        let week = ctx.week;
        let warmup = ctx.config.in_warmup(week);
        let agent = &mut self.agent;

        match &mut self.wiring {
            Wiring::Retailer {
                inbound_deliveries,
                outbound_orders,
            } => {
                agent.receive_delivery(&mut ctx.links[*inbound_deliveries]);
                agent.receive_order(ctx.customer.next_order_quantity(week));

                // Hand-over to the customer is immediate
                let shipped = deliver(agent, warmup, ctx.config);
                ctx.customer.record_delivery(shipped);

                let order = agent.place_order(week);
                push_or_log(&mut ctx.links[*outbound_orders], order, week, agent.role, "order");
            }
            Wiring::Intermediate {
                inbound_orders,
                inbound_deliveries,
                outbound_orders,
                outbound_deliveries,
            } => {
                agent.receive_delivery(&mut ctx.links[*inbound_deliveries]);
                let incoming = ctx.links[*inbound_orders].pop_front();
                agent.receive_order(incoming);

                let shipped = deliver(agent, warmup, ctx.config);
                push_or_log(&mut ctx.links[*outbound_deliveries], shipped, week, agent.role, "delivery");

                let order = agent.place_order(week);
                push_or_log(&mut ctx.links[*outbound_orders], order, week, agent.role, "order");
            }
            Wiring::Factory {
                inbound_orders,
                outbound_deliveries,
                production,
            } => {
                // Finish production
                agent.receive_delivery(production);
                let incoming = ctx.links[*inbound_orders].pop_front();
                agent.receive_order(incoming);

                let shipped = deliver(agent, warmup, ctx.config);
                push_or_log(&mut ctx.links[*outbound_deliveries], shipped, week, agent.role, "delivery");

                // Start production
                let run = agent.place_order(week);
                push_or_log(production, run, week, agent.role, "production");
            }
        }

        agent.accrue_cost();

        trace!(
            "week {} {:?}: stock={} backlog={} order={} cost={}",
            week,
            agent.role,
            agent.stock,
            agent.backlog,
            agent.last_order_placed,
            agent.cumulative_cost
        );

        self.report()
    }

    pub fn report(&self) -> ActorReport {
        let agent = &self.agent;
        ActorReport {
            role: agent.role,
            cumulative_cost: agent.cumulative_cost,
            last_order: agent.last_order_placed,
            effective_inventory: agent.effective_inventory(),
            stock: agent.stock,
            backlog: agent.backlog,
            order_received: agent.last_order_received,
            delivery_received: agent.last_delivery_received,
            shipment_sent: agent.last_shipment_sent,
        }
    }
}

fn deliver(agent: &mut SupplyChainAgent, warmup: bool, config: &SimulationConfig) -> f64 {
    if warmup {
        agent.ship_fixed(config.warmup_delivery)
    } else {
        agent.fulfill_orders()
    }
}

/// A full pipe drops the quantity; the turn carries on regardless.
///
/// In week 0 the order pipes still hold both seed entries when the tier
/// below pushes, because the tier above has not popped yet. Those drops are
/// part of the model; anything later is worth a warning.
fn push_or_log(queue: &mut DelayQueue, quantity: f64, week: usize, role: AgentRole, what: &str) {
    if queue.try_push(quantity) {
        return;
    }
    if week == 0 {
        debug!(
            "{:?}: week 0 {} of {} dropped, pipe still holds its seed",
            role, what, quantity
        );
    } else {
        warn!(
            "{:?}: {} of {} rejected in week {}, pipe already holds {} entries",
            role,
            what,
            quantity,
            week,
            queue.len()
        );
    }
}
