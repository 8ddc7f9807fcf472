// src/simulation/topology.rs

use crate::model::agent::{AgentRole, CostRates, SupplyChainAgent};
use crate::model::links::{LinkId, Links};
use crate::model::queues::DelayQueue;
use crate::model::tier::{Tier, Wiring};
use crate::simulation::config::SimulationConfig;
use crate::strategy::traits::OrderPolicy;

/// The links between each pair of neighbours.
///
/// Index 0 is retailer <-> wholesaler, 1 is wholesaler <-> distributor,
/// 2 is distributor <-> factory.
#[derive(Debug, Clone)]
pub struct ChainLinks {
    /// Flow UPSTREAM (Retailer -> Wholesaler -> ...)
    pub order_links: [LinkId; 3],
    /// Flow DOWNSTREAM (... -> Wholesaler -> Retailer)
    pub delivery_links: [LinkId; 3],
}

/// Builds the six seeded pipes and wires the four tiers to them, in turn
/// order.
pub fn assemble(
    config: &SimulationConfig,
    policies: [Box<dyn OrderPolicy>; 4],
) -> (Links, ChainLinks, Vec<Tier>) {
    let mut links = Links::new();
    let seed = || DelayQueue::seeded(config.queue_delay, config.initial_demand);

    let mut order_links = Vec::with_capacity(3);
    let mut delivery_links = Vec::with_capacity(3);
    for _ in 0..3 {
        order_links.push(links.add(seed()));
        delivery_links.push(links.add(seed()));
    }
    let order_links = [order_links[0], order_links[1], order_links[2]];
    let delivery_links = [delivery_links[0], delivery_links[1], delivery_links[2]];

    let costs = CostRates {
        storage: config.storage_cost,
        backorder: config.backorder_cost,
    };

    let tiers = AgentRole::ALL
        .into_iter()
        .zip(policies)
        .map(|(role, policy)| {
            let agent = SupplyChainAgent::new(role, config.initial_stock, costs, policy);
            let wiring = match role {
                AgentRole::Retailer => Wiring::Retailer {
                    inbound_deliveries: delivery_links[0],
                    outbound_orders: order_links[0],
                },
                AgentRole::Wholesaler => Wiring::Intermediate {
                    inbound_orders: order_links[0],
                    inbound_deliveries: delivery_links[1],
                    outbound_orders: order_links[1],
                    outbound_deliveries: delivery_links[0],
                },
                AgentRole::Distributor => Wiring::Intermediate {
                    inbound_orders: order_links[1],
                    inbound_deliveries: delivery_links[2],
                    outbound_orders: order_links[2],
                    outbound_deliveries: delivery_links[1],
                },
                AgentRole::Factory => Wiring::Factory {
                    inbound_orders: order_links[2],
                    outbound_deliveries: delivery_links[2],
                    production: seed(),
                },
            };
            Tier::new(agent, wiring)
        })
        .collect();

    (
        links,
        ChainLinks {
            order_links,
            delivery_links,
        },
        tiers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::implementations::AnchorAndMaintain;

    fn policies(config: &SimulationConfig) -> [Box<dyn OrderPolicy>; 4] {
        [(); 4].map(|_| Box::new(AnchorAndMaintain::from_config(config)) as Box<dyn OrderPolicy>)
    }

    #[test]
    fn every_link_starts_full_of_initial_demand() {
        let config = SimulationConfig::default();
        let (links, chain, tiers) = assemble(&config, policies(&config));

        assert_eq!(links.len(), 6);
        for id in chain.order_links.iter().chain(chain.delivery_links.iter()) {
            assert!(links[*id].is_full());
            assert_eq!(links[*id].resident_units(), 10.0);
        }

        let roles: Vec<_> = tiers.iter().map(|t| t.role()).collect();
        assert_eq!(roles, AgentRole::ALL.to_vec());

        let production = tiers[3].production_queue().unwrap();
        assert_eq!(production.capacity(), 2);
        assert_eq!(production.resident_units(), 10.0);
        assert!(tiers[0].production_queue().is_none());
    }

    #[test]
    fn neighbours_share_the_same_links() {
        let config = SimulationConfig::default();
        let (_, chain, tiers) = assemble(&config, policies(&config));

        match (tiers[0].wiring(), tiers[1].wiring()) {
            (
                Wiring::Retailer {
                    inbound_deliveries,
                    outbound_orders,
                },
                Wiring::Intermediate {
                    inbound_orders,
                    outbound_deliveries,
                    ..
                },
            ) => {
                assert_eq!(outbound_orders, inbound_orders);
                assert_eq!(inbound_deliveries, outbound_deliveries);
                assert_eq!(*outbound_orders, chain.order_links[0]);
            }
            other => panic!("unexpected wiring: {:?}", other),
        }
    }
}
