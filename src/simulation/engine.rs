// src/simulation/engine.rs

use crate::error::Result;
use crate::io::statistics::StatisticsSink;
use crate::model::agent::AgentRole;
use crate::model::customer::Customer;
use crate::model::links::Links;
use crate::model::queues::DelayQueue;
use crate::model::tier::{ActorReport, Tier, TurnContext};
use crate::simulation::config::SimulationConfig;
use crate::simulation::topology::{self, ChainLinks};
use crate::strategy::implementations::AnchorAndMaintain;
use crate::strategy::traits::OrderPolicy;
use log::debug;
use serde::Serialize;

/// What every tier reported at the end of one week, in turn order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSnapshot {
    pub week: usize,
    pub customer_demand: f64,
    pub reports: [ActorReport; 4],
}

impl WeekSnapshot {
    pub fn report(&self, role: AgentRole) -> &ActorReport {
        &self.reports[role as usize]
    }
}

/// Read once, after the last week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub weeks: usize,
    pub customer_received: f64,
    pub final_costs: Vec<(AgentRole, f64)>,
}

pub struct ChainSimulation {
    config: SimulationConfig,

    // The Actors, in turn order
    tiers: Vec<Tier>,
    customer: Customer,

    // The Pipes (Delays)
    links: Links,
    chain_links: ChainLinks,

    current_week: usize,
}

impl ChainSimulation {
    /// A chain where every tier runs anchor-and-maintain.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let policies = [(); 4].map(|_| {
            Box::new(AnchorAndMaintain::from_config(&config)) as Box<dyn OrderPolicy>
        });
        Self::with_policies(config, policies)
    }

    /// Policies are given retailer first, factory last.
    pub fn with_policies(
        config: SimulationConfig,
        policies: [Box<dyn OrderPolicy>; 4],
    ) -> Result<Self> {
        config.validate()?;

        let (links, chain_links, tiers) = topology::assemble(&config, policies);
        let customer = Customer::new(&config);

        Ok(Self {
            config,
            tiers,
            customer,
            links,
            chain_links,
            current_week: 0,
        })
    }

    /// Advances one week and returns what each tier reported, or `None` once
    /// the configured number of weeks has been played.
    pub fn step(&mut self) -> Option<WeekSnapshot> {
        if self.is_finished() {
            return None;
        }
        let week = self.current_week;

        debug!("=== Week {} ===", week);

        let customer_demand = self.customer.next_order_quantity(week);
        let mut ctx = TurnContext {
            week,
            config: &self.config,
            links: &mut self.links,
            customer: &mut self.customer,
        };

        // Retailer -> Wholesaler -> Distributor -> Factory, strictly
        let reports = [
            self.tiers[0].take_turn(&mut ctx),
            self.tiers[1].take_turn(&mut ctx),
            self.tiers[2].take_turn(&mut ctx),
            self.tiers[3].take_turn(&mut ctx),
        ];

        for report in &reports {
            debug!(
                "{:?}: cost={} order={} effective inventory={}",
                report.role, report.cumulative_cost, report.last_order, report.effective_inventory
            );
        }

        self.current_week += 1;

        Some(WeekSnapshot {
            week,
            customer_demand,
            reports,
        })
    }

    /// The remaining weeks as a lazy sequence. Once drained it stays empty.
    pub fn weeks(&mut self) -> Weeks<'_> {
        Weeks { sim: self }
    }

    /// Plays all remaining weeks into `sink`.
    pub fn run<S: StatisticsSink + ?Sized>(&mut self, sink: &mut S) -> RunSummary {
        for snapshot in self.weeks() {
            sink.record_week(&snapshot);
        }

        let summary = self.summary();
        sink.record_final(summary.customer_received);
        summary
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            weeks: self.current_week,
            customer_received: self.customer.total_received(),
            final_costs: self
                .tiers
                .iter()
                .map(|tier| (tier.role(), tier.agent.cumulative_cost))
                .collect(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current_week >= self.config.weeks
    }

    pub fn current_week(&self) -> usize {
        self.current_week
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn tier(&self, role: AgentRole) -> &Tier {
        &self.tiers[role as usize]
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    pub fn chain_links(&self) -> &ChainLinks {
        &self.chain_links
    }

    pub fn production_queue(&self) -> Option<&DelayQueue> {
        self.tier(AgentRole::Factory).production_queue()
    }
}

/// Iterator over the weeks still to be played.
pub struct Weeks<'a> {
    sim: &'a mut ChainSimulation,
}

impl Iterator for Weeks<'_> {
    type Item = WeekSnapshot;

    fn next(&mut self) -> Option<WeekSnapshot> {
        self.sim.step()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.sim.config.weeks.saturating_sub(self.sim.current_week);
        (left, Some(left))
    }
}
