pub mod agent;
pub mod customer;
pub mod links;
pub mod queues;
pub mod tier;
