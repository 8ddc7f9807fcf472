pub mod reporting;
pub mod statistics;
