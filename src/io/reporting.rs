// src/io/reporting.rs

use crate::error::Result;
use crate::model::agent::AgentRole;
use crate::model::tier::ActorReport;
use log::info;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

// We make this Serialize so we can write it to CSV
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    pub week: usize,
    pub role: AgentRole,
    pub stock: f64,
    pub backlog: f64,
    pub effective_inventory: f64,
    pub order_placed: f64,
    pub incoming_demand: f64,
    pub shipment_sent: f64,
    pub shipment_received: f64,
    pub cumulative_cost: f64,
}

impl HistoryRecord {
    pub fn from_report(week: usize, report: &ActorReport) -> Self {
        Self {
            week,
            role: report.role,
            stock: report.stock,
            backlog: report.backlog,
            effective_inventory: report.effective_inventory,
            order_placed: report.last_order,
            incoming_demand: report.order_received,
            shipment_sent: report.shipment_sent,
            shipment_received: report.delivery_received,
            cumulative_cost: report.cumulative_cost,
        }
    }
}

/// Writes the simulation history as CSV (with a header row) to any writer.
pub fn write_history<W: Write>(writer: W, data: &[HistoryRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for record in data {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;
    Ok(())
}

/// Writes the simulation history to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/run_1.csv").
/// * `data` - The history rows collected during the run.
pub fn write_simulation_log<P: AsRef<Path>>(file_path: P, data: &[HistoryRecord]) -> Result<()> {
    let path = file_path.as_ref();
    let file = std::fs::File::create(path)?;
    write_history(file, data)?;

    info!("Exported {} rows to '{}'", data.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(week: usize, role: AgentRole) -> HistoryRecord {
        HistoryRecord {
            week,
            role,
            stock: 0.0,
            backlog: 3.0,
            effective_inventory: -3.0,
            order_placed: 13.5,
            incoming_demand: 9.0,
            shipment_sent: 6.0,
            shipment_received: 0.0,
            cumulative_cost: 176.0,
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let mut buf = Vec::new();
        write_history(&mut buf, &[record(11, AgentRole::Retailer)]).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("week,role,stock,backlog,effective_inventory,order_placed,incoming_demand,shipment_sent,shipment_received,cumulative_cost")
        );
        assert_eq!(lines.next(), Some("11,Retailer,0.0,3.0,-3.0,13.5,9.0,6.0,0.0,176.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn writes_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.csv");

        let rows = vec![record(0, AgentRole::Retailer), record(0, AgentRole::Factory)];
        write_simulation_log(&path, &rows).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Factory"));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("run.csv");
        let err = write_simulation_log(&path, &[]).unwrap_err();
        assert!(matches!(err, crate::error::SimulationError::Io(_)));
    }
}
