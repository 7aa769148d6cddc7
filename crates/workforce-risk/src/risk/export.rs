use std::io::Write;

use super::components::Component;
use super::engine::{EmployeeRiskProfile, PopulationReport};

const VALUE_COLUMNS: [&str; 5] = ["P_value", "B_value", "E_value", "W_value", "V_value"];
const BIN_COLUMNS: [&str; 5] = ["P_bin", "B_bin", "E_bin", "W_bin", "V_bin"];

fn header() -> Vec<&'static str> {
    let mut columns = vec!["Employee_ID"];
    columns.extend(VALUE_COLUMNS);
    columns.extend(["CRS", "CRR"]);
    columns.extend(BIN_COLUMNS);
    columns.extend(["Concern", "Sent"]);
    columns
}

fn row(profile: &EmployeeRiskProfile) -> Vec<String> {
    let mut cells = Vec::with_capacity(15);
    cells.push(profile.employee_id.to_string());
    for component in Component::ALL {
        cells.push(
            profile
                .value(component)
                .map(|value| value.to_string())
                .unwrap_or_default(),
        );
    }
    cells.push(profile.crs.to_string());
    cells.push(profile.crr.to_string());
    for component in Component::ALL {
        cells.push(profile.tier(component).label().to_string());
    }
    cells.push(profile.concern.clone());
    cells.push(if profile.flagged { "Yes" } else { "No" }.to_string());
    cells
}

/// Writes one results row per employee; unknown values and tiers are empty cells.
pub fn write_results_csv<W: Write>(report: &PopulationReport, writer: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(header())?;
    for profile in &report.employees {
        writer.write_record(row(profile))?;
    }
    writer.flush()?;
    Ok(())
}
