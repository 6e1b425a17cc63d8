use serde::{Deserialize, Serialize};

use crate::domain::accommodation::AccommodationId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: f64,
}

/// Per-accommodation revenue report for one calendar year: accepted
/// reservations grouped by their start month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccommodationReport {
    pub accommodation_id: AccommodationId,
    pub year: i32,
    pub total_reservations: u32,
    pub monthly: Vec<MonthlyRevenue>,
}

impl std::fmt::Display for AccommodationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Revenue report for accommodation {} ({}): {} reservation(s)",
            self.accommodation_id, self.year, self.total_reservations
        )?;
        for entry in &self.monthly {
            writeln!(f, "{:<12} {:>10.2}", entry.month, entry.revenue)?;
        }
        Ok(())
    }
}
