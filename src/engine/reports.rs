use chrono::Datelike;

use crate::domain::account::Caller;
use crate::domain::accommodation::AccommodationId;
use crate::domain::pricing;
use crate::domain::report::{AccommodationReport, MonthlyRevenue};
use crate::domain::reservation::ReservationStatus;
use crate::error::Result;

use super::Engine;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Engine {
    /// Revenue per month for one calendar year: accepted reservations
    /// grouped by start month, each priced over the interval slices its
    /// period still overlaps.
    pub async fn accommodation_report(
        &self,
        caller: &Caller,
        id: AccommodationId,
        year: i32,
    ) -> Result<AccommodationReport> {
        let accommodation = self.require_accommodation(id).await?;
        Self::require_manager(caller, &accommodation)?;

        let intervals = self.availabilities.list_by_accommodation(id).await?;
        let mut revenue_by_month = [0.0f64; 12];
        let mut total_reservations = 0u32;
        for reservation in self.reservations.list_by_accommodation(id).await? {
            if reservation.status != ReservationStatus::Accepted
                || reservation.period.from.year() != year
            {
                continue;
            }
            total_reservations += 1;
            let revenue = pricing::segments_total(
                accommodation.pricing_mode,
                &intervals,
                &reservation.period,
                reservation.guest_count,
            );
            revenue_by_month[reservation.period.from.month0() as usize] += revenue;
        }

        let monthly = MONTHS
            .iter()
            .zip(revenue_by_month)
            .map(|(month, revenue)| MonthlyRevenue {
                month: (*month).to_string(),
                revenue,
            })
            .collect();
        Ok(AccommodationReport {
            accommodation_id: id,
            year,
            total_reservations,
            monthly,
        })
    }
}
