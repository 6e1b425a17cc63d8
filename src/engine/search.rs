use crate::domain::accommodation::{AccommodationCard, AccommodationStatus};
use crate::domain::availability;
use crate::domain::pricing;
use crate::domain::search::SearchFilter;
use crate::error::Result;

use super::Engine;

impl Engine {
    /// Catalog search. Each stage narrows the previous result: structural
    /// match, then date coverage, then the price branch. Cards carry a
    /// nightly floor unless a concrete stay is being priced, in which case
    /// they carry the stay total.
    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<AccommodationCard>> {
        filter.validate()?;
        let date_range = filter.date_range();
        let price_range = filter.price_range();
        // Pricing a concrete stay for an unspecified party sizes it at one.
        let guests = filter.guests.unwrap_or(1);

        let mut cards = Vec::new();
        for accommodation in self
            .accommodations
            .list_by_status(AccommodationStatus::Accepted)
            .await?
        {
            if !filter.matches(&accommodation) {
                continue;
            }
            let intervals = self
                .availabilities
                .list_by_accommodation(accommodation.id)
                .await?;
            if intervals.is_empty() {
                continue;
            }
            if let Some(ref range) = date_range
                && !availability::is_covered(&intervals, range)
            {
                continue;
            }

            let card = match date_range {
                None => {
                    let floor = availability::min_nightly_price(&intervals);
                    if let Some((from, to)) = price_range {
                        match floor {
                            Some(price) if price > 0.0 && price >= from && price <= to => {}
                            _ => continue,
                        }
                    }
                    let rating = self.rating_for(accommodation.id).await?;
                    AccommodationCard::with_min_price(&accommodation, floor, &rating)
                }
                Some(ref range) => {
                    let Some(total) = pricing::quote(
                        accommodation.pricing_mode,
                        &intervals,
                        range,
                        guests,
                    ) else {
                        continue;
                    };
                    if let Some((from, to)) = price_range
                        && !(total >= from && total <= to)
                    {
                        continue;
                    }
                    let rating = self.rating_for(accommodation.id).await?;
                    AccommodationCard::with_total_price(&accommodation, total, &rating)
                }
            };
            cards.push(card);
        }
        Ok(cards)
    }
}
