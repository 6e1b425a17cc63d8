use serde::{Deserialize, Serialize};

use crate::domain::account::{AccountId, Role};
use crate::domain::accommodation::AccommodationId;
use crate::domain::availability::DateRange;
use crate::error::{EngineError, Result};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct ReservationId(pub u64);

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    Pending,
    Accepted,
    Declined,
    Cancelled,
}

impl ReservationStatus {
    /// Statuses that block availability removal over their period.
    pub const ACTIVE: [ReservationStatus; 2] = [Self::Pending, Self::Accepted];
}

/// A guest's booking of one accommodation. Created Pending; mutated only
/// through status transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub guest_id: AccountId,
    pub accommodation_id: AccommodationId,
    pub period: DateRange,
    pub guest_count: u32,
    pub status: ReservationStatus,
}

/// Role gate for status transitions: guests may only cancel, hosts may only
/// accept or decline, admins are unrestricted. The reservation's current
/// status is deliberately not consulted.
pub fn check_status_change(role: Role, new_status: ReservationStatus) -> Result<()> {
    match role {
        Role::Admin => Ok(()),
        Role::Guest if new_status == ReservationStatus::Cancelled => Ok(()),
        Role::Guest => Err(EngineError::GuestCannotChangeStatus),
        Role::Host
            if matches!(
                new_status,
                ReservationStatus::Accepted | ReservationStatus::Declined
            ) =>
        {
            Ok(())
        }
        Role::Host => Err(EngineError::HostCannotChangeStatus),
        Role::Anonymous => Err(EngineError::GuestRoleRequired),
    }
}
