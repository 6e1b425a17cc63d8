use thiserror::Error;

use crate::domain::account::AccountId;
use crate::domain::accommodation::AccommodationId;
use crate::domain::availability::AvailabilityId;
use crate::domain::reservation::ReservationId;
use crate::domain::review::ReviewId;

/// Stable failure classification exposed to callers. Every [`EngineError`]
/// maps to exactly one kind; transports decide how to render each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Blocked,
    Forbidden,
    Validation,
    Integrity,
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("accommodation not found: {id}")]
    AccommodationNotFound { id: AccommodationId },

    #[error("availability not found: {id}")]
    AvailabilityNotFound { id: AvailabilityId },

    #[error("reservation not found: {id}")]
    ReservationNotFound { id: ReservationId },

    #[error("review not found: {id}")]
    ReviewNotFound { id: ReviewId },

    #[error("availability overlaps an existing interval of accommodation {accommodation}")]
    AvailabilityOverlap { accommodation: AccommodationId },

    #[error("cannot remove availability: {count} active reservation(s) in this period")]
    AvailabilityHasReservations { count: u64 },

    #[error("accommodation {accommodation} is not available for the requested period")]
    NotAvailable { accommodation: AccommodationId },

    #[error("guests may only cancel a reservation")]
    GuestCannotChangeStatus,

    #[error("hosts may only accept or decline a reservation")]
    HostCannotChangeStatus,

    #[error("only the reserving guest may perform this action")]
    NotReservationOwner,

    #[error("only the owning host may perform this action")]
    NotAccommodationOwner,

    #[error("a guest account is required for this action")]
    GuestRoleRequired,

    #[error("a host account is required for this action")]
    HostRoleRequired,

    #[error("an admin account is required for this action")]
    AdminRoleRequired,

    #[error("guest {guest} has no completed stay eligible for review")]
    NoEligibleStay { guest: AccountId },

    #[error("guest {guest} has already left a review for every completed stay")]
    ReviewBudgetExhausted { guest: AccountId },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("store integrity violation: {0}")]
    Integrity(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AccommodationNotFound { .. }
            | Self::AvailabilityNotFound { .. }
            | Self::ReservationNotFound { .. }
            | Self::ReviewNotFound { .. } => ErrorKind::NotFound,
            Self::AvailabilityOverlap { .. } | Self::NotAvailable { .. } => ErrorKind::Conflict,
            Self::AvailabilityHasReservations { .. } => ErrorKind::Blocked,
            Self::GuestCannotChangeStatus
            | Self::HostCannotChangeStatus
            | Self::NotReservationOwner
            | Self::NotAccommodationOwner
            | Self::GuestRoleRequired
            | Self::HostRoleRequired
            | Self::AdminRoleRequired
            | Self::NoEligibleStay { .. }
            | Self::ReviewBudgetExhausted { .. } => ErrorKind::Forbidden,
            Self::InvalidInput { .. } | Self::Config(_) | Self::Yaml(_) => ErrorKind::Validation,
            Self::Integrity(_) | Self::Io(_) => ErrorKind::Integrity,
        }
    }

    /// Stable message key for localization; the display text above is a
    /// fallback rendering only.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::AccommodationNotFound { .. } => "accommodationNotFound",
            Self::AvailabilityNotFound { .. } => "availabilityNotFound",
            Self::ReservationNotFound { .. } => "reservationNotFound",
            Self::ReviewNotFound { .. } => "reviewNotFound",
            Self::AvailabilityOverlap { .. } => "availabilityOverlap",
            Self::AvailabilityHasReservations { .. } => "availabilityHasReservations",
            Self::NotAvailable { .. } => "accommodationNotAvailable",
            Self::GuestCannotChangeStatus => "guestCannotChangeReservationStatus",
            Self::HostCannotChangeStatus => "hostCannotChangeReservationStatus",
            Self::NotReservationOwner => "guestNotAuthorized",
            Self::NotAccommodationOwner => "hostNotAuthorized",
            Self::GuestRoleRequired => "guestRoleRequired",
            Self::HostRoleRequired => "hostRoleRequired",
            Self::AdminRoleRequired => "adminRoleRequired",
            Self::NoEligibleStay { .. } => "reviewNoRecentStay",
            Self::ReviewBudgetExhausted { .. } => "reviewBudgetExhausted",
            Self::InvalidInput { .. } => "invalidInput",
            Self::Integrity(_) => "storeIntegrity",
            Self::Config(_) | Self::Yaml(_) => "configInvalid",
            Self::Io(_) => "ioFailure",
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
