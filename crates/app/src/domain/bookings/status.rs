//! Booking status machine.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::domain::bookings::errors::BookingsServiceError;

/// Lifecycle of a booking. New bookings start as [`BookingStatus::Pending`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Canceled,
}

impl BookingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Canceled => "Canceled",
        }
    }

    /// Pending and Confirmed bookings block a second booking for the same email.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Whether `self -> next` is an edge of the lifecycle.
    #[must_use]
    pub const fn can_become(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Canceled)
                | (Self::Confirmed, Self::Completed | Self::Canceled)
        )
    }

    /// Validate a move to `next`.
    ///
    /// Returns `Ok(false)` when the booking is already in `next`, `Ok(true)`
    /// when the status should change.
    ///
    /// # Errors
    ///
    /// Returns [`BookingsServiceError::InvalidTransition`] for any move that is
    /// not an edge of the lifecycle.
    pub fn transition_to(self, next: Self) -> Result<bool, BookingsServiceError> {
        if self == next {
            return Ok(false);
        }

        if self.can_become(next) {
            Ok(true)
        } else {
            Err(BookingsServiceError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown booking status: {0}")]
pub struct UnknownBookingStatus(pub String);

impl FromStr for BookingStatus {
    type Err = UnknownBookingStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Confirmed" => Ok(Self::Confirmed),
            "Completed" => Ok(Self::Completed),
            "Canceled" => Ok(Self::Canceled),
            other => Err(UnknownBookingStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Canceled,
    ];

    #[test]
    fn only_pending_and_confirmed_are_active() {
        let active: Vec<_> = ALL.into_iter().filter(|s| s.is_active()).collect();

        assert_eq!(active, vec![BookingStatus::Pending, BookingStatus::Confirmed]);
    }

    #[test]
    fn lifecycle_edges() {
        use BookingStatus::{Canceled, Completed, Confirmed, Pending};

        let allowed = [
            (Pending, Confirmed),
            (Pending, Canceled),
            (Confirmed, Completed),
            (Confirmed, Canceled),
        ];

        for from in ALL {
            for to in ALL {
                if from == to {
                    continue;
                }

                assert_eq!(
                    from.can_become(to),
                    allowed.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn reapplying_status_is_a_no_op() {
        for status in ALL {
            assert!(matches!(status.transition_to(status), Ok(false)), "{status}");
        }
    }

    #[test]
    fn confirm_complete_complete_ends_completed() -> Result<(), BookingsServiceError> {
        let mut status = BookingStatus::Pending;

        for next in [
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Completed,
        ] {
            status.transition_to(next)?;
            status = next;
        }

        assert_eq!(status, BookingStatus::Completed);

        Ok(())
    }

    #[test]
    fn completing_canceled_booking_is_rejected() {
        let result = BookingStatus::Canceled.transition_to(BookingStatus::Completed);

        assert!(matches!(
            result,
            Err(BookingsServiceError::InvalidTransition {
                from: BookingStatus::Canceled,
                to: BookingStatus::Completed,
            })
        ));
    }

    #[test]
    fn parses_stored_names() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<BookingStatus>().ok(), Some(status));
        }

        assert!("pending".parse::<BookingStatus>().is_err());
    }
}
