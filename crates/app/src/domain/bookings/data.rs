//! Booking Data

use crate::domain::{
    bookings::{
        errors::BookingsServiceError,
        records::{BookingUuid, ServiceSelection},
    },
    products::records::ProductUuid,
    users::{data::is_plausible_email, records::UserUuid},
};

/// A requested product line. Pricing happens server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// Booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    /// Used only when the request creates a new booking.
    pub uuid: BookingUuid,
    pub user_uuid: Option<UserUuid>,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub products: Vec<BookedLine>,
    pub service: Option<ServiceSelection>,
}

impl NewBooking {
    /// # Errors
    ///
    /// Returns [`BookingsServiceError::Invalid`] naming the first failing rule.
    pub fn validate(&self) -> Result<(), BookingsServiceError> {
        if [&self.name, &self.email, &self.phone_number]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(BookingsServiceError::Invalid(
                "Name, email and phone number are required",
            ));
        }

        if !is_plausible_email(&self.email) {
            return Err(BookingsServiceError::Invalid("Email is invalid"));
        }

        if self.products.is_empty() && self.service.is_none() {
            return Err(BookingsServiceError::Invalid(
                "A booking needs at least one product or a service",
            ));
        }

        if self.products.iter().any(|line| line.quantity == 0) {
            return Err(BookingsServiceError::Invalid(
                "Quantity must be a positive number",
            ));
        }

        validate_service(self.service.as_ref())
    }
}

/// Partial edit of an active booking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingUpdate {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub service: Option<ServiceSelection>,
}

impl BookingUpdate {
    /// # Errors
    ///
    /// Returns [`BookingsServiceError::Invalid`] if nothing would change or a
    /// supplied field is blank.
    pub fn validate(&self) -> Result<(), BookingsServiceError> {
        if self.name.is_none() && self.phone_number.is_none() && self.service.is_none() {
            return Err(BookingsServiceError::Invalid("Nothing to update"));
        }

        if [&self.name, &self.phone_number]
            .into_iter()
            .flatten()
            .any(|field| field.trim().is_empty())
        {
            return Err(BookingsServiceError::Invalid(
                "Name and phone number cannot be blank",
            ));
        }

        validate_service(self.service.as_ref())
    }
}

fn validate_service(service: Option<&ServiceSelection>) -> Result<(), BookingsServiceError> {
    match service {
        Some(service) if service.service_type.trim().is_empty() => Err(
            BookingsServiceError::Invalid("Service type is required"),
        ),
        Some(service) if i64::try_from(service.service_total).is_err() => {
            Err(BookingsServiceError::Invalid("Service total is out of range"))
        }
        Some(_) | None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking() -> NewBooking {
        NewBooking {
            uuid: BookingUuid::new(),
            user_uuid: None,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "09171234567".to_string(),
            products: vec![BookedLine {
                product_uuid: ProductUuid::new(),
                quantity: 1,
            }],
            service: None,
        }
    }

    fn service() -> ServiceSelection {
        ServiceSelection {
            service_type: "Cleaning".to_string(),
            size: Some("Large".to_string()),
            service_total: 25_00,
        }
    }

    #[test]
    fn accepts_products_only() {
        assert!(booking().validate().is_ok());
    }

    #[test]
    fn accepts_service_only() {
        let request = NewBooking {
            products: Vec::new(),
            service: Some(service()),
            ..booking()
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn rejects_empty_booking() {
        let request = NewBooking {
            products: Vec::new(),
            ..booking()
        };

        assert!(matches!(
            request.validate(),
            Err(BookingsServiceError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_blank_contact_details() {
        let request = NewBooking {
            phone_number: "  ".to_string(),
            ..booking()
        };

        assert!(matches!(
            request.validate(),
            Err(BookingsServiceError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_zero_quantity() {
        let mut request = booking();

        for line in &mut request.products {
            line.quantity = 0;
        }

        assert!(matches!(
            request.validate(),
            Err(BookingsServiceError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_blank_service_type() {
        let request = NewBooking {
            service: Some(ServiceSelection {
                service_type: String::new(),
                ..service()
            }),
            ..booking()
        };

        assert!(matches!(
            request.validate(),
            Err(BookingsServiceError::Invalid(_))
        ));
    }

    #[test]
    fn empty_update_is_rejected() {
        assert!(matches!(
            BookingUpdate::default().validate(),
            Err(BookingsServiceError::Invalid("Nothing to update"))
        ));
    }

    #[test]
    fn update_with_service_only_is_accepted() {
        let update = BookingUpdate {
            service: Some(service()),
            ..BookingUpdate::default()
        };

        assert!(update.validate().is_ok());
    }
}
