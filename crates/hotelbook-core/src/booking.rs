use tracing::{info, warn};

use crate::config::BookingConfig;
use crate::error::{HotelbookError, Result};
use crate::models::Reservation;
use crate::storage::repositories::{
    CustomerRepository, HotelRepository, Repositories, ReservationRepository,
};

/// Keeps reservations and hotel room counters in step.
///
/// The repositories themselves treat the two as independent. This service
/// pairs a reservation write with the matching counter change. The two writes
/// go to different files and are not atomic: a failure between them leaves
/// the reservation recorded without the counter change.
pub struct BookingService<'a> {
    repos: &'a Repositories,
    verify_references: bool,
}

impl<'a> BookingService<'a> {
    pub fn new(repos: &'a Repositories, config: &BookingConfig) -> Self {
        Self {
            repos,
            verify_references: config.verify_references,
        }
    }

    /// Record `reservation` and reserve one room at its hotel.
    pub fn book(&self, reservation: Reservation) -> Result<()> {
        if self.verify_references {
            if self.repos.customers.display(reservation.customer_id)?.is_none() {
                return Err(HotelbookError::CustomerNotFound(reservation.customer_id));
            }
            if self.repos.hotels.display_by_id(reservation.hotel_id)?.is_none() {
                return Err(HotelbookError::HotelNotFound(reservation.hotel_id));
            }
        }

        let reservation_id = reservation.reservation_id;
        let hotel_id = reservation.hotel_id;
        self.repos.reservations.create(reservation)?;

        if !self.repos.hotels.reserve_room(hotel_id)? {
            warn!(reservation_id, hotel_id, "booked reservation for unknown hotel");
        }
        info!(reservation_id, hotel_id, "booking confirmed");
        Ok(())
    }

    /// Cancel a reservation and release its room.
    ///
    /// Returns `Ok(false)` when the reservation does not exist.
    pub fn cancel(&self, reservation_id: u64) -> Result<bool> {
        let Some(reservation) = self.repos.reservations.display(reservation_id)? else {
            return Ok(false);
        };

        self.repos.reservations.cancel(reservation_id)?;
        if !self.repos.hotels.cancel_reservation(reservation.hotel_id)? {
            warn!(
                reservation_id,
                hotel_id = reservation.hotel_id,
                "cancelled reservation for unknown hotel"
            );
        }
        info!(reservation_id, "booking cancelled");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::{Customer, Hotel};
    use tempfile::TempDir;

    fn setup(dir: &TempDir) -> (AppConfig, Repositories) {
        let mut config = AppConfig::default();
        config.set_data_dir(dir.path().to_path_buf());
        let repos = Repositories::open(&config);
        repos
            .customers
            .create(Customer::new(1, "A", "1", "a", "c"))
            .unwrap();
        repos
            .hotels
            .create(Hotel::new(1, "Hyatt", "Mexico", "Reforma", "55", "5"))
            .unwrap();
        (config, repos)
    }

    #[test]
    fn test_book_and_cancel_keep_counter_in_step() {
        let dir = TempDir::new().unwrap();
        let (config, repos) = setup(&dir);
        let service = BookingService::new(&repos, &config.booking);

        service.book(Reservation::new(1, 1, 1, 101, 2, 2000.0)).unwrap();
        service.book(Reservation::new(2, 1, 1, 102, 1, 2000.0)).unwrap();
        assert_eq!(repos.hotels.display_by_id(1).unwrap().unwrap().reserved_rooms, 2);

        assert!(service.cancel(1).unwrap());
        assert_eq!(repos.hotels.display_by_id(1).unwrap().unwrap().reserved_rooms, 1);
        assert_eq!(repos.reservations.load().unwrap().len(), 1);
    }

    #[test]
    fn test_book_rejects_unknown_customer() {
        let dir = TempDir::new().unwrap();
        let (config, repos) = setup(&dir);
        let service = BookingService::new(&repos, &config.booking);

        let err = service.book(Reservation::new(1, 42, 1, 101, 2, 10.0)).unwrap_err();
        assert!(matches!(err, HotelbookError::CustomerNotFound(42)));
        assert!(repos.reservations.load().unwrap().is_empty());
    }

    #[test]
    fn test_book_rejects_unknown_hotel() {
        let dir = TempDir::new().unwrap();
        let (config, repos) = setup(&dir);
        let service = BookingService::new(&repos, &config.booking);

        let err = service.book(Reservation::new(1, 1, 9, 101, 2, 10.0)).unwrap_err();
        assert!(matches!(err, HotelbookError::HotelNotFound(9)));
    }

    #[test]
    fn test_book_without_verification_accepts_dangling_ids() {
        let dir = TempDir::new().unwrap();
        let (_, repos) = setup(&dir);
        let service = BookingService::new(
            &repos,
            &BookingConfig {
                verify_references: false,
            },
        );

        service.book(Reservation::new(1, 42, 9, 101, 2, 10.0)).unwrap();
        assert_eq!(repos.reservations.load().unwrap().len(), 1);
        assert_eq!(repos.hotels.display_by_id(1).unwrap().unwrap().reserved_rooms, 0);
    }

    #[test]
    fn test_duplicate_booking_leaves_counter_alone() {
        let dir = TempDir::new().unwrap();
        let (config, repos) = setup(&dir);
        let service = BookingService::new(&repos, &config.booking);

        service.book(Reservation::new(1, 1, 1, 101, 2, 10.0)).unwrap();
        assert!(service.book(Reservation::new(1, 1, 1, 102, 2, 10.0)).is_err());
        assert_eq!(repos.hotels.display_by_id(1).unwrap().unwrap().reserved_rooms, 1);
    }

    #[test]
    fn test_cancel_unknown_reservation() {
        let dir = TempDir::new().unwrap();
        let (config, repos) = setup(&dir);
        let service = BookingService::new(&repos, &config.booking);
        assert!(!service.cancel(77).unwrap());
    }
}
