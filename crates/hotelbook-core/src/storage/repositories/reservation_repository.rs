use std::path::PathBuf;

use tracing::info;

use crate::error::Result;
use crate::models::Reservation;
use crate::storage::JsonStore;

use super::Repository;

/// Reservations reference customers and hotels by id only. Nothing here
/// checks those ids or adjusts hotel counters; see `BookingService` for that.
pub trait ReservationRepository: Repository<Entity = Reservation> {
    fn create(&self, reservation: Reservation) -> Result<()>;
    fn cancel(&self, reservation_id: u64) -> Result<bool>;
    fn load(&self) -> Result<Vec<Reservation>>;
    fn display(&self, reservation_id: u64) -> Result<Option<Reservation>>;
    fn find_by_customer(&self, customer_id: u64) -> Result<Vec<Reservation>>;
    fn find_by_hotel(&self, hotel_id: u64) -> Result<Vec<Reservation>>;
}

pub struct JsonReservationRepository {
    store: JsonStore<Reservation>,
}

impl JsonReservationRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_store(JsonStore::new(path))
    }

    pub fn with_store(store: JsonStore<Reservation>) -> Self {
        Self { store }
    }
}

impl Repository for JsonReservationRepository {
    type Entity = Reservation;

    fn store(&self) -> &JsonStore<Reservation> {
        &self.store
    }
}

impl ReservationRepository for JsonReservationRepository {
    fn create(&self, reservation: Reservation) -> Result<()> {
        self.insert(reservation)
    }

    fn cancel(&self, reservation_id: u64) -> Result<bool> {
        let removed = self.remove_where(|r| r.reservation_id == reservation_id)?;
        if removed > 0 {
            info!(reservation_id, "reservation cancelled");
        }
        Ok(removed > 0)
    }

    fn load(&self) -> Result<Vec<Reservation>> {
        if !self.store.exists() {
            info!(path = %self.store.path().display(), "reservations file not found");
            return Ok(Vec::new());
        }
        self.load_all()
    }

    fn display(&self, reservation_id: u64) -> Result<Option<Reservation>> {
        self.find_by_id(reservation_id)
    }

    fn find_by_customer(&self, customer_id: u64) -> Result<Vec<Reservation>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|r| r.customer_id == customer_id)
            .collect())
    }

    fn find_by_hotel(&self, hotel_id: u64) -> Result<Vec<Reservation>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|r| r.hotel_id == hotel_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HotelbookError;
    use tempfile::TempDir;

    fn repo(dir: &TempDir) -> JsonReservationRepository {
        JsonReservationRepository::new(dir.path().join("reservations.json"))
    }

    fn sample() -> Reservation {
        Reservation::new(1, 1, 1, 1, 2, 2000.0)
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(repo(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn test_create() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        repo.create(sample()).unwrap();

        let all = repo.load().unwrap();
        assert_eq!(all, vec![sample()]);
    }

    #[test]
    fn test_create_does_not_check_references() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        repo.create(Reservation::new(7, 404, 404, 3, 1, 50.0)).unwrap();
        assert_eq!(repo.display(7).unwrap().unwrap().hotel_id, 404);
    }

    #[test]
    fn test_create_rejects_invalid() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let err = repo.create(Reservation::new(1, 1, 1, 1, 0, 10.0)).unwrap_err();
        assert!(matches!(err, HotelbookError::Validation(_)));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_cancel() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        repo.create(sample()).unwrap();

        assert!(repo.cancel(1).unwrap());
        assert!(repo.load().unwrap().is_empty());
        assert!(!repo.cancel(1).unwrap());
    }

    #[test]
    fn test_find_by_customer_and_hotel() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        repo.create(Reservation::new(1, 10, 1, 101, 2, 100.0)).unwrap();
        repo.create(Reservation::new(2, 10, 2, 201, 1, 150.0)).unwrap();
        repo.create(Reservation::new(3, 11, 1, 102, 3, 100.0)).unwrap();

        assert_eq!(repo.find_by_customer(10).unwrap().len(), 2);
        let at_hotel: Vec<u64> = repo
            .find_by_hotel(1)
            .unwrap()
            .iter()
            .map(|r| r.reservation_id)
            .collect();
        assert_eq!(at_hotel, vec![1, 3]);
    }
}
