mod customer_repository;
mod hotel_repository;
mod reservation_repository;

pub use customer_repository::{CustomerRepository, JsonCustomerRepository};
pub use hotel_repository::{HotelRepository, JsonHotelRepository};
pub use reservation_repository::{JsonReservationRepository, ReservationRepository};

use tracing::info;

use crate::config::AppConfig;
use crate::error::{HotelbookError, Result};
use crate::models::Record;
use crate::storage::JsonStore;

/// Collection-level operations shared by every entity repository.
///
/// Each call reloads the whole collection from disk and, when it mutates,
/// writes the whole collection back before returning.
pub trait Repository {
    type Entity: Record;

    fn store(&self) -> &JsonStore<Self::Entity>;

    fn load_all(&self) -> Result<Vec<Self::Entity>> {
        self.store().load()
    }

    fn find_by_id(&self, id: u64) -> Result<Option<Self::Entity>> {
        Ok(self.load_all()?.into_iter().find(|r| r.id() == id))
    }

    /// First record whose `field` renders as `value`.
    fn find_where(
        &self,
        field: <Self::Entity as Record>::Field,
        value: &str,
    ) -> Result<Option<Self::Entity>> {
        Ok(self.load_all()?.into_iter().find(|r| r.matches(field, value)))
    }

    /// Append a new record. Its identity must not already be present.
    fn insert(&self, entity: Self::Entity) -> Result<()> {
        entity.validate()?;
        let mut all = self.load_all()?;
        if all.iter().any(|r| r.id() == entity.id()) {
            return Err(HotelbookError::DuplicateId {
                entity: Self::Entity::ENTITY,
                id: entity.id(),
            });
        }

        let id = entity.id();
        all.push(entity);
        self.store().save(&all)?;
        info!(entity = Self::Entity::ENTITY, id, "created");
        Ok(())
    }

    /// Remove every record matching `pred`. Nothing is written when nothing
    /// matches.
    fn remove_where<F>(&self, pred: F) -> Result<usize>
    where
        F: Fn(&Self::Entity) -> bool,
    {
        let mut all = self.load_all()?;
        let before = all.len();
        all.retain(|r| !pred(r));
        let removed = before - all.len();

        if removed > 0 {
            self.store().save(&all)?;
            info!(entity = Self::Entity::ENTITY, removed, "deleted");
        }
        Ok(removed)
    }

    /// Set one field on the first record with identity `id`.
    ///
    /// Returns `Ok(false)` without writing when no record has that id.
    fn update_field(
        &self,
        id: u64,
        field: <Self::Entity as Record>::Field,
        value: &str,
    ) -> Result<bool> {
        self.update_with(id, |record| record.set(field, value))
    }

    /// Apply `change` to the first record with identity `id` and persist it.
    fn update_with<F>(&self, id: u64, change: F) -> Result<bool>
    where
        F: FnOnce(&mut Self::Entity) -> Result<()>,
    {
        let mut all = self.load_all()?;
        let Some(pos) = all.iter().position(|r| r.id() == id) else {
            return Ok(false);
        };

        let mut updated = all[pos].clone();
        change(&mut updated)?;
        updated.validate()?;

        let new_id = updated.id();
        if new_id != id && all.iter().any(|r| r.id() == new_id) {
            return Err(HotelbookError::DuplicateId {
                entity: Self::Entity::ENTITY,
                id: new_id,
            });
        }

        all[pos] = updated;
        self.store().save(&all)?;
        Ok(true)
    }
}

/// The three repositories of one data directory.
pub struct Repositories {
    pub customers: JsonCustomerRepository,
    pub hotels: JsonHotelRepository,
    pub reservations: JsonReservationRepository,
}

impl Repositories {
    pub fn open(config: &AppConfig) -> Self {
        let strict = config.storage.strict_load;
        Self {
            customers: JsonCustomerRepository::with_store(
                JsonStore::new(config.customers_path()).strict(strict),
            ),
            hotels: JsonHotelRepository::with_store(
                JsonStore::new(config.hotels_path()).strict(strict),
            ),
            reservations: JsonReservationRepository::with_store(
                JsonStore::new(config.reservations_path()).strict(strict),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Hotel, Reservation};
    use tempfile::TempDir;

    #[test]
    fn test_open_uses_configured_files() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.set_data_dir(dir.path().to_path_buf());

        let repos = Repositories::open(&config);
        repos
            .customers
            .create(Customer::new(1, "A", "1", "a", "c"))
            .unwrap();
        repos
            .hotels
            .create(Hotel::new(1, "Hyatt", "MX", "a", "1", "5"))
            .unwrap();
        repos
            .reservations
            .create(Reservation::new(1, 1, 1, 101, 2, 900.0))
            .unwrap();

        assert!(dir.path().join("customers.json").exists());
        assert!(dir.path().join("hotels.json").exists());
        assert!(dir.path().join("reservations.json").exists());
    }

    #[test]
    fn test_open_respects_strict_load() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("hotels.json"), "garbage").unwrap();

        let mut config = AppConfig::default();
        config.set_data_dir(dir.path().to_path_buf());
        config.storage.strict_load = true;

        let repos = Repositories::open(&config);
        assert!(matches!(
            repos.hotels.load(),
            Err(HotelbookError::CorruptStore { .. })
        ));
    }
}
