use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;
use crate::models::{Hotel, HotelField, Record};
use crate::storage::JsonStore;

use super::Repository;

pub trait HotelRepository: Repository<Entity = Hotel> {
    fn create(&self, hotel: Hotel) -> Result<()>;
    fn delete(&self, hotel_id: u64) -> Result<bool>;
    fn load(&self) -> Result<Vec<Hotel>>;

    /// Add one reserved room. There is no capacity limit.
    fn reserve_room(&self, hotel_id: u64) -> Result<bool>;
    /// Release one reserved room, never going below zero.
    fn cancel_reservation(&self, hotel_id: u64) -> Result<bool>;

    /// First hotel whose `field` equals `value`, or `None`.
    fn search_by(&self, field: HotelField, value: &str) -> Result<Option<Hotel>>;
    /// Remove every hotel whose `field` equals `value`; returns how many.
    fn delete_by(&self, field: HotelField, value: &str) -> Result<usize>;
    fn modify(&self, hotel_id: u64, field: HotelField, value: &str) -> Result<bool>;

    fn display_by_name(&self, name: &str) -> Result<Option<Hotel>> {
        self.search_by(HotelField::Name, name)
    }

    fn display_by_id(&self, hotel_id: u64) -> Result<Option<Hotel>> {
        self.search_by(HotelField::HotelId, &hotel_id.to_string())
    }

    fn display_all(&self) -> Result<Vec<Hotel>> {
        self.load()
    }
}

pub struct JsonHotelRepository {
    store: JsonStore<Hotel>,
}

impl JsonHotelRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_store(JsonStore::new(path))
    }

    pub fn with_store(store: JsonStore<Hotel>) -> Self {
        Self { store }
    }
}

impl Repository for JsonHotelRepository {
    type Entity = Hotel;

    fn store(&self) -> &JsonStore<Hotel> {
        &self.store
    }
}

impl HotelRepository for JsonHotelRepository {
    fn create(&self, hotel: Hotel) -> Result<()> {
        self.insert(hotel)
    }

    fn delete(&self, hotel_id: u64) -> Result<bool> {
        Ok(self.remove_where(|h| h.hotel_id == hotel_id)? > 0)
    }

    fn load(&self) -> Result<Vec<Hotel>> {
        self.load_all()
    }

    fn reserve_room(&self, hotel_id: u64) -> Result<bool> {
        let found = self.update_with(hotel_id, |hotel| {
            hotel.reserve_room();
            Ok(())
        })?;
        debug!(hotel_id, found, "reserve room");
        Ok(found)
    }

    fn cancel_reservation(&self, hotel_id: u64) -> Result<bool> {
        let found = self.update_with(hotel_id, |hotel| {
            hotel.release_room();
            Ok(())
        })?;
        debug!(hotel_id, found, "cancel room reservation");
        Ok(found)
    }

    fn search_by(&self, field: HotelField, value: &str) -> Result<Option<Hotel>> {
        self.find_where(field, value)
    }

    fn delete_by(&self, field: HotelField, value: &str) -> Result<usize> {
        self.remove_where(|h| h.matches(field, value))
    }

    fn modify(&self, hotel_id: u64, field: HotelField, value: &str) -> Result<bool> {
        self.update_field(hotel_id, field, value)
    }
}
