use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Record, parse_value, unknown_field};
use crate::error::{HotelbookError, Result};

/// A hotel and its running count of reserved rooms.
///
/// Room capacity is not modeled, so the counter only has a floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub hotel_id: u64,
    pub name: String,
    pub country: String,
    pub address: String,
    pub phone: String,
    /// Star rating, kept as text.
    pub category: String,
    pub reserved_rooms: u32,
}

impl Hotel {
    pub fn new(
        hotel_id: u64,
        name: impl Into<String>,
        country: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            hotel_id,
            name: name.into(),
            country: country.into(),
            address: address.into(),
            phone: phone.into(),
            category: category.into(),
            reserved_rooms: 0,
        }
    }

    // ─── Room counter ───────────────────────────────────────

    pub fn reserve_room(&mut self) {
        self.reserved_rooms = self.reserved_rooms.saturating_add(1);
    }

    /// Release one room; a counter already at zero stays at zero.
    pub fn release_room(&mut self) {
        self.reserved_rooms = self.reserved_rooms.saturating_sub(1);
    }
}

impl fmt::Display for Hotel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Name: {} | Country: {} | Address: {} | Phone: {} | Category: {} stars",
            self.hotel_id, self.name, self.country, self.address, self.phone, self.category
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotelField {
    HotelId,
    Name,
    Country,
    Address,
    Phone,
    Category,
    ReservedRooms,
}

impl HotelField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HotelId => "hotel_id",
            Self::Name => "name",
            Self::Country => "country",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::Category => "category",
            Self::ReservedRooms => "reserved_rooms",
        }
    }
}

impl fmt::Display for HotelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HotelField {
    type Err = HotelbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hotel_id" => Ok(Self::HotelId),
            "name" => Ok(Self::Name),
            "country" => Ok(Self::Country),
            "address" => Ok(Self::Address),
            "phone" => Ok(Self::Phone),
            "category" => Ok(Self::Category),
            "reserved_rooms" => Ok(Self::ReservedRooms),
            other => Err(unknown_field(Hotel::ENTITY, other)),
        }
    }
}

impl Record for Hotel {
    type Field = HotelField;

    const ENTITY: &'static str = "hotel";
    const FIELDS: &'static [&'static str] = &[
        "hotel_id",
        "name",
        "country",
        "address",
        "phone",
        "category",
        "reserved_rooms",
    ];

    fn id(&self) -> u64 {
        self.hotel_id
    }

    fn get(&self, field: HotelField) -> String {
        match field {
            HotelField::HotelId => self.hotel_id.to_string(),
            HotelField::Name => self.name.clone(),
            HotelField::Country => self.country.clone(),
            HotelField::Address => self.address.clone(),
            HotelField::Phone => self.phone.clone(),
            HotelField::Category => self.category.clone(),
            HotelField::ReservedRooms => self.reserved_rooms.to_string(),
        }
    }

    fn set(&mut self, field: HotelField, value: &str) -> Result<()> {
        match field {
            HotelField::HotelId => self.hotel_id = parse_value(field, value)?,
            HotelField::Name => self.name = value.to_string(),
            HotelField::Country => self.country = value.to_string(),
            HotelField::Address => self.address = value.to_string(),
            HotelField::Phone => self.phone = value.to_string(),
            HotelField::Category => self.category = value.to_string(),
            HotelField::ReservedRooms => self.reserved_rooms = parse_value(field, value)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hyatt() -> Hotel {
        Hotel::new(1, "Hyatt", "Mexico", "Reforma 123", "5512345678", "5")
    }

    #[test]
    fn test_new_hotel_has_no_reservations() {
        assert_eq!(hyatt().reserved_rooms, 0);
    }

    #[test]
    fn test_release_room_clamps_at_zero() {
        let mut h = hyatt();
        h.reserve_room();
        h.release_room();
        h.release_room();
        assert_eq!(h.reserved_rooms, 0);
    }

    #[test]
    fn test_reserved_rooms_rejects_negative() {
        let mut h = hyatt();
        assert!(h.set(HotelField::ReservedRooms, "-1").is_err());
        h.set(HotelField::ReservedRooms, "4").unwrap();
        assert_eq!(h.get(HotelField::ReservedRooms), "4");
    }

    #[test]
    fn test_display_includes_stars() {
        assert!(hyatt().to_string().ends_with("Category: 5 stars"));
    }

    #[test]
    fn test_from_value_requires_counter() {
        let value = serde_json::json!({
            "hotel_id": 1, "name": "Hyatt", "country": "Mexico",
            "address": "Reforma 123", "phone": "5512345678", "category": "5"
        });
        let err = Hotel::from_value(value).unwrap_err();
        assert!(matches!(err, HotelbookError::MissingField(ref f) if f == "reserved_rooms"));
    }
}
