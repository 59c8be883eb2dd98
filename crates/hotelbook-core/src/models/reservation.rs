use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use super::{Record, parse_value, unknown_field};
use crate::error::{HotelbookError, Result};

/// A room booking. `customer_id` and `hotel_id` are plain references and are
/// not checked against their collections here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: u64,
    pub customer_id: u64,
    pub hotel_id: u64,
    pub room_id: u32,
    pub nights: u32,
    #[serde(serialize_with = "serialize_price")]
    pub price_per_night: f64,
}

/// Largest integer an `f64` holds exactly.
const MAX_EXACT_PRICE: f64 = 9_007_199_254_740_992.0;

/// Whole prices are written as JSON integers (`2000`, not `2000.0`) so files
/// keep their numbers as written across a load and save.
fn serialize_price<S: Serializer>(
    price: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let price = *price;
    if price.fract() == 0.0 && (0.0..=MAX_EXACT_PRICE).contains(&price) {
        serializer.serialize_u64(price as u64)
    } else {
        serializer.serialize_f64(price)
    }
}

impl Reservation {
    pub fn new(
        reservation_id: u64,
        customer_id: u64,
        hotel_id: u64,
        room_id: u32,
        nights: u32,
        price_per_night: f64,
    ) -> Self {
        Self {
            reservation_id,
            customer_id,
            hotel_id,
            room_id,
            nights,
            price_per_night,
        }
    }

    pub fn total_price(&self) -> f64 {
        f64::from(self.nights) * self.price_per_night
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Customer: {} | Hotel: {} | Room: {} | Nights: {} | \
             Price per night: {:.2} | Total: {:.2}",
            self.reservation_id,
            self.customer_id,
            self.hotel_id,
            self.room_id,
            self.nights,
            self.price_per_night,
            self.total_price()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationField {
    ReservationId,
    CustomerId,
    HotelId,
    RoomId,
    Nights,
    PricePerNight,
}

impl ReservationField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReservationId => "reservation_id",
            Self::CustomerId => "customer_id",
            Self::HotelId => "hotel_id",
            Self::RoomId => "room_id",
            Self::Nights => "nights",
            Self::PricePerNight => "price_per_night",
        }
    }
}

impl fmt::Display for ReservationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationField {
    type Err = HotelbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reservation_id" => Ok(Self::ReservationId),
            "customer_id" => Ok(Self::CustomerId),
            "hotel_id" => Ok(Self::HotelId),
            "room_id" => Ok(Self::RoomId),
            "nights" => Ok(Self::Nights),
            "price_per_night" => Ok(Self::PricePerNight),
            other => Err(unknown_field(Reservation::ENTITY, other)),
        }
    }
}

impl Record for Reservation {
    type Field = ReservationField;

    const ENTITY: &'static str = "reservation";
    const FIELDS: &'static [&'static str] = &[
        "reservation_id",
        "customer_id",
        "hotel_id",
        "room_id",
        "nights",
        "price_per_night",
    ];

    fn id(&self) -> u64 {
        self.reservation_id
    }

    fn get(&self, field: ReservationField) -> String {
        match field {
            ReservationField::ReservationId => self.reservation_id.to_string(),
            ReservationField::CustomerId => self.customer_id.to_string(),
            ReservationField::HotelId => self.hotel_id.to_string(),
            ReservationField::RoomId => self.room_id.to_string(),
            ReservationField::Nights => self.nights.to_string(),
            ReservationField::PricePerNight => self.price_per_night.to_string(),
        }
    }

    fn set(&mut self, field: ReservationField, value: &str) -> Result<()> {
        match field {
            ReservationField::ReservationId => self.reservation_id = parse_value(field, value)?,
            ReservationField::CustomerId => self.customer_id = parse_value(field, value)?,
            ReservationField::HotelId => self.hotel_id = parse_value(field, value)?,
            ReservationField::RoomId => self.room_id = parse_value(field, value)?,
            ReservationField::Nights => self.nights = parse_value(field, value)?,
            ReservationField::PricePerNight => self.price_per_night = parse_value(field, value)?,
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.nights == 0 {
            return Err(HotelbookError::Validation(
                "nights must be a positive integer".to_string(),
            ));
        }
        if !self.price_per_night.is_finite() || self.price_per_night < 0.0 {
            return Err(HotelbookError::Validation(format!(
                "price_per_night must be a non-negative number, got {}",
                self.price_per_night
            )));
        }
        Ok(())
    }
}
