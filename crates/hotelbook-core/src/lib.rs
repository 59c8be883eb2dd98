pub mod booking;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use booking::BookingService;
pub use config::{AppConfig, BookingConfig, LogConfig, StorageConfig};
pub use error::{ExitCode, HotelbookError, Result};
pub use models::*;

pub use storage::JsonStore;
pub use storage::repositories::{
    CustomerRepository, HotelRepository, JsonCustomerRepository, JsonHotelRepository,
    JsonReservationRepository, Repositories, Repository, ReservationRepository,
};
