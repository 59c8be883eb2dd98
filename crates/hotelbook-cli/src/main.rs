use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use hotelbook_core::{
    AppConfig, BookingService, Customer, CustomerField, CustomerRepository, Hotel, HotelField,
    HotelRepository, HotelbookError, Record, Repositories, Reservation, ReservationRepository,
};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "hotelbook",
    about = "Customer, hotel and reservation records kept in JSON files",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format. Also enabled by setting HOTELBOOK_JSON=1.
    #[arg(long, global = true)]
    json: bool,

    /// Directory holding the collection files (overrides config and
    /// HOTELBOOK_DATA_DIR).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Customer records.
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },

    /// Hotel records and room counters.
    Hotel {
        #[command(subcommand)]
        action: HotelAction,
    },

    /// Reservation records (hotel counters are left alone).
    Reservation {
        #[command(subcommand)]
        action: ReservationAction,
    },

    /// Create a reservation and reserve a room at its hotel.
    Book {
        #[command(flatten)]
        reservation: ReservationArgs,
    },

    /// Cancel a reservation and release its hotel room.
    Unbook { id: u64 },

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information.
    Version,
}

// ─── Customer Actions ───────────────────────────────────────────────────────

#[derive(Subcommand)]
enum CustomerAction {
    /// Add a customer. Every field is required.
    Create {
        #[arg(long)]
        id: Option<u64>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        credit_card: Option<String>,
    },
    /// Show one customer.
    Show { id: u64 },
    /// List all customers.
    List,
    /// Set one field of a customer.
    Edit { id: u64, field: String, value: String },
    /// Delete a customer.
    Delete { id: u64 },
}

// ─── Hotel Actions ──────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum HotelAction {
    /// Add a hotel. Every field is required.
    Create {
        #[arg(long)]
        id: Option<u64>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Star rating.
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "0")]
        reserved_rooms: u32,
    },
    /// Show a hotel by ID or by name.
    Show {
        #[arg(required_unless_present = "name")]
        id: Option<u64>,
        #[arg(long, conflicts_with = "id")]
        name: Option<String>,
    },
    /// List all hotels.
    List,
    /// Find the first hotel whose field equals the value.
    Search { field: String, value: String },
    /// Set one field of a hotel.
    Modify { id: u64, field: String, value: String },
    /// Delete a hotel by ID.
    Delete { id: u64 },
    /// Delete every hotel whose field equals the value.
    DeleteBy { field: String, value: String },
    /// Add one reserved room.
    Reserve { id: u64 },
    /// Release one reserved room.
    Cancel { id: u64 },
}

// ─── Reservation Actions ────────────────────────────────────────────────────

#[derive(clap::Args)]
struct ReservationArgs {
    #[arg(long)]
    id: Option<u64>,
    #[arg(long)]
    customer: Option<u64>,
    #[arg(long)]
    hotel: Option<u64>,
    #[arg(long)]
    room: Option<u32>,
    #[arg(long)]
    nights: Option<u32>,
    #[arg(long)]
    price_per_night: Option<f64>,
}

impl ReservationArgs {
    fn build(self) -> hotelbook_core::Result<Reservation> {
        build_record(vec![
            ("reservation_id", self.id.map(Value::from)),
            ("customer_id", self.customer.map(Value::from)),
            ("hotel_id", self.hotel.map(Value::from)),
            ("room_id", self.room.map(Value::from)),
            ("nights", self.nights.map(Value::from)),
            ("price_per_night", self.price_per_night.map(Value::from)),
        ])
    }
}

#[derive(Subcommand)]
enum ReservationAction {
    /// Record a reservation without touching the hotel counter.
    Create {
        #[command(flatten)]
        reservation: ReservationArgs,
    },
    /// Remove a reservation without touching the hotel counter.
    Cancel { id: u64 },
    /// Show one reservation.
    Show { id: u64 },
    /// List reservations, optionally for one customer or hotel.
    List {
        #[arg(long)]
        customer: Option<u64>,
        #[arg(long, conflicts_with = "customer")]
        hotel: Option<u64>,
    },
}

// ─── Config Actions ──────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum ConfigAction {
    /// Show all config values.
    List,
    /// Print the config file path.
    Path,
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        let code = e
            .downcast_ref::<HotelbookError>()
            .map(|err| err.exit_code() as i32)
            .unwrap_or(1);
        eprintln!("Error: {e:#}");
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let json_output = cli.json || std::env::var("HOTELBOOK_JSON").as_deref() == Ok("1");

    let mut config = AppConfig::load()?;
    if let Ok(dir) = std::env::var("HOTELBOOK_DATA_DIR") {
        config.set_data_dir(dir.into());
    }
    if let Some(dir) = cli.data_dir {
        config.set_data_dir(dir);
    }
    init_logging(&config);
    tracing::debug!(data_dir = %config.data_dir().display(), "config loaded");

    let repos = Repositories::open(&config);
    let out = Output { json: json_output };

    match cli.command {
        // ── Customer ───────────────────────────────────────────────────────
        Commands::Customer { action } => match action {
            CustomerAction::Create { id, name, phone, address, credit_card } => {
                let customer: Customer = build_record(vec![
                    ("customer_id", id.map(Value::from)),
                    ("name", name.map(Value::from)),
                    ("phone", phone.map(Value::from)),
                    ("address", address.map(Value::from)),
                    ("credit_card", credit_card.map(Value::from)),
                ])?;
                repos.customers.create(customer.clone())?;
                let text = format!("Customer {} created successfully", customer.name);
                out.record(&customer, &text)?;
            }
            CustomerAction::Show { id } => match repos.customers.display(id)? {
                Some(customer) => out.record(&customer, &customer.to_string())?,
                None => not_found(&out, &format!("Customer with ID {id} not found"))?,
            },
            CustomerAction::List => {
                out.list(&repos.customers.load()?, "No customers.")?;
            }
            CustomerAction::Edit { id, field, value } => {
                let field: CustomerField = field.parse()?;
                if repos.customers.edit(id, field, &value)? {
                    out.ok(
                        json!({"id": id, "field": field.as_str(), "value": value}),
                        &format!("Customer {id} updated"),
                    )?;
                } else {
                    not_found(&out, &format!("Customer with ID {id} not found"))?;
                }
            }
            CustomerAction::Delete { id } => {
                let deleted = repos.customers.delete(id)?;
                out.ok(
                    json!({"deleted": deleted, "id": id}),
                    &format!("Customer {id} deleted"),
                )?;
            }
        },

        // ── Hotel ──────────────────────────────────────────────────────────
        Commands::Hotel { action } => match action {
            HotelAction::Create {
                id,
                name,
                country,
                address,
                phone,
                category,
                reserved_rooms,
            } => {
                let hotel: Hotel = build_record(vec![
                    ("hotel_id", id.map(Value::from)),
                    ("name", name.map(Value::from)),
                    ("country", country.map(Value::from)),
                    ("address", address.map(Value::from)),
                    ("phone", phone.map(Value::from)),
                    ("category", category.map(Value::from)),
                    ("reserved_rooms", Some(Value::from(reserved_rooms))),
                ])?;
                repos.hotels.create(hotel.clone())?;
                out.record(&hotel, &format!("Hotel {} created successfully", hotel.name))?;
            }
            HotelAction::Show { id, name } => {
                let found = match id {
                    Some(id) => repos.hotels.display_by_id(id)?,
                    None => repos.hotels.display_by_name(name.as_deref().unwrap_or_default())?,
                };
                match found {
                    Some(hotel) => out.record(&hotel, &hotel.to_string())?,
                    None => not_found(&out, "No hotel information was found!")?,
                }
            }
            HotelAction::List => {
                out.list(&repos.hotels.display_all()?, "No hotels.")?;
            }
            HotelAction::Search { field, value } => {
                let field: HotelField = field.parse()?;
                match repos.hotels.search_by(field, &value)? {
                    Some(hotel) => out.record(&hotel, &hotel.to_string())?,
                    None => not_found(&out, "Hotel not found")?,
                }
            }
            HotelAction::Modify { id, field, value } => {
                let field: HotelField = field.parse()?;
                if repos.hotels.modify(id, field, &value)? {
                    out.ok(
                        json!({"id": id, "field": field.as_str(), "value": value}),
                        &format!("Hotel {id} updated"),
                    )?;
                } else {
                    not_found(&out, &format!("Hotel with ID {id} not found"))?;
                }
            }
            HotelAction::Delete { id } => {
                let deleted = repos.hotels.delete(id)?;
                out.ok(
                    json!({"deleted": deleted, "id": id}),
                    &format!("Hotel with hotel_id: {id} was deleted"),
                )?;
            }
            HotelAction::DeleteBy { field, value } => {
                let field: HotelField = field.parse()?;
                let removed = repos.hotels.delete_by(field, &value)?;
                out.ok(
                    json!({"deleted": removed}),
                    &format!("Hotel with {field}: {value} was deleted ({removed} removed)"),
                )?;
            }
            HotelAction::Reserve { id } => {
                if !repos.hotels.reserve_room(id)? {
                    not_found(&out, &format!("Hotel with ID {id} not found"))?;
                }
                report_rooms(&out, &repos, id)?;
            }
            HotelAction::Cancel { id } => {
                if !repos.hotels.cancel_reservation(id)? {
                    not_found(&out, &format!("Hotel with ID {id} not found"))?;
                }
                report_rooms(&out, &repos, id)?;
            }
        },

        // ── Reservation ────────────────────────────────────────────────────
        Commands::Reservation { action } => match action {
            ReservationAction::Create { reservation } => {
                let reservation = reservation.build()?;
                repos.reservations.create(reservation.clone())?;
                out.record(&reservation, "A new reservation has been created")?;
            }
            ReservationAction::Cancel { id } => {
                let cancelled = repos.reservations.cancel(id)?;
                out.ok(
                    json!({"cancelled": cancelled, "id": id}),
                    &format!("Reservation {id} has been cancelled"),
                )?;
            }
            ReservationAction::Show { id } => match repos.reservations.display(id)? {
                Some(reservation) => out.record(&reservation, &reservation.to_string())?,
                None => not_found(&out, &format!("Reservation {id} not found"))?,
            },
            ReservationAction::List { customer, hotel } => {
                let items = match (customer, hotel) {
                    (Some(c), _) => repos.reservations.find_by_customer(c)?,
                    (None, Some(h)) => repos.reservations.find_by_hotel(h)?,
                    (None, None) => repos.reservations.load()?,
                };
                out.list(&items, "No reservations.")?;
            }
        },

        // ── Booking ────────────────────────────────────────────────────────
        Commands::Book { reservation } => {
            let reservation = reservation.build()?;
            BookingService::new(&repos, &config.booking).book(reservation.clone())?;
            out.record(&reservation, &format!("Booked: {reservation}"))?;
        }

        Commands::Unbook { id } => {
            if BookingService::new(&repos, &config.booking).cancel(id)? {
                out.ok(
                    json!({"cancelled": id}),
                    &format!("Reservation {id} has been cancelled"),
                )?;
            } else {
                not_found(&out, &format!("Reservation {id} not found"))?;
            }
        }

        // ── Config ─────────────────────────────────────────────────────────
        Commands::Config { action } => match action {
            ConfigAction::List => {
                let kv = config_key_values(&config);
                if out.json {
                    print_json(&json!({"status": "ok", "data": kv}))?;
                } else {
                    for (k, v) in &kv {
                        println!("{k} = {v}");
                    }
                }
            }
            ConfigAction::Path => {
                let path = AppConfig::config_path();
                out.ok(json!({"path": path}), &path.display().to_string())?;
            }
        },

        // ── Version ────────────────────────────────────────────────────────
        Commands::Version => {
            let version = env!("CARGO_PKG_VERSION");
            out.ok(json!({"version": version}), &format!("hotelbook v{version}"))?;
        }
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────────

struct Output {
    json: bool,
}

impl Output {
    fn ok(&self, data: Value, text: &str) -> Result<()> {
        if self.json {
            print_json(&json!({"status": "ok", "data": data}))
        } else {
            println!("{text}");
            Ok(())
        }
    }

    fn record<T: serde::Serialize>(&self, record: &T, text: &str) -> Result<()> {
        self.ok(serde_json::to_value(record)?, text)
    }

    fn list<T>(&self, items: &[T], empty: &str) -> Result<()>
    where
        T: serde::Serialize + std::fmt::Display,
    {
        if self.json {
            let data = json!({"items": items, "total": items.len()});
            print_json(&json!({"status": "ok", "data": data}))
        } else {
            if items.is_empty() {
                println!("{empty}");
            }
            for item in items {
                println!("{item}");
            }
            Ok(())
        }
    }
}

fn not_found(out: &Output, message: &str) -> Result<()> {
    if out.json {
        print_json(&json!({"status": "error", "error": "not_found", "message": message}))?;
    } else {
        eprintln!("{message}");
    }
    std::process::exit(hotelbook_core::ExitCode::NotFound as i32);
}

fn report_rooms(out: &Output, repos: &Repositories, id: u64) -> Result<()> {
    let reserved = repos
        .hotels
        .display_by_id(id)?
        .map(|h| h.reserved_rooms)
        .unwrap_or_default();
    out.ok(
        json!({"hotel_id": id, "reserved_rooms": reserved}),
        &format!("Hotel {id}: {reserved} reserved room(s)"),
    )
}

/// Assemble a record from optional CLI values; a missing value surfaces as
/// `HotelbookError::MissingField`.
fn build_record<T: Record>(fields: Vec<(&str, Option<Value>)>) -> hotelbook_core::Result<T> {
    let map: serde_json::Map<String, Value> = fields
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
        .collect();
    T::from_value(Value::Object(map))
}

fn print_json(val: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn config_key_values(config: &AppConfig) -> std::collections::BTreeMap<&'static str, String> {
    let mut map = std::collections::BTreeMap::new();
    map.insert("config_path", AppConfig::config_path().to_string_lossy().to_string());
    map.insert("data_dir", config.data_dir().to_string_lossy().to_string());
    map.insert("customers_path", config.customers_path().to_string_lossy().to_string());
    map.insert("hotels_path", config.hotels_path().to_string_lossy().to_string());
    map.insert("reservations_path", config.reservations_path().to_string_lossy().to_string());
    map.insert("strict_load", config.storage.strict_load.to_string());
    map.insert("verify_references", config.booking.verify_references.to_string());
    map.insert("log_filter", config.log.filter.clone());
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_record_reports_missing_field() {
        let err = build_record::<Customer>(vec![
            ("customer_id", Some(Value::from(1u64))),
            ("name", Some(Value::from("A"))),
            ("phone", None),
            ("address", Some(Value::from("a"))),
            ("credit_card", Some(Value::from("c"))),
        ])
        .unwrap_err();
        assert!(matches!(err, HotelbookError::MissingField(ref f) if f == "phone"));
    }

    #[test]
    fn test_reservation_args_build() {
        let args = ReservationArgs {
            id: Some(1),
            customer: Some(1),
            hotel: Some(1),
            room: Some(101),
            nights: Some(2),
            price_per_night: Some(2000.0),
        };
        let reservation = args.build().unwrap();
        assert_eq!(reservation.total_price(), 4000.0);
    }

    #[test]
    fn test_parse_hotel_subcommand() {
        let cli = Cli::try_parse_from([
            "hotelbook",
            "--json",
            "hotel",
            "delete-by",
            "country",
            "Mexico",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Hotel { action: HotelAction::DeleteBy { .. } }
        ));
    }

    #[test]
    fn test_hotel_show_needs_id_or_name() {
        let err = Cli::try_parse_from(["hotelbook", "hotel", "show"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from(["hotelbook", "hotel", "show", "--name", "Hyatt"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Hotel { action: HotelAction::Show { id: None, name: Some(ref n) } }
                if n == "Hyatt"
        ));
        assert!(Cli::try_parse_from(["hotelbook", "hotel", "show", "3"]).is_ok());
    }
}
