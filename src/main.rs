//! Car rental back office — operator CLI
//!
//! Boots the service (database, migrations, default users) and runs one
//! operator command against it. Results are printed as JSON envelopes.
//!
//! ```sh
//! # Run with default config (~/.config/car-rental/config.toml)
//! car-rental
//!
//! # Validate config without touching the database
//! car-rental --config /etc/car-rental/config.toml --check
//!
//! # Available diesel cars, newest registration first
//! car-rental cars --status AVAILABLE --fuel-type DIESEL --sort registrationNumber --direction desc
//!
//! # Release a car unless it is rented
//! car-rental release 7
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

use carrental::application::Services;
use carrental::config::{default_config_path, AppConfig, CONFIG_ENV};
use carrental::domain::car::{BodyType, FuelType, GearboxType};
use carrental::domain::{CarFilter, CarStatus, EntityId, RentalStatus, Service};
use carrental::interfaces::http::ApiResponse;
use carrental::server::{init_tracing, ServerHandle, ServerOptions};
use carrental::shared::{DomainResult, PageRequest, Sort};

/// Car rental back office: cars, users, roles and rental statuses.
#[derive(Parser, Debug)]
#[command(
    name = "car-rental",
    version,
    about = "Car rental back office",
    long_about = "Car rental back office — CRUD over cars, users and rentals \
                  backed by SQLite.\n\n\
                  Default config: ~/.config/car-rental/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Override the database URL.
    #[arg(long)]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default users.
    #[arg(long)]
    no_seed: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List cars, optionally filtered.
    Cars(CarsArgs),
    /// Show one car.
    Car { id: EntityId },
    /// List users.
    Users(PageArgs),
    /// Set a car's status from a rental status (RENTED → UNAVAILABLE, else AVAILABLE).
    ApplyRentalStatus { car_id: EntityId, status: RentalStatus },
    /// Make a car AVAILABLE unless it has an active rental.
    Release { car_id: EntityId },
}

#[derive(Args, Debug)]
struct PageArgs {
    /// 1-based page number.
    #[arg(long)]
    page: Option<u32>,
    /// Page size (1-100).
    #[arg(long)]
    size: Option<u32>,
    /// Sort attribute, e.g. `registrationNumber`.
    #[arg(long)]
    sort: Option<String>,
    /// `asc` or `desc`.
    #[arg(long)]
    direction: Option<String>,
}

impl PageArgs {
    fn request(&self) -> PageRequest {
        PageRequest::from_params(self.page, self.size).with_sort(Sort::from_params(
            self.sort.as_deref(),
            self.direction.as_deref(),
        ))
    }
}

#[derive(Args, Debug)]
struct CarsArgs {
    #[arg(long)]
    status: Option<CarStatus>,
    #[arg(long)]
    body_type: Option<BodyType>,
    #[arg(long)]
    gearbox_type: Option<GearboxType>,
    #[arg(long)]
    fuel_type: Option<FuelType>,
    #[arg(long)]
    model: Option<EntityId>,
    #[arg(long)]
    location: Option<EntityId>,
    #[command(flatten)]
    page: PageArgs,
}

impl CarsArgs {
    fn filter(&self) -> CarFilter {
        CarFilter {
            status: self.status,
            body_type: self.body_type,
            gearbox_type: self.gearbox_type,
            fuel_type: self.fuel_type,
            car_model_id: self.model,
            location_id: self.location,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    let loaded = AppConfig::load(&config_path);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref url) = cli.database_url {
        config.database.url = url.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    // Init tracing once the effective level is known
    init_tracing(&config);
    let load_error = match loaded {
        Ok(_) => {
            info!("Configuration loaded from {}", config_path.display());
            None
        }
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            Some(e)
        }
    };
    if cli.database_url.is_some() {
        info!("CLI override: database_url = {}", config.database.url);
    }
    if cli.log_level.is_some() {
        info!("CLI override: log_level = {}", config.logging.level);
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if let Some(e) = load_error {
            return Err(e.into());
        }
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Log format  : {}", config.logging.format);
        println!("   Seed users  : {}", config.seed.users.len());
        return Ok(());
    }

    // ── Start service ──────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        seed_users: !cli.no_seed,
    })
    .await?;

    let ok = match cli.command {
        Some(command) => run(&handle.services, command).await,
        None => {
            if let Some(ref report) = handle.seed_report {
                print_json(&ApiResponse::success(report));
            }
            true
        }
    };

    handle.shutdown().await;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Run one operator command, print its envelope and report success.
async fn run(services: &Services, command: Command) -> bool {
    match command {
        Command::Cars(args) => {
            let request = args.page.request();
            let filter = args.filter();
            if filter.is_empty() {
                respond(services.cars.find_all_paged(&request).await)
            } else {
                respond(services.cars.find_by_filter(&filter, &request).await)
            }
        }
        Command::Car { id } => respond(services.cars.find_by_id(id).await),
        Command::Users(args) => respond(services.users.find_all_paged(&args.request()).await),
        Command::ApplyRentalStatus { car_id, status } => respond(
            services
                .cars
                .change_car_status_by_rental_status(car_id, status)
                .await,
        ),
        Command::Release { car_id } => {
            respond(services.cars.mark_available_if_not_rented(car_id).await)
        }
    }
}

fn respond<T: Serialize>(result: DomainResult<T>) -> bool {
    match result {
        Ok(data) => {
            print_json(&ApiResponse::success(data));
            true
        }
        Err(e) => {
            error!("Command failed: {}", e);
            print_json(&ApiResponse::<()>::error(e.to_string()));
            false
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to render JSON: {}", e),
    }
}
