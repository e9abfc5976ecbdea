#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use gamsung::{
    io,
    model::{FavoritePlace, HolidayMap},
    repository::{FeedConfig, FeedSource, FileFeedSource, HttpFeedSource, IcsHolidayRepository},
    storage::{JsonStorage, Storage},
    HolidayCalendar,
};
use std::time::Duration;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Jours fériés coréens et lieux favoris
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON des lieux favoris
    #[arg(long, global = true, default_value = "places.json")]
    places: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Jours fériés calculés (table fixe + calendrier lunaire)
    Holidays {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: Option<u32>,
        /// Sortie JSON
        #[arg(long)]
        json: bool,
    },

    /// Jours fériés lus depuis un flux ICS
    Ics {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        json: bool,
        /// URL du flux (défaut : calendrier Google des jours fériés coréens)
        #[arg(long)]
        ics_url: Option<String>,
        /// Fichier .ics local à la place du flux distant
        #[arg(long, conflicts_with = "ics_url")]
        ics_file: Option<String>,
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },

    /// Gérer les lieux favoris
    #[command(subcommand)]
    Places(PlaceCommands),
}

#[derive(Subcommand, Debug)]
enum PlaceCommands {
    /// Ajouter un lieu
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        note: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Lister les lieux
    List,
    /// Exporter vers .csv ou .gpx
    Export {
        #[arg(long)]
        out: String,
    },
    /// Importer depuis .csv ou .gpx (ajout à la liste existante)
    Import {
        #[arg(long)]
        file: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    match cli.cmd {
        Commands::Holidays { year, month, json } => {
            check_month(month)?;
            let calendar = HolidayCalendar::new();
            let map = match month {
                Some(m) => calendar.holidays_for_month(year, m),
                None => calendar.holidays(year),
            };
            print_holidays(&map, json)?;
        }
        Commands::Ics {
            year,
            month,
            json,
            ics_url,
            ics_file,
            timeout_secs,
        } => {
            check_month(month)?;
            let source: Box<dyn FeedSource> = match ics_file {
                Some(path) => Box::new(FileFeedSource::new(path)),
                None => {
                    let mut config = FeedConfig {
                        timeout: Duration::from_secs(timeout_secs),
                        ..FeedConfig::default()
                    };
                    if let Some(url) = ics_url {
                        config.url = url;
                    }
                    Box::new(HttpFeedSource::new(&config)?)
                }
            };
            let repository = IcsHolidayRepository::new(source);
            let map = match month {
                Some(m) => repository.holidays_for_month(year, m).await,
                None => repository.holidays_for_year(year).await,
            };
            print_holidays(&map, json)?;
        }
        Commands::Places(cmd) => run_places(&cli.places, cmd)?,
    }

    Ok(())
}

fn run_places(store_path: &str, cmd: PlaceCommands) -> Result<()> {
    let storage = JsonStorage::open(store_path);
    let mut places = storage.load()?;

    match cmd {
        PlaceCommands::Add {
            name,
            note,
            lat,
            lng,
        } => {
            let place = FavoritePlace::new(name, note, lat, lng);
            if !place.has_valid_coordinates() {
                bail!("coordinates out of range: {lat},{lng}");
            }
            places.push(place);
            storage.save(&places)?;
        }
        PlaceCommands::List => {
            for p in &places {
                println!("{} | {} | {},{}", p.name, p.note, p.lat, p.lng);
            }
        }
        PlaceCommands::Export { out } => {
            io::export_places(&out, &places)?;
            println!("Exported {} place(s) to {}", places.len(), out);
        }
        PlaceCommands::Import { file } => {
            let imported = io::import_places(&file)?;
            let added = imported.places.len();
            places.extend(imported.places);
            storage.save(&places)?;
            println!("Imported {} place(s), skipped {}", added, imported.skipped);
        }
    }
    Ok(())
}

fn check_month(month: Option<u32>) -> Result<()> {
    match month {
        Some(m) if !(1..=12).contains(&m) => bail!("month must be within 1..=12, got {m}"),
        _ => Ok(()),
    }
}

fn print_holidays(map: &HolidayMap, json: bool) -> Result<()> {
    if json {
        let list: Vec<_> = map.values().collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        for h in map.values() {
            println!("{h}");
        }
    }
    Ok(())
}
