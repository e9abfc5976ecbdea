#![forbid(unsafe_code)]
//! Gamsung — jours fériés coréens et lieux favoris, hors interface graphique.
//!
//! - Jours fériés solaires fixes, fêtes lunaires converties, jours de remplacement.
//! - Flux ICS distant, déplié et classé, mis en cache par année.
//! - Lieux favoris en CSV/GPX, stockage JSON local.

pub mod holidays;
pub mod ics;
pub mod io;
pub mod lunar;
pub mod model;
pub mod repository;
pub mod storage;

pub use holidays::{korean_holidays, korean_holidays_for_month, HolidayCalendar};
pub use ics::{classify, parse_holidays, unfold_lines};
pub use io::{export_places, import_places, PlaceError, PlaceFormat, PlaceImport};
pub use lunar::{LunarToSolarConverter, TableLunarConverter};
pub use model::{FavoritePlace, Holiday, HolidayCategory, HolidayMap, HolidayType};
pub use repository::{
    FeedConfig, FeedSource, FetchError, FileFeedSource, HttpFeedSource, IcsHolidayRepository,
};
pub use storage::{JsonStorage, Storage};
