use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Calendrier d'origine d'un jour férié.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HolidayType {
    Solar,
    Lunar,
}

/// Catégorie d'affichage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HolidayCategory {
    PublicHoliday,
    NationalDay,
    Commemoration,
}

impl HolidayCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HolidayCategory::PublicHoliday => "PUBLIC_HOLIDAY",
            HolidayCategory::NationalDay => "NATIONAL_DAY",
            HolidayCategory::Commemoration => "COMMEMORATION",
        }
    }
}

/// Jour férié (valeur immuable, jamais persistée).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HolidayType,
    pub is_public: bool,
    pub category: HolidayCategory,
}

impl Holiday {
    pub fn new<N: Into<String>>(
        date: NaiveDate,
        name: N,
        kind: HolidayType,
        is_public: bool,
        category: HolidayCategory,
    ) -> Self {
        Self {
            date,
            name: name.into(),
            kind,
            is_public,
            category,
        }
    }
}

impl fmt::Display for Holiday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            HolidayType::Solar => "SOLAR",
            HolidayType::Lunar => "LUNAR",
        };
        let public = if self.is_public { "public" } else { "observance" };
        write!(
            f,
            "{}  {}  [{}, {}, {}]",
            self.date,
            self.name,
            kind,
            self.category.as_str(),
            public
        )
    }
}

/// Jours fériés indexés par date (ordre chronologique, une entrée par date).
pub type HolidayMap = BTreeMap<NaiveDate, Holiday>;

/// Lieu favori, tel qu'échangé en CSV/GPX.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritePlace {
    pub name: String,
    #[serde(default)]
    pub note: String,
    pub lat: f64,
    pub lng: f64,
}

impl FavoritePlace {
    pub fn new<N: Into<String>, D: Into<String>>(name: N, note: D, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            note: note.into(),
            lat,
            lng,
        }
    }

    /// Vrai si les coordonnées sont dans les bornes WGS84.
    pub fn has_valid_coordinates(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}
