//! Jours fériés coréens : table solaire fixe, fêtes lunaires converties,
//! puis règle du jour de remplacement (대체공휴일).

use crate::lunar::{LunarToSolarConverter, TableLunarConverter};
use crate::model::{Holiday, HolidayCategory, HolidayMap, HolidayType};
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Suffixe ajouté au nom d'un jour férié déplacé.
pub const SUBSTITUTE_SUFFIX: &str = "대체공휴일";

/// Entrée de la table fixe : (mois, jour, nom, public, catégorie).
type FixedEntry = (u32, u32, &'static str, bool, HolidayCategory);

const FIXED_PUBLIC: &[FixedEntry] = &[
    (1, 1, "신정", true, HolidayCategory::PublicHoliday),
    (3, 1, "삼일절", true, HolidayCategory::NationalDay),
    (5, 5, "어린이날", true, HolidayCategory::PublicHoliday),
    (6, 6, "현충일", true, HolidayCategory::PublicHoliday),
    (8, 15, "광복절", true, HolidayCategory::NationalDay),
    (10, 3, "개천절", true, HolidayCategory::NationalDay),
    (10, 9, "한글날", true, HolidayCategory::NationalDay),
    (12, 25, "기독탄신일", true, HolidayCategory::PublicHoliday),
];

const NATIONAL_OBSERVANCES: &[FixedEntry] =
    &[(7, 17, "제헌절", false, HolidayCategory::NationalDay)];

const COMMEMORATIONS: &[FixedEntry] = &[
    (4, 5, "식목일", false, HolidayCategory::Commemoration),
    (5, 1, "근로자의 날", false, HolidayCategory::Commemoration),
    (5, 8, "어버이날", false, HolidayCategory::Commemoration),
    (5, 15, "스승의 날", false, HolidayCategory::Commemoration),
    (6, 25, "6·25 전쟁일", false, HolidayCategory::Commemoration),
    (10, 1, "국군의 날", false, HolidayCategory::Commemoration),
];

/// Fête lunaire : (mois lunaire, jour lunaire, nom, nom des jours de congé adjacents).
const LUNAR_HOLIDAYS: &[(u32, u32, &str, Option<&str>)] = &[
    (1, 1, "설날", Some("설날 연휴")),
    (4, 8, "부처님 오신 날", None),
    (8, 15, "추석", Some("추석 연휴")),
];

/// Générateur de jours fériés, paramétré par le convertisseur lunaire.
#[derive(Debug, Default, Clone)]
pub struct HolidayCalendar<C> {
    converter: C,
}

impl HolidayCalendar<TableLunarConverter> {
    pub fn new() -> Self {
        Self::with_converter(TableLunarConverter::new())
    }
}

impl<C: LunarToSolarConverter> HolidayCalendar<C> {
    pub fn with_converter(converter: C) -> Self {
        Self { converter }
    }

    /// Tous les jours fériés de `year`, triés par date.
    pub fn holidays(&self, year: i32) -> HolidayMap {
        let mut map = HolidayMap::new();
        for table in [FIXED_PUBLIC, NATIONAL_OBSERVANCES, COMMEMORATIONS] {
            insert_fixed(&mut map, year, table);
        }
        self.insert_lunar(&mut map, year);
        apply_substitutes(&mut map);
        map
    }

    /// Filtre a posteriori de [`HolidayCalendar::holidays`] sur un mois.
    pub fn holidays_for_month(&self, year: i32, month: u32) -> HolidayMap {
        filter_month(self.holidays(year), year, month)
    }

    fn insert_lunar(&self, map: &mut HolidayMap, year: i32) {
        for &(month, day, name, around) in LUNAR_HOLIDAYS {
            let Some(date) = self.converter.convert(year, month, day, false) else {
                tracing::debug!(year, month, day, holiday = name, "lunar conversion unavailable, skipped");
                continue;
            };
            if let Some(around) = around {
                if let Some(eve) = date.checked_sub_days(Days::new(1)) {
                    map.insert(eve, lunar(eve, around));
                }
                if let Some(next) = date.checked_add_days(Days::new(1)) {
                    map.insert(next, lunar(next, around));
                }
            }
            map.insert(date, lunar(date, name));
        }
    }
}

/// Raccourci sur le convertisseur tabulé.
pub fn korean_holidays(year: i32) -> HolidayMap {
    HolidayCalendar::new().holidays(year)
}

pub fn korean_holidays_for_month(year: i32, month: u32) -> HolidayMap {
    HolidayCalendar::new().holidays_for_month(year, month)
}

/// Conserve les entrées de `map` tombant dans (year, month).
pub fn filter_month(map: HolidayMap, year: i32, month: u32) -> HolidayMap {
    map.into_iter()
        .filter(|(date, _)| date.year() == year && date.month() == month)
        .collect()
}

fn insert_fixed(map: &mut HolidayMap, year: i32, table: &[FixedEntry]) {
    for &(month, day, name, is_public, category) in table {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            map.insert(
                date,
                Holiday::new(date, name, HolidayType::Solar, is_public, category),
            );
        }
    }
}

fn lunar(date: NaiveDate, name: &str) -> Holiday {
    Holiday::new(
        date,
        name,
        HolidayType::Lunar,
        true,
        HolidayCategory::PublicHoliday,
    )
}

/// Pour chaque jour férié public tombant un dimanche, ajoute un jour de
/// remplacement à la première date libre qui suit. N'écrase jamais une entrée.
pub fn apply_substitutes(map: &mut HolidayMap) {
    let sundays: Vec<Holiday> = map
        .values()
        .filter(|h| h.is_public && h.date.weekday() == Weekday::Sun)
        .cloned()
        .collect();

    for holiday in sundays {
        let mut candidate = holiday.date;
        loop {
            let Some(next) = candidate.succ_opt() else {
                break;
            };
            candidate = next;
            if !map.contains_key(&candidate) {
                map.insert(
                    candidate,
                    Holiday::new(
                        candidate,
                        format!("{} {SUBSTITUTE_SUFFIX}", holiday.name),
                        HolidayType::Solar,
                        true,
                        HolidayCategory::PublicHoliday,
                    ),
                );
                break;
            }
        }
    }
}
