//! Lecture minimale d'un flux iCalendar de jours fériés (RFC 5545).
//!
//! Seuls `DTSTART` et `SUMMARY` des blocs `VEVENT` sont exploités ; le reste
//! est ignoré. Tout ce qui est mal formé est sauté silencieusement.

use crate::model::{Holiday, HolidayCategory, HolidayMap, HolidayType};
use chrono::NaiveDate;
use icalendar::parser::{read_calendar, unfold, Component, Property};

/// Marqueurs de jours déplacés ou exceptionnels, toujours chômés.
const SUBSTITUTE_MARKERS: &[&str] = &["대체공휴일", "대체 공휴일", "대체휴일", "임시공휴일"];

const NATIONAL_DAYS: &[&str] = &["삼일절", "3·1절", "3.1절", "제헌절", "광복절", "개천절", "한글날"];

const PUBLIC_HOLIDAYS: &[&str] = &[
    "신정",
    "새해",
    "설날",
    "부처님",
    "석가탄신일",
    "어린이날",
    "현충일",
    "추석",
    "기독탄신일",
    "크리스마스",
    "성탄절",
    "선거일",
];

const LUNAR_NAMES: &[&str] = &["설날", "추석", "부처님", "석가탄신일"];

/// Catégorie d'un évènement d'après son nom (recherche de sous-chaînes).
pub fn classify(name: &str) -> HolidayCategory {
    let has = |list: &[&str]| list.iter().any(|needle| name.contains(needle));
    if has(SUBSTITUTE_MARKERS) {
        HolidayCategory::PublicHoliday
    } else if has(NATIONAL_DAYS) {
        HolidayCategory::NationalDay
    } else if has(PUBLIC_HOLIDAYS) {
        HolidayCategory::PublicHoliday
    } else {
        HolidayCategory::Commemoration
    }
}

/// Déplie les lignes (continuations RFC 5545) puis retire les blancs de fin
/// de chaque ligne logique.
pub fn unfold_lines(text: &str) -> Vec<String> {
    unfold(text)
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect()
}

/// Évènements `VEVENT` convertis en jours fériés, indexés par date.
///
/// Si le document entier ne se lit pas, chaque bloc `VEVENT` est relu
/// séparément : le résultat est alors partiel plutôt que vide.
pub fn parse_holidays(text: &str) -> HolidayMap {
    let lines = unfold_lines(text);
    let normalized = lines.join("\n") + "\n";
    let mut map = HolidayMap::new();

    match read_calendar(&normalized) {
        Ok(calendar) => collect_events(&calendar.components, &mut map),
        Err(_) => {
            tracing::warn!("ics document unreadable, recovering event by event");
            for block in event_blocks(&lines) {
                if let Ok(calendar) = read_calendar(&block) {
                    collect_events(&calendar.components, &mut map);
                }
            }
        }
    }
    map
}

fn collect_events(components: &[Component<'_>], map: &mut HolidayMap) {
    for component in components {
        if component.name.as_ref().eq_ignore_ascii_case("VEVENT") {
            if let Some((date, name)) = event_fields(component) {
                map.insert(date, holiday_from_event(date, name));
            }
        } else {
            collect_events(&component.components, map);
        }
    }
}

/// DTSTART et SUMMARY d'un évènement ; `None` si l'un manque ou est invalide.
fn event_fields(event: &Component<'_>) -> Option<(NaiveDate, String)> {
    let date = find_prop(event, "DTSTART").and_then(|p| parse_date(p.val.as_ref()))?;
    let summary = find_prop(event, "SUMMARY")?.val.as_ref().trim();
    if summary.is_empty() {
        return None;
    }
    Some((date, summary.to_string()))
}

fn find_prop<'c, 'a>(event: &'c Component<'a>, name: &str) -> Option<&'c Property<'a>> {
    event
        .properties
        .iter()
        .find(|p| p.name.as_ref().eq_ignore_ascii_case(name))
}

/// Blocs `VEVENT` isolés, chacun enveloppé dans un `VCALENDAR` minimal.
fn event_blocks(lines: &[String]) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;
    for line in lines {
        if line.eq_ignore_ascii_case("BEGIN:VEVENT") {
            current = Some(String::from("BEGIN:VCALENDAR\n"));
        }
        if let Some(block) = current.as_mut() {
            block.push_str(line);
            block.push('\n');
        }
        if line.eq_ignore_ascii_case("END:VEVENT") {
            if let Some(mut block) = current.take() {
                block.push_str("END:VCALENDAR\n");
                blocks.push(block);
            }
        }
    }
    blocks
}

fn holiday_from_event(date: NaiveDate, name: String) -> Holiday {
    let category = classify(&name);
    let kind = if LUNAR_NAMES.iter().any(|n| name.contains(n)) {
        HolidayType::Lunar
    } else {
        HolidayType::Solar
    };
    Holiday {
        date,
        name,
        kind,
        is_public: category != HolidayCategory::Commemoration,
        category,
    }
}

/// Les 8 premiers caractères en `YYYYMMDD` ; heure et fuseau ignorés.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let digits = value.get(..8)?;
    NaiveDate::parse_from_str(digits, "%Y%m%d").ok()
}
