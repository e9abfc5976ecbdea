//! Conversion du calendrier lunaire coréen vers le calendrier solaire.

mod data;

use chrono::{Days, NaiveDate};
use std::ops::RangeInclusive;

/// Interface étroite de conversion lunaire → solaire.
///
/// `None` signifie « conversion impossible » (année hors table, mois/jour
/// invalide, mois intercalaire inexistant) ; ce n'est jamais une erreur.
pub trait LunarToSolarConverter {
    fn convert(
        &self,
        year: i32,
        lunar_month: u32,
        lunar_day: u32,
        is_leap_month: bool,
    ) -> Option<NaiveDate>;
}

impl<C: LunarToSolarConverter + ?Sized> LunarToSolarConverter for &C {
    fn convert(&self, year: i32, month: u32, day: u32, is_leap: bool) -> Option<NaiveDate> {
        (**self).convert(year, month, day, is_leap)
    }
}

/// Année lunaire décompressée depuis la table.
#[derive(Debug, Clone, Copy)]
struct LunarYear {
    year: i32,
    month_bits: u32,
    leap_month: u32,
    new_year_offset: u32,
}

impl LunarYear {
    fn lookup(year: i32) -> Option<Self> {
        if !(data::MIN_YEAR..=data::MAX_YEAR).contains(&year) {
            return None;
        }
        let packed = data::YEAR_DATA[(year - data::MIN_YEAR) as usize];
        Some(Self {
            year,
            month_bits: packed & 0x1fff,
            leap_month: (packed >> 13) & 0xf,
            new_year_offset: (packed >> 17) & 0x3f,
        })
    }

    fn month_count(&self) -> u32 {
        if self.leap_month == 0 {
            12
        } else {
            13
        }
    }

    fn ordinal_len(&self, ordinal: u32) -> u32 {
        if self.month_bits & (1 << ordinal) != 0 {
            30
        } else {
            29
        }
    }

    /// Index ordinal (0-based) d'un mois, en tenant compte du mois intercalaire.
    fn ordinal(&self, month: u32, is_leap: bool) -> Option<u32> {
        if !(1..=12).contains(&month) {
            return None;
        }
        if is_leap && self.leap_month != month {
            return None;
        }
        let shifted = self.leap_month != 0
            && (month > self.leap_month || (month == self.leap_month && is_leap));
        Some(month - 1 + u32::from(shifted))
    }

    fn new_year(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, 1, 1)?
            .checked_add_days(Days::new(u64::from(self.new_year_offset)))
    }
}

/// Convertisseur purement tabulé (années lunaires 1970 à 2050).
#[derive(Debug, Default, Clone, Copy)]
pub struct TableLunarConverter;

impl TableLunarConverter {
    pub fn new() -> Self {
        Self
    }

    pub fn supported_years(&self) -> RangeInclusive<i32> {
        data::MIN_YEAR..=data::MAX_YEAR
    }

    /// Mois suivi d'un mois intercalaire cette année-là.
    pub fn leap_month(&self, year: i32) -> Option<u32> {
        LunarYear::lookup(year)
            .map(|y| y.leap_month)
            .filter(|m| *m != 0)
    }

    pub fn days_in_month(&self, year: i32, month: u32, is_leap: bool) -> Option<u32> {
        let info = LunarYear::lookup(year)?;
        let ordinal = info.ordinal(month, is_leap)?;
        Some(info.ordinal_len(ordinal))
    }

    /// Date solaire du 1er jour du 1er mois lunaire.
    pub fn new_year(&self, year: i32) -> Option<NaiveDate> {
        LunarYear::lookup(year)?.new_year()
    }
}

impl LunarToSolarConverter for TableLunarConverter {
    fn convert(
        &self,
        year: i32,
        lunar_month: u32,
        lunar_day: u32,
        is_leap_month: bool,
    ) -> Option<NaiveDate> {
        let info = LunarYear::lookup(year)?;
        let ordinal = info.ordinal(lunar_month, is_leap_month)?;
        debug_assert!(ordinal < info.month_count());
        if lunar_day == 0 || lunar_day > info.ordinal_len(ordinal) {
            return None;
        }
        let before: u32 = (0..ordinal).map(|o| info.ordinal_len(o)).sum();
        info.new_year()?
            .checked_add_days(Days::new(u64::from(before + lunar_day - 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn seollal_and_chuseok_2020_to_2030() {
        let c = TableLunarConverter::new();
        let expected = [
            (2020, d(2020, 1, 25), d(2020, 10, 1)),
            (2021, d(2021, 2, 12), d(2021, 9, 21)),
            (2022, d(2022, 2, 1), d(2022, 9, 10)),
            (2023, d(2023, 1, 22), d(2023, 9, 29)),
            (2024, d(2024, 2, 10), d(2024, 9, 17)),
            (2025, d(2025, 1, 29), d(2025, 10, 6)),
            (2026, d(2026, 2, 17), d(2026, 9, 25)),
            (2027, d(2027, 2, 7), d(2027, 9, 15)),
            (2028, d(2028, 1, 27), d(2028, 10, 3)),
            (2029, d(2029, 2, 13), d(2029, 9, 22)),
            (2030, d(2030, 2, 3), d(2030, 9, 12)),
        ];
        for (year, seollal, chuseok) in expected {
            assert_eq!(c.convert(year, 1, 1, false), Some(seollal), "seollal {year}");
            assert_eq!(c.convert(year, 8, 15, false), Some(chuseok), "chuseok {year}");
        }
    }

    #[test]
    fn buddha_birthday() {
        let c = TableLunarConverter::new();
        assert_eq!(c.convert(2023, 4, 8, false), Some(d(2023, 5, 27)));
        assert_eq!(c.convert(2025, 4, 8, false), Some(d(2025, 5, 5)));
        assert_eq!(c.convert(2026, 4, 8, false), Some(d(2026, 5, 24)));
    }

    #[test]
    fn korean_reckoning_differs_from_chinese_in_1997() {
        let c = TableLunarConverter::new();
        assert_eq!(c.new_year(1997), Some(d(1997, 2, 8)));
    }

    #[test]
    fn leap_month_handling() {
        let c = TableLunarConverter::new();
        assert_eq!(c.leap_month(2025), Some(6));
        assert_eq!(c.leap_month(2024), None);
        assert_eq!(c.convert(2025, 6, 1, false), Some(d(2025, 6, 25)));
        assert_eq!(c.convert(2025, 6, 1, true), Some(d(2025, 7, 25)));
        assert_eq!(c.convert(2025, 7, 1, false), Some(d(2025, 8, 23)));
        assert_eq!(c.convert(2025, 5, 1, true), None);
        assert_eq!(c.days_in_month(2025, 6, true), Some(29));
    }

    #[test]
    fn last_day_of_year_reaches_next_new_year() {
        let c = TableLunarConverter::new();
        assert_eq!(c.days_in_month(2025, 12, false), Some(29));
        assert_eq!(c.convert(2025, 12, 29, false), Some(d(2026, 2, 16)));
        assert_eq!(c.convert(2025, 12, 30, false), None);
        assert_eq!(c.convert(2024, 12, 1, false), Some(d(2024, 12, 31)));
    }

    #[test]
    fn consecutive_years_are_contiguous() {
        let c = TableLunarConverter::new();
        for year in *c.supported_years().start()..*c.supported_years().end() {
            let months = if c.leap_month(year).is_some() { 13 } else { 12 };
            let mut total = 0u32;
            for m in 1..=12 {
                total += c.days_in_month(year, m, false).unwrap();
            }
            if let Some(leap) = c.leap_month(year) {
                total += c.days_in_month(year, leap, true).unwrap();
            }
            let span = (c.new_year(year + 1).unwrap() - c.new_year(year).unwrap()).num_days();
            assert_eq!(i64::from(total), span, "year {year} ({months} months)");
        }
    }

    #[test]
    fn out_of_range_is_none() {
        let c = TableLunarConverter::new();
        assert_eq!(c.convert(1969, 1, 1, false), None);
        assert_eq!(c.convert(2051, 1, 1, false), None);
        assert_eq!(c.convert(2025, 13, 1, false), None);
        assert_eq!(c.convert(2025, 1, 0, false), None);
    }
}
