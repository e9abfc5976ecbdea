//! Table des années lunaires coréennes (calcul en heure de Corée, UTC+9).
//!
//! Une entrée `u32` par année lunaire, de `MIN_YEAR` à `MAX_YEAR` :
//! - bits 0..=12 : longueur des mois dans l'ordre ordinal (1 = 30 jours, 0 = 29 jours) ;
//!   le 13e bit n'a de sens que pour les années à mois intercalaire ;
//! - bits 13..=16 : numéro du mois suivi d'un mois intercalaire (0 = aucun) ;
//! - bits 17..=22 : décalage en jours du nouvel an lunaire depuis le 1er janvier.

pub(crate) const MIN_YEAR: i32 = 1970;
pub(crate) const MAX_YEAR: i32 = 2050;

#[rustfmt::skip]
pub(crate) const YEAR_DATA: [u32; (MAX_YEAR - MIN_YEAR + 1) as usize] = [
    0x480b59, 0x34b752, 0x5a0752, 0x420725, 0x2c964b, // 1970
    0x520a4b, 0x3d12ab, 0x6002ad, 0x4a056b, 0x36cb69, // 1975
    0x5c0da9, 0x460d92, 0x309b25, 0x560d25, 0x415a4d, // 1980
    0x640a56, 0x4e02b6, 0x38d5ad, 0x6006d4, 0x480da9, // 1985
    0x34bd92, 0x5a0e92, 0x440d26, 0x2c6a56, 0x500a57, // 1990
    0x3d12b6, 0x620b5a, 0x4c06d4, 0x36aec9, 0x5c0749, // 1995
    0x460693, 0x2e9527, 0x54052b, 0x3e0a5b, 0x2a555a, // 2000
    0x4e036a, 0x38fb55, 0x600ba4, 0x4a0b49, 0x32ba93, // 2005
    0x580a95, 0x42052d, 0x2c6a5d, 0x500aad, 0x3d35aa, // 2010
    0x6205d2, 0x4c0da5, 0x36bd4a, 0x5c0d4a, 0x460a95, // 2015
    0x30952d, 0x540556, 0x3e0ab5, 0x2a55aa, 0x5006d2, // 2020
    0x38cea5, 0x5e0ea5, 0x4a0e4a, 0x34ac96, 0x560c9b, // 2025
    0x42055a, 0x2c6ad5, 0x520b69, 0x3d7752, 0x620752, // 2030
    0x4c0b25, 0x36d64b, 0x5a0a4b, 0x4404ab, 0x2ea55b, // 2035
    0x54056d, 0x3e0b69, 0x2a5b52, 0x500d92, 0x3afd25, // 2040
    0x5e0d25, 0x480a4d, 0x32b4ad, 0x5802b6, 0x4005b5, // 2045
    0x2c6da9, // 2050
];
