//! Échange des lieux favoris : CSV (`name,note,lat,lng`) et GPX 1.1.

use crate::model::FavoritePlace;
use anyhow::Context;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

pub const CSV_HEADER: [&str; 4] = ["name", "note", "lat", "lng"];

#[derive(Error, Debug)]
pub enum PlaceError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("gpx: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("not a gpx document (root element <{0}>)")]
    NotGpx(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unknown place file format: {0}")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceFormat {
    Csv,
    Gpx,
}

impl PlaceFormat {
    /// Déduit le format de l'extension du fichier.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PlaceError> {
        let path = path.as_ref();
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Ok(Self::Csv),
            Some("gpx") => Ok(Self::Gpx),
            _ => Err(PlaceError::UnknownFormat(path.display().to_string())),
        }
    }
}

/// Résultat d'un import : les lignes invalides sont sautées une à une.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceImport {
    pub places: Vec<FavoritePlace>,
    pub skipped: usize,
}

impl PlaceImport {
    fn accept(&mut self, place: Option<FavoritePlace>, position: usize) {
        match place {
            Some(p) => self.places.push(p),
            None => {
                tracing::warn!(position, "skipping malformed place");
                self.skipped += 1;
            }
        }
    }
}

pub fn write_places_csv<W: Write>(writer: W, places: &[FavoritePlace]) -> Result<(), PlaceError> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(writer);
    w.write_record(CSV_HEADER)?;
    for p in places {
        let lat = p.lat.to_string();
        let lng = p.lng.to_string();
        w.write_record([p.name.as_str(), p.note.as_str(), lat.as_str(), lng.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_places_csv<R: Read>(reader: R) -> Result<PlaceImport, PlaceError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut out = PlaceImport::default();
    for (idx, rec) in rdr.byte_records().enumerate() {
        let rec = match rec {
            Ok(rec) => rec,
            Err(err) if is_row_error(&err) => {
                tracing::warn!(position = idx + 1, error = %err, "skipping unreadable csv row");
                out.skipped += 1;
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        // une ligne non UTF-8 est sautée, pas l'import entier
        let fields: Option<Vec<&str>> = rec.iter().map(|f| std::str::from_utf8(f).ok()).collect();
        let place = fields.and_then(|f| {
            rec_to_place(f.first().copied(), f.get(1).copied(), f.get(2).copied(), f.get(3).copied())
        });
        out.accept(place, idx + 1);
    }
    Ok(out)
}

fn is_row_error(err: &csv::Error) -> bool {
    matches!(
        err.kind(),
        csv::ErrorKind::Utf8 { .. } | csv::ErrorKind::UnequalLengths { .. }
    )
}

pub fn write_places_gpx<W: Write>(mut writer: W, places: &[FavoritePlace]) -> Result<(), PlaceError> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        writer,
        r#"<gpx version="1.1" creator="gamsung" xmlns="http://www.topografix.com/GPX/1/1">"#
    )?;
    for p in places {
        writeln!(writer, r#"  <wpt lat="{}" lon="{}">"#, p.lat, p.lng)?;
        writeln!(writer, "    <name>{}</name>", escape_xml(&p.name))?;
        if !p.note.is_empty() {
            writeln!(writer, "    <desc>{}</desc>", escape_xml(&p.note))?;
        }
        writeln!(writer, "  </wpt>")?;
    }
    writeln!(writer, "</gpx>")?;
    writer.flush()?;
    Ok(())
}

pub fn read_places_gpx(text: &str) -> Result<PlaceImport, PlaceError> {
    let doc = roxmltree::Document::parse(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "gpx" {
        return Err(PlaceError::NotGpx(root.tag_name().name().to_string()));
    }

    let mut out = PlaceImport::default();
    for (idx, wpt) in root
        .children()
        .filter(|n| n.tag_name().name() == "wpt")
        .enumerate()
    {
        let child_text = |tag: &str| {
            wpt.children()
                .find(|n| n.tag_name().name() == tag)
                .and_then(|n| n.text())
        };
        let place = rec_to_place(
            child_text("name"),
            child_text("desc"),
            wpt.attribute("lat"),
            wpt.attribute("lon"),
        );
        out.accept(place, idx + 1);
    }
    Ok(out)
}

fn rec_to_place(
    name: Option<&str>,
    note: Option<&str>,
    lat: Option<&str>,
    lng: Option<&str>,
) -> Option<FavoritePlace> {
    let name = name.filter(|n| !n.trim().is_empty())?;
    let note = note.unwrap_or("");
    let lat: f64 = lat?.trim().parse().ok()?;
    let lng: f64 = lng?.trim().parse().ok()?;
    let place = FavoritePlace::new(name, note, lat, lng);
    place.has_valid_coordinates().then_some(place)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Export vers un fichier (écriture atomique), format selon l'extension.
pub fn export_places<P: AsRef<Path>>(path: P, places: &[FavoritePlace]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let format = PlaceFormat::from_path(path)?;
    let mut tmp = NamedTempFile::new_in(parent_dir(path)).context("creating temp file")?;
    match format {
        PlaceFormat::Csv => write_places_csv(&mut tmp, places)?,
        PlaceFormat::Gpx => write_places_gpx(&mut tmp, places)?,
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Import depuis un fichier, format selon l'extension.
pub fn import_places<P: AsRef<Path>>(path: P) -> anyhow::Result<PlaceImport> {
    let path = path.as_ref();
    let format = PlaceFormat::from_path(path)?;
    let imported = match format {
        PlaceFormat::Csv => {
            let file = fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
            read_places_csv(file)?
        }
        PlaceFormat::Gpx => {
            let text =
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            read_places_gpx(&text)?
        }
    };
    Ok(imported)
}

pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}
