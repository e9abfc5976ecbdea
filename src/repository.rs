use crate::holidays::filter_month;
use crate::ics;
use crate::model::HolidayMap;
use async_trait::async_trait;
use chrono::Datelike;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

/// Export public `basic.ics` du calendrier Google des jours fériés coréens.
pub const DEFAULT_FEED_URL: &str = "https://calendar.google.com/calendar/ical/ko.south_korea%23holiday%40group.v.calendar.google.com/public/basic.ics";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Paramètres du flux distant.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected http status {0}")]
    Status(u16),
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Origine du texte iCalendar.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: FeedSource + ?Sized> FeedSource for Box<T> {
    async fn fetch(&self) -> Result<String, FetchError> {
        (**self).fetch().await
    }
}

/// Un seul GET, délai global borné, sans nouvelle tentative.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(config: &FeedConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("gamsung/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        let resp = self.client.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }
        Ok(resp.text().await?)
    }
}

/// Fichier `.ics` local (usage hors ligne).
#[derive(Debug, Clone)]
pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl FeedSource for FileFeedSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

/// Jours fériés issus d'un flux ICS, mis en cache par année pour la durée
/// de vie de l'instance (ni TTL ni éviction).
///
/// Le verrou n'est jamais tenu pendant le téléchargement : deux premiers
/// appels concurrents pour la même année peuvent chacun interroger le flux,
/// puis écrire des résultats équivalents.
pub struct IcsHolidayRepository<S> {
    source: S,
    cache: RwLock<HashMap<i32, HolidayMap>>,
}

impl<S: FeedSource> IcsHolidayRepository<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Jours fériés de `year`. En cas d'échec du transport, renvoie une
    /// table vide qui n'est pas mise en cache.
    pub async fn holidays_for_year(&self, year: i32) -> HolidayMap {
        if let Some(hit) = self.cache.read().await.get(&year) {
            tracing::debug!(year, "ics cache hit");
            return hit.clone();
        }

        let text = match self.source.fetch().await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(year, error = %err, "ics feed unavailable");
                return HolidayMap::new();
            }
        };

        let holidays: HolidayMap = ics::parse_holidays(&text)
            .into_iter()
            .filter(|(date, _)| date.year() == year)
            .collect();
        tracing::debug!(year, count = holidays.len(), "ics feed parsed");

        self.cache.write().await.insert(year, holidays.clone());
        holidays
    }

    pub async fn holidays_for_month(&self, year: i32, month: u32) -> HolidayMap {
        filter_month(self.holidays_for_year(year).await, year, month)
    }

    pub async fn is_cached(&self, year: i32) -> bool {
        self.cache.read().await.contains_key(&year)
    }
}
