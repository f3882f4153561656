//! Movie payloads from the metadata provider and their display-ready form.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::normalization::rating::{self, parse_rating, NormalizedRating};

/// Placeholder the provider uses for missing scalar fields.
const NOT_AVAILABLE: &str = "N/A";

/// One rating entry exactly as the provider reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl MovieRating {
    pub fn normalize(&self) -> NormalizedRating {
        rating::normalize_rating(&self.value, &self.source)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MovieType {
    #[default]
    Movie,
    Series,
    Episode,
}

impl MovieType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieType::Movie => "movie",
            MovieType::Series => "series",
            MovieType::Episode => "episode",
        }
    }
}

/// Detailed movie response in the provider's field casing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Movie {
    pub title: String,
    pub year: String,
    pub rated: String,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub plot: String,
    pub language: String,
    pub country: String,
    pub awards: String,
    pub poster: String,
    pub ratings: Vec<MovieRating>,
    pub metascore: String,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type")]
    pub kind: MovieType,
    #[serde(rename = "DVD")]
    pub dvd: Option<String>,
    pub box_office: Option<String>,
    pub production: Option<String>,
    pub website: Option<String>,
}

impl Movie {
    /// Parse a detail response. Provider error envelopes
    /// (`{"Response": "False", "Error": ...}`) become errors.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value = provider_value(raw)?;
        if value.get("Title").is_none() {
            return Err(anyhow!("movie payload has no Title field"));
        }
        serde_json::from_value(value).context("movie payload has an unexpected shape")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read movie file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("while loading {}", path.display()))
    }

    pub fn normalized_ratings(&self) -> Vec<NormalizedRating> {
        self.ratings.iter().map(MovieRating::normalize).collect()
    }
}

/// Parse a provider body and turn an error envelope into an error.
fn provider_value(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw).context("movie payload is not valid JSON")?;
    if value.get("Response").and_then(Value::as_str) == Some("False") {
        let message = value
            .get("Error")
            .and_then(Value::as_str)
            .unwrap_or("unknown provider error");
        bail!("provider returned an error response: {message}");
    }
    Ok(value)
}

/// One hit in a title search; a lighter cousin of [`Movie`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieSearchResult {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type")]
    pub kind: MovieType,
    #[serde(rename = "Poster")]
    pub poster: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSearchResponse {
    #[serde(rename = "Search")]
    pub results: Vec<MovieSearchResult>,
    /// Total hits across all pages, as the provider's decimal string.
    #[serde(rename = "totalResults", default)]
    pub total_results: String,
}

impl MovieSearchResponse {
    pub fn total_results(&self) -> Option<u64> {
        available(&self.total_results)?.parse().ok()
    }
}

/// Any successful provider body: a single title or a page of search hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieResponse {
    Detail(Box<Movie>),
    Search(MovieSearchResponse),
}

impl MovieResponse {
    /// A body with a `Search` array is a search page; one with a `Title` is a
    /// detail record. Error envelopes and anything else are errors.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value = provider_value(raw)?;
        if value.get("Search").is_some() {
            let page = serde_json::from_value(value)
                .context("search payload has an unexpected shape")?;
            return Ok(MovieResponse::Search(page));
        }
        if value.get("Title").is_some() {
            let movie = serde_json::from_value(value)
                .context("movie payload has an unexpected shape")?;
            return Ok(MovieResponse::Detail(Box::new(movie)));
        }
        bail!("payload is neither a movie nor a search response")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read movie file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("while loading {}", path.display()))
    }
}

/// A rating with its value folded onto a 0-10 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedRating {
    pub source: String,
    pub value: String,
    /// `None` when the value has no numeric reading.
    pub normalized_value: Option<f64>,
}

impl From<&MovieRating> for ProcessedRating {
    fn from(rating: &MovieRating) -> Self {
        ProcessedRating {
            source: rating.source.clone(),
            value: rating.value.clone(),
            normalized_value: parse_rating(&rating.value).map(|p| p.clamp(0.0, 100.0) / 10.0),
        }
    }
}

impl ProcessedRating {
    pub fn badge(&self) -> String {
        rating::rating_badge(&self.source, &self.value)
    }

    pub fn color(&self) -> &'static str {
        rating::rating_color(self.normalized_value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedMovie {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub rated: String,
    pub release_date: Option<NaiveDate>,
    /// Minutes.
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub director: Vec<String>,
    pub writers: Vec<String>,
    pub actors: Vec<String>,
    pub plot: String,
    pub language: Vec<String>,
    pub country: Vec<String>,
    pub awards: String,
    pub poster_url: String,
    pub ratings: Vec<ProcessedRating>,
    pub metascore: Option<u32>,
    pub imdb_rating: Option<f64>,
    pub imdb_votes: Option<u64>,
    #[serde(rename = "type")]
    pub kind: MovieType,
    pub box_office: Option<String>,
    pub production: Option<String>,
    pub website: Option<String>,
}

impl ProcessedMovie {
    /// The rating a card headlines.
    pub fn primary_rating(&self) -> Option<&ProcessedRating> {
        rating::primary_rating(&self.ratings, |r| r.source.as_str())
    }

    pub fn has_poster(&self) -> bool {
        !self.poster_url.is_empty() && self.poster_url != NOT_AVAILABLE
    }
}

impl From<&Movie> for ProcessedMovie {
    fn from(movie: &Movie) -> Self {
        let processed = ProcessedMovie {
            id: movie.imdb_id.clone(),
            title: movie.title.clone(),
            year: parse_year(&movie.year),
            rated: movie.rated.clone(),
            release_date: parse_release_date(&movie.released),
            runtime: parse_runtime(&movie.runtime),
            genres: split_list(&movie.genre),
            director: split_list(&movie.director),
            writers: split_list(&movie.writer),
            actors: split_list(&movie.actors),
            plot: movie.plot.clone(),
            language: split_list(&movie.language),
            country: split_list(&movie.country),
            awards: movie.awards.clone(),
            poster_url: movie.poster.clone(),
            ratings: movie.ratings.iter().map(ProcessedRating::from).collect(),
            metascore: available(&movie.metascore).and_then(|s| s.parse().ok()),
            imdb_rating: available(&movie.imdb_rating).and_then(|s| s.parse().ok()),
            imdb_votes: parse_votes(&movie.imdb_votes),
            kind: movie.kind,
            box_office: movie.box_office.as_deref().and_then(available).map(str::to_string),
            production: movie.production.as_deref().and_then(available).map(str::to_string),
            website: movie.website.as_deref().and_then(available).map(str::to_string),
        };
        debug!(
            target = "movie",
            id = %processed.id,
            ratings = processed.ratings.len(),
            "processed movie payload"
        );
        processed
    }
}

fn available(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        None
    } else {
        Some(trimmed)
    }
}

/// "Action, Sci-Fi, N/A" -> ["Action", "Sci-Fi"]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(available)
        .map(str::to_string)
        .collect()
}

/// "148 min" -> 148
pub fn parse_runtime(raw: &str) -> Option<u32> {
    let digits: String = available(raw)?
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// "2,345,678" -> 2345678
pub fn parse_votes(raw: &str) -> Option<u64> {
    let digits: String = available(raw)?.chars().filter(|c| *c != ',').collect();
    digits.parse().ok()
}

/// Leading four-digit year; series ranges such as "2008–2013" keep the start.
pub fn parse_year(raw: &str) -> i32 {
    let digits: String = raw.trim().chars().take(4).collect();
    if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_digit()) {
        digits.parse().unwrap_or(0)
    } else {
        0
    }
}

/// "16 Jul 2010" -> 2010-07-16
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let value = available(raw)?;
    match NaiveDate::parse_from_str(value, "%d %b %Y") {
        Ok(date) => Some(date),
        Err(err) => {
            warn!(target = "movie", raw = value, error = %err, "unrecognized release date");
            None
        }
    }
}
