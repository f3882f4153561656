use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::movie::Movie;
use crate::normalization::rating::primary_rating;
use crate::normalization::NormalizedRating;

#[derive(Debug, Clone)]
pub struct RatingsConfig {
    pub path: PathBuf,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RatingRow<'a> {
    primary: bool,
    #[serde(flatten)]
    rating: &'a NormalizedRating,
}

/// Normalized ratings with the headline rating moved to the front.
pub fn ordered_ratings(movie: &Movie) -> Vec<(bool, NormalizedRating)> {
    let primary = primary_rating(&movie.ratings, |r| r.source.as_str())
        .and_then(|p| movie.ratings.iter().position(|r| std::ptr::eq(r, p)));
    let mut rows: Vec<(bool, NormalizedRating)> = movie
        .normalized_ratings()
        .into_iter()
        .enumerate()
        .map(|(idx, rating)| (Some(idx) == primary, rating))
        .collect();
    // Stable: non-primary rows keep provider order.
    rows.sort_by_key(|(is_primary, _)| !is_primary);
    rows
}

pub fn render_ratings(movie: &Movie) -> String {
    let mut out = String::new();
    let rows = ordered_ratings(movie);
    writeln!(out, "Ratings & Reviews: {}", movie.title).ok();
    if rows.is_empty() {
        writeln!(out, "  📊 No ratings available").ok();
        return out;
    }
    for (is_primary, rating) in &rows {
        writeln!(
            out,
            "{} {} {:<16} {:>8} {:>5.0}%  {:<13} (0-{})",
            if *is_primary { "*" } else { " " },
            rating.icon(),
            rating.source_name(),
            rating.display,
            rating.percentage,
            rating.quality.label(),
            rating.source.max_value,
        )
        .ok();
    }
    writeln!(
        out,
        "  ℹ️  Ratings are aggregated from multiple sources and may use different scales."
    )
    .ok();
    out
}

pub fn run(cfg: &RatingsConfig) -> Result<()> {
    let movie = Movie::from_path(&cfg.path)?;
    info!(target = "cli", title = %movie.title, ratings = movie.ratings.len(), "loaded movie");
    if cfg.json {
        let rows = ordered_ratings(&movie);
        let view: Vec<RatingRow<'_>> = rows
            .iter()
            .map(|(primary, rating)| RatingRow {
                primary: *primary,
                rating,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_ratings(&movie));
    }
    Ok(())
}
