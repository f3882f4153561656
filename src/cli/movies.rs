use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::catalog::{filter_movies, sort_movies, MovieFilters, MovieSort};
use crate::movie::{MovieResponse, MovieSearchResponse, ProcessedMovie};

#[derive(Debug, Clone)]
pub struct MoviesConfig {
    pub paths: Vec<PathBuf>,
    pub filters: MovieFilters,
    pub sort: MovieSort,
    pub json: bool,
}

pub fn render_search_page(page: &MovieSearchResponse) -> String {
    let mut out = String::new();
    let total = page
        .total_results()
        .map_or_else(|| "?".to_string(), |n| n.to_string());
    writeln!(out, "Search results: {} of {}", page.results.len(), total).ok();
    for hit in &page.results {
        writeln!(
            out,
            "  {:<10} {:<6} {:<8} {}",
            hit.imdb_id,
            hit.year,
            hit.kind.as_str(),
            hit.title
        )
        .ok();
    }
    out
}

pub fn render_movie_list(movies: &[&ProcessedMovie]) -> String {
    let mut out = String::new();
    if movies.is_empty() {
        writeln!(out, "No movies match the filters").ok();
        return out;
    }
    for movie in movies {
        let rating = movie
            .imdb_rating
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        let metascore = movie
            .metascore
            .map_or_else(|| "-".to_string(), |m| m.to_string());
        writeln!(
            out,
            "  {:<32} {:>4} {:>4} {:>3}  {}",
            movie.title,
            movie.year,
            rating,
            metascore,
            movie.genres.join(", ")
        )
        .ok();
    }
    out
}

/// Print a detail payload in processed form as JSON. Search pages print as a
/// hit list unless `json` is set.
pub fn run_movie(path: &Path, json: bool) -> Result<()> {
    match MovieResponse::from_path(path)? {
        MovieResponse::Detail(movie) => {
            let processed = ProcessedMovie::from(movie.as_ref());
            println!("{}", serde_json::to_string_pretty(&processed)?);
        }
        MovieResponse::Search(page) => {
            info!(target = "cli", hits = page.results.len(), "loaded search page");
            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print!("{}", render_search_page(&page));
            }
        }
    }
    Ok(())
}

/// Load detail payloads, filter and sort them. Search pages in the input are
/// skipped since they carry no ratings or genres.
pub fn run(cfg: &MoviesConfig) -> Result<()> {
    let mut processed = Vec::with_capacity(cfg.paths.len());
    for path in &cfg.paths {
        match MovieResponse::from_path(path)? {
            MovieResponse::Detail(movie) => {
                processed.push(ProcessedMovie::from(movie.as_ref()));
            }
            MovieResponse::Search(_) => {
                warn!(target = "cli", path = %path.display(), "skipping search page");
            }
        }
    }

    let mut listed = filter_movies(&processed, &cfg.filters);
    sort_movies(&mut listed, cfg.sort);
    info!(
        target = "cli",
        loaded = processed.len(),
        listed = listed.len(),
        sort = ?cfg.sort,
        "listed movies"
    );
    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&listed)?);
    } else {
        print!("{}", render_movie_list(&listed));
    }
    Ok(())
}
