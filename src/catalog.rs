//! Filtering and sorting for lists of processed movies.

use std::cmp::Ordering;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::credits::crew::collate_names;
use crate::movie::{MovieType, ProcessedMovie};

/// Inclusive `min..=max` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd> Bounds<T> {
    pub fn new(min: T, max: T) -> Self {
        Bounds { min, max }
    }

    pub fn contains(&self, value: &T) -> bool {
        *value >= self.min && *value <= self.max
    }
}

/// Every set criterion must hold. Empty lists and `None` bounds do not
/// restrict anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieFilters {
    /// A movie passes when it has any of these genres (case-insensitive).
    #[serde(rename = "genre")]
    pub genres: Vec<String>,
    pub year: Option<Bounds<i32>>,
    /// Bounds on the IMDb rating, 0-10. Movies without one never pass.
    pub rating: Option<Bounds<f64>>,
    #[serde(rename = "type")]
    pub types: Vec<MovieType>,
}

impl MovieFilters {
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
            && self.year.is_none()
            && self.rating.is_none()
            && self.types.is_empty()
    }

    pub fn matches(&self, movie: &ProcessedMovie) -> bool {
        let genre_ok = self.genres.is_empty()
            || movie.genres.iter().any(|have| {
                self.genres
                    .iter()
                    .any(|want| want.trim().to_lowercase() == have.to_lowercase())
            });
        let year_ok = match &self.year {
            Some(bounds) => bounds.contains(&movie.year),
            None => true,
        };
        let rating_ok = match (&self.rating, movie.imdb_rating) {
            (None, _) => true,
            (Some(bounds), Some(rating)) => bounds.contains(&rating),
            (Some(_), None) => false,
        };
        let type_ok = self.types.is_empty() || self.types.contains(&movie.kind);
        genre_ok && year_ok && rating_ok && type_ok
    }
}

/// Movies passing `filters`, in input order.
pub fn filter_movies<'a>(
    movies: &'a [ProcessedMovie],
    filters: &MovieFilters,
) -> Vec<&'a ProcessedMovie> {
    let kept: Vec<&ProcessedMovie> = movies.iter().filter(|m| filters.matches(m)).collect();
    debug!(
        target = "catalog",
        total = movies.len(),
        kept = kept.len(),
        "filtered movies"
    );
    kept
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MovieSortField {
    #[default]
    Title,
    Year,
    /// IMDb rating.
    Rating,
    Metascore,
}

impl MovieSortField {
    /// Numeric sort key; `None` for titles and for missing values.
    /// A year of 0 means the provider gave none.
    fn value(self, movie: &ProcessedMovie) -> Option<f64> {
        match self {
            MovieSortField::Title => None,
            MovieSortField::Year => (movie.year > 0).then_some(f64::from(movie.year)),
            MovieSortField::Rating => movie.imdb_rating,
            MovieSortField::Metascore => movie.metascore.map(f64::from),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSort {
    pub field: MovieSortField,
    pub order: SortOrder,
}

impl MovieSort {
    pub fn new(field: MovieSortField, order: SortOrder) -> Self {
        MovieSort { field, order }
    }

    /// Titles use name collation. Movies missing the sort value go last in
    /// either order.
    pub fn compare(&self, a: &ProcessedMovie, b: &ProcessedMovie) -> Ordering {
        let directed = |ord: Ordering| match self.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        };
        if self.field == MovieSortField::Title {
            return directed(collate_names(&a.title, &b.title));
        }
        match (self.field.value(a), self.field.value(b)) {
            (Some(x), Some(y)) => directed(x.total_cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Stable sort; ties keep their relative order.
pub fn sort_movies(movies: &mut [&ProcessedMovie], sort: MovieSort) {
    movies.sort_by(|a, b| sort.compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, year: i32, rating: Option<f64>, genres: &[&str]) -> ProcessedMovie {
        ProcessedMovie {
            id: title.to_lowercase(),
            title: title.to_string(),
            year,
            rated: String::new(),
            release_date: None,
            runtime: None,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            director: Vec::new(),
            writers: Vec::new(),
            actors: Vec::new(),
            plot: String::new(),
            language: Vec::new(),
            country: Vec::new(),
            awards: String::new(),
            poster_url: String::new(),
            ratings: Vec::new(),
            metascore: None,
            imdb_rating: rating,
            imdb_votes: None,
            kind: MovieType::Movie,
            box_office: None,
            production: None,
            website: None,
        }
    }

    fn library() -> Vec<ProcessedMovie> {
        let mut breaking_bad = movie("Breaking Bad", 2008, Some(9.5), &["Crime", "Drama"]);
        breaking_bad.kind = MovieType::Series;
        let mut inception = movie("Inception", 2010, Some(8.8), &["Action", "Sci-Fi"]);
        inception.metascore = Some(74);
        let mut alien = movie("alien", 1979, Some(8.5), &["Horror", "Sci-Fi"]);
        alien.metascore = Some(89);
        let untitled = movie("Untitled", 0, None, &[]);
        vec![inception, breaking_bad, alien, untitled]
    }

    fn titles<'a>(movies: &[&'a ProcessedMovie]) -> Vec<&'a str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn empty_filters_keep_everything() {
        let movies = library();
        let filters = MovieFilters::default();
        assert!(filters.is_empty());
        assert_eq!(filter_movies(&movies, &filters).len(), movies.len());
    }

    #[test]
    fn genre_matches_any_listed_genre() {
        let movies = library();
        let filters = MovieFilters {
            genres: vec!["sci-fi".into(), "Drama".into()],
            ..MovieFilters::default()
        };
        assert_eq!(
            titles(&filter_movies(&movies, &filters)),
            vec!["Inception", "Breaking Bad", "alien"]
        );
    }

    #[test]
    fn year_and_rating_bounds_are_inclusive() {
        let movies = library();
        let filters = MovieFilters {
            year: Some(Bounds::new(1979, 2008)),
            ..MovieFilters::default()
        };
        assert_eq!(titles(&filter_movies(&movies, &filters)), vec!["Breaking Bad", "alien"]);

        let filters = MovieFilters {
            rating: Some(Bounds::new(8.5, 8.8)),
            ..MovieFilters::default()
        };
        assert_eq!(titles(&filter_movies(&movies, &filters)), vec!["Inception", "alien"]);

        // Unrated titles fail any rating bound.
        let filters = MovieFilters {
            rating: Some(Bounds::new(0.0, 10.0)),
            ..MovieFilters::default()
        };
        assert_eq!(filter_movies(&movies, &filters).len(), 3);
    }

    #[test]
    fn type_filter_and_combined_criteria() {
        let movies = library();
        let filters = MovieFilters {
            types: vec![MovieType::Series],
            ..MovieFilters::default()
        };
        assert_eq!(titles(&filter_movies(&movies, &filters)), vec!["Breaking Bad"]);

        let filters = MovieFilters {
            genres: vec!["Sci-Fi".into()],
            year: Some(Bounds::new(2000, 2020)),
            ..MovieFilters::default()
        };
        assert_eq!(titles(&filter_movies(&movies, &filters)), vec!["Inception"]);
    }

    #[test]
    fn filters_deserialize_from_ui_shape() {
        let filters: MovieFilters = serde_json::from_value(serde_json::json!({
            "genre": ["Horror"],
            "year": {"min": 1970, "max": 1989},
            "type": ["movie"]
        }))
        .unwrap();
        assert_eq!(filters.types, vec![MovieType::Movie]);
        assert_eq!(titles(&filter_movies(&library(), &filters)), vec!["alien"]);
    }

    #[test]
    fn sorts_by_title_with_collation() {
        let movies = library();
        let mut refs: Vec<&ProcessedMovie> = movies.iter().collect();
        sort_movies(&mut refs, MovieSort::default());
        assert_eq!(titles(&refs), vec!["alien", "Breaking Bad", "Inception", "Untitled"]);

        sort_movies(&mut refs, MovieSort::new(MovieSortField::Title, SortOrder::Desc));
        assert_eq!(titles(&refs), vec!["Untitled", "Inception", "Breaking Bad", "alien"]);
    }

    #[test]
    fn missing_values_sort_last_in_both_orders() {
        let movies = library();
        let mut refs: Vec<&ProcessedMovie> = movies.iter().collect();

        sort_movies(&mut refs, MovieSort::new(MovieSortField::Rating, SortOrder::Desc));
        assert_eq!(titles(&refs), vec!["Breaking Bad", "Inception", "alien", "Untitled"]);

        sort_movies(&mut refs, MovieSort::new(MovieSortField::Year, SortOrder::Asc));
        assert_eq!(titles(&refs), vec!["alien", "Breaking Bad", "Inception", "Untitled"]);

        sort_movies(&mut refs, MovieSort::new(MovieSortField::Metascore, SortOrder::Asc));
        assert_eq!(titles(&refs), vec!["Inception", "alien", "Breaking Bad", "Untitled"]);
    }

    #[test]
    fn sort_options_parse_from_cli_names() {
        assert_eq!(MovieSortField::from_str("metascore", true), Ok(MovieSortField::Metascore));
        assert_eq!(SortOrder::from_str("DESC", true), Ok(SortOrder::Desc));
        let sort: MovieSort =
            serde_json::from_value(serde_json::json!({"field": "year", "order": "desc"})).unwrap();
        assert_eq!(sort, MovieSort::new(MovieSortField::Year, SortOrder::Desc));
    }
}
