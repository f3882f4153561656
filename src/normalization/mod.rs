//! Normalization of provider-shaped values into canonical display forms.
//!
//! Lookup tables here are `static` and evaluated first-match-wins.

pub mod department;
pub mod rating;

pub use department::Department;
pub use rating::{normalize_rating, NormalizedRating, RatingQuality, RatingSource};
