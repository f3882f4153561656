pub mod catalog;
pub mod cli;
pub mod config;
pub mod credits;
pub mod movie;
pub mod normalization;
pub mod tracing;

pub mod util {
    pub mod env;
}

pub use credits::{filter_people, group_cast_by_importance, organize_crew};
pub use normalization::normalize_rating;
