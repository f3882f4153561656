use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cinedex::catalog::{Bounds, MovieFilters, MovieSort, MovieSortField, SortOrder};
use cinedex::cli::movies::{self, MoviesConfig};
use cinedex::cli::people::{self, PeopleConfig};
use cinedex::cli::ratings::{self, RatingsConfig};
use cinedex::config::AppConfig;
use cinedex::credits::{PersonFilter, PersonRole};
use cinedex::movie::MovieType;
use cinedex::normalization::Department;
use cinedex::util::env;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "cinedex", version, about = "Movie ratings and credits shaping CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Normalize a movie payload's ratings onto a 0-100 scale
    Ratings {
        /// Movie detail JSON file
        path: PathBuf,
        /// Emit JSON instead of a table (defaults to env CINEDEX_JSON)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Group crew by department, ordered by role importance
    Crew {
        /// Credits JSON file ({"cast": [...], "crew": [...]})
        path: PathBuf,
        /// Cap members shown per department (defaults to env CINEDEX_MAX_CREW_PER_DEPT, 0 = all)
        #[arg(long)]
        max_per_department: Option<usize>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Split cast into main, supporting and other tiers by billing order
    Cast {
        path: PathBuf,
        /// Cap cast members shown (defaults to env CINEDEX_MAX_CAST_VISIBLE, 0 = all)
        #[arg(long)]
        max_visible: Option<usize>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Search cast and crew by name, character, job or department
    Search {
        path: PathBuf,
        query: String,
        /// Restrict matches to cast or crew
        #[arg(long, value_enum, default_value_t = PersonRole::All)]
        role: PersonRole,
        /// Restrict matches to crew in this canonical department (e.g. "Visual Effects")
        #[arg(long)]
        department: Option<Department>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print a processed movie as JSON, or the hits of a search page
    Movie {
        path: PathBuf,
        /// Print search pages as JSON instead of a hit list
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Filter and sort several movie detail payloads
    Movies {
        paths: Vec<PathBuf>,
        /// Keep movies with any of these genres (comma-separated)
        #[arg(long, value_delimiter = ',')]
        genre: Vec<String>,
        #[arg(long)]
        year_min: Option<i32>,
        #[arg(long)]
        year_max: Option<i32>,
        /// Lowest IMDb rating, 0-10
        #[arg(long)]
        rating_min: Option<f64>,
        /// Highest IMDb rating, 0-10
        #[arg(long)]
        rating_max: Option<f64>,
        /// Keep only these types (comma-separated)
        #[arg(long = "type", value_enum, value_delimiter = ',')]
        types: Vec<MovieType>,
        #[arg(long, value_enum, default_value_t = MovieSortField::Title)]
        sort: MovieSortField,
        #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
        order: SortOrder,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Open-ended bounds from optional CLI limits.
fn bounds<T: PartialOrd>(
    min: Option<T>,
    max: Option<T>,
    lowest: T,
    highest: T,
) -> Option<Bounds<T>> {
    if min.is_none() && max.is_none() {
        return None;
    }
    Some(Bounds::new(min.unwrap_or(lowest), max.unwrap_or(highest)))
}

fn main() -> Result<()> {
    env::init_env();
    let config = AppConfig::from_env();
    cinedex::tracing::init_tracing(&config.log_filter)?;
    info!(
        target = "bootstrap",
        app = %config.name,
        version = %config.version,
        environment = %config.environment,
        "starting"
    );

    let cli = Cli::parse();
    debug!(target = "bootstrap", command = ?cli.command, "parsed arguments");

    let json_default = config.json_output;
    let people_config = |path: PathBuf, json: bool| PeopleConfig {
        path,
        json: json || json_default,
        max_per_department: config.max_crew_per_department,
        max_cast_visible: config.max_cast_visible,
    };

    match cli.command {
        Commands::Ratings { path, json } => ratings::run(&RatingsConfig {
            path,
            json: json || json_default,
        }),
        Commands::Crew {
            path,
            max_per_department,
            json,
        } => {
            let mut cfg = people_config(path, json);
            if let Some(max) = max_per_department {
                cfg.max_per_department = max;
            }
            people::run_crew(&cfg)
        }
        Commands::Cast {
            path,
            max_visible,
            json,
        } => {
            let mut cfg = people_config(path, json);
            if let Some(max) = max_visible {
                cfg.max_cast_visible = max;
            }
            people::run_cast(&cfg)
        }
        Commands::Search {
            path,
            query,
            role,
            department,
            json,
        } => {
            let mut filter = PersonFilter::new(query).with_role(role);
            filter.department = department;
            people::run_search(&people_config(path, json), &filter)
        }
        Commands::Movie { path, json } => movies::run_movie(&path, json || json_default),
        Commands::Movies {
            paths,
            genre,
            year_min,
            year_max,
            rating_min,
            rating_max,
            types,
            sort,
            order,
            json,
        } => movies::run(&MoviesConfig {
            paths,
            filters: MovieFilters {
                genres: genre,
                year: bounds(year_min, year_max, i32::MIN, i32::MAX),
                rating: bounds(rating_min, rating_max, f64::NEG_INFINITY, f64::INFINITY),
                types,
            },
            sort: MovieSort::new(sort, order),
            json: json || json_default,
        }),
    }
}
