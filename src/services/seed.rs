use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ConfigError;
use crate::models::project::{NewProject, Project};
use crate::models::timestamp;
use crate::models::validation::ValidationError;
use crate::services::db::{DbConfig, StoreError};
use crate::AppState;

mod source;

pub use source::{About, LanguageSource, Personal, PortfolioSource};

const CANONICAL_PROJECTS: &str = include_str!("seed/projects.json");

/// Looked up in order when `PORTFOLIO_DATA_PATH` is not set.
pub const DEFAULT_SOURCES: [&str; 2] = [
    "frontend/data/portfolio-data.json",
    "data/portfolio-data.json",
];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("no portfolio data found (tried {tried})")]
    NoSource { tried: String },

    #[error("canonical project list is malformed: {0}")]
    Canonical(serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct SeedConfig {
    pub db: DbConfig,
    pub data_path: Option<PathBuf>,
}

impl SeedConfig {
    pub fn from_env() -> Result<Self, SeedError> {
        Ok(Self {
            db: DbConfig::from_env()?,
            data_path: env::var_os("PORTFOLIO_DATA_PATH").map(PathBuf::from),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub projects: usize,
    pub profiles: usize,
}

fn read_source(path: &Path) -> Result<PortfolioSource, SeedError> {
    let raw = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/**
 * an explicit path must load
 * otherwise the first default location that reads and parses wins
 */
pub fn load_source(explicit: Option<&Path>) -> Result<PortfolioSource, SeedError> {
    if let Some(path) = explicit {
        return read_source(path);
    }

    for candidate in DEFAULT_SOURCES {
        match read_source(Path::new(candidate)) {
            Ok(source) => {
                info!(path = candidate, "loaded portfolio data");
                return Ok(source);
            }
            Err(err) => warn!("{err}"),
        }
    }
    Err(SeedError::NoSource {
        tried: DEFAULT_SOURCES.join(", "),
    })
}

/// The project list shipped with the binary.
pub fn canonical_projects(now: DateTime<Utc>) -> Result<Vec<Project>, SeedError> {
    let bodies: Vec<NewProject> =
        serde_json::from_str(CANONICAL_PROJECTS).map_err(SeedError::Canonical)?;
    bodies
        .into_iter()
        .map(|body| -> Result<Project, SeedError> {
            let project = body.into_project(ObjectId::new(), now);
            project.validate()?;
            Ok(project)
        })
        .collect()
}

/**
 * replaces projects and the profile with the canonical content
 * blog posts are never touched, only their collection is created
 */
pub async fn seed(state: &AppState, source: &PortfolioSource) -> Result<SeedSummary, SeedError> {
    let now = timestamp::now();

    info!("Seeding projects...");
    let projects = canonical_projects(now)?;
    let cleared = state.projects.clear().await?;
    let inserted = state.projects.insert_many(&projects).await?;
    info!(cleared, inserted, "projects seeded");

    info!("Seeding profile...");
    let profile = source.to_profile(ObjectId::new(), now);
    profile.validate()?;
    state.profiles.clear().await?;
    state.profiles.save(&profile).await?;
    info!("profile seeded");

    state.posts.ensure_collection().await?;
    info!("blog collection ready");

    Ok(SeedSummary {
        projects: inserted,
        profiles: 1,
    })
}
