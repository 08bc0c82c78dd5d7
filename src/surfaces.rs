use std::fmt;
use std::str::FromStr;

use axum::http::HeaderValue;
use axum::Router;

use crate::AppState;

pub mod embedded;
pub mod params;
pub mod payload;
pub mod standalone;

/// Which HTTP adapter fronts the shared operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Surface {
    /// Express-style server: eager connection, CORS origin, security headers.
    #[default]
    Standalone,
    /// File-route handlers that connect on first use.
    Embedded,
}

impl FromStr for Surface {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "standalone" => Ok(Surface::Standalone),
            "embedded" => Ok(Surface::Embedded),
            other => Err(format!("unknown surface: {other}")),
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Standalone => f.write_str("standalone"),
            Surface::Embedded => f.write_str("embedded"),
        }
    }
}

pub fn router(surface: Surface, state: AppState, cors_origin: HeaderValue) -> Router {
    match surface {
        Surface::Standalone => standalone::router(state, cors_origin),
        Surface::Embedded => embedded::router(state),
    }
}
