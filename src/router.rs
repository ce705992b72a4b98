//! Client-side routes of the navigation shell.

use std::fmt;
use std::str::FromStr;

use crate::errors::RouteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`, which always redirects to the batch list.
    Root,
    Batches,
    AddBatch,
    History,
}

impl Route {
    /// Entries listed in the sidebar, in display order.
    pub const SIDEBAR: [Route; 3] = [Route::Batches, Route::AddBatch, Route::History];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Batches => "/batches",
            Route::AddBatch => "/add-batch",
            Route::History => "/history",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Root | Route::Batches => "Batch Management",
            Route::AddBatch => "Add New Batch",
            Route::History => "Batch History",
        }
    }

    /// Follow redirects to the route that actually renders.
    pub fn resolve(self) -> Route {
        match self {
            Route::Root => Route::Batches,
            other => other,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let path = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/" => Ok(Route::Root),
            "/batches" => Ok(Route::Batches),
            "/add-batch" => Ok(Route::AddBatch),
            "/history" => Ok(Route::History),
            _ => Err(RouteError::UnknownPath(trimmed.to_string())),
        }
    }
}
