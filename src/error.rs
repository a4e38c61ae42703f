//! Error types shared by every table.
//!
//! None of these are fatal. They describe a request the matrix refused, and
//! the table that refused it is guaranteed to be exactly as it was before the
//! call. Callers surface them to the user rather than retrying.

use thiserror::Error;

use crate::{route::RouteId, MAX_ROUTES};

/// Why a routing request was refused.
///
/// `Copy` so it can ride inside queue events on the control thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("unknown modulation source")]
    UnknownSource,

    #[error("unknown modulation destination")]
    UnknownDestination,

    #[error("no route with id {0}")]
    UnknownRoute(RouteId),

    #[error("no template with that name")]
    UnknownTemplate,

    #[error("source is already routed to this destination")]
    DuplicateRoute,

    #[error("routing table full ({MAX_ROUTES} routes), remove a connection first")]
    CapacityExceeded,
}

/// Problems building a source or destination catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has {len} entries, limit is {limit}")]
    TooManyEntries { limit: usize, len: usize },

    #[error("catalog name {0:?} appears more than once")]
    DuplicateName(String),

    #[error("catalog names must not be empty")]
    EmptyName,
}

/// Validate a name list against a size limit. Names compare ASCII
/// case-insensitively, matching how lookups work.
pub(crate) fn check_catalog(names: &[&str], limit: usize) -> Result<(), CatalogError> {
    if names.len() > limit {
        return Err(CatalogError::TooManyEntries {
            limit,
            len: names.len(),
        });
    }

    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if names[..i].iter().any(|other| other.eq_ignore_ascii_case(name)) {
            return Err(CatalogError::DuplicateName((*name).to_string()));
        }
    }

    Ok(())
}
