//! [`Query`] collection related to the multiple [`Company`]s.

use common::operations::By;

use crate::domain::Company;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the non-deleted [`Company`]s ordered by their names.
pub type List = DatabaseQuery<By<Vec<Company>, ()>>;
