//! [`Query`] collection related to the multiple [`Contract`]s.

use common::operations::By;

use crate::domain::{company, Contract};
#[cfg(doc)]
use crate::{domain::Company, Query};

use super::DatabaseQuery;

/// Queries all the [`Contract`]s of a [`Company`], the most recently
/// started first.
pub type List = DatabaseQuery<By<Vec<Contract>, company::Id>>;
