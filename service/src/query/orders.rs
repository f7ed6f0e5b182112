//! [`Query`] collection related to the multiple [`Order`]s.

use common::operations::By;

use crate::{
    domain::{company, Order},
    read,
};
#[cfg(doc)]
use crate::{domain::Company, Query};

use super::DatabaseQuery;

/// Queries all the [`Order`]s issued by a [`Company`] ordered by their
/// numbers.
pub type List = DatabaseQuery<By<Vec<Order>, company::Id>>;

/// Queries total count of [`Order`]s issued by a [`Company`].
pub type Count =
    DatabaseQuery<By<read::order::list::TotalCount, company::Id>>;
