//! [`Query`] collection related to a single [`Contract`].

use common::operations::By;

use crate::{
    domain::{contract, employee, Contract},
    read,
};
#[cfg(doc)]
use crate::{domain::Employee, Query};

use super::DatabaseQuery;

/// Queries a [`Contract`] by its [`contract::Id`].
pub type ById = DatabaseQuery<By<Option<Contract>, contract::Id>>;

/// Queries an active [`Contract`] by ID of the employed [`Employee`].
pub type Active = DatabaseQuery<
    By<Option<read::contract::Active<Contract>>, employee::Id>,
>;
