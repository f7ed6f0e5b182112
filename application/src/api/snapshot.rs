//! [`Snapshot`]-related definitions.

use std::sync::Arc;

use juniper::graphql_object;
use service::{domain, query, read, Query as _};

use crate::{api, AsError, Context, Error};

/// Point-in-time view of all the records of a single `Company`.
#[derive(Clone, Debug)]
pub struct Snapshot(Arc<read::Snapshot>);

impl From<Arc<read::Snapshot>> for Snapshot {
    fn from(snapshot: Arc<read::Snapshot>) -> Self {
        Self(snapshot)
    }
}

impl Snapshot {
    /// Takes a new [`read::Snapshot`] of the `Company` with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `COMPANY_NOT_EXISTS` - the `Company` doesn't exist.
    pub(crate) async fn take(
        company_id: domain::company::Id,
        ctx: &Context,
    ) -> Result<Arc<read::Snapshot>, Error> {
        ctx.service()
            .execute(query::Snapshot { company_id })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(Arc::new)
            .ok_or_else(|| api::query::CompanyError::NotExists.into())
            .map_err(ctx.error())
    }
}

/// Point-in-time view of all the records of a single `Company`.
#[graphql_object(context = Context)]
impl Snapshot {
    /// `Company` this `Snapshot` is taken of.
    pub fn company(&self) -> api::Company {
        self.0.company.clone().into()
    }

    /// `Employee`s registered in the `Company`, ordered by their full names.
    pub fn employees(&self) -> Vec<api::Employee> {
        self.0.employees.iter().cloned().map(Into::into).collect()
    }

    /// `Contract`s of the `Company`, the most recently started first.
    pub fn contracts(&self) -> Vec<api::Contract> {
        self.0.contracts.iter().cloned().map(Into::into).collect()
    }

    /// `Order`s issued by the `Company`, ordered by their numbers.
    pub fn orders(&self) -> Vec<api::OrderValue> {
        self.0.orders.iter().cloned().map(Into::into).collect()
    }

    /// Number a new `Order` of the `Company` is expected to have.
    pub fn next_order_number(&self) -> i32 {
        self.0.next_order_number().into()
    }
}
