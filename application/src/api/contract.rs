//! [`Contract`]-related definitions.

use common::{Date, DateOf, DateTime};
use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, read, Query as _};
use uuid::Uuid;

use crate::{api, AsError, Context, Error};

/// An employment [`domain::Contract`].
#[derive(Clone, Debug, From)]
pub struct Contract(domain::Contract);

impl From<read::contract::Active<domain::Contract>> for Contract {
    fn from(
        read::contract::Active(c): read::contract::Active<domain::Contract>,
    ) -> Self {
        c.into()
    }
}

/// Employment contract between a `Company` and an `Employee`.
#[graphql_object(context = Context)]
impl Contract {
    /// Unique identifier of this `Contract`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// ID of the employed `Employee`.
    pub fn employee_id(&self) -> api::employee::Id {
        self.0.employee_id.into()
    }

    /// Employed `Employee`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Contract.employee",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn employee(
        &self,
        ctx: &Context,
    ) -> Result<api::Employee, Error> {
        ctx.service()
            .execute(query::employee::ById::by(self.0.employee_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::query::EmployeeError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// ID of the employing `Company`.
    pub fn company_id(&self) -> api::company::Id {
        self.0.company_id.into()
    }

    /// `Date` when the `Employee` was hired.
    pub fn hired_on(&self) -> Date {
        self.0.hired_on.coerce()
    }

    /// `Date` when the `Employee` was dismissed.
    ///
    /// `null` while this `Contract` is active.
    pub fn dismissed_on(&self) -> Option<Date> {
        self.0.dismissed_on.map(DateOf::coerce)
    }

    /// Indicator whether this `Contract` is active.
    pub fn is_active(&self) -> bool {
        self.0.is_active()
    }

    /// `DateTime` when this `Contract` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Contract`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::contract::Id)]
#[into(domain::contract::Id)]
#[graphql(name = "ContractId", transparent)]
pub struct Id(Uuid);
