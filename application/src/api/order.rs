//! [`Order`]-related definitions.

use common::{Date, DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLInterface, GraphQLScalar};
use service::{domain, query, Query as _};
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// Personnel order of a `Company` regarding one of its `Employee`s.
#[derive(Clone, Debug, GraphQLInterface)]
#[graphql(context = Context, for = [Hiring, Dismissal])]
pub struct Order {
    /// Unique identifier of the `Order`.
    id: Id,

    /// Number of the `Order` among the ones of the same `Company`.
    number: i32,

    /// `Date` when the `Order` was issued.
    date: Date,

    /// ID of the `Employee` the `Order` regards.
    employee_id: api::employee::Id,

    /// ID of the `Contract` the `Order` regards.
    contract_id: api::contract::Id,

    /// ID of the `Company` issued the `Order`.
    company_id: api::company::Id,

    /// `DateTime` when the `Order` was created.
    created_at: DateTime,
}

impl From<domain::Order> for OrderValue {
    fn from(order: domain::Order) -> Self {
        match order {
            domain::Order::Hiring(o) => Self::Hiring(o.into()),
            domain::Order::Dismissal(o) => Self::Dismissal(o.into()),
        }
    }
}

/// Loads the [`api::Employee`] with the provided ID.
async fn load_employee(
    id: domain::employee::Id,
    ctx: &Context,
) -> Result<api::Employee, Error> {
    ctx.service()
        .execute(query::employee::ById::by(id))
        .await
        .map_err(AsError::into_error)
        .map_err(ctx.error())?
        .ok_or_else(|| api::query::EmployeeError::NotExists.into())
        .map_err(ctx.error())
        .map(Into::into)
}

/// Loads the [`api::Contract`] with the provided ID.
async fn load_contract(
    id: domain::contract::Id,
    ctx: &Context,
) -> Result<api::Contract, Error> {
    ctx.service()
        .execute(query::contract::ById::by(id))
        .await
        .map_err(AsError::into_error)
        .map_err(ctx.error())?
        .ok_or_else(|| api::query::ContractError::NotExists.into())
        .map_err(ctx.error())
        .map(Into::into)
}

/// Hiring [`Order`] opening a [`api::Contract`].
#[derive(Clone, Debug, From)]
pub struct Hiring(domain::order::Hiring);

/// Hiring `Order` opening a `Contract` with an `Employee`.
#[graphql_object(name = "HiringOrder", context = Context, impl = OrderValue)]
impl Hiring {
    /// Unique identifier of this `Order`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Number of this `Order` among the ones of the same `Company`.
    pub fn number(&self) -> i32 {
        self.0.number.into()
    }

    /// `Date` when this `Order` was issued.
    pub fn date(&self) -> Date {
        self.0.date.coerce()
    }

    /// ID of the hired `Employee`.
    pub fn employee_id(&self) -> api::employee::Id {
        self.0.employee_id.into()
    }

    /// Hired `Employee`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "HiringOrder.employee",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn employee(
        &self,
        ctx: &Context,
    ) -> Result<api::Employee, Error> {
        load_employee(self.0.employee_id, ctx).await
    }

    /// ID of the `Contract` opened by this `Order`.
    pub fn contract_id(&self) -> api::contract::Id {
        self.0.contract_id.into()
    }

    /// `Contract` opened by this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "HiringOrder.contract",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn contract(
        &self,
        ctx: &Context,
    ) -> Result<api::Contract, Error> {
        load_contract(self.0.contract_id, ctx).await
    }

    /// ID of the hiring `Company`.
    pub fn company_id(&self) -> api::company::Id {
        self.0.company_id.into()
    }

    /// `Date` when the `Employee` is hired.
    pub fn hired_on(&self) -> Date {
        self.0.hired_on.coerce()
    }

    /// Position the `Employee` is hired for.
    pub fn position(&self) -> Position {
        self.0.position.clone().into()
    }

    /// Monthly salary of the hired `Employee`.
    pub fn salary(&self) -> Money {
        self.0.salary
    }

    /// `DateTime` when this `Order` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Dismissal [`Order`] closing a [`api::Contract`].
#[derive(Clone, Debug, From)]
pub struct Dismissal(domain::order::Dismissal);

/// Dismissal `Order` closing a `Contract` with an `Employee`.
#[graphql_object(
    name = "DismissalOrder",
    context = Context,
    impl = OrderValue,
)]
impl Dismissal {
    /// Unique identifier of this `Order`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Number of this `Order` among the ones of the same `Company`.
    pub fn number(&self) -> i32 {
        self.0.number.into()
    }

    /// `Date` when this `Order` was issued.
    pub fn date(&self) -> Date {
        self.0.date.coerce()
    }

    /// ID of the dismissed `Employee`.
    pub fn employee_id(&self) -> api::employee::Id {
        self.0.employee_id.into()
    }

    /// Dismissed `Employee`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "DismissalOrder.employee",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn employee(
        &self,
        ctx: &Context,
    ) -> Result<api::Employee, Error> {
        load_employee(self.0.employee_id, ctx).await
    }

    /// ID of the `Contract` closed by this `Order`.
    pub fn contract_id(&self) -> api::contract::Id {
        self.0.contract_id.into()
    }

    /// `Contract` closed by this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "DismissalOrder.contract",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn contract(
        &self,
        ctx: &Context,
    ) -> Result<api::Contract, Error> {
        load_contract(self.0.contract_id, ctx).await
    }

    /// ID of the dismissing `Company`.
    pub fn company_id(&self) -> api::company::Id {
        self.0.company_id.into()
    }

    /// `Date` when the `Employee` is dismissed.
    pub fn dismissed_on(&self) -> Date {
        self.0.dismissed_on.coerce()
    }

    /// Grounds of the dismissal.
    pub fn grounds(&self) -> Grounds {
        self.0.grounds.clone().into()
    }

    /// Days of unused vacation to be compensated.
    pub fn compensation_days(&self) -> i32 {
        self.0.compensation_days.into()
    }

    /// Average monthly salary of the dismissed `Employee`.
    pub fn average_salary(&self) -> Money {
        self.0.average_salary
    }

    /// `averageSalary` with thousands separated by spaces, e.g.
    /// `1 500 000`.
    pub fn average_salary_grouped(&self) -> String {
        self.0.average_salary.grouped().to_string()
    }

    /// `DateTime` when this `Order` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of an `Order`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::order::Id)]
#[into(domain::order::Id)]
#[graphql(name = "OrderId", transparent)]
pub struct Id(Uuid);

/// Position an `Employee` is hired for.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::order::hiring::Position>)]
pub struct Position(domain::order::hiring::Position);

/// Grounds of an `Employee` dismissal.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "DismissalGrounds",
    with = scalar::Via::<domain::order::dismissal::Grounds>,
)]
pub struct Grounds(domain::order::dismissal::Grounds);
