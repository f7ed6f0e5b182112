//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, read, workflow::dismissal::Workflow, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns all the `Company`s, ordered by their names.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "companies",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn companies(ctx: &Context) -> Result<Vec<api::Company>, Error> {
        ctx.service()
            .execute(query::companies::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|cs| cs.into_iter().map(Into::into).collect())
    }

    /// Returns the `Company` currently worked with, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "currentCompany",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn current_company(
        ctx: &Context,
    ) -> Result<Option<api::Company>, Error> {
        ctx.service()
            .execute(query::company::Current::by(read::company::Current))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|c| c.map(Into::into))
    }

    /// Returns the `Company` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `COMPANY_NOT_EXISTS` - the `Company` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "company",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn company(
        id: api::company::Id,
        ctx: &Context,
    ) -> Result<api::Company, Error> {
        ctx.service()
            .execute(query::company::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| CompanyError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Employee`s registered in the specified `Company`, ordered
    /// by their full names.
    ///
    /// `onlyEmployed` leaves the ones having an active `Contract` only, and
    /// `name` leaves the ones whose full name contains it.
    #[tracing::instrument(
        skip_all,
        fields(
            company_id = %company_id,
            gql.name = "employees",
            name = ?name,
            only_employed = ?only_employed,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn employees(
        company_id: api::company::Id,
        only_employed: Option<bool>,
        name: Option<String>,
        ctx: &Context,
    ) -> Result<Vec<api::Employee>, Error> {
        ctx.service()
            .execute(query::employees::List::by(
                read::employee::list::Selector {
                    company_id: company_id.into(),
                    filter: read::employee::list::Filter {
                        only_employed: only_employed.unwrap_or_default(),
                        name: name.filter(|n| !n.trim().is_empty()),
                    },
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|es| es.into_iter().map(Into::into).collect())
    }

    /// Returns the `Employee` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EMPLOYEE_NOT_EXISTS` - the `Employee` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "employee",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn employee(
        id: api::employee::Id,
        ctx: &Context,
    ) -> Result<api::Employee, Error> {
        ctx.service()
            .execute(query::employee::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| EmployeeError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Contract` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CONTRACT_NOT_EXISTS` - the `Contract` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "contract",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn contract(
        id: api::contract::Id,
        ctx: &Context,
    ) -> Result<api::Contract, Error> {
        ctx.service()
            .execute(query::contract::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ContractError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Contract`s of the specified `Company`, the most recently
    /// started first.
    #[tracing::instrument(
        skip_all,
        fields(
            company_id = %company_id,
            gql.name = "contracts",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn contracts(
        company_id: api::company::Id,
        ctx: &Context,
    ) -> Result<Vec<api::Contract>, Error> {
        ctx.service()
            .execute(query::contracts::List::by(company_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|cs| cs.into_iter().map(Into::into).collect())
    }

    /// Returns the `Order` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ORDER_NOT_EXISTS` - the `Order` with the specified ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "order",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn order(
        id: api::order::Id,
        ctx: &Context,
    ) -> Result<api::OrderValue, Error> {
        ctx.service()
            .execute(query::order::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| OrderError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Order`s issued by the specified `Company`, ordered by
    /// their numbers.
    #[tracing::instrument(
        skip_all,
        fields(
            company_id = %company_id,
            gql.name = "orders",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn orders(
        company_id: api::company::Id,
        ctx: &Context,
    ) -> Result<Vec<api::OrderValue>, Error> {
        ctx.service()
            .execute(query::orders::List::by(company_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|os| os.into_iter().map(Into::into).collect())
    }

    /// Returns the total count of `Order`s issued by the specified `Company`.
    #[tracing::instrument(
        skip_all,
        fields(
            company_id = %company_id,
            gql.name = "ordersCount",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn orders_count(
        company_id: api::company::Id,
        ctx: &Context,
    ) -> Result<i32, Error> {
        ctx.service()
            .execute(query::orders::Count::by(company_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Takes a point-in-time `Snapshot` of all the records of the specified
    /// `Company`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `COMPANY_NOT_EXISTS` - the `Company` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            company_id = %company_id,
            gql.name = "snapshot",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn snapshot(
        company_id: api::company::Id,
        ctx: &Context,
    ) -> Result<api::Snapshot, Error> {
        api::Snapshot::take(company_id.into(), ctx)
            .await
            .map(Into::into)
    }

    /// Opens a dismissal `Order` form for the specified `Company`.
    ///
    /// Without an `orderId` the form is prefilled with the configured
    /// defaults for a new `Order`. Otherwise, it's prefilled with the values
    /// of the existing dismissal `Order`.
    ///
    /// Nothing is stored until the form is submitted via
    /// `createDismissalOrder` or `editDismissalOrder` mutation.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `COMPANY_NOT_EXISTS` - the `Company` with the specified ID does not
    ///                          exist;
    /// - `DISMISSAL_ORDER_NOT_EXISTS` - the dismissal `Order` with the
    ///                                  specified ID does not exist in the
    ///                                  `Company`;
    /// - `EMPLOYEE_NOT_EXISTS` - the `Employee` of the dismissal `Order`
    ///                           does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            company_id = %company_id,
            gql.name = "dismissalOrderForm",
            order_id = ?order_id.map(|id| id.to_string()),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn dismissal_order_form(
        company_id: api::company::Id,
        order_id: Option<api::order::Id>,
        ctx: &Context,
    ) -> Result<api::dismissal::Form, Error> {
        let snapshot = api::Snapshot::take(company_id.into(), ctx).await?;

        let workflow = match order_id {
            None => Workflow::create(
                snapshot,
                &ctx.service().config().dismissal,
                ctx.today(),
            ),
            Some(id) => Workflow::edit(snapshot, id.into())
                .map_err(AsError::into_error)
                .map_err(ctx.error())?,
        };

        Ok(workflow.into())
    }
}

define_error! {
    enum CompanyError {
        #[code = "COMPANY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Company` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum EmployeeError {
        #[code = "EMPLOYEE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Employee` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum ContractError {
        #[code = "CONTRACT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Contract` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum OrderError {
        #[code = "ORDER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Order` with the specified ID does not exist"]
        NotExists,
    }
}
