//! [`Employee`]-related definitions.

use common::{Date, DateOf, DateTime};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A natural person registered in a `Company`.
#[derive(Clone, Debug)]
pub struct Employee {
    /// Underlying [`domain::Employee`].
    employee: domain::Employee,

    /// [`api::Contract`] this [`Employee`] currently works under.
    active_contract: OnceCell<Option<api::Contract>>,
}

impl From<domain::Employee> for Employee {
    fn from(employee: domain::Employee) -> Self {
        Self {
            employee,
            active_contract: OnceCell::new(),
        }
    }
}

/// A natural person registered in a `Company`.
///
/// Being registered doesn't mean being employed: employment is defined by an
/// active `Contract`.
#[graphql_object(context = Context)]
impl Employee {
    /// Unique identifier of this `Employee`.
    pub fn id(&self) -> Id {
        self.employee.id.into()
    }

    /// ID of the `Company` this `Employee` is registered in.
    pub fn company_id(&self) -> api::company::Id {
        self.employee.company_id.into()
    }

    /// `Company` this `Employee` is registered in.
    ///
    /// `null` if the `Company` was deleted.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.company",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn company(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Company>, Error> {
        ctx.service()
            .execute(query::company::ById::by(self.employee.company_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|c| c.map(Into::into))
    }

    /// Family name of this `Employee`.
    pub fn family_name(&self) -> Name {
        self.employee.family_name.clone().into()
    }

    /// First name of this `Employee`.
    pub fn first_name(&self) -> Name {
        self.employee.first_name.clone().into()
    }

    /// Patronymic of this `Employee`.
    pub fn patronymic(&self) -> Name {
        self.employee.patronymic.clone().into()
    }

    /// Full name of this `Employee` in the "family first patronymic" order.
    pub fn full_name(&self) -> String {
        self.employee.full_name()
    }

    /// Personal identification number (PINFL) of this `Employee`.
    pub fn personal_id(&self) -> PersonalId {
        self.employee.personal_id.clone().into()
    }

    /// Taxpayer identification number of this `Employee`.
    pub fn tin(&self) -> scalar::Tin {
        self.employee.tin.clone().into()
    }

    /// Passport details of this `Employee`.
    pub fn passport(&self) -> Passport {
        self.employee.passport.clone().into()
    }

    /// Postal address of this `Employee`.
    pub fn address(&self) -> Option<scalar::Address> {
        self.employee.address.clone().map(Into::into)
    }

    /// Phone number of this `Employee`.
    pub fn phone(&self) -> Option<scalar::Phone> {
        self.employee.phone.clone().map(Into::into)
    }

    /// Indicator whether this `Employee` has an active `Contract`.
    pub fn is_employed(&self) -> bool {
        self.employee.is_employed
    }

    /// `Contract` this `Employee` currently works under, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.activeContract",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn active_contract(
        &self,
        ctx: &Context,
    ) -> Result<&Option<api::Contract>, Error> {
        self.active_contract
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::contract::Active::by(self.employee.id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .map_ok(|c| c.map(Into::into))
            })
            .await
    }

    /// `DateTime` when this `Employee` was created.
    pub fn created_at(&self) -> DateTime {
        self.employee.created_at.coerce()
    }
}

/// Passport details of an [`Employee`].
#[derive(Clone, Debug, From)]
pub struct Passport(domain::employee::Passport);

/// Passport details of an `Employee`.
///
/// Every detail is optional, as it's usually filled in later.
#[graphql_object(name = "EmployeePassport", context = Context)]
impl Passport {
    /// Series of this `EmployeePassport`.
    pub fn series(&self) -> Option<PassportSeries> {
        self.0.series.clone().map(Into::into)
    }

    /// Number of this `EmployeePassport`.
    pub fn number(&self) -> Option<PassportNumber> {
        self.0.number.clone().map(Into::into)
    }

    /// Authority which issued this `EmployeePassport`.
    pub fn issued_by(&self) -> Option<PassportIssueAuthority> {
        self.0.issued_by.clone().map(Into::into)
    }

    /// `Date` when this `EmployeePassport` was issued.
    pub fn issued_on(&self) -> Option<Date> {
        self.0.issued_on.map(DateOf::coerce)
    }
}

/// Passport details of a new `Employee`.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "EmployeePassportInput")]
pub struct PassportInput {
    /// Series of the passport.
    pub series: Option<PassportSeries>,

    /// Number of the passport.
    pub number: Option<PassportNumber>,

    /// Authority which issued the passport.
    pub issued_by: Option<PassportIssueAuthority>,

    /// `Date` when the passport was issued.
    pub issued_on: Option<Date>,
}

impl From<PassportInput> for domain::employee::Passport {
    fn from(input: PassportInput) -> Self {
        let PassportInput {
            series,
            number,
            issued_by,
            issued_on,
        } = input;
        Self {
            series: series.map(Into::into),
            number: number.map(Into::into),
            issued_by: issued_by.map(Into::into),
            issued_on: issued_on.map(DateOf::coerce),
        }
    }
}

/// Unique identifier of an `Employee`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::employee::Id)]
#[into(domain::employee::Id)]
#[graphql(name = "EmployeeId", transparent)]
pub struct Id(Uuid);

/// Part of an `Employee`'s full name.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "EmployeeName",
    with = scalar::Via::<domain::employee::Name>,
)]
pub struct Name(domain::employee::Name);

/// Fourteen-digit personal identification number (PINFL) of an `Employee`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::employee::PersonalId>)]
pub struct PersonalId(domain::employee::PersonalId);

/// Series of a passport: two latin letters.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::employee::PassportSeries>)]
pub struct PassportSeries(domain::employee::PassportSeries);

/// Seven-digit number of a passport.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::employee::PassportNumber>)]
pub struct PassportNumber(domain::employee::PassportNumber);

/// Authority which issued a passport.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::employee::IssueAuthority>)]
pub struct PassportIssueAuthority(domain::employee::IssueAuthority);
