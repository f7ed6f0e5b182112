//! [`Company`]-related definitions.

use common::{Date, DateTime};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api::scalar, Context};

/// A [`domain::Company`] whose personnel records are kept.
#[derive(Clone, Debug, From)]
pub struct Company(domain::Company);

/// A company whose personnel records are kept.
#[graphql_object(context = Context)]
impl Company {
    /// Unique identifier of this `Company`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `Company`.
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Postal address of this `Company`.
    pub fn address(&self) -> scalar::Address {
        self.0.address.clone().into()
    }

    /// Phone number of this `Company`.
    pub fn phone(&self) -> scalar::Phone {
        self.0.phone.clone().into()
    }

    /// Taxpayer identification number of this `Company`.
    pub fn tin(&self) -> scalar::Tin {
        self.0.tin.clone().into()
    }

    /// Settlement bank account of this `Company`.
    pub fn bank_account(&self) -> BankAccount {
        self.0.bank_account.clone().into()
    }

    /// Name of the bank serving this `Company`.
    pub fn bank_name(&self) -> BankName {
        self.0.bank_name.clone().into()
    }

    /// Code of the bank serving this `Company`.
    pub fn bank_code(&self) -> BankCode {
        self.0.bank_code.clone().into()
    }

    /// Code of the economic activity of this `Company`.
    pub fn activity_code(&self) -> ActivityCode {
        self.0.activity_code.clone().into()
    }

    /// Full name of this `Company` manager.
    pub fn manager(&self) -> ManagerName {
        self.0.manager.clone().into()
    }

    /// `Date` when this `Company` was registered.
    ///
    /// No `Order` of this `Company` may be dated earlier.
    pub fn registered_on(&self) -> Date {
        self.0.registered_on.coerce()
    }

    /// Indicator whether this `Company` is the one currently worked with.
    pub fn is_current(&self) -> bool {
        self.0.is_current
    }

    /// `DateTime` when this `Company` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Company`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::company::Id)]
#[into(domain::company::Id)]
#[graphql(name = "CompanyId", transparent)]
pub struct Id(Uuid);

/// Name of a `Company`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CompanyName",
    with = scalar::Via::<domain::company::Name>,
)]
pub struct Name(domain::company::Name);

/// Twenty-digit settlement bank account of a `Company`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::company::BankAccount>)]
pub struct BankAccount(domain::company::BankAccount);

/// Name of a bank serving a `Company`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::company::BankName>)]
pub struct BankName(domain::company::BankName);

/// Five-digit code (MFO) of a bank serving a `Company`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::company::BankCode>)]
pub struct BankCode(domain::company::BankCode);

/// Five-digit code (OKED) of the economic activity of a `Company`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::company::ActivityCode>)]
pub struct ActivityCode(domain::company::ActivityCode);

/// Full name of a `Company` manager.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::company::ManagerName>)]
pub struct ManagerName(domain::company::ManagerName);
