//! [`Company`] definitions.

use common::{unit, DateOf, DateTimeOf};
#[cfg(doc)]
use common::{Date, DateTime};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{define_digits, define_text, Address, Phone, Tin};

/// Company whose personnel records are kept.
#[derive(Clone, Debug)]
pub struct Company {
    /// ID of this [`Company`].
    pub id: Id,

    /// [`Name`] of this [`Company`].
    pub name: Name,

    /// [`Address`] of this [`Company`].
    pub address: Address,

    /// [`Phone`] of this [`Company`].
    pub phone: Phone,

    /// [`Tin`] of this [`Company`].
    pub tin: Tin,

    /// [`BankAccount`] of this [`Company`].
    pub bank_account: BankAccount,

    /// [`BankName`] of the bank serving this [`Company`].
    pub bank_name: BankName,

    /// [`BankCode`] of the bank serving this [`Company`].
    pub bank_code: BankCode,

    /// [`ActivityCode`] of this [`Company`].
    pub activity_code: ActivityCode,

    /// [`ManagerName`] of this [`Company`].
    pub manager: ManagerName,

    /// [`Date`] when this [`Company`] was registered.
    ///
    /// No document of this [`Company`] may be dated earlier.
    pub registered_on: RegistrationDate,

    /// Indicator whether this [`Company`] is the one currently worked with.
    pub is_current: bool,

    /// [`DateTime`] when this [`Company`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Company`] was deleted.
    pub deleted_at: Option<DeletionDateTime>,
}

impl Company {
    /// Checks whether a document dated by the provided [`Date`] may belong to
    /// this [`Company`].
    #[must_use]
    pub fn admits<Of: ?Sized>(&self, date: DateOf<Of>) -> bool {
        date.coerce() >= self.registered_on
    }
}

/// ID of a [`Company`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_text! {
    #[doc = "Name of a [`Company`]."]
    Name(max = 256)
}

define_text! {
    #[doc = "Name of a bank serving a [`Company`]."]
    BankName(max = 256)
}

define_text! {
    #[doc = "Full name of a [`Company`] manager."]
    ManagerName(max = 256)
}

define_digits! {
    #[doc = "Settlement bank account number of a [`Company`]."]
    BankAccount(len = 20)
}

define_digits! {
    #[doc = "Code of a bank serving a [`Company`] (MFO)."]
    BankCode(len = 5)
}

define_digits! {
    #[doc = "Code of the economic activity of a [`Company`] (OKED)."]
    ActivityCode(len = 5)
}

/// [`Date`] when a [`Company`] was registered.
pub type RegistrationDate = DateOf<(Company, unit::Registration)>;

/// [`DateTime`] when a [`Company`] was created.
pub type CreationDateTime = DateTimeOf<(Company, unit::Creation)>;

/// [`DateTime`] when a [`Company`] was deleted.
pub type DeletionDateTime = DateTimeOf<(Company, unit::Deletion)>;

#[cfg(test)]
mod spec {
    use common::{Date, DateTime};

    use super::{
        ActivityCode, Address, BankAccount, BankCode, BankName, Company, Id,
        ManagerName, Name, Phone, Tin,
    };

    #[test]
    fn admits_documents_since_registration() {
        let company = Company {
            id: Id::new(),
            name: Name::new("Horizon").unwrap(),
            address: Address::new("Tashkent").unwrap(),
            phone: Phone::new("+998712000000").unwrap(),
            tin: Tin::new("123456789").unwrap(),
            bank_account: BankAccount::new("20208000900100001010").unwrap(),
            bank_name: BankName::new("Agrobank").unwrap(),
            bank_code: BankCode::new("00440").unwrap(),
            activity_code: ActivityCode::new("62010").unwrap(),
            manager: ManagerName::new("Karimov Anvar").unwrap(),
            registered_on: Date::from_ymd(2024, 1, 1).unwrap().coerce(),
            is_current: true,
            created_at: DateTime::now().coerce(),
            deleted_at: None,
        };

        assert!(!company.admits(Date::from_ymd(2023, 12, 31).unwrap()));
        assert!(company.admits(Date::from_ymd(2024, 1, 1).unwrap()));
        assert!(company.admits(Date::from_ymd(2024, 6, 15).unwrap()));
    }

    #[test]
    fn bank_details() {
        assert!(BankAccount::new("20208000900100001010").is_some());
        assert!(BankAccount::new("2020800090010000101").is_none());
        assert!(BankCode::new("00440").is_some());
        assert!(BankCode::new("0044").is_none());
        assert!(ActivityCode::new("6201a").is_none());
    }
}
