//! [`Order`] of hiring.

use common::Money;

use crate::domain::{company, contract, define_text, employee};
#[cfg(doc)]
use crate::domain::{Contract, Employee, Order};

use super::{CreationDateTime, Id, IssueDate, Number};

/// Hiring [`Order`] opening a [`Contract`] with an [`Employee`].
#[derive(Clone, Debug)]
pub struct Hiring {
    /// ID of this [`Order`].
    pub id: Id,

    /// [`Number`] of this [`Order`].
    pub number: Number,

    /// Date when this [`Order`] was issued.
    pub date: IssueDate,

    /// ID of the hired [`Employee`].
    pub employee_id: employee::Id,

    /// ID of the [`Contract`] opened by this [`Order`].
    pub contract_id: contract::Id,

    /// ID of the hiring [`company::Company`].
    pub company_id: company::Id,

    /// Date when the [`Employee`] is hired.
    pub hired_on: contract::HiringDate,

    /// [`Position`] the [`Employee`] is hired for.
    pub position: Position,

    /// Monthly salary of the hired [`Employee`].
    pub salary: Money,

    /// [`DateTime`] when this [`Order`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,
}

define_text! {
    #[doc = "Position an [`Employee`] is hired for."]
    Position(max = 256)
}
