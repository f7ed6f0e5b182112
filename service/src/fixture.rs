//! Records commonly used in tests.

use common::{operations::Insert, Date, DateTime};

use crate::{
    domain::{
        company, contract, employee, Address, Company, Contract, Employee,
        Phone, Tin,
    },
    infra::{Database as _, Memory},
};

/// Returns the [`Date`] out of the provided calendar components.
pub(crate) fn date<Of: ?Sized>(y: i32, m: u8, d: u8) -> common::DateOf<Of> {
    Date::from_ymd(y, m, d).expect("valid date").coerce()
}

/// Returns a current [`Company`] registered on 2024-01-01.
pub(crate) fn company() -> Company {
    Company {
        id: company::Id::new(),
        name: company::Name::new("Horizon LLC").unwrap(),
        address: Address::new("Tashkent, Amir Temur 1").unwrap(),
        phone: Phone::new("+998712000000").unwrap(),
        tin: Tin::new("301234567").unwrap(),
        bank_account: company::BankAccount::new("20208000900100001010")
            .unwrap(),
        bank_name: company::BankName::new("Agrobank").unwrap(),
        bank_code: company::BankCode::new("00440").unwrap(),
        activity_code: company::ActivityCode::new("62010").unwrap(),
        manager: company::ManagerName::new("Karimov Anvar").unwrap(),
        registered_on: date(2024, 1, 1),
        is_current: true,
        created_at: DateTime::now().coerce(),
        deleted_at: None,
    }
}

/// Returns an employed [`Employee`] of the provided [`Company`].
pub(crate) fn employee(company: &Company) -> Employee {
    Employee {
        id: employee::Id::new(),
        company_id: company.id,
        family_name: employee::Name::new("Ablakulov").unwrap(),
        first_name: employee::Name::new("Otabek").unwrap(),
        patronymic: employee::Name::new("Davronovich").unwrap(),
        personal_id: employee::PersonalId::new("40608840220079").unwrap(),
        tin: Tin::new("999999999").unwrap(),
        passport: employee::Passport::default(),
        address: None,
        phone: None,
        is_employed: true,
        created_at: DateTime::now().coerce(),
    }
}

/// Returns an active [`Contract`] of the provided [`Employee`] started on
/// 2024-02-01.
pub(crate) fn contract(employee: &Employee) -> Contract {
    Contract {
        id: contract::Id::new(),
        employee_id: employee.id,
        company_id: employee.company_id,
        hired_on: date(2024, 2, 1),
        dismissed_on: None,
        created_at: DateTime::now().coerce(),
    }
}

/// Returns a [`Memory`] database with a [`company()`], its [`employee()`] and
/// their [`contract()`] stored.
pub(crate) async fn seeded() -> (Memory, Company, Employee, Contract) {
    let db = Memory::new();
    let company = company();
    let employee = employee(&company);
    let contract = contract(&employee);

    db.execute(Insert(company.clone())).await.unwrap();
    db.execute(Insert(employee.clone())).await.unwrap();
    db.execute(Insert(contract.clone())).await.unwrap();

    (db, company, employee, contract)
}

