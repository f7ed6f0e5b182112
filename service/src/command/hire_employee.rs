//! [`Command`] for hiring an [`Employee`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted, Update},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        company, contract, employee, order, Company, Contract, Employee, Order,
    },
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for hiring an [`Employee`].
///
/// Opens a new [`Contract`] with the [`Employee`] and records the
/// [`order::Hiring`] atomically.
#[derive(Clone, Debug)]
pub struct HireEmployee {
    /// ID of the [`Employee`] to be hired.
    pub employee_id: employee::Id,

    /// [`order::Number`] of a new [`Order`].
    pub number: order::Number,

    /// Date when a new [`Order`] is issued.
    pub date: order::IssueDate,

    /// Date when the [`Employee`] starts working.
    pub hired_on: contract::HiringDate,

    /// Position the [`Employee`] is hired for.
    pub position: order::hiring::Position,

    /// Monthly salary of the [`Employee`].
    pub salary: Money,
}

impl<Db> Command<HireEmployee> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Employee, employee::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Employee>, employee::Id>>,
            Ok = Option<Employee>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Company>, company::Id>>,
            Ok = Option<Company>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<read::contract::Active<Contract>>, employee::Id>>,
            Ok = Option<read::contract::Active<Contract>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Contract>, Err = Traced<database::Error>>
        + Database<Update<Employee>, Err = Traced<database::Error>>
        + Database<Insert<Order>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: HireEmployee) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let HireEmployee {
            employee_id,
            number,
            date,
            hired_on,
            position,
            salary,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::new(employee_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut employee = tx
            .execute(Select(By::<Option<Employee>, _>::new(employee_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::EmployeeNotExists(employee_id))
            .map_err(tracerr::wrap!())?;

        let company = tx
            .execute(Select(By::<Option<Company>, _>::new(
                employee.company_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CompanyNotExists(employee.company_id))
            .map_err(tracerr::wrap!())?;
        if !company.admits(date) {
            return Err(tracerr::new!(E::OrderDateBeforeRegistration(date)));
        }
        if !company.admits(hired_on) {
            return Err(tracerr::new!(E::HiringDateBeforeRegistration(
                hired_on
            )));
        }

        if let Some(read::contract::Active(c)) = tx
            .execute(Select(By::<
                Option<read::contract::Active<Contract>>,
                _,
            >::new(employee_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
        {
            return Err(tracerr::new!(E::EmployeeAlreadyEmployed(c.id)));
        }

        let now = DateTime::now();
        let contract = Contract {
            id: contract::Id::new(),
            employee_id,
            company_id: company.id,
            hired_on,
            dismissed_on: None,
            created_at: now.coerce(),
        };
        employee.is_employed = true;
        let order = Order::from(order::Hiring {
            id: order::Id::new(),
            number,
            date,
            employee_id,
            contract_id: contract.id,
            company_id: company.id,
            hired_on,
            position,
            salary,
            created_at: now.coerce(),
        });

        tx.execute(Insert(contract))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Update(employee))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Insert(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tracing::info!(
            order.id = %order.id(),
            employee.id = %employee_id,
            "`Employee` hired",
        );

        Ok(order)
    }
}

/// Error of [`HireEmployee`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Company`] of the [`Employee`] does not exist.
    #[display("`Company(id: {_0})` does not exist")]
    CompanyNotExists(#[error(not(source))] company::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Employee`] already has an active [`Contract`].
    #[display("`Employee` already works under `Contract(id: {_0})`")]
    EmployeeAlreadyEmployed(#[error(not(source))] contract::Id),

    /// [`Employee`] with the provided ID does not exist.
    #[display("`Employee(id: {_0})` does not exist")]
    EmployeeNotExists(#[error(not(source))] employee::Id),

    /// Hiring date precedes the [`Company`] registration.
    #[display("Hiring date `{_0}` precedes `Company` registration")]
    HiringDateBeforeRegistration(#[error(not(source))] contract::HiringDate),

    /// [`Order`] date precedes the [`Company`] registration.
    #[display("`Order` date `{_0}` precedes `Company` registration")]
    OrderDateBeforeRegistration(#[error(not(source))] order::IssueDate),
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Insert, Select},
        Money,
    };

    use crate::{
        domain::{order, Contract, Employee, Order},
        fixture::{self, date},
        infra::{Database as _, Memory},
        read, Command as _, Config, Service,
    };

    use super::{ExecutionError, HireEmployee};

    fn command(employee: &Employee) -> HireEmployee {
        HireEmployee {
            employee_id: employee.id,
            number: order::Number::new(1).unwrap(),
            date: date(2024, 3, 1),
            hired_on: date(2024, 3, 4),
            position: order::hiring::Position::new("Accountant").unwrap(),
            salary: Money::from(3_000_000),
        }
    }

    #[tokio::test]
    async fn opens_contract() {
        let db = Memory::new();
        let company = fixture::company();
        let mut employee = fixture::employee(&company);
        employee.is_employed = false;
        db.execute(Insert(company.clone())).await.unwrap();
        db.execute(Insert(employee.clone())).await.unwrap();
        let service = Service::new(Config::default(), db.clone());

        let order = service.execute(command(&employee)).await.unwrap();

        assert_eq!(order.kind(), order::Kind::Hiring);
        let active = db
            .execute(Select(By::<
                Option<read::contract::Active<Contract>>,
                _,
            >::new(employee.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.0.id, order.contract_id());
        assert_eq!(active.0.hired_on, date(2024, 3, 4));

        let stored = db
            .execute(Select(By::<Option<Employee>, _>::new(employee.id)))
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_employed);

        let stored = db
            .execute(Select(By::<Option<Order>, _>::new(order.id())))
            .await
            .unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn rejects_employed() {
        let (db, _, employee, contract) = fixture::seeded().await;
        let service = Service::new(Config::default(), db);

        let err = service
            .execute(command(&employee))
            .await
            .unwrap_err()
            .into_inner();

        assert!(
            matches!(
                err,
                ExecutionError::EmployeeAlreadyEmployed(id) if id == contract.id,
            ),
            "wrong error: {err}",
        );
    }

    #[tokio::test]
    async fn rejects_hiring_before_registration() {
        let db = Memory::new();
        let company = fixture::company();
        let employee = fixture::employee(&company);
        db.execute(Insert(company)).await.unwrap();
        db.execute(Insert(employee.clone())).await.unwrap();
        let service = Service::new(Config::default(), db);

        let err = service
            .execute(HireEmployee {
                hired_on: date(2023, 11, 30),
                ..command(&employee)
            })
            .await
            .unwrap_err()
            .into_inner();

        assert!(
            matches!(err, ExecutionError::HiringDateBeforeRegistration(_)),
            "wrong error: {err}",
        );
    }
}
