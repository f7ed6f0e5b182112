//! [`Command`] for creating a new [`order::Dismissal`].

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
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`order::Dismissal`].
///
/// Closes the dismissed [`Employee`]'s [`Contract`] and records the
/// [`Order`] atomically.
#[derive(Clone, Debug)]
pub struct CreateDismissalOrder {
    /// ID of the [`Employee`] to be dismissed.
    pub employee_id: employee::Id,

    /// ID of the active [`Contract`] to be closed.
    pub contract_id: contract::Id,

    /// [`order::Number`] of a new [`Order`].
    pub number: order::Number,

    /// Date when a new [`Order`] is issued.
    pub date: order::IssueDate,

    /// Date when the [`Employee`] is dismissed.
    pub dismissed_on: contract::DismissalDate,

    /// Grounds of the dismissal.
    pub grounds: order::dismissal::Grounds,

    /// Days of unused vacation to be compensated.
    pub compensation_days: order::dismissal::CompensationDays,

    /// Average monthly salary of the [`Employee`].
    pub average_salary: Money,
}

impl<Db> Command<CreateDismissalOrder> for Service<Db>
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
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
            Err = Traced<database::Error>,
        > + Database<Update<Contract>, Err = Traced<database::Error>>
        + Database<Update<Employee>, Err = Traced<database::Error>>
        + Database<Insert<Order>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateDismissalOrder,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateDismissalOrder {
            employee_id,
            contract_id,
            number,
            date,
            dismissed_on,
            grounds,
            compensation_days,
            average_salary,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent hirings and dismissals of the same `Employee`.
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
        if !company.admits(dismissed_on) {
            return Err(tracerr::new!(E::DismissalDateBeforeRegistration(
                dismissed_on
            )));
        }

        let mut contract = tx
            .execute(Select(By::<Option<Contract>, _>::new(contract_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|c| c.employee_id == employee.id && c.is_active())
            .ok_or(E::ContractNotFound(employee.id))
            .map_err(tracerr::wrap!())?;

        contract.dismissed_on = Some(dismissed_on);
        employee.is_employed = false;
        let order = Order::from(order::Dismissal {
            id: order::Id::new(),
            number,
            date,
            employee_id: employee.id,
            contract_id: contract.id,
            company_id: company.id,
            dismissed_on,
            grounds,
            compensation_days,
            average_salary,
            created_at: DateTime::now().coerce(),
        });

        tx.execute(Update(contract))
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
            contract.id = %contract_id,
            "dismissal `Order` created",
        );

        Ok(order)
    }
}

/// Error of [`CreateDismissalOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Company`] of the [`Employee`] does not exist.
    #[display("`Company(id: {_0})` does not exist")]
    CompanyNotExists(#[error(not(source))] company::Id),

    /// [`Employee`] has no active [`Contract`] to be closed.
    #[display("No active `Contract` found for `Employee(id: {_0})`")]
    ContractNotFound(#[error(not(source))] employee::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Dismissal date precedes the [`Company`] registration.
    #[display("Dismissal date `{_0}` precedes `Company` registration")]
    DismissalDateBeforeRegistration(
        #[error(not(source))] contract::DismissalDate,
    ),

    /// [`Employee`] with the provided ID does not exist.
    #[display("`Employee(id: {_0})` does not exist")]
    EmployeeNotExists(#[error(not(source))] employee::Id),

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
        domain::{
            contract, order, order::dismissal, Contract, Employee, Order,
        },
        fixture::{self, date},
        infra::Database as _,
        Command as _, Config, Service,
    };

    use super::{CreateDismissalOrder, ExecutionError};

    fn command(
        employee: &Employee,
        contract: &Contract,
    ) -> CreateDismissalOrder {
        CreateDismissalOrder {
            employee_id: employee.id,
            contract_id: contract.id,
            number: order::Number::new(1).unwrap(),
            date: date(2024, 6, 1),
            dismissed_on: date(2024, 6, 15),
            grounds: dismissal::Grounds::new("Заявление").unwrap(),
            compensation_days: dismissal::CompensationDays::new(5).unwrap(),
            average_salary: Money::from(1_500_000),
        }
    }

    #[tokio::test]
    async fn closes_contract_and_records_order() {
        let (db, company, employee, contract) = fixture::seeded().await;
        let service = Service::new(Config::default(), db.clone());

        let order = service
            .execute(command(&employee, &contract))
            .await
            .unwrap();

        let Order::Dismissal(dismissal) = &order else {
            panic!("expected dismissal `Order`, found: {order:?}");
        };
        assert_eq!(order.kind(), order::Kind::Dismissal);
        assert_eq!(order.kind().u8(), 2);
        assert_eq!(dismissal.contract_id, contract.id);
        assert_eq!(dismissal.employee_id, employee.id);
        assert_eq!(dismissal.company_id, company.id);
        assert_eq!(dismissal.grounds.as_ref(), "Заявление");

        let stored = db
            .execute(Select(By::<Option<Contract>, _>::new(contract.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.dismissed_on, Some(date(2024, 6, 15)));

        let stored = db
            .execute(Select(By::<Option<Employee>, _>::new(employee.id)))
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.is_employed);

        let stored = db
            .execute(Select(By::<Option<Order>, _>::new(order.id())))
            .await
            .unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn rejects_second_dismissal() {
        let (db, _, employee, contract) = fixture::seeded().await;
        let service = Service::new(Config::default(), db.clone());

        _ = service
            .execute(command(&employee, &contract))
            .await
            .unwrap();
        let err = service
            .execute(command(&employee, &contract))
            .await
            .unwrap_err()
            .into_inner();

        assert!(
            matches!(
                err,
                ExecutionError::ContractNotFound(id) if id == employee.id,
            ),
            "wrong error: {err}",
        );
        let orders = db
            .execute(Select(By::<Vec<Order>, _>::new(employee.company_id)))
            .await
            .unwrap();
        assert_eq!(orders.len(), 1);
    }

    #[tokio::test]
    async fn rejects_dates_before_registration() {
        let (db, _, employee, contract) = fixture::seeded().await;
        let service = Service::new(Config::default(), db.clone());

        let err = service
            .execute(CreateDismissalOrder {
                date: date(2023, 12, 31),
                ..command(&employee, &contract)
            })
            .await
            .unwrap_err()
            .into_inner();
        assert!(
            matches!(
                err,
                ExecutionError::OrderDateBeforeRegistration(_),
            ),
            "wrong error: {err}",
        );

        let err = service
            .execute(CreateDismissalOrder {
                dismissed_on: date(2023, 12, 31),
                ..command(&employee, &contract)
            })
            .await
            .unwrap_err()
            .into_inner();
        assert!(
            matches!(
                err,
                ExecutionError::DismissalDateBeforeRegistration(_),
            ),
            "wrong error: {err}",
        );

        let stored = db
            .execute(Select(By::<Option<Contract>, _>::new(contract.id)))
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_active(), "failed `Command` left changes");
    }

    #[tokio::test]
    async fn rejects_foreign_contract() {
        let (db, company, employee, _) = fixture::seeded().await;
        let service = Service::new(Config::default(), db.clone());

        let stranger = fixture::employee(&company);
        let foreign = fixture::contract(&stranger);
        db.execute(Insert(stranger)).await.unwrap();
        db.execute(Insert(foreign.clone()))
            .await
            .unwrap();

        let err = service
            .execute(command(&employee, &foreign))
            .await
            .unwrap_err()
            .into_inner();
        assert!(
            matches!(err, ExecutionError::ContractNotFound(_)),
            "wrong error: {err}",
        );

        let stored = db
            .execute(Select(By::<Option<Contract>, _>::new(foreign.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.dismissed_on, None::<contract::DismissalDate>);
    }
}
