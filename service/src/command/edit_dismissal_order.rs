//! [`Command`] for editing an existing [`order::Dismissal`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Money,
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

/// [`Command`] for editing an existing [`order::Dismissal`].
///
/// The dismissed [`Employee`] and the closed [`Contract`] stay the same, only
/// the details of the [`Order`] and the dismissal date may be changed.
#[derive(Clone, Debug)]
pub struct EditDismissalOrder {
    /// ID of the [`order::Dismissal`] to be edited.
    pub order_id: order::Id,

    /// New [`order::Number`] of the [`Order`].
    pub number: order::Number,

    /// New date when the [`Order`] is issued.
    pub date: order::IssueDate,

    /// New date of the dismissal.
    pub dismissed_on: contract::DismissalDate,

    /// New grounds of the dismissal.
    pub grounds: order::dismissal::Grounds,

    /// New number of days of unused vacation to be compensated.
    pub compensation_days: order::dismissal::CompensationDays,

    /// New average monthly salary of the dismissed [`Employee`].
    pub average_salary: Money,
}

impl<Db> Command<EditDismissalOrder> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Lock<By<Employee, employee::Id>>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<Order, order::Id>>, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
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
        + Database<Update<Order>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: EditDismissalOrder,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let EditDismissalOrder {
            order_id,
            number,
            date,
            dismissed_on,
            grounds,
            compensation_days,
            average_salary,
        } = cmd;

        let employee_id = self
            .database()
            .execute(Select(By::<Option<Order>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|o| o.kind() == order::Kind::Dismissal)
            .ok_or(E::OrderNotExists(order_id))
            .map_err(tracerr::wrap!())?
            .employee_id();

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Same locking order as on creation to avoid deadlocks.
        tx.execute(Lock(By::new(employee_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Lock(By::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let Some(Order::Dismissal(mut dismissal)) = tx
            .execute(Select(By::<Option<Order>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
        else {
            return Err(tracerr::new!(E::OrderNotExists(order_id)));
        };

        let company = tx
            .execute(Select(By::<Option<Company>, _>::new(
                dismissal.company_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CompanyNotExists(dismissal.company_id))
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
            .execute(Select(By::<Option<Contract>, _>::new(
                dismissal.contract_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ContractNotExists(dismissal.contract_id))
            .map_err(tracerr::wrap!())?;

        contract.dismissed_on = Some(dismissed_on);
        dismissal.number = number;
        dismissal.date = date;
        dismissal.dismissed_on = dismissed_on;
        dismissal.grounds = grounds;
        dismissal.compensation_days = compensation_days;
        dismissal.average_salary = average_salary;
        let order = Order::from(dismissal);

        tx.execute(Update(contract))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Update(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tracing::info!(order.id = %order_id, "dismissal `Order` edited");

        Ok(order)
    }
}

/// Error of [`EditDismissalOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Company`] of the [`Order`] does not exist.
    #[display("`Company(id: {_0})` does not exist")]
    CompanyNotExists(#[error(not(source))] company::Id),

    /// [`Contract`] closed by the [`Order`] does not exist.
    #[display("`Contract(id: {_0})` does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Dismissal date precedes the [`Company`] registration.
    #[display("Dismissal date `{_0}` precedes `Company` registration")]
    DismissalDateBeforeRegistration(
        #[error(not(source))] contract::DismissalDate,
    ),

    /// [`Order`] date precedes the [`Company`] registration.
    #[display("`Order` date `{_0}` precedes `Company` registration")]
    OrderDateBeforeRegistration(#[error(not(source))] order::IssueDate),

    /// [`order::Dismissal`] with the provided ID does not exist.
    #[display("Dismissal `Order(id: {_0})` does not exist")]
    OrderNotExists(#[error(not(source))] order::Id),
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Select},
        Money,
    };

    use crate::{
        command::CreateDismissalOrder,
        domain::{order, order::dismissal, Contract, Employee, Order},
        fixture::{self, date},
        infra::{Database as _, Memory},
        Command as _, Config, Service,
    };

    use super::{EditDismissalOrder, ExecutionError};

    async fn dismissed() -> (Service<Memory>, Memory, Contract, Order) {
        let (db, _, employee, contract) = fixture::seeded().await;
        let service = Service::new(Config::default(), db.clone());
        let order = service
            .execute(CreateDismissalOrder {
                employee_id: employee.id,
                contract_id: contract.id,
                number: order::Number::new(1).unwrap(),
                date: date(2024, 6, 1),
                dismissed_on: date(2024, 6, 15),
                grounds: dismissal::Grounds::new("Заявление").unwrap(),
                compensation_days: dismissal::CompensationDays::new(5)
                    .unwrap(),
                average_salary: Money::from(1_500_000),
            })
            .await
            .unwrap();
        (service, db, contract, order)
    }

    fn edit(order: &Order) -> EditDismissalOrder {
        EditDismissalOrder {
            order_id: order.id(),
            number: order::Number::new(7).unwrap(),
            date: date(2024, 6, 2),
            dismissed_on: date(2024, 6, 20),
            grounds: dismissal::Grounds::new("Соглашение сторон").unwrap(),
            compensation_days: dismissal::CompensationDays::new(3).unwrap(),
            average_salary: Money::from(2_000_000),
        }
    }

    #[tokio::test]
    async fn updates_order_and_contract() {
        let (service, db, contract, order) = dismissed().await;

        let edited = service.execute(edit(&order)).await.unwrap();

        let Order::Dismissal(d) = &edited else {
            panic!("expected dismissal `Order`, found: {edited:?}");
        };
        assert_eq!(edited.id(), order.id());
        assert_eq!(edited.number(), order::Number::new(7).unwrap());
        assert_eq!(d.grounds.as_ref(), "Соглашение сторон");
        assert_eq!(d.average_salary, Money::from(2_000_000));

        let stored = db
            .execute(Select(By::<Option<Contract>, _>::new(contract.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.dismissed_on, Some(date(2024, 6, 20)));

        let stored = db
            .execute(Select(By::<Option<Employee>, _>::new(
                contract.employee_id,
            )))
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.is_employed);
    }

    #[tokio::test]
    async fn rejects_unknown_order() {
        let (service, _, _, order) = dismissed().await;

        let err = service
            .execute(EditDismissalOrder {
                order_id: order::Id::new(),
                ..edit(&order)
            })
            .await
            .unwrap_err()
            .into_inner();

        assert!(
            matches!(err, ExecutionError::OrderNotExists(_)),
            "wrong error: {err}",
        );
    }

    #[tokio::test]
    async fn keeps_order_on_invalid_date() {
        let (service, db, _, order) = dismissed().await;

        let err = service
            .execute(EditDismissalOrder {
                date: date(2023, 1, 1),
                ..edit(&order)
            })
            .await
            .unwrap_err()
            .into_inner();
        assert!(
            matches!(err, ExecutionError::OrderDateBeforeRegistration(_)),
            "wrong error: {err}",
        );

        let stored = db
            .execute(Select(By::<Option<Order>, _>::new(order.id())))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.number(), order.number());
        assert_eq!(stored.date(), order.date());
    }
}
