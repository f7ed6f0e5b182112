//! [`Database`] implementations.

use std::cmp::Reverse;

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Update};
use tracerr::Traced;

use crate::{
    domain::{
        company, contract, employee, order, Company, Contract, Employee, Order,
    },
    infra::{database, Database},
    read::{self, contract::Active},
};

use super::{Memory, NonTx, Storage, Tx};

impl Database<Transact> for Memory<NonTx> {
    type Ok = Memory<Tx>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(Memory(self.0.begin().await))
    }
}

impl Database<Transact> for Memory<Tx> {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        self.0.commit();
        Ok(())
    }
}

impl<S: Storage> Database<Select<By<Option<Company>, company::Id>>>
    for Memory<S>
{
    type Ok = Option<Company>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Company>, company::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.0.read(|s| {
            s.companies
                .get(&id)
                .filter(|c| c.deleted_at.is_none())
                .cloned()
        }))
    }
}

impl<S: Storage>
    Database<Select<By<Option<Company>, read::company::Current>>>
    for Memory<S>
{
    type Ok = Option<Company>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Option<Company>, read::company::Current>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.0.read(|s| {
            s.companies
                .values()
                .find(|c| c.is_current && c.deleted_at.is_none())
                .cloned()
        }))
    }
}

impl<S: Storage> Database<Select<By<Vec<Company>, ()>>> for Memory<S> {
    type Ok = Vec<Company>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Company>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut companies = self.0.read(|s| {
            s.companies
                .values()
                .filter(|c| c.deleted_at.is_none())
                .cloned()
                .collect::<Vec<_>>()
        });
        companies.sort_by(|a, b| {
            a.name.as_ref().cmp(b.name.as_ref()).then(a.id.cmp(&b.id))
        });
        Ok(companies)
    }
}

impl<S: Storage> Database<Insert<Company>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(company): Insert<Company>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(company)).await
    }
}

impl<S: Storage> Database<Update<Company>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(company): Update<Company>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.write(|s| s.companies.insert(company.id, company));
        Ok(())
    }
}

impl<S: Storage> Database<Lock<By<Company, company::Id>>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Company, company::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // `Tx`s are already exclusive, see `NonTx::begin()`.
        Ok(())
    }
}

impl<S: Storage> Database<Select<By<Option<Employee>, employee::Id>>>
    for Memory<S>
{
    type Ok = Option<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Employee>, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.0.read(|s| s.employees.get(&id).cloned()))
    }
}

impl<S: Storage>
    Database<
        Select<By<Option<Employee>, (company::Id, employee::PersonalId)>>,
    > for Memory<S>
{
    type Ok = Option<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Option<Employee>, (company::Id, employee::PersonalId)>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let (company_id, personal_id) = by.into_inner();
        Ok(self.0.read(|s| {
            s.employees
                .values()
                .find(|e| {
                    e.company_id == company_id && e.personal_id == personal_id
                })
                .cloned()
        }))
    }
}

impl<S: Storage>
    Database<Select<By<Vec<Employee>, read::employee::list::Selector>>>
    for Memory<S>
{
    type Ok = Vec<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<Employee>, read::employee::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::employee::list::Selector { company_id, filter } =
            by.into_inner();

        let mut employees = self.0.read(|s| {
            s.employees
                .values()
                .filter(|e| e.company_id == company_id && filter.matches(e))
                .cloned()
                .collect::<Vec<_>>()
        });
        employees.sort_by_cached_key(|e| (e.full_name(), e.id));
        Ok(employees)
    }
}

impl<S: Storage> Database<Insert<Employee>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(employee): Insert<Employee>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(employee)).await
    }
}

impl<S: Storage> Database<Update<Employee>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(employee): Update<Employee>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.write(|s| s.employees.insert(employee.id, employee));
        Ok(())
    }
}

impl<S: Storage> Database<Lock<By<Employee, employee::Id>>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Employee, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // `Tx`s are already exclusive, see `NonTx::begin()`.
        Ok(())
    }
}

impl<S: Storage> Database<Select<By<Option<Contract>, contract::Id>>>
    for Memory<S>
{
    type Ok = Option<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Contract>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.0.read(|s| s.contracts.get(&id).cloned()))
    }
}

impl<S: Storage>
    Database<Select<By<Option<Active<Contract>>, employee::Id>>>
    for Memory<S>
{
    type Ok = Option<Active<Contract>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Active<Contract>>, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let employee_id = by.into_inner();
        Ok(self.0.read(|s| {
            s.contracts
                .values()
                .find(|c| c.employee_id == employee_id && c.is_active())
                .cloned()
                .map(Active)
        }))
    }
}

impl<S: Storage> Database<Select<By<Vec<Contract>, company::Id>>>
    for Memory<S>
{
    type Ok = Vec<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Contract>, company::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let company_id = by.into_inner();
        let mut contracts = self.0.read(|s| {
            s.contracts
                .values()
                .filter(|c| c.company_id == company_id)
                .cloned()
                .collect::<Vec<_>>()
        });
        contracts.sort_by_key(|c| Reverse((c.hired_on, c.created_at, c.id)));
        Ok(contracts)
    }
}

impl<S: Storage> Database<Insert<Contract>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(contract): Insert<Contract>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(contract)).await
    }
}

impl<S: Storage> Database<Update<Contract>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(contract): Update<Contract>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.write(|s| s.contracts.insert(contract.id, contract));
        Ok(())
    }
}

impl<S: Storage> Database<Select<By<Option<Order>, order::Id>>> for Memory<S> {
    type Ok = Option<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Order>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.0.read(|s| s.orders.get(&id).cloned()))
    }
}

impl<S: Storage> Database<Select<By<Vec<Order>, company::Id>>> for Memory<S> {
    type Ok = Vec<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Order>, company::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let company_id = by.into_inner();
        let mut orders = self.0.read(|s| {
            s.orders
                .values()
                .filter(|o| o.company_id() == company_id)
                .cloned()
                .collect::<Vec<_>>()
        });
        orders.sort_by_key(|o| (o.number(), o.created_at(), o.id()));
        Ok(orders)
    }
}

impl<S: Storage>
    Database<Select<By<read::order::list::TotalCount, company::Id>>>
    for Memory<S>
{
    type Ok = read::order::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::order::list::TotalCount, company::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let company_id = by.into_inner();
        let count = self.0.read(|s| {
            s.orders
                .values()
                .filter(|o| o.company_id() == company_id)
                .count()
        });
        Ok(i32::try_from(count).unwrap_or(i32::MAX).into())
    }
}

impl<S: Storage> Database<Insert<Order>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(order): Insert<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(order)).await
    }
}

impl<S: Storage> Database<Update<Order>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(order): Update<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.write(|s| s.orders.insert(order.id(), order));
        Ok(())
    }
}

impl<S: Storage> Database<Lock<By<Order, order::Id>>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Order, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // `Tx`s are already exclusive, see `NonTx::begin()`.
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Commit, Insert, Select, Transact};
    use futures::FutureExt as _;

    use crate::{
        domain::{Company, Contract},
        infra::Database as _,
        fixture::{company, contract, employee},
    };

    use super::Memory;

    #[tokio::test]
    async fn commits_staged_writes() {
        let db = Memory::new();
        let company = company();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(company.clone())).await.unwrap();

        let outside = db
            .execute(Select(By::<Option<Company>, _>::new(company.id)))
            .await
            .unwrap();
        assert!(outside.is_none(), "staged write leaked out of `Tx`");

        tx.execute(Commit).await.unwrap();
        drop(tx);

        let committed = db
            .execute(Select(By::<Option<Company>, _>::new(company.id)))
            .await
            .unwrap();
        assert!(committed.is_some());
    }

    #[tokio::test]
    async fn discards_uncommitted_writes() {
        let db = Memory::new();
        let company = company();
        let employee = employee(&company);
        let contract = contract(&employee);

        {
            let tx = db.execute(Transact).await.unwrap();
            tx.execute(Insert(contract.clone())).await.unwrap();
        }

        let stored = db
            .execute(Select(By::<Option<Contract>, _>::new(contract.id)))
            .await
            .unwrap();
        assert!(stored.is_none());

        // Next `Tx` is not blocked by the dropped one.
        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Commit).await.unwrap();
    }

    #[tokio::test]
    async fn runs_single_tx_at_once() {
        let db = Memory::new();

        let tx = db.execute(Transact).await.unwrap();
        assert!(
            db.execute(Transact).now_or_never().is_none(),
            "second `Tx` began while the first one runs",
        );

        tx.execute(Commit).await.unwrap();
        drop(tx);

        assert!(db.execute(Transact).now_or_never().is_some());
    }
}
