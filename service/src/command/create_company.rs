//! [`Command`] for creating a new [`Company`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{company, Address, Company, Phone, Tin},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for creating a new [`Company`].
#[derive(Clone, Debug)]
pub struct CreateCompany {
    /// Name of a new [`Company`].
    pub name: company::Name,

    /// [`Address`] of a new [`Company`].
    pub address: Address,

    /// [`Phone`] of a new [`Company`].
    pub phone: Phone,

    /// [`Tin`] of a new [`Company`].
    pub tin: Tin,

    /// [`company::BankAccount`] of a new [`Company`].
    pub bank_account: company::BankAccount,

    /// Name of the bank serving a new [`Company`].
    pub bank_name: company::BankName,

    /// Code of the bank serving a new [`Company`].
    pub bank_code: company::BankCode,

    /// [`company::ActivityCode`] of a new [`Company`].
    pub activity_code: company::ActivityCode,

    /// Name of the manager of a new [`Company`].
    pub manager: company::ManagerName,

    /// Date when a new [`Company`] was registered.
    pub registered_on: company::RegistrationDate,

    /// Indicator whether a new [`Company`] should become the current one.
    pub make_current: bool,
}

impl<Db> Command<CreateCompany> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Company>, read::company::Current>>,
            Ok = Option<Company>,
            Err = Traced<database::Error>,
        > + Database<Update<Company>, Err = Traced<database::Error>>
        + Database<Insert<Company>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Company;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateCompany) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateCompany {
            name,
            address,
            phone,
            tin,
            bank_account,
            bank_name,
            bank_code,
            activity_code,
            manager,
            registered_on,
            make_current,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if make_current {
            if let Some(mut previous) = tx
                .execute(Select(By::new(read::company::Current)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
            {
                previous.is_current = false;
                tx.execute(Update(previous))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
            }
        }

        let company = Company {
            id: company::Id::new(),
            name,
            address,
            phone,
            tin,
            bank_account,
            bank_name,
            bank_code,
            activity_code,
            manager,
            registered_on,
            is_current: make_current,
            created_at: DateTime::now().coerce(),
            deleted_at: None,
        };

        tx.execute(Insert(company.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tracing::info!(
            company.id = %company.id,
            company.is_current = company.is_current,
            "`Company` created",
        );

        Ok(company)
    }
}

/// Error of [`CreateCompany`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use crate::{
        domain::Company,
        fixture::{self, date},
        infra::Database as _,
        read, Command as _, Config, Service,
    };

    use super::CreateCompany;

    fn command(make_current: bool) -> CreateCompany {
        let c = fixture::company();
        CreateCompany {
            name: c.name,
            address: c.address,
            phone: c.phone,
            tin: c.tin,
            bank_account: c.bank_account,
            bank_name: c.bank_name,
            bank_code: c.bank_code,
            activity_code: c.activity_code,
            manager: c.manager,
            registered_on: date(2025, 1, 1),
            make_current,
        }
    }

    #[tokio::test]
    async fn replaces_current() {
        let (db, previous, _, _) = fixture::seeded().await;
        let service = Service::new(Config::default(), db.clone());

        let company = service.execute(command(true)).await.unwrap();

        let current = db
            .execute(Select(By::<Option<Company>, _>::new(
                read::company::Current,
            )))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.id, company.id);

        let previous = db
            .execute(Select(By::<Option<Company>, _>::new(previous.id)))
            .await
            .unwrap()
            .unwrap();
        assert!(!previous.is_current);
    }

    #[tokio::test]
    async fn keeps_current() {
        let (db, previous, _, _) = fixture::seeded().await;
        let service = Service::new(Config::default(), db.clone());

        let company = service.execute(command(false)).await.unwrap();

        assert!(!company.is_current);
        let current = db
            .execute(Select(By::<Option<Company>, _>::new(
                read::company::Current,
            )))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.id, previous.id);
    }
}
