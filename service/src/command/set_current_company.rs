//! [`Command`] for choosing the current [`Company`].

use common::operations::{By, Commit, Lock, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{company, Company},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for choosing the [`Company`] to work with.
///
/// At most one [`Company`] is the current one at a time.
#[derive(Clone, Copy, Debug)]
pub struct SetCurrentCompany {
    /// ID of the [`Company`] to become the current one.
    pub company_id: company::Id,
}

impl<Db> Command<SetCurrentCompany> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Company, company::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Company>, company::Id>>,
            Ok = Option<Company>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Company>, read::company::Current>>,
            Ok = Option<Company>,
            Err = Traced<database::Error>,
        > + Database<Update<Company>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Company;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        SetCurrentCompany { company_id }: SetCurrentCompany,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::new(company_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut company = tx
            .execute(Select(By::<Option<Company>, _>::new(company_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CompanyNotExists(company_id))
            .map_err(tracerr::wrap!())?;
        if company.is_current {
            return Ok(company);
        }

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

        company.is_current = true;
        tx.execute(Update(company.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tracing::info!(company.id = %company_id, "current `Company` changed");

        Ok(company)
    }
}

/// Error of [`SetCurrentCompany`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Company`] with the provided ID does not exist.
    #[display("`Company(id: {_0})` does not exist")]
    CompanyNotExists(#[error(not(source))] company::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Insert, Select};

    use crate::{
        domain::{company, Company},
        fixture,
        infra::Database as _,
        read, Command as _, Config, Service,
    };

    use super::{ExecutionError, SetCurrentCompany};

    #[tokio::test]
    async fn switches_current() {
        let (db, first, _, _) = fixture::seeded().await;
        let mut second = fixture::company();
        second.is_current = false;
        db.execute(Insert(second.clone())).await.unwrap();
        let service = Service::new(Config::default(), db.clone());

        let company = service
            .execute(SetCurrentCompany {
                company_id: second.id,
            })
            .await
            .unwrap();
        assert!(company.is_current);

        let current = db
            .execute(Select(By::<Option<Company>, _>::new(
                read::company::Current,
            )))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.id, second.id);

        let first = db
            .execute(Select(By::<Option<Company>, _>::new(first.id)))
            .await
            .unwrap()
            .unwrap();
        assert!(!first.is_current);
    }

    #[tokio::test]
    async fn rejects_unknown() {
        let (db, _, _, _) = fixture::seeded().await;
        let service = Service::new(Config::default(), db);

        let err = service
            .execute(SetCurrentCompany {
                company_id: company::Id::new(),
            })
            .await
            .unwrap_err()
            .into_inner();

        assert!(
            matches!(err, ExecutionError::CompanyNotExists(_)),
            "wrong error: {err}",
        );
    }
}
