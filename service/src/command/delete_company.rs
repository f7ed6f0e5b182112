//! [`Command`] for deleting a [`Company`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{company, Company},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Company`].
///
/// Records of the deleted [`Company`] are kept, but it's not listed anymore
/// and cannot be the current one.
#[derive(Clone, Copy, Debug)]
pub struct DeleteCompany {
    /// ID of the [`Company`] to be deleted.
    pub company_id: company::Id,
}

impl<Db> Command<DeleteCompany> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Company, company::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Company>, company::Id>>,
            Ok = Option<Company>,
            Err = Traced<database::Error>,
        > + Database<Update<Company>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Company;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteCompany { company_id }: DeleteCompany,
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

        company.is_current = false;
        company.deleted_at = Some(DateTime::now().coerce());

        tx.execute(Update(company.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tracing::info!(company.id = %company_id, "`Company` deleted");

        Ok(company)
    }
}

/// Error of [`DeleteCompany`] [`Command`] execution.
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
    use common::operations::{By, Select};

    use crate::{
        domain::Company, fixture, infra::Database as _, read, Command as _,
        Config, Service,
    };

    use super::{DeleteCompany, ExecutionError};

    #[tokio::test]
    async fn hides_deleted() {
        let (db, company, _, _) = fixture::seeded().await;
        let service = Service::new(Config::default(), db.clone());

        let deleted = service
            .execute(DeleteCompany {
                company_id: company.id,
            })
            .await
            .unwrap();
        assert!(deleted.deleted_at.is_some());
        assert!(!deleted.is_current);

        let found = db
            .execute(Select(By::<Option<Company>, _>::new(company.id)))
            .await
            .unwrap();
        assert!(found.is_none());
        let current = db
            .execute(Select(By::<Option<Company>, _>::new(
                read::company::Current,
            )))
            .await
            .unwrap();
        assert!(current.is_none());

        let err = service
            .execute(DeleteCompany {
                company_id: company.id,
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
