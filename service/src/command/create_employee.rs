//! [`Command`] for creating a new [`Employee`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{company, employee, Address, Company, Employee, Phone, Tin},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`Employee`] in a [`Company`].
///
/// A new [`Employee`] is not employed until hired.
#[derive(Clone, Debug)]
pub struct CreateEmployee {
    /// ID of the [`Company`] to register the [`Employee`] in.
    pub company_id: company::Id,

    /// Family name of the [`Employee`].
    pub family_name: employee::Name,

    /// First name of the [`Employee`].
    pub first_name: employee::Name,

    /// Patronymic of the [`Employee`].
    pub patronymic: employee::Name,

    /// [`employee::PersonalId`] of the [`Employee`].
    pub personal_id: employee::PersonalId,

    /// [`Tin`] of the [`Employee`].
    pub tin: Tin,

    /// [`employee::Passport`] details of the [`Employee`].
    pub passport: employee::Passport,

    /// [`Address`] of the [`Employee`].
    pub address: Option<Address>,

    /// [`Phone`] of the [`Employee`].
    pub phone: Option<Phone>,
}

impl<Db> Command<CreateEmployee> for Service<Db>
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
            Select<
                By<Option<Employee>, (company::Id, employee::PersonalId)>,
            >,
            Ok = Option<Employee>,
            Err = Traced<database::Error>,
        > + Database<Insert<Employee>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Employee;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateEmployee,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateEmployee {
            company_id,
            family_name,
            first_name,
            patronymic,
            personal_id,
            tin,
            passport,
            address,
            phone,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid registering the same person twice concurrently.
        tx.execute(Lock(By::new(company_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        _ = tx
            .execute(Select(By::<Option<Company>, _>::new(company_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CompanyNotExists(company_id))
            .map_err(tracerr::wrap!())?;

        if let Some(existing) = tx
            .execute(Select(By::<Option<Employee>, _>::new((
                company_id,
                personal_id.clone(),
            ))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
        {
            return Err(tracerr::new!(E::PersonalIdOccupied(existing.id)));
        }

        let employee = Employee {
            id: employee::Id::new(),
            company_id,
            family_name,
            first_name,
            patronymic,
            personal_id,
            tin,
            passport,
            address,
            phone,
            is_employed: false,
            created_at: DateTime::now().coerce(),
        };

        tx.execute(Insert(employee.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tracing::info!(employee.id = %employee.id, "`Employee` created");

        Ok(employee)
    }
}

/// Error of [`CreateEmployee`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Company`] with the provided ID does not exist.
    #[display("`Company(id: {_0})` does not exist")]
    CompanyNotExists(#[error(not(source))] company::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`employee::PersonalId`] is already used by another [`Employee`] of
    /// the same [`Company`].
    #[display("Personal ID is already used by `Employee(id: {_0})`")]
    PersonalIdOccupied(#[error(not(source))] employee::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{company, employee, Tin},
        fixture,
        Command as _, Config, Service,
    };

    use super::{CreateEmployee, ExecutionError};

    fn command(company_id: company::Id, personal_id: &str) -> CreateEmployee {
        CreateEmployee {
            company_id,
            family_name: employee::Name::new("Rakhimova").unwrap(),
            first_name: employee::Name::new("Dilnoza").unwrap(),
            patronymic: employee::Name::new("Bakhtiyorovna").unwrap(),
            personal_id: employee::PersonalId::new(personal_id).unwrap(),
            tin: Tin::new("512345678").unwrap(),
            passport: employee::Passport::default(),
            address: None,
            phone: None,
        }
    }

    #[tokio::test]
    async fn registers_unemployed() {
        let (db, company, _, _) = fixture::seeded().await;
        let service = Service::new(Config::default(), db);

        let employee = service
            .execute(command(company.id, "31505900120015"))
            .await
            .unwrap();

        assert!(!employee.is_employed);
        assert_eq!(employee.company_id, company.id);
        assert_eq!(
            employee.full_name(),
            "Rakhimova Dilnoza Bakhtiyorovna",
        );
    }

    #[tokio::test]
    async fn rejects_duplicate_personal_id() {
        let (db, company, existing, _) = fixture::seeded().await;
        let service = Service::new(Config::default(), db);

        let err = service
            .execute(command(company.id, existing.personal_id.as_ref()))
            .await
            .unwrap_err()
            .into_inner();

        assert!(
            matches!(
                err,
                ExecutionError::PersonalIdOccupied(id) if id == existing.id,
            ),
            "wrong error: {err}",
        );
    }

    #[tokio::test]
    async fn rejects_unknown_company() {
        let (db, _, _, _) = fixture::seeded().await;
        let service = Service::new(Config::default(), db);

        let err = service
            .execute(command(company::Id::new(), "31505900120015"))
            .await
            .unwrap_err()
            .into_inner();

        assert!(
            matches!(err, ExecutionError::CompanyNotExists(_)),
            "wrong error: {err}",
        );
    }
}
