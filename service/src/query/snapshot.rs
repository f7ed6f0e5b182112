//! [`Query`] of a [`Snapshot`] of a [`Company`].
//!
//! [`Snapshot`]: read::Snapshot

use common::operations::{By, Select};
use futures::future;
use tracerr::Traced;

use crate::{
    domain::{company, Company, Contract, Employee, Order},
    infra::{database, Database},
    read, Service,
};

use super::Query;

/// [`Query`] of a [`read::Snapshot`] of a [`Company`].
///
/// Returns [`None`] if the [`Company`] doesn't exist.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot {
    /// ID of the [`Company`] to take a [`read::Snapshot`] of.
    pub company_id: company::Id,
}

impl<Db> Query<Snapshot> for Service<Db>
where
    Db: Database<
            Select<By<Option<Company>, company::Id>>,
            Ok = Option<Company>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Employee>, read::employee::list::Selector>>,
            Ok = Vec<Employee>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Contract>, company::Id>>,
            Ok = Vec<Contract>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Order>, company::Id>>,
            Ok = Vec<Order>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Option<read::Snapshot>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Snapshot { company_id }: Snapshot,
    ) -> Result<Self::Ok, Self::Err> {
        let Some(company) = self
            .database()
            .execute(Select(By::<Option<Company>, _>::new(company_id)))
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        let (employees, contracts, orders) = future::try_join3(
            self.database().execute(Select(By::<Vec<Employee>, _>::new(
                read::employee::list::Selector {
                    company_id,
                    filter: read::employee::list::Filter::default(),
                },
            ))),
            self.database()
                .execute(Select(By::<Vec<Contract>, _>::new(company_id))),
            self.database()
                .execute(Select(By::<Vec<Order>, _>::new(company_id))),
        )
        .await
        .map_err(tracerr::wrap!())?;

        Ok(Some(read::Snapshot {
            company,
            employees,
            contracts,
            orders,
        }))
    }
}
