//! [`Contract`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{company, contract, employee, Contract},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::contract::Active,
};

/// Columns of the `contracts` table, in the order [`from_row()`] expects.
const COLUMNS: &str = "\
    id, employee_id, company_id, \
    hired_on, dismissed_on, \
    created_at";

/// Builds a [`Contract`] out of the provided [`Row`] selected with
/// [`COLUMNS`].
fn from_row(row: &Row) -> Contract {
    Contract {
        id: row.get("id"),
        employee_id: row.get("employee_id"),
        company_id: row.get("company_id"),
        hired_on: row.get("hired_on"),
        dismissed_on: row.get("dismissed_on"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Contract>, contract::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Contract>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM contracts \
             WHERE id = $1::UUID"
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Option<Active<Contract>>, employee::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Active<Contract>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Active<Contract>>, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let employee_id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM contracts \
             WHERE employee_id = $1::UUID \
               AND dismissed_on IS NULL \
             ORDER BY hired_on DESC, created_at DESC \
             LIMIT 1"
        );
        Ok(self
            .query_opt(&sql, &[&employee_id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row)
            .map(Active))
    }
}

impl<C> Database<Select<By<Vec<Contract>, company::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Contract>, company::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let company_id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM contracts \
             WHERE company_id = $1::UUID \
             ORDER BY hired_on DESC, created_at DESC, id DESC"
        );
        Ok(self
            .query(&sql, &[&company_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Contract>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Contract>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(contract): Insert<Contract>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(contract))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Contract>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(contract): Update<Contract>,
    ) -> Result<Self::Ok, Self::Err> {
        let Contract {
            id,
            employee_id,
            company_id,
            hired_on,
            dismissed_on,
            created_at,
        } = contract;

        const SQL: &str = "\
            INSERT INTO contracts (\
                id, employee_id, company_id, \
                hired_on, dismissed_on, \
                created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, \
                $4::DATE, $5::DATE, \
                $6::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET employee_id = EXCLUDED.employee_id, \
                company_id = EXCLUDED.company_id, \
                hired_on = EXCLUDED.hired_on, \
                dismissed_on = EXCLUDED.dismissed_on, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &employee_id,
                &company_id,
                &hired_on,
                &dismissed_on,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
