//! [`Company`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{company, Company},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of the `companies` table, in the order [`from_row()`] expects.
const COLUMNS: &str = "\
    id, name, address, phone, tin, \
    bank_account, bank_name, bank_code, activity_code, manager, \
    registered_on, is_current, \
    created_at, deleted_at";

/// Builds a [`Company`] out of the provided [`Row`] selected with
/// [`COLUMNS`].
fn from_row(row: &Row) -> Company {
    Company {
        id: row.get("id"),
        name: row.get("name"),
        address: row.get("address"),
        phone: row.get("phone"),
        tin: row.get("tin"),
        bank_account: row.get("bank_account"),
        bank_name: row.get("bank_name"),
        bank_code: row.get("bank_code"),
        activity_code: row.get("activity_code"),
        manager: row.get("manager"),
        registered_on: row.get("registered_on"),
        is_current: row.get("is_current"),
        created_at: row.get("created_at"),
        deleted_at: row.get("deleted_at"),
    }
}

impl<C> Database<Select<By<Option<Company>, company::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Company>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Company>, company::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM companies \
             WHERE id = $1::UUID \
               AND deleted_at IS NULL"
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Option<Company>, read::company::Current>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Company>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Option<Company>, read::company::Current>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!(
            "SELECT {COLUMNS} \
             FROM companies \
             WHERE is_current \
               AND deleted_at IS NULL \
             LIMIT 1"
        );
        Ok(self
            .query_opt(&sql, &[])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Company>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Company>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Company>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!(
            "SELECT {COLUMNS} \
             FROM companies \
             WHERE deleted_at IS NULL \
             ORDER BY name, id"
        );
        Ok(self
            .query(&sql, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Company>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Company>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(company): Insert<Company>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(company)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Company>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(company): Update<Company>,
    ) -> Result<Self::Ok, Self::Err> {
        let Company {
            id,
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
            is_current,
            created_at,
            deleted_at,
        } = company;

        const SQL: &str = "\
            INSERT INTO companies (\
                id, name, address, phone, tin, \
                bank_account, bank_name, bank_code, activity_code, manager, \
                registered_on, is_current, \
                created_at, deleted_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, \
                $6::VARCHAR, $7::VARCHAR, $8::VARCHAR, $9::VARCHAR, \
                $10::VARCHAR, \
                $11::DATE, $12::BOOLEAN, \
                $13::TIMESTAMPTZ, $14::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                address = EXCLUDED.address, \
                phone = EXCLUDED.phone, \
                tin = EXCLUDED.tin, \
                bank_account = EXCLUDED.bank_account, \
                bank_name = EXCLUDED.bank_name, \
                bank_code = EXCLUDED.bank_code, \
                activity_code = EXCLUDED.activity_code, \
                manager = EXCLUDED.manager, \
                registered_on = EXCLUDED.registered_on, \
                is_current = EXCLUDED.is_current, \
                created_at = EXCLUDED.created_at, \
                deleted_at = EXCLUDED.deleted_at";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &address,
                &phone,
                &tin,
                &bank_account,
                &bank_name,
                &bank_code,
                &activity_code,
                &manager,
                &registered_on,
                &is_current,
                &created_at,
                &deleted_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Company, company::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Company, company::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: company::Id = by.into_inner();

        // Touching the row keeps it locked until the transaction ends.
        const SQL: &str = "\
            INSERT INTO companies_lock (id) \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO UPDATE \
            SET id = EXCLUDED.id";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
