//! [`Employee`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{company, employee, Employee},
    infra::{
        database::{
            self,
            postgres::{Connection, FuzzPattern},
            Postgres,
        },
        Database,
    },
    read,
};

/// Columns of the `employees` table, in the order [`from_row()`] expects.
const COLUMNS: &str = "\
    id, company_id, \
    family_name, first_name, patronymic, \
    personal_id, tin, \
    passport_series, passport_number, passport_issued_by, passport_issued_on, \
    address, phone, \
    is_employed, created_at";

/// Builds an [`Employee`] out of the provided [`Row`] selected with
/// [`COLUMNS`].
fn from_row(row: &Row) -> Employee {
    Employee {
        id: row.get("id"),
        company_id: row.get("company_id"),
        family_name: row.get("family_name"),
        first_name: row.get("first_name"),
        patronymic: row.get("patronymic"),
        personal_id: row.get("personal_id"),
        tin: row.get("tin"),
        passport: employee::Passport {
            series: row.get("passport_series"),
            number: row.get("passport_number"),
            issued_by: row.get("passport_issued_by"),
            issued_on: row.get("passport_issued_on"),
        },
        address: row.get("address"),
        phone: row.get("phone"),
        is_employed: row.get("is_employed"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Employee>, employee::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Employee>, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM employees \
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

impl<C>
    Database<
        Select<By<Option<Employee>, (company::Id, employee::PersonalId)>>,
    > for Postgres<C>
where
    C: Connection,
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

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM employees \
             WHERE company_id = $1::UUID \
               AND personal_id = $2::VARCHAR \
             LIMIT 1"
        );
        Ok(self
            .query_opt(&sql, &[&company_id, &personal_id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Employee>, read::employee::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Employee>, read::employee::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::employee::list::Selector {
            company_id,
            filter:
                read::employee::list::Filter {
                    only_employed,
                    name,
                },
        } = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&company_id];

        let name_pattern = name.as_deref().map(FuzzPattern::new);
        let name_idx = name_pattern.as_ref().map(|n| {
            ps.push(n);
            ps.len()
        });

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM employees \
             WHERE company_id = $1::UUID \
                   {employed_filtering} \
                   {name_filtering} \
             ORDER BY family_name, first_name, patronymic, id",
            employed_filtering =
                if only_employed { "AND is_employed" } else { "" },
            name_filtering = name_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!(
                    "AND (family_name || ' ' || first_name || ' ' || \
                          patronymic) ILIKE ${idx}::VARCHAR"
                ))
            }),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Employee>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Employee>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(employee): Insert<Employee>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(employee))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Employee>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(employee): Update<Employee>,
    ) -> Result<Self::Ok, Self::Err> {
        let Employee {
            id,
            company_id,
            family_name,
            first_name,
            patronymic,
            personal_id,
            tin,
            passport:
                employee::Passport {
                    series,
                    number,
                    issued_by,
                    issued_on,
                },
            address,
            phone,
            is_employed,
            created_at,
        } = employee;

        const SQL: &str = "\
            INSERT INTO employees (\
                id, company_id, \
                family_name, first_name, patronymic, \
                personal_id, tin, \
                passport_series, passport_number, \
                passport_issued_by, passport_issued_on, \
                address, phone, \
                is_employed, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, \
                $3::VARCHAR, $4::VARCHAR, $5::VARCHAR, \
                $6::VARCHAR, $7::VARCHAR, \
                $8::VARCHAR, $9::VARCHAR, \
                $10::VARCHAR, $11::DATE, \
                $12::VARCHAR, $13::VARCHAR, \
                $14::BOOLEAN, $15::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET company_id = EXCLUDED.company_id, \
                family_name = EXCLUDED.family_name, \
                first_name = EXCLUDED.first_name, \
                patronymic = EXCLUDED.patronymic, \
                personal_id = EXCLUDED.personal_id, \
                tin = EXCLUDED.tin, \
                passport_series = EXCLUDED.passport_series, \
                passport_number = EXCLUDED.passport_number, \
                passport_issued_by = EXCLUDED.passport_issued_by, \
                passport_issued_on = EXCLUDED.passport_issued_on, \
                address = EXCLUDED.address, \
                phone = EXCLUDED.phone, \
                is_employed = EXCLUDED.is_employed, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &company_id,
                &family_name,
                &first_name,
                &patronymic,
                &personal_id,
                &tin,
                &series,
                &number,
                &issued_by,
                &issued_on,
                &address,
                &phone,
                &is_employed,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Employee, employee::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Employee, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: employee::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO employees_lock (id) \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO UPDATE \
            SET id = EXCLUDED.id";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
