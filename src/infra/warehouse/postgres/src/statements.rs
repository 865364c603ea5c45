// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Postgres dialect of the registry-driven statement builder: `$n`
//! placeholders, null-safe comparison via `IS DISTINCT FROM`.

use database_common::{quote_ident, quoted_column_list, sql_list};
use starmart_warehouse::{ColumnDef, DimensionSchema, VersioningPolicy};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn column_ddl(column: &ColumnDef) -> String {
    let not_null = if column.nullable { "" } else { " NOT NULL" };
    format!(
        "{} {}{}",
        quote_ident(column.name),
        column.sql_type.ddl(),
        not_null
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Staging relation scoped to this run's transaction.
pub(crate) fn create_staging_table(staging_table: &str, columns: &[ColumnDef]) -> String {
    format!(
        "CREATE TEMPORARY TABLE {} ({}) ON COMMIT DROP",
        quote_ident(staging_table),
        sql_list(columns.iter().map(column_ddl)),
    )
}

/// Binds: $1 = load date.
pub(crate) fn stage_distinct_source_rows(schema: &DimensionSchema) -> String {
    let tracked = quoted_column_list(schema.tracked_column_names());
    format!(
        "INSERT INTO {staging} ({tracked}, {load_date}) SELECT DISTINCT {tracked}, $1 FROM {source}",
        staging = quote_ident(schema.staging_table),
        load_date = quote_ident(DimensionSchema::LOAD_DATE_COLUMN),
        source = quote_ident(schema.source_table.source_name()),
    )
}

/// Binds: $1 = day before the run date, $2 = open end-date sentinel.
pub(crate) fn close_superseded_versions(
    schema: &DimensionSchema,
    policy: VersioningPolicy,
) -> String {
    let dimension = quote_ident(schema.dimension_table);
    let staging = quote_ident(schema.staging_table);
    let key = quote_ident(schema.natural_key.name);
    let end_date = quote_ident(DimensionSchema::END_DATE_COLUMN);

    match policy {
        VersioningPolicy::ForceVersionOnReload => format!(
            "UPDATE {dimension} SET {end_date} = $1 \
             WHERE {end_date} = $2 AND {key} IN (SELECT {key} FROM {staging})",
        ),
        VersioningPolicy::DiffGated => {
            let changed = schema
                .attributes
                .iter()
                .map(|c| {
                    let column = quote_ident(c.name);
                    format!("d.{column} IS DISTINCT FROM s.{column}")
                })
                .collect::<Vec<_>>()
                .join(" OR ");

            format!(
                "UPDATE {dimension} SET {end_date} = $1 \
                 WHERE {end_date} = $2 AND {key} IN (\
                 SELECT s.{key} FROM {staging} s \
                 JOIN {dimension} d ON d.{key} = s.{key} AND d.{end_date} = $2 \
                 WHERE {changed})",
            )
        }
    }
}

/// Binds: $1 = open end-date sentinel. Under either policy only natural keys
/// without an open version receive a new row, which makes the statement a
/// no-op for members the diff-gated close left untouched.
pub(crate) fn insert_new_versions(schema: &DimensionSchema) -> String {
    let dimension = quote_ident(schema.dimension_table);
    let staging = quote_ident(schema.staging_table);
    let key = quote_ident(schema.natural_key.name);
    let end_date = quote_ident(DimensionSchema::END_DATE_COLUMN);

    let tracked = quoted_column_list(schema.tracked_column_names());
    let staged = sql_list(
        schema
            .tracked_column_names()
            .into_iter()
            .map(|name| format!("s.{}", quote_ident(name))),
    );

    format!(
        "INSERT INTO {dimension} ({tracked}, {start_date}, {end_date}) \
         SELECT {staged}, s.{load_date}, $1 FROM {staging} s \
         WHERE NOT EXISTS (\
         SELECT 1 FROM {dimension} d WHERE d.{key} = s.{key} AND d.{end_date} = $1)",
        start_date = quote_ident(DimensionSchema::START_DATE_COLUMN),
        load_date = quote_ident(DimensionSchema::LOAD_DATE_COLUMN),
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) fn count_null_rows(table: &str, column: &str) -> String {
    format!(
        "SELECT COUNT(*) FROM {} WHERE {} IS NULL",
        quote_ident(table),
        quote_ident(column),
    )
}

pub(crate) fn duplicate_key_values(table: &str, key: &str) -> String {
    let key = quote_ident(key);
    format!(
        "SELECT CAST({key} AS TEXT), COUNT(*) FROM {} GROUP BY {key} HAVING COUNT(*) > 1 ORDER BY 1",
        quote_ident(table),
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Binds: $1 = lock key. Scoped to the enclosing transaction, released on
/// commit or rollback.
pub(crate) fn try_advisory_lock() -> String {
    "SELECT pg_try_advisory_xact_lock(hashtext($1))".to_string()
}

/// Binds: $1 = table name, $2 = run date. A primary-key conflict means the
/// table was already transformed today.
pub(crate) fn record_transform_run() -> String {
    "INSERT INTO \"transform_run_ledger\" (\"table_name\", \"run_date\") VALUES ($1, $2)"
        .to_string()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) const FACT_STAGING_TABLE: &str = "fact_orders_staging";

pub(crate) fn create_fact_staging_table() -> String {
    format!(
        "CREATE TEMPORARY TABLE {} (\
         \"order_id\" INTEGER NOT NULL, \
         \"customer_id\" INTEGER NOT NULL, \
         \"store_id\" INTEGER NOT NULL, \
         \"product_id\" INTEGER NOT NULL, \
         \"quantity\" INTEGER NOT NULL, \
         \"unit_price\" DECIMAL(8,2) NOT NULL, \
         \"total_price\" DECIMAL(8,2) NOT NULL, \
         \"order_date\" DATE NOT NULL) ON COMMIT DROP",
        quote_ident(FACT_STAGING_TABLE),
    )
}

/// One staged row per (order, product-line) pair with the computed total.
pub(crate) fn stage_denormalized_order_lines() -> String {
    format!(
        "INSERT INTO {} (\"order_id\", \"customer_id\", \"store_id\", \"product_id\", \
         \"quantity\", \"unit_price\", \"total_price\", \"order_date\") \
         SELECT o.\"order_id\", o.\"customer_id\", o.\"store_id\", od.\"product_id\", \
         od.\"quantity\", od.\"unit_price\", od.\"unit_price\" * od.\"quantity\", o.\"order_date\" \
         FROM \"orders\" o \
         JOIN \"orderdetails\" od ON od.\"order_id\" = o.\"order_id\"",
        quote_ident(FACT_STAGING_TABLE),
    )
}

/// Binds: $1 = open end-date sentinel. Inner joins resolve each staged row
/// against the current version of every dimension; rows that do not resolve
/// are left behind in staging and accounted for by the caller.
pub(crate) fn insert_resolved_fact_rows() -> String {
    format!(
        "INSERT INTO \"fact_orders\" (\"order_id\", \"customer_key\", \"store_key\", \
         \"product_key\", \"quantity\", \"unit_price\", \"total_price\", \"order_date_key\") \
         SELECT s.\"order_id\", dc.\"customer_key\", ds.\"store_key\", dp.\"product_key\", \
         s.\"quantity\", s.\"unit_price\", s.\"total_price\", dd.\"date_key\" \
         FROM {} s \
         JOIN \"dim_customers\" dc ON dc.\"customer_id\" = s.\"customer_id\" AND dc.\"end_date\" = $1 \
         JOIN \"dim_stores\" ds ON ds.\"store_id\" = s.\"store_id\" AND ds.\"end_date\" = $1 \
         JOIN \"dim_products\" dp ON dp.\"product_id\" = s.\"product_id\" AND dp.\"end_date\" = $1 \
         JOIN \"dim_dates\" dd ON dd.\"date\" = s.\"order_date\"",
        quote_ident(FACT_STAGING_TABLE),
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Binds: $1..$8 = date key, date, year, quarter, month, day, weekday, week.
pub(crate) fn insert_date_row() -> String {
    "INSERT INTO \"dim_dates\" \
     (\"date_key\", \"date\", \"year\", \"quarter\", \"month\", \"day\", \"weekday\", \"week\") \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
     ON CONFLICT (\"date_key\") DO NOTHING"
        .to_string()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use starmart_warehouse::{SchemaRegistry, WarehouseTable};

    use super::*;

    fn stores_schema() -> DimensionSchema {
        SchemaRegistry::new()
            .dimension_schema(WarehouseTable::Stores)
            .unwrap()
    }

    #[test]
    fn test_staging_table_is_dropped_on_commit() {
        let registry = SchemaRegistry::new();
        let columns = registry
            .columns_for(WarehouseTable::Stores, starmart_warehouse::ColumnRole::Staging)
            .unwrap();

        let sql = create_staging_table("dim_stores_staging", &columns);
        assert!(sql.starts_with("CREATE TEMPORARY TABLE \"dim_stores_staging\""));
        assert!(sql.ends_with("ON COMMIT DROP"));
    }

    #[test]
    fn test_close_superseded_versions_force_policy() {
        assert_eq!(
            close_superseded_versions(&stores_schema(), VersioningPolicy::ForceVersionOnReload),
            "UPDATE \"dim_stores\" SET \"end_date\" = $1 \
             WHERE \"end_date\" = $2 AND \"store_id\" IN \
             (SELECT \"store_id\" FROM \"dim_stores_staging\")",
        );
    }

    #[test]
    fn test_close_superseded_versions_diff_gated_uses_null_safe_comparison() {
        let sql = close_superseded_versions(&stores_schema(), VersioningPolicy::DiffGated);

        for attribute in ["store_name", "address", "city", "state", "zip_code"] {
            assert!(
                sql.contains(&format!(
                    "d.\"{attribute}\" IS DISTINCT FROM s.\"{attribute}\""
                )),
                "missing comparison for {attribute}: {sql}"
            );
        }
    }

    #[test]
    fn test_insert_new_versions_targets_keys_without_open_row() {
        assert_eq!(
            insert_new_versions(&stores_schema()),
            "INSERT INTO \"dim_stores\" (\"store_id\", \"store_name\", \"address\", \"city\", \
             \"state\", \"zip_code\", \"start_date\", \"end_date\") \
             SELECT s.\"store_id\", s.\"store_name\", s.\"address\", s.\"city\", s.\"state\", \
             s.\"zip_code\", s.\"load_date\", $1 FROM \"dim_stores_staging\" s \
             WHERE NOT EXISTS (\
             SELECT 1 FROM \"dim_stores\" d WHERE d.\"store_id\" = s.\"store_id\" \
             AND d.\"end_date\" = $1)",
        );
    }
}
