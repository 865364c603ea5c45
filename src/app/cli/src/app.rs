// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::str::FromStr;

use database_common::build_pg_pool;
use dill::{Catalog, CatalogBuilder};
use sqlx::PgPool;
use starmart_warehouse::*;
use starmart_warehouse_postgres::*;
use time_source::SystemTimeSourceDefault;

use crate::cli::{Cli, Command};
use crate::config::{self, CliConfig};
use crate::error::CliError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let cli_config = CliConfig::load(&cli.config)?;
    let credentials = config::credentials_from_env()?;

    let pg_pool = build_pg_pool(&cli_config.database, &credentials)
        .await
        .map_err(CliError::Connect)?;

    if cli.migrate {
        tracing::info!("Applying pending migrations");
        sqlx::migrate!("../../../migrations/postgres")
            .run(&pg_pool)
            .await?;
    }

    let catalog = build_catalog(pg_pool, cli_config.transform);

    match cli.command {
        Command::Validate { table } => {
            let table = WarehouseTable::from_str(&table)?;
            let gate = catalog.get_one::<dyn ValidationGate>().int_err()?;

            let report = gate.validate(table).await?;
            if !report.is_valid() {
                return Err(InvalidDataError { report }.into());
            }

            tracing::info!(%table, "Validation passed");
            println!("{report}");
        }

        Command::Upsert { table } => {
            let table = WarehouseTable::from_str(&table)?;
            let engine = catalog.get_one::<dyn Scd2UpsertEngine>().int_err()?;

            let result = engine.upsert_dimension(table).await?;
            report_upsert(&result);
        }

        Command::LoadFacts => {
            let loader = catalog.get_one::<dyn StarJoinFactLoader>().int_err()?;

            let result = loader.load_facts().await?;
            report_fact_load(&result);
        }

        Command::PopulateDates { from, to } => {
            let populator = catalog.get_one::<dyn DateDimensionPopulator>().int_err()?;

            let result = populator.populate(from, to).await?;
            tracing::info!(
                rows_inserted = result.rows_inserted,
                rows_skipped = result.rows_skipped,
                "Date dimension populated"
            );
            println!(
                "Populated date dimension: {} inserted, {} already present",
                result.rows_inserted, result.rows_skipped
            );
        }

        Command::Run { table } => {
            let dispatcher = catalog.get_one::<dyn TransformDispatcher>().int_err()?;

            match dispatcher.run(&table).await? {
                TransformOutcome::DimensionUpserted(result) => report_upsert(&result),
                TransformOutcome::FactsLoaded(result) => report_fact_load(&result),
            }
        }
    }

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn build_catalog(pg_pool: PgPool, options: TransformOptions) -> Catalog {
    let mut b = CatalogBuilder::new();
    b.add_value(pg_pool);
    b.add_value(SchemaRegistry::new());
    b.add_value(options);
    b.add::<SystemTimeSourceDefault>();
    b.add::<PostgresValidationGate>();
    b.add::<PostgresScd2UpsertEngine>();
    b.add::<PostgresStarJoinFactLoader>();
    b.add::<PostgresDateDimensionPopulator>();
    b.add::<TransformDispatcherImpl>();
    b.build()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn report_upsert(result: &UpsertResult) {
    tracing::info!(
        table = %result.table,
        run_date = %result.run_date,
        rows_staged = result.rows_staged,
        rows_closed = result.rows_closed,
        rows_inserted = result.rows_inserted,
        "Dimension upserted"
    );
    println!(
        "Upserted dimension for '{}' on {}: {} staged, {} closed, {} inserted",
        result.table, result.run_date, result.rows_staged, result.rows_closed, result.rows_inserted
    );
}

fn report_fact_load(result: &FactLoadResult) {
    tracing::info!(
        run_date = %result.run_date,
        rows_staged = result.rows_staged,
        rows_inserted = result.rows_inserted,
        rows_unresolved = result.rows_unresolved,
        "Facts loaded"
    );
    println!(
        "Loaded facts on {}: {} staged, {} inserted, {} unresolved",
        result.run_date, result.rows_staged, result.rows_inserted, result.rows_unresolved
    );
}
