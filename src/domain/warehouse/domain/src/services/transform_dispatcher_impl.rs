// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use dill::*;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct TransformDispatcherImpl {
    validation_gate: Arc<dyn ValidationGate>,
    scd2_upsert_engine: Arc<dyn Scd2UpsertEngine>,
    fact_loader: Arc<dyn StarJoinFactLoader>,
}

#[component(pub)]
#[interface(dyn TransformDispatcher)]
impl TransformDispatcherImpl {
    pub fn new(
        validation_gate: Arc<dyn ValidationGate>,
        scd2_upsert_engine: Arc<dyn Scd2UpsertEngine>,
        fact_loader: Arc<dyn StarJoinFactLoader>,
    ) -> Self {
        Self {
            validation_gate,
            scd2_upsert_engine,
            fact_loader,
        }
    }

    async fn ensure_valid(&self, table: WarehouseTable) -> Result<(), TransformError> {
        let report = self.validation_gate.validate(table).await?;
        if !report.is_valid() {
            return Err(InvalidDataError { report }.into());
        }

        tracing::debug!(%table, "Validation gate passed");
        Ok(())
    }
}

#[async_trait::async_trait]
impl TransformDispatcher for TransformDispatcherImpl {
    #[tracing::instrument(level = "debug", skip_all, fields(%table_name))]
    async fn run(&self, table_name: &str) -> Result<TransformOutcome, TransformError> {
        let table: WarehouseTable = table_name.parse()?;

        if table.is_fact_source() {
            // The fact path consumes both operational tables, so both must
            // pass the gate before the join runs
            self.ensure_valid(WarehouseTable::Orders).await?;
            self.ensure_valid(WarehouseTable::OrderDetails).await?;

            let result = self.fact_loader.load_facts().await?;
            Ok(TransformOutcome::FactsLoaded(result))
        } else {
            self.ensure_valid(table).await?;

            let result = self.scd2_upsert_engine.upsert_dimension(table).await?;
            Ok(TransformOutcome::DimensionUpserted(result))
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;

    use super::*;

    #[derive(Default)]
    struct GateStub {
        invalid_tables: Vec<WarehouseTable>,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ValidationGate for GateStub {
        async fn validate(
            &self,
            table: WarehouseTable,
        ) -> Result<ValidationReport, ValidateTableError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if self.invalid_tables.contains(&table) {
                Ok(ValidationReport {
                    table,
                    violations: vec![Violation::NotNull {
                        column: "city".to_string(),
                        row_count: 1,
                    }],
                })
            } else {
                Ok(ValidationReport::valid(table))
            }
        }
    }

    #[derive(Default)]
    struct UpsertStub {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Scd2UpsertEngine for UpsertStub {
        async fn upsert_dimension(
            &self,
            table: WarehouseTable,
        ) -> Result<UpsertResult, UpsertDimensionError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(UpsertResult {
                table,
                run_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                rows_staged: 1,
                rows_closed: 0,
                rows_inserted: 1,
            })
        }
    }

    #[derive(Default)]
    struct FactLoaderStub {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl StarJoinFactLoader for FactLoaderStub {
        async fn load_facts(&self) -> Result<FactLoadResult, LoadFactsError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(FactLoadResult {
                run_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                rows_staged: 2,
                rows_inserted: 2,
                rows_unresolved: 0,
            })
        }
    }

    fn dispatcher(
        gate: Arc<GateStub>,
        upsert: Arc<UpsertStub>,
        facts: Arc<FactLoaderStub>,
    ) -> TransformDispatcherImpl {
        TransformDispatcherImpl::new(gate, upsert, facts)
    }

    #[tokio::test]
    async fn test_dimension_table_routes_to_upsert() {
        let gate = Arc::new(GateStub::default());
        let upsert = Arc::new(UpsertStub::default());
        let facts = Arc::new(FactLoaderStub::default());

        let outcome = dispatcher(gate.clone(), upsert.clone(), facts.clone())
            .run("stores")
            .await
            .unwrap();

        assert!(matches!(outcome, TransformOutcome::DimensionUpserted(_)));
        assert_eq!(gate.calls.load(Ordering::Relaxed), 1);
        assert_eq!(upsert.calls.load(Ordering::Relaxed), 1);
        assert_eq!(facts.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_fact_source_routes_to_fact_loader_and_validates_both_tables() {
        let gate = Arc::new(GateStub::default());
        let upsert = Arc::new(UpsertStub::default());
        let facts = Arc::new(FactLoaderStub::default());

        let outcome = dispatcher(gate.clone(), upsert.clone(), facts.clone())
            .run("orderdetails")
            .await
            .unwrap();

        assert!(matches!(outcome, TransformOutcome::FactsLoaded(_)));
        assert_eq!(gate.calls.load(Ordering::Relaxed), 2);
        assert_eq!(upsert.calls.load(Ordering::Relaxed), 0);
        assert_eq!(facts.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_unknown_table_is_a_configuration_error() {
        let result = dispatcher(
            Arc::new(GateStub::default()),
            Arc::new(UpsertStub::default()),
            Arc::new(FactLoaderStub::default()),
        )
        .run("warehouses")
        .await;

        assert!(matches!(result, Err(TransformError::UnknownTable(_))));
    }

    #[tokio::test]
    async fn test_invalid_data_stops_the_run_before_transformation() {
        let gate = Arc::new(GateStub {
            invalid_tables: vec![WarehouseTable::Customers],
            calls: AtomicUsize::new(0),
        });
        let upsert = Arc::new(UpsertStub::default());

        let result = dispatcher(gate, upsert.clone(), Arc::new(FactLoaderStub::default()))
            .run("customers")
            .await;

        assert!(matches!(result, Err(TransformError::InvalidData(_))));
        assert_eq!(upsert.calls.load(Ordering::Relaxed), 0);
    }
}
