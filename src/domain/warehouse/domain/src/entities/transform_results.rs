// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::NaiveDate;

use crate::WarehouseTable;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertResult {
    pub table: WarehouseTable,
    pub run_date: NaiveDate,
    /// Distinct natural-key + attribute tuples staged from the raw load.
    pub rows_staged: u64,
    /// Open dimension versions whose validity window was closed.
    pub rows_closed: u64,
    /// Fresh versions inserted with an open validity window.
    pub rows_inserted: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactLoadResult {
    pub run_date: NaiveDate,
    /// Denormalized (order, product-line) pairs staged for resolution.
    pub rows_staged: u64,
    /// Rows appended to the fact table.
    pub rows_inserted: u64,
    /// Staged rows that failed to resolve against a current dimension
    /// version or the date dimension and were excluded from the load.
    pub rows_unresolved: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulateDatesResult {
    pub rows_inserted: u64,
    /// Days in the requested range that already had a dimension row.
    pub rows_skipped: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
