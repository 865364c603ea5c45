// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::WarehouseTable;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Rows with a NULL in a column the registry declares required.
    NotNull { column: String, row_count: u64 },
    /// Natural-key values shared by more than one row.
    UniqueKey { column: String, values: Vec<String> },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotNull { column, row_count } => {
                write!(f, "{row_count} row(s) with NULL in column '{column}'")
            }
            Self::UniqueKey { column, values } => {
                write!(f, "duplicate values for key '{column}': {}", values.join(", "))
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Outcome of running the validation gate over a freshly loaded raw table.
/// All violations found in one pass are accumulated, so upstream data can be
/// fixed in a single round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub table: WarehouseTable,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn valid(table: WarehouseTable) -> Self {
        Self {
            table,
            violations: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "table '{}' is valid", self.table)
        } else {
            write!(f, "table '{}' has violations: ", self.table)?;
            for (i, violation) in self.violations.iter().enumerate() {
                if i > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{violation}")?;
            }
            Ok(())
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
