// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::{InternalError, ValidationReport, WarehouseTable};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Read-only check of a freshly loaded raw table against the registry's
/// NOT-NULL and natural-key-uniqueness constraints. Must run and pass before
/// any transformation of that table is allowed to proceed.
#[async_trait::async_trait]
pub trait ValidationGate: Send + Sync {
    async fn validate(&self, table: WarehouseTable)
    -> Result<ValidationReport, ValidateTableError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum ValidateTableError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
