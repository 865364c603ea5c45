// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::{ConcurrentRunError, FactLoadResult, InternalError, RunAlreadyExecutedError};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Builds fact rows from the order / order-detail pair in one transaction:
/// denormalize the two tables, resolve every natural key against the
/// *current* version of its dimension plus the date dimension, append the
/// resolved rows to the fact table. The fact table is append-only; rows that
/// fail to resolve are counted in the result rather than silently dropped.
#[async_trait::async_trait]
pub trait StarJoinFactLoader: Send + Sync {
    async fn load_facts(&self) -> Result<FactLoadResult, LoadFactsError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum LoadFactsError {
    #[error(transparent)]
    UnresolvedRows(#[from] UnresolvedFactRowsError),

    #[error(transparent)]
    RunAlreadyExecuted(#[from] RunAlreadyExecutedError),

    #[error(transparent)]
    ConcurrentRun(#[from] ConcurrentRunError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
#[error("{row_count} fact row(s) did not resolve to a current dimension version")]
pub struct UnresolvedFactRowsError {
    pub row_count: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
