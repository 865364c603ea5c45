// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::NaiveDate;
use thiserror::Error;

use crate::{InternalError, PopulateDatesResult};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Fills the date dimension with one row per calendar day in the inclusive
/// range. Append-only and idempotent: days that already have a row are
/// skipped, existing rows are never touched.
#[async_trait::async_trait]
pub trait DateDimensionPopulator: Send + Sync {
    async fn populate(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<PopulateDatesResult, PopulateDatesError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum PopulateDatesError {
    #[error(transparent)]
    InvalidRange(#[from] InvalidDateRangeError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
#[error("Invalid date range: {from} is after {to}")]
pub struct InvalidDateRangeError {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
