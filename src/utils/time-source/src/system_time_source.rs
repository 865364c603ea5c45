// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use dill::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Abstracts the system clock. Components that depend on the current time
/// (e.g. to stamp an SCD2 validity window) must obtain it through this trait
/// so that tests can pin "today" to a known value.
pub trait SystemTimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date of `now()` in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct SystemTimeSourceDefault;

#[component(pub)]
#[interface(dyn SystemTimeSource)]
impl SystemTimeSourceDefault {
    pub fn new() -> Self {
        Self
    }
}

impl SystemTimeSource for SystemTimeSourceDefault {
    fn now(&self) -> DateTime<Utc> {
        let now = Utc::now();

        // Truncate to milliseconds to stay consistent across storage backends
        // that do not keep full nanosecond precision
        DateTime::parse_from_rfc3339(&now.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap()
            .into()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Settable clock for tests.
pub struct SystemTimeSourceStub {
    t: Mutex<Option<DateTime<Utc>>>,
}

#[component(pub)]
#[interface(dyn SystemTimeSource)]
impl SystemTimeSourceStub {
    pub fn new() -> Self {
        Self {
            t: Mutex::new(None),
        }
    }

    pub fn new_set(t: DateTime<Utc>) -> Self {
        Self {
            t: Mutex::new(Some(t)),
        }
    }

    pub fn set(&self, t: DateTime<Utc>) {
        *self.t.lock().unwrap() = Some(t);
    }

    pub fn unset(&self) {
        *self.t.lock().unwrap() = None;
    }
}

impl SystemTimeSource for SystemTimeSourceStub {
    fn now(&self) -> DateTime<Utc> {
        match *self.t.lock().unwrap() {
            None => Utc::now(),
            Some(t) => t,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
