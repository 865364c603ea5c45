// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// How the SCD2 engine reacts to a natural key that is present in both the
/// staged load and the open dimension versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VersioningPolicy {
    /// Close every matching open version and insert a fresh one, whether or
    /// not any attribute actually changed. A reload therefore always cuts a
    /// new validity window; callers must not run the engine twice for the
    /// same table on the same day.
    #[default]
    ForceVersionOnReload,

    /// Close and re-insert only members with at least one changed attribute;
    /// an unchanged reload is a no-op.
    DiffGated,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct TransformOptions {
    #[serde(default)]
    pub versioning_policy: VersioningPolicy,

    /// When set, fact rows that do not resolve against a current dimension
    /// version fail the whole run instead of being excluded and counted.
    #[serde(default)]
    pub fail_on_unresolved_facts: bool,

    /// Record each (table, run date) in the run ledger and refuse a second
    /// run for the same pair. Disabling this restores the historical
    /// unguarded behavior.
    #[serde(default = "TransformOptions::default_enforce_run_ledger")]
    pub enforce_run_ledger: bool,
}

impl TransformOptions {
    fn default_enforce_run_ledger() -> bool {
        true
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            versioning_policy: VersioningPolicy::default(),
            fail_on_unresolved_facts: false,
            enforce_run_ledger: true,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
