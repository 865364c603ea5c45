// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Quotes an identifier with double quotes, doubling any embedded quote.
/// Valid for both Postgres and SQLite. Table and column names originate from
/// configuration, never from user input, but quoting removes the injection
/// surface entirely.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quotes and comma-joins a list of identifiers for use in a column list.
pub fn quoted_column_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .map(quote_ident)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-joins a list of pre-rendered SQL fragments.
pub fn sql_list(fragments: impl IntoIterator<Item = String>) -> String {
    fragments.into_iter().collect::<Vec<_>>().join(", ")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_plain() {
        assert_eq!(quote_ident("customer_id"), r#""customer_id""#);
    }

    #[test]
    fn test_quote_ident_embedded_quote() {
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
    }

    #[test]
    fn test_quoted_column_list() {
        assert_eq!(
            quoted_column_list(["a", "b", "c"]),
            r#""a", "b", "c""#
        );
    }
}
