//! Filter operators
//!
//! The UI layer speaks a small symbolic alphabet (`""`, `"!"`, `">"`, ...).
//! The backend expects normalized operator names (`contain_in`, `gt`, ...).
//! [`Operator`] is the bridge between the two.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};

/// Normalized filter operator as sent on the wire (`o` field of a filter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Substring match against any of the values (merge operator)
    ContainIn,
    /// Substring mismatch
    NotContain,
    /// Substring mismatch against all of the values (merge operator)
    NotContainIn,
    /// Greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Less than
    Lt,
    /// Less than or equal
    Lte,
    /// Equal to any of the values (merge operator)
    In,
    /// Equal to none of the values (merge operator)
    NotIn,
    /// Regular expression match
    Regex,
    /// Single-value substring match, only used by autocomplete lookups
    Contain,
}

/// UI symbol table: symbol -> normalized operator
const SYMBOLS: [(&str, Operator); 9] = [
    ("", Operator::ContainIn),
    ("!", Operator::NotContain),
    (">", Operator::Gt),
    (">=", Operator::Gte),
    ("<", Operator::Lt),
    ("<=", Operator::Lte),
    ("=", Operator::In),
    ("!=", Operator::NotIn),
    ("$", Operator::Regex),
];

impl Operator {
    /// Resolve a UI symbol into its normalized operator.
    ///
    /// Unknown symbols are an error; they are never mapped to a default
    /// because a wrong operator silently changes merge behavior.
    pub fn from_symbol(symbol: &str) -> QueryResult<Self> {
        SYMBOLS
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, op)| *op)
            .ok_or_else(|| QueryError::UnknownOperator(symbol.to_string()))
    }

    /// UI symbol for this operator, if the UI alphabet has one
    pub fn symbol(&self) -> Option<&'static str> {
        SYMBOLS.iter().find(|(_, op)| op == self).map(|(s, _)| *s)
    }

    /// Whether repeated predicates with this operator on the same key
    /// collapse into a single array-valued filter
    pub fn is_mergeable(&self) -> bool {
        matches!(
            self,
            Operator::ContainIn | Operator::NotContainIn | Operator::In | Operator::NotIn
        )
    }

    /// Wire name of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::ContainIn => "contain_in",
            Operator::NotContain => "not_contain",
            Operator::NotContainIn => "not_contain_in",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::In => "in",
            Operator::NotIn => "not_in",
            Operator::Regex => "regex",
            Operator::Contain => "contain",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table() {
        let cases = [
            ("", Operator::ContainIn),
            ("!", Operator::NotContain),
            (">", Operator::Gt),
            (">=", Operator::Gte),
            ("<", Operator::Lt),
            ("<=", Operator::Lte),
            ("=", Operator::In),
            ("!=", Operator::NotIn),
            ("$", Operator::Regex),
        ];
        for (symbol, expected) in cases {
            assert_eq!(Operator::from_symbol(symbol).unwrap(), expected, "symbol {symbol:?}");
            assert_eq!(expected.symbol(), Some(symbol));
        }
    }

    #[test]
    fn test_unknown_symbol_is_error() {
        let err = Operator::from_symbol("~").unwrap_err();
        assert!(matches!(err, QueryError::UnknownOperator(ref s) if s == "~"));
        assert_eq!(err.to_string(), "unknown filter operator: \"~\"");

        // Whitespace is not trimmed
        assert!(Operator::from_symbol(" =").is_err());
    }

    #[test]
    fn test_mergeable_set() {
        let mergeable: Vec<_> = [
            Operator::ContainIn,
            Operator::NotContain,
            Operator::NotContainIn,
            Operator::Gt,
            Operator::Gte,
            Operator::Lt,
            Operator::Lte,
            Operator::In,
            Operator::NotIn,
            Operator::Regex,
            Operator::Contain,
        ]
        .into_iter()
        .filter(Operator::is_mergeable)
        .collect();

        assert_eq!(
            mergeable,
            vec![
                Operator::ContainIn,
                Operator::NotContainIn,
                Operator::In,
                Operator::NotIn,
            ]
        );

        // `!` resolves to a non-merging operator
        assert!(!Operator::from_symbol("!").unwrap().is_mergeable());
    }

    #[test]
    fn test_wire_name_matches_serde() {
        for op in [Operator::NotContainIn, Operator::Gte, Operator::NotIn, Operator::Contain] {
            let json = serde_json::to_value(op).unwrap();
            assert_eq!(json, serde_json::Value::String(op.to_string()));
        }
        assert_eq!(Operator::Contain.symbol(), None);
    }
}
