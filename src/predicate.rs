use std::ops::{BitAnd, BitOr};

use crate::error::{Error, Result};
use crate::sql;

/// A compiled predicate: a boolean SQL clause with `?` placeholders and
/// the parameter values bound to them, in order.
///
/// Target values never appear in the clause text itself, so no caller
/// input can alter the statement shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFragment {
    pub clause: String,
    pub params: Vec<String>,
}

/// Composable condition over a table's key columns.
///
/// Key columns are addressed by zero-based position, never by name, so
/// the same predicate works against any table of compatible arity.
/// Nesting fixes the evaluation order; there is no textual precedence to
/// reason about. `&` and `|` combine two predicates:
///
/// ```
/// use kv_sqlite::Predicate;
///
/// let p = (Predicate::equal(1, "number") | Predicate::equal(1, "string"))
///     & Predicate::equal(0, "3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// The key at `key_index` equals `target`.
    Equal { key_index: usize, target: String },
    /// The key at `key_index` is one of `targets`. Empty `targets`
    /// matches nothing.
    In {
        key_index: usize,
        targets: Vec<String>,
    },
    /// Every child holds. Compiling with no children is an error.
    And(Vec<Predicate>),
    /// At least one child holds. Compiling with no children is an error.
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Equality test against the key at `key_index`.
    pub fn equal(key_index: usize, target: impl Into<String>) -> Self {
        Self::Equal {
            key_index,
            target: target.into(),
        }
    }

    /// Membership test against the key at `key_index`.
    pub fn one_of<I, S>(key_index: usize, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::In {
            key_index,
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    /// Compile to a parameterized SQL boolean expression.
    pub fn to_fragment(&self) -> Result<SqlFragment> {
        match self {
            Self::Equal { key_index, target } => Ok(SqlFragment {
                clause: format!("{} = ?", sql::key_column(*key_index)),
                params: vec![target.clone()],
            }),
            Self::In { key_index, targets } => {
                // "IN ()" is a syntax error in SQLite; an empty target
                // list must still compile to a clause that matches
                // nothing.
                if targets.is_empty() {
                    return Ok(SqlFragment {
                        clause: "1 = 0".to_string(),
                        params: Vec::new(),
                    });
                }
                let placeholders = vec!["?"; targets.len()].join(", ");
                Ok(SqlFragment {
                    clause: format!("{} IN ({})", sql::key_column(*key_index), placeholders),
                    params: targets.clone(),
                })
            }
            Self::And(children) => Self::join(children, " AND "),
            Self::Or(children) => Self::join(children, " OR "),
        }
    }

    fn join(children: &[Predicate], operator: &str) -> Result<SqlFragment> {
        if children.is_empty() {
            return Err(Error::EmptyPredicate);
        }
        let mut clauses = Vec::with_capacity(children.len());
        let mut params = Vec::new();
        for child in children {
            let fragment = child.to_fragment()?;
            clauses.push(fragment.clause);
            params.extend(fragment.params);
        }
        Ok(SqlFragment {
            clause: format!("({})", clauses.join(operator)),
            params,
        })
    }
}

impl BitAnd for Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Predicate) -> Predicate {
        Predicate::And(vec![self, rhs])
    }
}

impl BitOr for Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Predicate) -> Predicate {
        Predicate::Or(vec![self, rhs])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_compiles_to_placeholder() {
        let fragment = Predicate::equal(2, "positive").to_fragment().unwrap();
        assert_eq!(fragment.clause, "key2 = ?");
        assert_eq!(fragment.params, ["positive"]);
    }

    #[test]
    fn in_compiles_one_placeholder_per_target() {
        let fragment = Predicate::one_of(0, ["2", "3", "4"]).to_fragment().unwrap();
        assert_eq!(fragment.clause, "key0 IN (?, ?, ?)");
        assert_eq!(fragment.params, ["2", "3", "4"]);
    }

    #[test]
    fn empty_in_matches_nothing() {
        let targets: [&str; 0] = [];
        let fragment = Predicate::one_of(1, targets).to_fragment().unwrap();
        assert_eq!(fragment.clause, "1 = 0");
        assert!(fragment.params.is_empty());
    }

    #[test]
    fn nested_composition_preserves_parameter_order() {
        let predicate = (Predicate::equal(1, "string") | Predicate::equal(2, "negative"))
            & Predicate::equal(0, "3");
        let fragment = predicate.to_fragment().unwrap();
        assert_eq!(fragment.clause, "((key1 = ? OR key2 = ?) AND key0 = ?)");
        assert_eq!(fragment.params, ["string", "negative", "3"]);
    }

    #[test]
    fn childless_combinators_are_rejected() {
        assert!(matches!(
            Predicate::And(Vec::new()).to_fragment(),
            Err(Error::EmptyPredicate)
        ));
        assert!(matches!(
            Predicate::Or(Vec::new()).to_fragment(),
            Err(Error::EmptyPredicate)
        ));
    }

    #[test]
    fn malicious_target_stays_in_params() {
        let fragment = Predicate::equal(0, "x' OR '1'='1").to_fragment().unwrap();
        assert_eq!(fragment.clause, "key0 = ?");
        assert_eq!(fragment.params, ["x' OR '1'='1"]);
    }
}
