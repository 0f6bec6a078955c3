//! Comparison predicates for numeric columns.
//!
//! Any `Fn(&T) -> bool` works with the compactor; [`Predicate`] is a
//! ready-made, inspectable alternative for the common threshold filters.

use std::cmp::Ordering;
use std::fmt;

/// Threshold predicate over a partially ordered element type.
///
/// Comparisons go through `partial_cmp`, so for floats NaN fails every
/// ordered comparison (and `Eq`) but passes `Ne`.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate<T> {
    /// `val > threshold`
    Gt(T),
    /// `val < threshold`
    Lt(T),
    /// `val >= threshold`
    Ge(T),
    /// `val <= threshold`
    Le(T),
    /// `val == threshold`
    Eq(T),
    /// `val != threshold`
    Ne(T),
    /// `lo <= val <= hi`; matches nothing when `lo > hi`.
    Between(T, T),
    /// Every sub-predicate matches. Empty matches everything.
    And(Vec<Predicate<T>>),
    /// Some sub-predicate matches. Empty matches nothing.
    Or(Vec<Predicate<T>>),
}

impl<T: PartialOrd + Copy> Predicate<T> {
    /// Evaluate against a single value.
    pub fn evaluate(&self, val: &T) -> bool {
        use Ordering::{Equal, Greater, Less};

        match self {
            Predicate::Gt(t) => val.partial_cmp(t) == Some(Greater),
            Predicate::Lt(t) => val.partial_cmp(t) == Some(Less),
            Predicate::Ge(t) => matches!(val.partial_cmp(t), Some(Greater | Equal)),
            Predicate::Le(t) => matches!(val.partial_cmp(t), Some(Less | Equal)),
            Predicate::Eq(t) => val.partial_cmp(t) == Some(Equal),
            Predicate::Ne(t) => val.partial_cmp(t) != Some(Equal),
            Predicate::Between(lo, hi) => {
                matches!(val.partial_cmp(lo), Some(Greater | Equal))
                    && matches!(val.partial_cmp(hi), Some(Less | Equal))
            }
            Predicate::And(preds) => preds.iter().all(|p| p.evaluate(val)),
            Predicate::Or(preds) => preds.iter().any(|p| p.evaluate(val)),
        }
    }

    /// True for the single-comparison variants.
    pub fn is_simple(&self) -> bool {
        !matches!(self, Predicate::And(_) | Predicate::Or(_))
    }

    /// Normalise the tree without changing what it matches.
    ///
    /// - nested `And(And(..))` / `Or(Or(..))` are flattened
    /// - single-element groups are unwrapped
    /// - `And([Ge(lo), Le(hi)])` (either order) becomes `Between(lo, hi)`
    ///
    /// `And([Gt, Lt])` is left alone: an open interval is not `Between`.
    pub fn simplify(self) -> Predicate<T> {
        match self {
            Predicate::And(preds) => {
                let mut flat = flatten(preds, |p| match p {
                    Predicate::And(inner) => Ok(inner),
                    other => Err(other),
                });
                if flat.len() == 1 {
                    return flat.remove(0);
                }
                if let [a, b] = flat.as_slice() {
                    match (a, b) {
                        (Predicate::Ge(lo), Predicate::Le(hi))
                        | (Predicate::Le(hi), Predicate::Ge(lo)) => {
                            return Predicate::Between(*lo, *hi);
                        }
                        _ => {}
                    }
                }
                Predicate::And(flat)
            }
            Predicate::Or(preds) => {
                let mut flat = flatten(preds, |p| match p {
                    Predicate::Or(inner) => Ok(inner),
                    other => Err(other),
                });
                if flat.len() == 1 {
                    return flat.remove(0);
                }
                Predicate::Or(flat)
            }
            other => other,
        }
    }
}

/// Simplify every child and splice in the children of same-kind groups.
fn flatten<T, S>(preds: Vec<Predicate<T>>, same_kind: S) -> Vec<Predicate<T>>
where
    T: PartialOrd + Copy,
    S: Fn(Predicate<T>) -> Result<Vec<Predicate<T>>, Predicate<T>>,
{
    let mut flat = Vec::with_capacity(preds.len());
    for p in preds {
        match same_kind(p.simplify()) {
            Ok(inner) => flat.extend(inner),
            Err(other) => flat.push(other),
        }
    }
    flat
}

fn write_group<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    preds: &[Predicate<T>],
    op: &str,
) -> fmt::Result {
    write!(f, "(")?;
    for (i, p) in preds.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", op)?;
        }
        write!(f, "{}", p)?;
    }
    write!(f, ")")
}

impl<T: fmt::Display> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Gt(t) => write!(f, "x > {}", t),
            Predicate::Lt(t) => write!(f, "x < {}", t),
            Predicate::Ge(t) => write!(f, "x >= {}", t),
            Predicate::Le(t) => write!(f, "x <= {}", t),
            Predicate::Eq(t) => write!(f, "x == {}", t),
            Predicate::Ne(t) => write!(f, "x != {}", t),
            Predicate::Between(lo, hi) => write!(f, "{} <= x <= {}", lo, hi),
            Predicate::And(preds) => write_group(f, preds, "&&"),
            Predicate::Or(preds) => write_group(f, preds, "||"),
        }
    }
}
