//! Ordered divisibility rule table.

use crate::label::Label;
use crate::validate::ValidatedNumber;

/// A divisor subset and the label it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub divisors: &'static [u32],
    pub label: Label,
}

impl Rule {
    /// True when every divisor in the subset divides the number whose
    /// residue modulo [`MODULUS`] is `residue`.
    fn matches(&self, residue: u32) -> bool {
        self.divisors.iter().all(|d| residue % d == 0)
    }
}

/// lcm(2, 3, 5). Divisibility by any subset is decided by `n mod 30`.
pub const MODULUS: u32 = 30;

/// Evaluated top to bottom; the first match wins. Combined subsets come
/// before their parts so that, e.g., 30 never stops at `GU`.
pub const RULES: [Rule; 7] = [
    Rule {
        divisors: &[2, 3, 5],
        label: Label::Gurobi,
    },
    Rule {
        divisors: &[2, 3],
        label: Label::Guro,
    },
    Rule {
        divisors: &[2, 5],
        label: Label::Gubi,
    },
    Rule {
        divisors: &[3, 5],
        label: Label::Robi,
    },
    Rule {
        divisors: &[2],
        label: Label::Gu,
    },
    Rule {
        divisors: &[3],
        label: Label::Ro,
    },
    Rule {
        divisors: &[5],
        label: Label::Bi,
    },
];

fn label_for_residue(residue: u32) -> Label {
    RULES
        .iter()
        .find(|rule| rule.matches(residue))
        .map(|rule| rule.label)
        .unwrap_or(Label::Invalid)
}

/// Label a validated positive integer of any size.
pub fn classify_number(n: &ValidatedNumber) -> Label {
    label_for_residue(n.residue(MODULUS))
}

/// Label a native integer. Total over `u64`; 0 is divisible by every
/// divisor and so yields `GUROBI`.
pub fn label_for_u64(n: u64) -> Label {
    label_for_residue((n % u64::from(MODULUS)) as u32)
}
