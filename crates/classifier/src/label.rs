use std::fmt;

use serde::{Deserialize, Serialize};

/// Output token assigned to a classified input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Gurobi,
    Guro,
    Gubi,
    Robi,
    Gu,
    Ro,
    Bi,
    Invalid,
}

impl Label {
    pub const ALL: [Label; 8] = [
        Label::Gurobi,
        Label::Guro,
        Label::Gubi,
        Label::Robi,
        Label::Gu,
        Label::Ro,
        Label::Bi,
        Label::Invalid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Gurobi => "GUROBI",
            Label::Guro => "GURO",
            Label::Gubi => "GUBI",
            Label::Robi => "ROBI",
            Label::Gu => "GU",
            Label::Ro => "RO",
            Label::Bi => "BI",
            Label::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(Label::Gurobi.to_string(), "GUROBI");
        assert_eq!(Label::Invalid.to_string(), "INVALID");
    }

    #[test]
    fn serde_uses_upper_case_names() {
        for label in Label::ALL {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label.as_str()));
        }
    }
}
