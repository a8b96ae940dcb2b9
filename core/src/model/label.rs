use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static SIDE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*) \((L|R)\)$").expect("side suffix pattern is valid"));

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    L,
    R,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::L => "L",
            Side::R => "R",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A technique as logged by the user, e.g. `Armbar (L)`.
///
/// Parsed once when the entry is read; the `"<Name> (L|R)"` string form only
/// exists at the storage and display boundary. `name` keeps the text before
/// the suffix verbatim so that `to_string()` reproduces the stored label.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub struct TechniqueLabel {
    pub name: String,
    pub side: Option<Side>,
}

impl TechniqueLabel {
    pub fn new(name: impl Into<String>, side: Option<Side>) -> Self {
        Self {
            name: name.into(),
            side,
        }
    }

    pub fn parse(raw: &str) -> Self {
        match SIDE_SUFFIX.captures(raw) {
            Some(caps) => {
                let side = if &caps[2] == "L" { Side::L } else { Side::R };
                Self::new(&caps[1], Some(side))
            }
            None => Self::new(raw, None),
        }
    }

    /// Name used when grouping by technique regardless of side.
    pub fn base_name(&self) -> &str {
        self.name.trim()
    }
}

impl fmt::Display for TechniqueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            Some(side) => write!(f, "{} ({})", self.name, side),
            None => f.write_str(&self.name),
        }
    }
}

impl From<String> for TechniqueLabel {
    fn from(raw: String) -> Self {
        TechniqueLabel::parse(&raw)
    }
}

impl From<&str> for TechniqueLabel {
    fn from(raw: &str) -> Self {
        TechniqueLabel::parse(raw)
    }
}

impl From<TechniqueLabel> for String {
    fn from(label: TechniqueLabel) -> Self {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sided_label() {
        let label = TechniqueLabel::parse("Armbar (L)");
        assert_eq!(label.name, "Armbar");
        assert_eq!(label.side, Some(Side::L));

        let label = TechniqueLabel::parse("Rear Naked Choke (R)");
        assert_eq!(label.name, "Rear Naked Choke");
        assert_eq!(label.side, Some(Side::R));
    }

    #[test]
    fn test_parse_unmarked_label() {
        let label = TechniqueLabel::parse("Kimura");
        assert_eq!(label.name, "Kimura");
        assert_eq!(label.side, None);

        // Suffix must be exact: lowercase or missing space does not count
        assert_eq!(TechniqueLabel::parse("Kimura (l)").side, None);
        assert_eq!(TechniqueLabel::parse("Kimura(L)").side, None);
        assert_eq!(TechniqueLabel::parse("Kimura (L) ").side, None);
    }

    #[test]
    fn test_display_reproduces_raw_label() {
        for raw in ["Armbar (L)", "Omoplata (R)", "Other", "Heel Hook  (R)", "(L)"] {
            assert_eq!(TechniqueLabel::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_base_name_is_trimmed() {
        let label = TechniqueLabel::parse("Heel Hook  (R)");
        assert_eq!(label.base_name(), "Heel Hook");
    }

    #[test]
    fn test_serde_uses_string_form() {
        let label = TechniqueLabel::new("Armbar", Some(Side::R));
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, "\"Armbar (R)\"");

        let back: TechniqueLabel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, label);
    }
}
