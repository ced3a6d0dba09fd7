use std::fmt;

use serde::{Deserialize, Serialize};

/// Hazard tag attached to a route segment or seasonal weather zone.
///
/// Serialized as the lowercase phrase shown by [`Hazard::as_str`]; unknown
/// phrases round-trip through [`Hazard::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Hazard {
    CloseToLand,
    HighWaves,
    HighWinds,
    Storm,
    StrongCurrents,
    ShallowWater,
    Ice,
    PiracyRisk,
    Other(String),
}

impl Hazard {
    pub fn as_str(&self) -> &str {
        match self {
            Hazard::CloseToLand => "close to land",
            Hazard::HighWaves => "high waves",
            Hazard::HighWinds => "high winds",
            Hazard::Storm => "storm",
            Hazard::StrongCurrents => "strong currents",
            Hazard::ShallowWater => "shallow water",
            Hazard::Ice => "ice",
            Hazard::PiracyRisk => "piracy risk",
            Hazard::Other(label) => label,
        }
    }

    /// Parse a hazard phrase or waypoint restriction tag.
    ///
    /// Accepts both the display phrase (`"piracy risk"`) and the snake_case
    /// restriction form (`"piracy_risk"`), case-insensitively.
    pub fn parse(value: &str) -> Self {
        let normalized = value
            .trim()
            .to_lowercase()
            .replace(|c: char| c == '_' || c == '-', " ");
        match normalized.as_str() {
            "close to land" => Hazard::CloseToLand,
            "high waves" => Hazard::HighWaves,
            "high winds" => Hazard::HighWinds,
            "storm" | "storms" => Hazard::Storm,
            "strong currents" => Hazard::StrongCurrents,
            "shallow water" => Hazard::ShallowWater,
            "ice" => Hazard::Ice,
            "piracy risk" | "piracy" => Hazard::PiracyRisk,
            _ => Hazard::Other(value.trim().to_string()),
        }
    }

    /// Restriction tags that also describe a hazard, e.g. `piracy_risk`.
    ///
    /// Purely regulatory restrictions such as `traffic_separation_scheme`
    /// yield `None`.
    pub fn from_restriction(tag: &str) -> Option<Self> {
        match Hazard::parse(tag) {
            Hazard::Other(_) => None,
            hazard => Some(hazard),
        }
    }
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Hazard {
    fn from(value: String) -> Self {
        Hazard::parse(&value)
    }
}

impl From<Hazard> for String {
    fn from(value: Hazard) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_restriction_tags() {
        assert_eq!(Hazard::parse("piracy_risk"), Hazard::PiracyRisk);
        assert_eq!(Hazard::parse("Strong Currents"), Hazard::StrongCurrents);
        assert_eq!(Hazard::parse("fog"), Hazard::Other("fog".to_string()));
    }

    #[test]
    fn regulatory_restrictions_are_not_hazards() {
        assert_eq!(Hazard::from_restriction("traffic_separation_scheme"), None);
        assert_eq!(Hazard::from_restriction("canal_transit"), None);
        assert_eq!(Hazard::from_restriction("ice"), Some(Hazard::Ice));
    }

    #[test]
    fn serializes_as_phrase() {
        let json = serde_json::to_string(&vec![Hazard::HighWaves, Hazard::CloseToLand])
            .expect("serialize hazards");
        assert_eq!(json, r#"["high waves","close to land"]"#);
        let back: Vec<Hazard> = serde_json::from_str(&json).expect("deserialize hazards");
        assert_eq!(back, vec![Hazard::HighWaves, Hazard::CloseToLand]);
    }
}
