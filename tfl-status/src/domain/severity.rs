//! Line status severity classification.

use serde::{Serialize, Serializer};

/// Ordered severity of a line's service, 0 = good service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Good = 0,
    Minor = 1,
    Disrupted = 2,
    Severe = 3,
    Closed = 4,
}

/// Severity given to status descriptions that aren't in the table.
pub const UNRECOGNIZED_SEVERITY: Severity = Severity::Disrupted;

/// Known upstream status descriptions, matched case-insensitively.
const SEVERITY_TABLE: &[(&str, Severity)] = &[
    ("good service", Severity::Good),
    ("no issues", Severity::Good),
    ("information", Severity::Good),
    ("minor delays", Severity::Minor),
    ("reduced service", Severity::Minor),
    ("change of frequency", Severity::Minor),
    ("issues reported", Severity::Minor),
    ("no step free access", Severity::Minor),
    ("bus service", Severity::Disrupted),
    ("special service", Severity::Disrupted),
    ("diverted", Severity::Disrupted),
    ("part closure", Severity::Disrupted),
    ("part closed", Severity::Disrupted),
    ("part suspended", Severity::Disrupted),
    ("severe delays", Severity::Severe),
    ("planned closure", Severity::Closed),
    ("suspended", Severity::Closed),
    ("closed", Severity::Closed),
    ("service closed", Severity::Closed),
    ("not running", Severity::Closed),
];

/// Result of classifying a status description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub severity: Severity,
    /// False when the description wasn't in the table.
    pub recognized: bool,
}

impl Severity {
    /// The integer level, 0 (good) to 4 (closed).
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn is_disrupted(self) -> bool {
        self > Severity::Good
    }

    /// Classify an upstream status description.
    ///
    /// Unknown descriptions don't fail: they map to [`UNRECOGNIZED_SEVERITY`]
    /// and are flagged so callers can warn about them.
    pub fn classify(description: &str) -> Classification {
        let key = description.trim().to_lowercase();

        match SEVERITY_TABLE.iter().find(|(phrase, _)| *phrase == key) {
            Some((_, severity)) => Classification {
                severity: *severity,
                recognized: true,
            },
            None => Classification {
                severity: UNRECOGNIZED_SEVERITY,
                recognized: false,
            },
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_phrases() {
        assert_eq!(Severity::classify("Good Service").severity, Severity::Good);
        assert_eq!(Severity::classify("Minor Delays").severity, Severity::Minor);
        assert_eq!(Severity::classify("Part Closure").severity, Severity::Disrupted);
        assert_eq!(Severity::classify("Severe Delays").severity, Severity::Severe);
        assert_eq!(Severity::classify("Suspended").severity, Severity::Closed);
        assert!(Severity::classify("Good Service").recognized);
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        assert_eq!(
            Severity::classify("  severe DELAYS "),
            Classification {
                severity: Severity::Severe,
                recognized: true,
            }
        );
    }

    #[test]
    fn unknown_phrase_is_flagged_middle() {
        let c = Severity::classify("Sharknado");
        assert_eq!(c.severity, Severity::Disrupted);
        assert!(!c.recognized);
    }

    #[test]
    fn levels_are_ordered() {
        assert_eq!(Severity::Good.level(), 0);
        assert_eq!(Severity::Closed.level(), 4);
        assert!(Severity::Severe > Severity::Minor);
        assert!(!Severity::Good.is_disrupted());
        assert!(Severity::Minor.is_disrupted());
    }

    #[test]
    fn table_has_no_duplicates() {
        for (i, (a, _)) in SEVERITY_TABLE.iter().enumerate() {
            assert!(
                SEVERITY_TABLE[i + 1..].iter().all(|(b, _)| a != b),
                "duplicate phrase {a}"
            );
        }
    }

    #[test]
    fn serializes_as_level() {
        assert_eq!(serde_json::to_string(&Severity::Severe).unwrap(), "3");
    }
}
