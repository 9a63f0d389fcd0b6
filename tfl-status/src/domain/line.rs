//! Line identifiers and line name normalization.

use std::cmp::Ordering;
use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Error returned when a line name cannot be normalized to a known line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown line: {input:?}")]
pub struct UnknownLine {
    input: String,
}

impl UnknownLine {
    /// The raw text the user supplied.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A rail line or mode known to the status API.
///
/// Every `Line` corresponds to exactly one canonical slug, so any value of
/// this type is a valid API line identifier by construction.
///
/// # Examples
///
/// ```
/// use tfl_status::domain::Line;
///
/// let line = Line::normalize("Hammersmith & City").unwrap();
/// assert_eq!(line.slug(), "hammersmith-city");
///
/// assert!(Line::normalize("thameslink").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Line {
    Bakerloo,
    Central,
    Circle,
    District,
    HammersmithCity,
    Jubilee,
    Metropolitan,
    Northern,
    Piccadilly,
    Victoria,
    WaterlooCity,
    Dlr,
    LondonOverground,
    Elizabeth,
    Tram,
}

/// Words dropped from a line name before lookup.
const CONNECTORS: &[&str] = &["and", "line"];

/// Informal names, keyed by their normalized form.
///
/// Canonical slugs are matched directly and don't need an entry here.
const ALIASES: &[(&str, Line)] = &[
    ("h-c", Line::HammersmithCity),
    ("hammersmith", Line::HammersmithCity),
    ("w-c", Line::WaterlooCity),
    ("drain", Line::WaterlooCity),
    ("docklands", Line::Dlr),
    ("docklands-light-railway", Line::Dlr),
    ("overground", Line::LondonOverground),
    ("crossrail", Line::Elizabeth),
    ("trams", Line::Tram),
    ("london-trams", Line::Tram),
    ("tramlink", Line::Tram),
];

impl Line {
    /// All known lines, in API order.
    pub const ALL: [Line; 15] = [
        Line::Bakerloo,
        Line::Central,
        Line::Circle,
        Line::District,
        Line::HammersmithCity,
        Line::Jubilee,
        Line::Metropolitan,
        Line::Northern,
        Line::Piccadilly,
        Line::Victoria,
        Line::WaterlooCity,
        Line::Dlr,
        Line::LondonOverground,
        Line::Elizabeth,
        Line::Tram,
    ];

    /// The canonical API identifier.
    pub fn slug(self) -> &'static str {
        match self {
            Line::Bakerloo => "bakerloo",
            Line::Central => "central",
            Line::Circle => "circle",
            Line::District => "district",
            Line::HammersmithCity => "hammersmith-city",
            Line::Jubilee => "jubilee",
            Line::Metropolitan => "metropolitan",
            Line::Northern => "northern",
            Line::Piccadilly => "piccadilly",
            Line::Victoria => "victoria",
            Line::WaterlooCity => "waterloo-city",
            Line::Dlr => "dlr",
            Line::LondonOverground => "london-overground",
            Line::Elizabeth => "elizabeth",
            Line::Tram => "tram",
        }
    }

    /// Human-readable name, as the API reports it.
    pub fn display_name(self) -> &'static str {
        match self {
            Line::Bakerloo => "Bakerloo",
            Line::Central => "Central",
            Line::Circle => "Circle",
            Line::District => "District",
            Line::HammersmithCity => "Hammersmith & City",
            Line::Jubilee => "Jubilee",
            Line::Metropolitan => "Metropolitan",
            Line::Northern => "Northern",
            Line::Piccadilly => "Piccadilly",
            Line::Victoria => "Victoria",
            Line::WaterlooCity => "Waterloo & City",
            Line::Dlr => "DLR",
            Line::LondonOverground => "London Overground",
            Line::Elizabeth => "Elizabeth line",
            Line::Tram => "Tram",
        }
    }

    /// Compare display names, ignoring case.
    pub fn cmp_by_name(self, other: Line) -> Ordering {
        let a = self.display_name().chars().flat_map(char::to_lowercase);
        let b = other.display_name().chars().flat_map(char::to_lowercase);
        a.cmp(b)
    }

    /// Look up a line by its exact canonical slug.
    pub fn from_slug(slug: &str) -> Option<Line> {
        Line::ALL.into_iter().find(|line| line.slug() == slug)
    }

    /// Normalize a free-form line name to a known line.
    ///
    /// The input is lower-cased, split on anything that isn't a letter or
    /// digit, and stripped of connector words ("and", "line") before being
    /// matched against the canonical slugs and the alias table.
    pub fn normalize(input: &str) -> Result<Line, UnknownLine> {
        let key = lookup_key(input);

        Line::from_slug(&key)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == key)
                    .map(|(_, line)| *line)
            })
            .ok_or_else(|| UnknownLine {
                input: input.to_string(),
            })
    }

    /// Normalize a comma-separated list of line names.
    ///
    /// Duplicates are dropped; the first occurrence keeps its position.
    pub fn normalize_list(input: &str) -> Result<Vec<Line>, UnknownLine> {
        let mut lines = Vec::new();
        for part in input.split(',').filter(|p| !p.trim().is_empty()) {
            let line = Line::normalize(part)?;
            if !lines.contains(&line) {
                lines.push(line);
            }
        }
        Ok(lines)
    }
}

/// Reduce a line name to the hyphen-joined form used for lookup.
fn lookup_key(input: &str) -> String {
    input
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty() && !CONNECTORS.contains(token))
        .collect::<Vec<_>>()
        .join("-")
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for Line {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Line", 2)?;
        state.serialize_field("slug", self.slug())?;
        state.serialize_field("name", self.display_name())?;
        state.end()
    }
}
