//! Response Parser: splits the free-text model reply into its four named sections.
//!
//! Each section starts with a marker token (`HISTORICKY_TITUL:` etc.) at the start of
//! a line, matched case-insensitively. Markers are expected in declared order:
//! - a section ends at the marker of the first *later* key present after it, so a
//!   token of an earlier key inside a body never cuts it short;
//! - a missing marker leaves its section unset without disturbing later sections;
//! - a marker that appears before an already-consumed one is skipped (out of order).
//!
//! Parsing never fails. Unset or empty sections resolve to a Czech placeholder.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    HistoricalTitle,
    HistoricalDescription,
    ImagePrompt,
    CoatOfArmsPrompt,
}

static MARKERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    SectionKey::ORDERED
        .iter()
        .map(|key| {
            Regex::new(&format!(r"(?im)^[ \t]*{}:", regex::escape(key.token())))
                .expect("marker pattern is a valid regex")
        })
        .collect()
});

impl SectionKey {
    /// Declared order of the sections in the reply.
    pub const ORDERED: [SectionKey; 4] = [
        SectionKey::HistoricalTitle,
        SectionKey::HistoricalDescription,
        SectionKey::ImagePrompt,
        SectionKey::CoatOfArmsPrompt,
    ];

    pub fn token(self) -> &'static str {
        match self {
            SectionKey::HistoricalTitle => "HISTORICKY_TITUL",
            SectionKey::HistoricalDescription => "POPIS_HISTORICKY",
            SectionKey::ImagePrompt => "PROMPT_OBRAZEK",
            SectionKey::CoatOfArmsPrompt => "PROMPT_ERB",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            SectionKey::HistoricalTitle => "Titul nenalezen",
            SectionKey::HistoricalDescription => "Historický popis nenalezen",
            SectionKey::ImagePrompt => "Prompt pro obrázek nenalezen",
            SectionKey::CoatOfArmsPrompt => "Prompt pro erb nenalezen",
        }
    }

    fn position(self) -> usize {
        self as usize
    }

    fn marker(self) -> &'static Regex {
        &MARKERS[self.position()]
    }
}

/// Sections extracted from one reply. Transient: folded into `GeneratedContent`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSections {
    sections: HashMap<SectionKey, String>,
}

impl ParsedSections {
    /// The extracted body, or `None` if the section was missing or empty.
    pub fn get(&self, key: SectionKey) -> Option<&str> {
        self.sections.get(&key).map(String::as_str)
    }

    /// The extracted body, falling back to the section's placeholder.
    pub fn resolve(&self, key: SectionKey) -> &str {
        self.get(key).unwrap_or_else(|| key.placeholder())
    }

    pub fn missing(&self) -> Vec<SectionKey> {
        SectionKey::ORDERED
            .into_iter()
            .filter(|key| !self.sections.contains_key(key))
            .collect()
    }
}

/// Splits `reply` into sections using order-bounded marker scanning.
///
/// All searches run on the whole reply from an absolute offset, so `^` only
/// matches at real line starts.
pub fn parse_sections(reply: &str) -> ParsedSections {
    let mut sections = HashMap::new();
    let mut cursor = 0;
    let mut index = 0;

    while index < SectionKey::ORDERED.len() {
        let key = SectionKey::ORDERED[index];
        let Some(marker) = key.marker().find_at(reply, cursor) else {
            index += 1;
            continue;
        };

        let body_start = marker.end();
        let bound = SectionKey::ORDERED[index + 1..].iter().find_map(|next| {
            next.marker()
                .find_at(reply, body_start)
                .map(|m| (next.position(), m.start()))
        });

        let body_end = bound.map_or(reply.len(), |(_, start)| start);
        let body = reply[body_start..body_end].trim();
        if !body.is_empty() {
            sections.insert(key, body.to_string());
        }

        match bound {
            Some((next_index, start)) => {
                cursor = start;
                index = next_index;
            }
            None => break,
        }
    }

    ParsedSections { sections }
}
