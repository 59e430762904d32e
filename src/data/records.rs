//! JSON paper record handling

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// A bibliographic record as handed over by the record provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Provider identifier, unique per record
    #[serde(alias = "pmid")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Author names in listed authorship order
    pub authors: Vec<String>,

    /// Affiliation per author position; may be shorter than `authors`
    #[serde(default)]
    pub affiliations: Vec<Option<String>>,

    #[serde(default, deserialize_with = "year_from_number_or_text")]
    pub year: Option<u32>,

    #[serde(default)]
    pub journal: Option<String>,
}

impl PaperRecord {
    /// Create a record with only an id and its authors
    pub fn new<I, S>(id: impl Into<String>, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            title: String::new(),
            authors: authors.into_iter().map(Into::into).collect(),
            affiliations: Vec::new(),
            year: None,
            journal: None,
        }
    }

    /// Attach affiliations by author position
    pub fn with_affiliations<I, S>(mut self, affiliations: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.affiliations = affiliations
            .into_iter()
            .map(|a| a.map(Into::into))
            .collect();
        self
    }

    /// Affiliation of the author at `position`, if known and non-empty
    pub fn affiliation(&self, position: usize) -> Option<&str> {
        self.affiliations
            .get(position)
            .and_then(Option::as_deref)
            .filter(|a| !a.trim().is_empty())
    }
}

/// Year as sent by providers: a number, a numeric string, or `""` when unknown
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YearField {
    Number(u32),
    Text(String),
}

fn year_from_number_or_text<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<YearField>::deserialize(deserializer)? {
        Some(YearField::Number(year)) => Some(year),
        Some(YearField::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

/// Author entry as it may appear in an input file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AuthorEntry {
    Name(String),
    Structured {
        last_name: String,
        #[serde(default)]
        first_name: Option<String>,
        #[serde(default)]
        affiliation: Option<String>,
    },
}

impl AuthorEntry {
    /// Canonical name and non-empty affiliation
    fn into_parts(self) -> (String, Option<String>) {
        match self {
            AuthorEntry::Name(name) => (name, None),
            AuthorEntry::Structured {
                last_name,
                first_name,
                affiliation,
            } => (
                author_key(&last_name, first_name.as_deref().unwrap_or("")),
                affiliation.filter(|a| !a.trim().is_empty()),
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(alias = "pmid")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    authors: Vec<AuthorEntry>,
    #[serde(default, deserialize_with = "year_from_number_or_text")]
    year: Option<u32>,
    #[serde(default)]
    journal: Option<String>,
}

/// Canonical author name: last name followed by fore-name initials ("Yamanaka S")
pub fn author_key(last_name: &str, first_name: &str) -> String {
    let initials: String = first_name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect();

    if initials.is_empty() {
        last_name.to_string()
    } else {
        format!("{} {}", last_name, initials)
    }
}

/// Parse records from a JSON array, keeping at most `max_records` usable ones
pub fn parse_records(json: &str, max_records: usize) -> Result<Vec<PaperRecord>> {
    let raw: Vec<RawRecord> = serde_json::from_str(json).context("invalid paper record JSON")?;
    let total = raw.len();

    let mut records = Vec::with_capacity(total.min(max_records));
    for record in raw {
        if records.len() >= max_records {
            break;
        }

        let (authors, affiliations): (Vec<String>, Vec<Option<String>>) = record
            .authors
            .into_iter()
            .map(AuthorEntry::into_parts)
            .filter(|(name, _)| !name.trim().is_empty())
            .unzip();

        if authors.is_empty() {
            log::warn!("Skipping record {} with no authors", record.id);
            continue;
        }

        records.push(PaperRecord {
            id: record.id,
            title: record.title.unwrap_or_default(),
            authors,
            affiliations,
            year: record.year,
            journal: record.journal.filter(|j| !j.trim().is_empty()),
        });
    }

    log::info!("Accepted {} of {} paper records", records.len(), total);

    Ok(records)
}

/// Load paper records from a JSON file
pub fn load_records(path: impl AsRef<Path>, max_records: usize) -> Result<Vec<PaperRecord>> {
    let path = path.as_ref();
    log::info!("Reading paper records: {}", path.display());

    if !path.exists() {
        return Err(anyhow::anyhow!("File not found: {}", path.display()));
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    parse_records(&json, max_records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_key_uses_initials() {
        assert_eq!(author_key("Yamanaka", "Shinya"), "Yamanaka S");
        assert_eq!(author_key("Smith", "John Paul"), "Smith JP");
        assert_eq!(author_key("Consortium", ""), "Consortium");
    }

    #[test]
    fn parses_mixed_author_entries() {
        let json = r#"[
            {"id": "1", "title": "A", "authors": ["Kitanishi Y", {"last_name": "Sato", "first_name": "Hana Mei"}], "year": 2021},
            {"id": "2", "authors": []},
            {"id": "3", "authors": [{"last_name": "Ito"}], "journal": "Nature"}
        ]"#;

        let records = parse_records(json, 10).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].authors, vec!["Kitanishi Y", "Sato HM"]);
        assert_eq!(records[0].year, Some(2021));
        assert_eq!(records[1].authors, vec!["Ito"]);
        assert_eq!(records[1].journal.as_deref(), Some("Nature"));
    }

    #[test]
    fn respects_max_records() {
        let json = r#"[
            {"id": "1", "authors": ["A"]},
            {"id": "2", "authors": ["B"]},
            {"id": "3", "authors": ["C"]}
        ]"#;

        let records = parse_records(json, 2).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, "2");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_records("{\"id\": 1}", 5).is_err());
    }

    #[test]
    fn parses_pubmed_shaped_records() {
        let json = r#"[
            {
                "pmid": "38012345",
                "title": "Induced pluripotency revisited",
                "authors": [
                    {"last_name": "Yamanaka", "first_name": "Shinya", "affiliation": "CiRA, Kyoto University"},
                    {"last_name": "Takahashi", "first_name": "Kazutoshi", "affiliation": ""},
                    {"last_name": "Ito", "first_name": null, "affiliation": ""}
                ],
                "year": "2021",
                "journal": "Cell"
            },
            {
                "pmid": "38012346",
                "title": null,
                "authors": [{"last_name": "Sato", "first_name": "Hana", "affiliation": ""}],
                "year": "",
                "journal": ""
            }
        ]"#;

        let records = parse_records(json, 10).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.id, "38012345");
        assert_eq!(first.year, Some(2021));
        assert_eq!(first.authors, vec!["Yamanaka S", "Takahashi K", "Ito"]);
        assert_eq!(first.affiliation(0), Some("CiRA, Kyoto University"));
        assert_eq!(first.affiliation(1), None);

        let second = &records[1];
        assert_eq!(second.year, None);
        assert_eq!(second.title, "");
        assert_eq!(second.journal, None);
    }

    #[test]
    fn year_accepts_numbers_text_and_null() {
        let json = r#"[
            {"id": "1", "authors": ["A"], "year": 1999},
            {"id": "2", "authors": ["A"], "year": " 2004 "},
            {"id": "3", "authors": ["A"], "year": null},
            {"id": "4", "authors": ["A"], "year": "n.d."}
        ]"#;

        let years: Vec<_> = parse_records(json, 10)
            .unwrap()
            .into_iter()
            .map(|r| r.year)
            .collect();
        assert_eq!(years, vec![Some(1999), Some(2004), None, None]);
    }

    #[test]
    fn affiliation_lookup_skips_blank_entries() {
        let record = PaperRecord::new("p", ["X", "Y", "Z"])
            .with_affiliations([Some("Lab X"), Some("  "), None]);
        assert_eq!(record.affiliation(0), Some("Lab X"));
        assert_eq!(record.affiliation(1), None);
        assert_eq!(record.affiliation(2), None);
        assert_eq!(record.affiliation(9), None);
    }
}
