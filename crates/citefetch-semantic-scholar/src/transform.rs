//! Raw API record → flat paper summary
//!
//! Every output field has its own extractor. A field that is absent or `null`
//! takes its default; a field that is present with the wrong JSON type is an
//! error naming the field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::RawPaper;

/// Placeholder for text fields missing from the record
pub const NOT_AVAILABLE: &str = "N/A";

/// `externalIds` entry holding the PubMed accession
const PUBMED_KEY: &str = "PubMed";

/// Normalized output record, serialized in this field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperSummary {
    pub pmid: String,
    pub title: String,
    pub first_author: String,
    pub year: Option<i64>,
    pub citations: u64,
    pub fields: Vec<String>,
    pub publication_date: String,
}

/// A field was present but not of the type the summary needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub expected: &'static str,
    pub found: &'static str,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "field '{}': expected {}, found {}",
            self.field, self.expected, self.found
        )
    }
}

impl std::error::Error for FieldError {}

impl FieldError {
    fn new(field: impl Into<String>, expected: &'static str, found: &Value) -> Self {
        Self {
            field: field.into(),
            expected,
            found: json_kind(found),
        }
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Project one raw record.
///
/// Returns `Ok(None)` for a `null` record (id not found upstream).
pub fn summarize(paper: &RawPaper) -> Result<Option<PaperSummary>, FieldError> {
    let obj = match paper {
        Value::Null => return Ok(None),
        Value::Object(obj) => obj,
        other => return Err(FieldError::new("<record>", "object", other)),
    };

    Ok(Some(PaperSummary {
        pmid: pubmed_id(obj)?.unwrap_or(NOT_AVAILABLE).to_string(),
        title: opt_str(obj, "title")?.unwrap_or(NOT_AVAILABLE).to_string(),
        first_author: first_author(obj)?.unwrap_or(NOT_AVAILABLE).to_string(),
        year: opt_int(obj, "year")?,
        citations: opt_count(obj, "citationCount")?.unwrap_or(0),
        fields: string_list(obj, "fieldsOfStudy")?,
        publication_date: opt_str(obj, "publicationDate")?
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
    }))
}

/// Field value, treating explicit `null` the same as absence.
fn lookup<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn opt_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, FieldError> {
    match lookup(obj, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(FieldError::new(key, "string", other)),
    }
}

fn opt_int(obj: &Map<String, Value>, key: &str) -> Result<Option<i64>, FieldError> {
    match lookup(obj, key) {
        None => Ok(None),
        Some(v) => v
            .as_i64()
            .map(Some)
            .ok_or_else(|| FieldError::new(key, "integer", v)),
    }
}

fn opt_count(obj: &Map<String, Value>, key: &str) -> Result<Option<u64>, FieldError> {
    match lookup(obj, key) {
        None => Ok(None),
        Some(v) => v
            .as_u64()
            .map(Some)
            .ok_or_else(|| FieldError::new(key, "non-negative integer", v)),
    }
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>, FieldError> {
    let items = match lookup(obj, key) {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(FieldError::new(key, "array", other)),
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(FieldError::new(format!("{key}[{i}]"), "string", other)),
        })
        .collect()
}

fn pubmed_id(obj: &Map<String, Value>) -> Result<Option<&str>, FieldError> {
    match lookup(obj, "externalIds") {
        None => Ok(None),
        Some(Value::Object(ids)) => match lookup(ids, PUBMED_KEY) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(FieldError::new(
                format!("externalIds.{PUBMED_KEY}"),
                "string",
                other,
            )),
        },
        Some(other) => Err(FieldError::new("externalIds", "object", other)),
    }
}

fn first_author(obj: &Map<String, Value>) -> Result<Option<&str>, FieldError> {
    let authors = match lookup(obj, "authors") {
        None => return Ok(None),
        Some(Value::Array(authors)) => authors,
        Some(other) => return Err(FieldError::new("authors", "array", other)),
    };
    let Some(first) = authors.first() else {
        return Ok(None);
    };
    let Value::Object(author) = first else {
        return Err(FieldError::new("authors[0]", "object", first));
    };
    match lookup(author, "name") {
        None => {
            log::debug!("first author has no name, using {NOT_AVAILABLE}");
            Ok(None)
        }
        Some(Value::String(name)) => Ok(Some(name)),
        Some(other) => Err(FieldError::new("authors[0].name", "string", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record() -> Value {
        json!({
            "paperId": "649def34f8be52c8b66281af98ae884c09aef38b",
            "externalIds": { "PubMed": "12345678", "DOI": "10.1000/xyz" },
            "title": "p53 mutations in human cancers",
            "authors": [
                { "authorId": "1", "name": "M. Hollstein" },
                { "authorId": "2", "name": "D. Sidransky" }
            ],
            "year": 1991,
            "citationCount": 6543,
            "fieldsOfStudy": ["Medicine", "Biology"],
            "publicationDate": "1991-07-05"
        })
    }

    #[test]
    fn null_record_is_skipped() {
        assert_eq!(summarize(&Value::Null), Ok(None));
    }

    #[test]
    fn full_record_projects_every_field() {
        let summary = summarize(&full_record()).unwrap().unwrap();
        assert_eq!(
            summary,
            PaperSummary {
                pmid: "12345678".to_string(),
                title: "p53 mutations in human cancers".to_string(),
                first_author: "M. Hollstein".to_string(),
                year: Some(1991),
                citations: 6543,
                fields: vec!["Medicine".to_string(), "Biology".to_string()],
                publication_date: "1991-07-05".to_string(),
            }
        );
    }

    #[test]
    fn empty_record_takes_all_defaults() {
        let summary = summarize(&json!({})).unwrap().unwrap();
        assert_eq!(summary.pmid, NOT_AVAILABLE);
        assert_eq!(summary.title, NOT_AVAILABLE);
        assert_eq!(summary.first_author, NOT_AVAILABLE);
        assert_eq!(summary.year, None);
        assert_eq!(summary.citations, 0);
        assert!(summary.fields.is_empty());
        assert_eq!(summary.publication_date, NOT_AVAILABLE);
    }

    #[test]
    fn nulls_take_defaults() {
        let record = json!({
            "externalIds": { "PubMed": null },
            "title": null,
            "authors": null,
            "year": null,
            "citationCount": null,
            "fieldsOfStudy": null,
            "publicationDate": null
        });
        let summary = summarize(&record).unwrap().unwrap();
        assert_eq!(summary.pmid, NOT_AVAILABLE);
        assert_eq!(summary.citations, 0);
        assert!(summary.fields.is_empty());
        assert_eq!(summary.publication_date, NOT_AVAILABLE);
    }

    #[test]
    fn missing_citation_count_is_zero() {
        let mut record = full_record();
        record.as_object_mut().unwrap().remove("citationCount");
        assert_eq!(summarize(&record).unwrap().unwrap().citations, 0);
    }

    #[test]
    fn empty_authors_gives_placeholder() {
        let mut record = full_record();
        record["authors"] = json!([]);
        assert_eq!(
            summarize(&record).unwrap().unwrap().first_author,
            NOT_AVAILABLE
        );
    }

    #[test]
    fn nameless_first_author_gives_placeholder() {
        let mut record = full_record();
        record["authors"] = json!([{ "authorId": "1", "name": null }]);
        assert_eq!(
            summarize(&record).unwrap().unwrap().first_author,
            NOT_AVAILABLE
        );
    }

    #[test]
    fn externalids_without_pubmed_gives_placeholder() {
        let mut record = full_record();
        record["externalIds"] = json!({ "DOI": "10.1000/xyz" });
        assert_eq!(summarize(&record).unwrap().unwrap().pmid, NOT_AVAILABLE);
    }

    #[test]
    fn authors_not_a_list_is_an_error() {
        let mut record = full_record();
        record["authors"] = json!("M. Hollstein");
        let err = summarize(&record).unwrap_err();
        assert_eq!(err.field, "authors");
        assert_eq!(err.expected, "array");
        assert_eq!(err.found, "string");
    }

    #[test]
    fn wrong_typed_citation_count_is_an_error() {
        let mut record = full_record();
        record["citationCount"] = json!("many");
        let err = summarize(&record).unwrap_err();
        assert_eq!(err.field, "citationCount");
        assert_eq!(
            err.to_string(),
            "field 'citationCount': expected non-negative integer, found string"
        );
    }

    #[test]
    fn non_string_field_of_study_names_its_index() {
        let mut record = full_record();
        record["fieldsOfStudy"] = json!(["Medicine", 7]);
        assert_eq!(summarize(&record).unwrap_err().field, "fieldsOfStudy[1]");
    }

    #[test]
    fn non_object_record_is_an_error() {
        let err = summarize(&json!([1, 2])).unwrap_err();
        assert_eq!(err.field, "<record>");
        assert_eq!(err.found, "array");
    }

    #[test]
    fn serialized_keys_keep_output_order() {
        let summary = summarize(&full_record()).unwrap().unwrap();
        let text = serde_json::to_string(&summary).unwrap();
        let keys = [
            "pmid",
            "title",
            "first_author",
            "year",
            "citations",
            "fields",
            "publication_date",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| text.find(&format!("\"{k}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
