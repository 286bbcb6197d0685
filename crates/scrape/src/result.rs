// ABOUTME: ScrapedRecord and field value types produced by one scrape invocation.
// ABOUTME: Serializes as the flat JSON object forwarded to webhooks, fields in profile order.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::extractors::registry::{ContentKind, SiteKey};

/// The extracted value of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<ListItem>),
}

impl FieldValue {
    /// Text of a single-valued field.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    /// Items of a list-valued field.
    pub fn as_list(&self) -> Option<&[ListItem]> {
        match self {
            FieldValue::List(items) => Some(items),
            FieldValue::Text(_) => None,
        }
    }

    /// True for an empty string or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::List(items) => items.serialize(serializer),
        }
    }
}

/// One entry of a repeated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    /// Item read as its own text (no sub-field map).
    Text(String),
    /// Sub-field name to text, in sub-field map order.
    Record(Vec<(String, String)>),
}

impl ListItem {
    /// Value of one sub-field of a record item.
    pub fn get(&self, name: &str) -> Option<&str> {
        match self {
            ListItem::Record(pairs) => pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            ListItem::Text(_) => None,
        }
    }

    /// An item is empty when every value it holds is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            ListItem::Text(s) => s.is_empty(),
            ListItem::Record(pairs) => pairs.iter().all(|(_, v)| v.is_empty()),
        }
    }
}

impl Serialize for ListItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ListItem::Text(s) => serializer.serialize_str(s),
            ListItem::Record(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (k, v) in pairs {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// The structured output of one scrape.
///
/// `site` and `kind` are routing metadata for the caller and are not part of
/// the serialized payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedRecord {
    pub site: SiteKey,
    pub kind: ContentKind,
    pub fields: Vec<(String, FieldValue)>,
    /// The page address at scrape time.
    pub link: String,
    /// Capture time, set for profile scrapes.
    pub scraped_at: Option<DateTime<Utc>>,
}

impl ScrapedRecord {
    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Text of a single-valued field, or `None` if absent or list-valued.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Items of a list-valued field, or `None` if absent or text-valued.
    pub fn list(&self, name: &str) -> Option<&[ListItem]> {
        self.get(name).and_then(FieldValue::as_list)
    }

    /// Returns true if every extracted field came back empty.
    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.is_empty())
    }
}

impl Serialize for ScrapedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = 1 + usize::from(self.scraped_at.is_some());
        let mut map = serializer.serialize_map(Some(self.fields.len() + extra))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.serialize_entry("link", &self.link)?;
        if let Some(at) = self.scraped_at {
            map.serialize_entry("scrapedAt", &at.to_rfc3339_opts(SecondsFormat::Millis, true))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn profile_record() -> ScrapedRecord {
        ScrapedRecord {
            site: SiteKey::new("linkedin.com"),
            kind: ContentKind::Profile,
            fields: vec![
                ("name".to_string(), FieldValue::Text("Jane Doe".to_string())),
                (
                    "experience".to_string(),
                    FieldValue::List(vec![ListItem::Record(vec![
                        ("title".to_string(), "Engineer".to_string()),
                        ("company".to_string(), "Acme".to_string()),
                    ])]),
                ),
                (
                    "skills".to_string(),
                    FieldValue::List(vec![ListItem::Text("Rust".to_string())]),
                ),
            ],
            link: "https://www.linkedin.com/in/jane-doe".to_string(),
            scraped_at: Some(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()),
        }
    }

    #[test]
    fn serializes_flat_in_field_order() {
        let json = serde_json::to_string(&profile_record()).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"name":"Jane Doe","#,
                r#""experience":[{"title":"Engineer","company":"Acme"}],"#,
                r#""skills":["Rust"],"#,
                r#""link":"https://www.linkedin.com/in/jane-doe","#,
                r#""scrapedAt":"2024-06-15T12:00:00.000Z"}"#
            )
        );
    }

    #[test]
    fn job_records_omit_scraped_at() {
        let record = ScrapedRecord {
            site: SiteKey::new("indeed.com"),
            kind: ContentKind::Job,
            fields: vec![("role".to_string(), FieldValue::Text("Chef".to_string()))],
            link: "https://www.indeed.com/viewjob?jk=1".to_string(),
            scraped_at: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"role":"Chef","link":"https://www.indeed.com/viewjob?jk=1"}"#
        );
    }

    #[test]
    fn accessors() {
        let record = profile_record();
        assert_eq!(record.text("name"), Some("Jane Doe"));
        assert_eq!(record.text("experience"), None);
        assert_eq!(record.list("experience").unwrap()[0].get("company"), Some("Acme"));
        assert_eq!(record.list("skills").unwrap()[0].get("company"), None);
        assert!(record.get("missing").is_none());
        assert!(!record.is_empty());
    }

    #[test]
    fn item_emptiness() {
        assert!(ListItem::Text(String::new()).is_empty());
        assert!(ListItem::Record(vec![("a".to_string(), String::new())]).is_empty());
        assert!(!ListItem::Record(vec![
            ("a".to_string(), String::new()),
            ("b".to_string(), "x".to_string()),
        ])
        .is_empty());
    }
}
