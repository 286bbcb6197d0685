// ABOUTME: Declarative field descriptors and per-site profiles that drive extraction.
// ABOUTME: Pure data deserialized from the site table; the extractor interprets it.

//! Field descriptors.
//!
//! A [`SiteProfile`] is an ordered list of named [`FieldDescriptor`]s. The
//! JSON form keeps one object per field so definition order survives
//! deserialization:
//!
//! ```json
//! { "name": "role", "type": "text", "selector": "h1.title", "title": true }
//! { "name": "skills", "type": "list", "selector": "#skills li" }
//! ```

use serde::{Deserialize, Serialize};

/// How one field is located and read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FieldDescriptor {
    /// First match, read as trimmed text content.
    #[serde(rename = "text")]
    SingleText {
        selector: String,
        /// Marks the page's primary title field, which falls back to the
        /// first `h1` when its selector matches nothing.
        #[serde(default, skip_serializing_if = "is_false")]
        title: bool,
    },
    /// First match, read as markup and run through the normalizer.
    #[serde(rename = "html")]
    SingleHtml { selector: String },
    /// Every match of a container selector. With sub-fields each item becomes
    /// a record; without, each item is one text value.
    #[serde(rename = "list")]
    RepeatedList {
        selector: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<SubField>>,
    },
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl FieldDescriptor {
    /// Plain-text field.
    pub fn text(selector: impl Into<String>) -> Self {
        FieldDescriptor::SingleText {
            selector: selector.into(),
            title: false,
        }
    }

    /// Plain-text field with the `h1` title fallback.
    pub fn title(selector: impl Into<String>) -> Self {
        FieldDescriptor::SingleText {
            selector: selector.into(),
            title: true,
        }
    }

    /// Markup field.
    pub fn html(selector: impl Into<String>) -> Self {
        FieldDescriptor::SingleHtml {
            selector: selector.into(),
        }
    }

    /// Repeated structure yielding flat strings.
    pub fn list(selector: impl Into<String>) -> Self {
        FieldDescriptor::RepeatedList {
            selector: selector.into(),
            fields: None,
        }
    }

    /// Repeated structure yielding one record per item.
    pub fn records(selector: impl Into<String>, fields: Vec<SubField>) -> Self {
        FieldDescriptor::RepeatedList {
            selector: selector.into(),
            fields: Some(fields),
        }
    }

    /// The main selector expression (the container selector for lists).
    pub fn selector(&self) -> &str {
        match self {
            FieldDescriptor::SingleText { selector, .. }
            | FieldDescriptor::SingleHtml { selector }
            | FieldDescriptor::RepeatedList { selector, .. } => selector,
        }
    }

    /// Sub-field selectors, if this is a record-valued list.
    pub fn sub_fields(&self) -> &[SubField] {
        match self {
            FieldDescriptor::RepeatedList {
                fields: Some(fields),
                ..
            } => fields,
            _ => &[],
        }
    }
}

/// One named selector resolved relative to a list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubField {
    pub name: String,
    pub selector: String,
}

impl SubField {
    pub fn new(name: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
        }
    }
}

/// A named field descriptor as it appears in a site profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(flatten)]
    pub descriptor: FieldDescriptor,
}

/// Ordered field descriptors for one supported site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteProfile {
    fields: Vec<FieldSpec>,
}

impl SiteProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field; extraction follows insertion order.
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            descriptor,
        });
        self
    }

    /// Looks up a descriptor by field name.
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.descriptor)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every selector the profile uses, sub-field selectors included.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().flat_map(|f| {
            std::iter::once(f.descriptor.selector())
                .chain(f.descriptor.sub_fields().iter().map(|s| s.selector.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_all_three_variants_in_order() {
        let json = r##"[
            {"name": "role", "type": "text", "selector": "h1.title", "title": true},
            {"name": "description", "type": "html", "selector": "#desc"},
            {"name": "experience", "type": "list", "selector": ".entry",
             "fields": [{"name": "title", "selector": ".t-bold"}]},
            {"name": "skills", "type": "list", "selector": ".skill"}
        ]"##;
        let profile: SiteProfile = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = profile.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["role", "description", "experience", "skills"]);
        assert_eq!(profile.get("role"), Some(&FieldDescriptor::title("h1.title")));
        assert_eq!(profile.get("description"), Some(&FieldDescriptor::html("#desc")));
        assert_eq!(
            profile.get("experience"),
            Some(&FieldDescriptor::records(
                ".entry",
                vec![SubField::new("title", ".t-bold")]
            ))
        );
        assert_eq!(profile.get("skills"), Some(&FieldDescriptor::list(".skill")));
    }

    #[test]
    fn title_flag_defaults_to_false() {
        let spec: FieldSpec =
            serde_json::from_str(r#"{"name": "company", "type": "text", "selector": ".co"}"#)
                .unwrap();
        assert_eq!(spec.descriptor, FieldDescriptor::text(".co"));
    }

    #[test]
    fn serialization_omits_defaults() {
        let profile = SiteProfile::new().field("company", FieldDescriptor::text(".co"));
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, r#"[{"name":"company","type":"text","selector":".co"}]"#);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let result: Result<FieldSpec, _> =
            serde_json::from_str(r#"{"name": "x", "type": "json", "selector": "script"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn selectors_include_sub_fields() {
        let profile = SiteProfile::new()
            .field("name", FieldDescriptor::text("h1"))
            .field(
                "education",
                FieldDescriptor::records(
                    ".school",
                    vec![SubField::new("school", ".a"), SubField::new("degree", ".b")],
                ),
            );
        let all: Vec<&str> = profile.selectors().collect();
        assert_eq!(all, vec!["h1", ".school", ".a", ".b"]);
    }
}
