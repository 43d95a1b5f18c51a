//! Minimal HAL (Hypertext Application Language) documents

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Media type for HAL responses
pub const HAL_JSON: &str = "application/hal+json";

/// A navigational link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HalLink {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A resource: links, embedded resources, and properties at the top level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HalDocument {
    #[serde(rename = "_links", default)]
    pub links: BTreeMap<String, HalLink>,
    #[serde(
        rename = "_embedded",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub embedded: BTreeMap<String, Vec<HalDocument>>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl HalDocument {
    /// Document whose `self` link points at `href`
    pub fn new(href: impl Into<String>, title: Option<String>) -> Self {
        let mut doc = Self::default();
        doc.links.insert(
            "self".to_string(),
            HalLink {
                href: href.into(),
                title,
            },
        );
        doc
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn embed(mut self, rel: impl Into<String>, docs: Vec<HalDocument>) -> Self {
        self.embedded.entry(rel.into()).or_default().extend(docs);
        self
    }

    pub fn self_link(&self) -> Option<&HalLink> {
        self.links.get("self")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_properties_are_top_level() {
        let doc = HalDocument::new("/things/1", None).property("name", "one");
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["name"], "one");
        assert_eq!(value["_links"]["self"]["href"], "/things/1");
        assert!(value["_links"]["self"].get("title").is_none());
        assert!(value.get("_embedded").is_none());
    }

    #[test]
    fn test_embedded_documents() {
        let doc = HalDocument::new("/things", Some("things".into())).embed(
            "item",
            vec![HalDocument::new("/things/1", None), HalDocument::new("/things/2", None)],
        );
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["_embedded"]["item"][1]["_links"]["self"]["href"], "/things/2");
    }

    #[test]
    fn test_deserialize_keeps_properties() {
        let doc: HalDocument = serde_json::from_value(json!({
            "_links": {"self": {"href": "/x", "title": "X"}},
            "a": 1
        }))
        .unwrap();
        assert_eq!(doc.self_link().and_then(|l| l.title.as_deref()), Some("X"));
        assert_eq!(doc.properties.get("a"), Some(&json!(1)));
    }
}
