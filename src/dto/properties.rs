use serde::{Deserialize, Deserializer};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    config::PropertyDefaults,
    models::{NewProperty, PropertyChanges},
    price::Price,
};

/// Body of both create and update; every field is optional.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyPayload {
    #[schema(example = "Riverside condo")]
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[schema(value_type = Option<f64>, example = 2500000.00)]
    pub price: Option<Price>,
    #[schema(example = "Bang Rak, Bangkok")]
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

/// Accepts any JSON scalar or structure as text; `null` stays absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

impl PropertyPayload {
    /// Fill omitted fields from `defaults` for an insert.
    pub fn resolve(self, defaults: &PropertyDefaults) -> NewProperty {
        NewProperty {
            title: self.title.unwrap_or_else(|| defaults.title.clone()),
            price: self.price.unwrap_or(defaults.price),
            location: self.location.unwrap_or_else(|| defaults.location.clone()),
            image_url: self.image_url.or_else(|| defaults.image_url.clone()),
            description: self.description.or_else(|| defaults.description.clone()),
        }
    }

    pub fn into_changes(self) -> PropertyChanges {
        PropertyChanges {
            title: self.title,
            price: self.price,
            location: self.location,
            image_url: self.image_url,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_fills_omitted_fields_from_defaults() {
        let payload: PropertyPayload = serde_json::from_str(r#"{"title":"Test"}"#).unwrap();
        let defaults = PropertyDefaults {
            location: "unknown".into(),
            ..PropertyDefaults::default()
        };

        let resolved = payload.resolve(&defaults);

        assert_eq!(resolved.title, "Test");
        assert_eq!(resolved.location, "unknown");
        assert_eq!(resolved.price, Price::ZERO);
        assert_eq!(resolved.image_url, None);
        assert_eq!(resolved.description, None);
    }

    #[test]
    fn null_fields_count_as_omitted() {
        let payload: PropertyPayload =
            serde_json::from_str(r#"{"imageUrl":null,"price":"12.5"}"#).unwrap();
        let changes = payload.into_changes();

        assert_eq!(changes.image_url, None);
        assert_eq!(changes.price.map(Price::minor_units), Some(1250));
    }

    #[test]
    fn text_fields_take_any_json_value() {
        let payload: PropertyPayload = serde_json::from_str(
            r#"{"title":5,"location":true,"imageUrl":"a.jpg","description":{"rooms":2}}"#,
        )
        .unwrap();

        assert_eq!(payload.title.as_deref(), Some("5"));
        assert_eq!(payload.location.as_deref(), Some("true"));
        assert_eq!(payload.image_url.as_deref(), Some("a.jpg"));
        assert_eq!(payload.description.as_deref(), Some(r#"{"rooms":2}"#));
    }
}
