//! Seeker preference validation.
//!
//! Preferences are stored as an opaque JSON object. Five keys have
//! enumerated option sets and are checked when present; every other key is
//! carried through untouched.

use serde_json::{Map, Value, json};

use crate::{Error, Result};

/// A stored preferences mapping.
pub type Preferences = Map<String, Value>;

pub const CONSULTATION_TYPES: &[&str] = &["physical", "online"];
pub const SERVICE_SCOPES: &[&str] = &["complete_rebranding", "wardrobe_only"];
pub const SERVICES: &[&str] =
  &["body_fitness", "hair", "skincare", "nails", "hygiene", "wardrobe"];
pub const CATALYST_BUDGETS: &[&str] =
  &["free", "200-500", "500-1000", "1000-2000", "2000-5000", "5000+"];
pub const PERSONAL_BUDGETS: &[&str] =
  &["200-1000", "1000-3000", "3000-5000", "5000-10000", "10000+"];

/// Shape of a checked key.
#[derive(Clone, Copy)]
enum Shape {
  /// A single string from the option set.
  Scalar,
  /// A list whose every element is from the option set.
  List,
}

const RULES: &[(&str, Shape, &[&str])] = &[
  ("consultation_type", Shape::List, CONSULTATION_TYPES),
  ("service_scope", Shape::Scalar, SERVICE_SCOPES),
  ("services_selected", Shape::List, SERVICES),
  ("budget_catalyst", Shape::Scalar, CATALYST_BUDGETS),
  ("budget_personal", Shape::Scalar, PERSONAL_BUDGETS),
];

fn allowed(options: &[&str]) -> String { options.join(", ") }

/// Validate a submitted payload and return it as the new preferences.
///
/// The first violation fails the whole update; on success the entire
/// payload, unchecked keys included, is the replacement value.
pub fn validate(payload: Value) -> Result<Preferences> {
  let Value::Object(map) = payload else {
    return Err(Error::validation("preferences", "must be a JSON object"));
  };

  for &(field, shape, options) in RULES {
    let Some(value) = map.get(field) else { continue };
    match shape {
      Shape::Scalar => {
        let ok = value.as_str().is_some_and(|s| options.contains(&s));
        if !ok {
          return Err(Error::validation(
            field,
            format!("must be one of: {}", allowed(options)),
          ));
        }
      }
      Shape::List => {
        let Some(items) = value.as_array() else {
          return Err(Error::validation(
            field,
            format!("must be a list of: {}", allowed(options)),
          ));
        };
        let ok = items
          .iter()
          .all(|v| v.as_str().is_some_and(|s| options.contains(&s)));
        if !ok {
          return Err(Error::validation(
            field,
            format!("must be one or more of: {}", allowed(options)),
          ));
        }
      }
    }
  }

  Ok(map)
}

/// What `get_preferences` reports for a profile that has none stored.
pub fn defaults() -> Preferences {
  let mut map = Preferences::new();
  map.insert("consultation_type".into(), json!([]));
  map.insert("service_scope".into(), json!(""));
  map.insert("services_selected".into(), json!([]));
  map.insert("budget_catalyst".into(), json!(""));
  map.insert("budget_personal".into(), json!(""));
  map
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_unknown_scope_naming_the_field() {
    let err = validate(json!({ "service_scope": "invalid_value" })).unwrap_err();
    assert_eq!(err.field(), Some("service_scope"));
    assert!(err.to_string().contains("complete_rebranding"));
  }

  #[test]
  fn accepts_a_single_key_payload() {
    let prefs = validate(json!({ "consultation_type": ["online"] })).unwrap();
    assert_eq!(prefs.len(), 1);
    assert_eq!(prefs["consultation_type"], json!(["online"]));
  }

  #[test]
  fn keeps_unchecked_keys() {
    let prefs = validate(json!({
      "budget_personal": "10000+",
      "favourite_colour": "teal",
    }))
    .unwrap();
    assert_eq!(prefs["favourite_colour"], json!("teal"));
  }

  #[test]
  fn list_fields_must_be_lists_of_known_values() {
    let err = validate(json!({ "consultation_type": "online" })).unwrap_err();
    assert_eq!(err.field(), Some("consultation_type"));
    assert!(err.to_string().contains("physical, online"));

    let err = validate(json!({ "services_selected": ["hair", "tattoos"] })).unwrap_err();
    assert_eq!(err.field(), Some("services_selected"));

    assert!(validate(json!({ "services_selected": [] })).is_ok());
  }

  #[test]
  fn scalar_fields_reject_non_strings() {
    let err = validate(json!({ "budget_catalyst": 500 })).unwrap_err();
    assert_eq!(err.field(), Some("budget_catalyst"));
  }

  #[test]
  fn non_object_payload_is_rejected() {
    let err = validate(json!(["online"])).unwrap_err();
    assert_eq!(err.field(), Some("preferences"));
  }

  #[test]
  fn full_valid_payload() {
    let payload = json!({
      "consultation_type": ["physical", "online"],
      "service_scope": "wardrobe_only",
      "services_selected": ["hair", "nails"],
      "budget_catalyst": "free",
      "budget_personal": "200-1000",
    });
    assert_eq!(Value::Object(validate(payload.clone()).unwrap()), payload);
  }

  #[test]
  fn defaults_have_every_checked_key() {
    let d = defaults();
    for &(field, _, _) in RULES {
      assert!(d.contains_key(field), "{field}");
    }
  }
}
