//! Typed attribute records for terms, functions and relationships.
//!
//! Ontol source attaches attributes as `{ key: 'value', ... }` blocks. Each
//! entity kind accepts a fixed key set; anything else is rejected when the
//! parsed pair is applied to the record via [`TermAttributes::apply`] and its
//! siblings. Enumerated values (`type`, `direction`) are coerced through the
//! closed tag sets in [`crate::relationship`] at the same point, so a bad tag
//! is a typed [`AttributeError`] rather than a silently absent field.

use serde::Serialize;
use thiserror::Error;

use crate::relationship::{RelationshipDirection, RelationshipType};

/// Failure to apply a parsed `key: value` pair to an attribute record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("unknown attribute '{key}', allowed attributes are: {}", allowed.join(", "))]
    UnknownKey {
        key: String,
        allowed: &'static [&'static str],
    },

    #[error("invalid {expected} '{value}' for attribute '{key}'")]
    InvalidTag {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Rendering attributes of a [`crate::ast::Term`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TermAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TermAttributes {
    /// Surface key names accepted in a term attribute block.
    pub const FIELDS: &'static [&'static str] = &["color", "note"];

    /// Apply one parsed attribute pair, rejecting keys outside [`Self::FIELDS`].
    pub fn apply(&mut self, key: &str, value: String) -> Result<(), AttributeError> {
        match key {
            "color" => self.color = Some(value),
            "note" => self.note = Some(value),
            _ => {
                return Err(AttributeError::UnknownKey {
                    key: key.to_owned(),
                    allowed: Self::FIELDS,
                });
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.note.is_none()
    }
}

/// Rendering attributes of a [`crate::ast::Function`].
///
/// `relationship_type` is spelled `type` in source and serialized form: it
/// selects the arrow style used for the function's synthesized call edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FunctionAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "colorArrow", skip_serializing_if = "Option::is_none")]
    pub color_arrow: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<RelationshipType>,
    #[serde(rename = "inputTitle", skip_serializing_if = "Option::is_none")]
    pub input_title: Option<String>,
    #[serde(rename = "outputTitle", skip_serializing_if = "Option::is_none")]
    pub output_title: Option<String>,
}

impl FunctionAttributes {
    /// Surface key names accepted in a function attribute block.
    pub const FIELDS: &'static [&'static str] =
        &["color", "colorArrow", "type", "inputTitle", "outputTitle"];

    /// Apply one parsed attribute pair.
    ///
    /// The `type` value must be a valid relationship-type tag.
    pub fn apply(&mut self, key: &str, value: String) -> Result<(), AttributeError> {
        match key {
            "color" => self.color = Some(value),
            "colorArrow" => self.color_arrow = Some(value),
            "type" => {
                let ty = RelationshipType::from_tag(&value).ok_or(AttributeError::InvalidTag {
                    key: "type",
                    value: value.clone(),
                    expected: "relationship type",
                })?;
                self.relationship_type = Some(ty);
            }
            "inputTitle" => self.input_title = Some(value),
            "outputTitle" => self.output_title = Some(value),
            _ => {
                return Err(AttributeError::UnknownKey {
                    key: key.to_owned(),
                    allowed: Self::FIELDS,
                });
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.color_arrow.is_none()
            && self.relationship_type.is_none()
            && self.input_title.is_none()
            && self.output_title.is_none()
    }
}

/// Rendering attributes of a [`crate::ast::Relationship`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationshipAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<RelationshipDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "leftChar", skip_serializing_if = "Option::is_none")]
    pub left_char: Option<String>,
    #[serde(rename = "rightChar", skip_serializing_if = "Option::is_none")]
    pub right_char: Option<String>,
}

impl RelationshipAttributes {
    /// Surface key names accepted in a hierarchy attribute block.
    pub const FIELDS: &'static [&'static str] =
        &["color", "direction", "title", "leftChar", "rightChar"];

    /// Apply one parsed attribute pair.
    ///
    /// The `direction` value must be a valid direction tag.
    pub fn apply(&mut self, key: &str, value: String) -> Result<(), AttributeError> {
        match key {
            "color" => self.color = Some(value),
            "direction" => {
                let dir =
                    RelationshipDirection::from_tag(&value).ok_or(AttributeError::InvalidTag {
                        key: "direction",
                        value: value.clone(),
                        expected: "relationship direction",
                    })?;
                self.direction = Some(dir);
            }
            "title" => self.title = Some(value),
            "leftChar" => self.left_char = Some(value),
            "rightChar" => self.right_char = Some(value),
            _ => {
                return Err(AttributeError::UnknownKey {
                    key: key.to_owned(),
                    allowed: Self::FIELDS,
                });
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.direction.is_none()
            && self.title.is_none()
            && self.left_char.is_none()
            && self.right_char.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_attributes_apply() {
        let mut attrs = TermAttributes::default();
        attrs.apply("color", "#ffffff".to_owned()).unwrap();
        attrs.apply("note", "a note".to_owned()).unwrap();

        assert_eq!(attrs.color.as_deref(), Some("#ffffff"));
        assert_eq!(attrs.note.as_deref(), Some("a note"));
        assert!(!attrs.is_empty());
    }

    #[test]
    fn test_term_attributes_unknown_key() {
        let mut attrs = TermAttributes::default();
        let err = attrs.apply("foo", "bar".to_owned()).unwrap_err();

        // The message lists the permitted keys.
        let message = err.to_string();

        match err {
            AttributeError::UnknownKey { key, allowed } => {
                assert_eq!(key, "foo");
                assert_eq!(allowed, TermAttributes::FIELDS);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(message.contains("color"));
        assert!(message.contains("note"));
    }

    #[test]
    fn test_function_type_coercion() {
        let mut attrs = FunctionAttributes::default();
        attrs.apply("type", "inheritance".to_owned()).unwrap();
        assert_eq!(attrs.relationship_type, Some(RelationshipType::Inheritance));

        let err = attrs.apply("type", "nonsense".to_owned()).unwrap_err();
        assert!(matches!(err, AttributeError::InvalidTag { key: "type", .. }));
    }

    #[test]
    fn test_relationship_direction_coercion() {
        let mut attrs = RelationshipAttributes::default();
        attrs.apply("direction", "backward".to_owned()).unwrap();
        assert_eq!(attrs.direction, Some(RelationshipDirection::Backward));

        let err = attrs.apply("direction", "up".to_owned()).unwrap_err();
        assert!(matches!(
            err,
            AttributeError::InvalidTag {
                key: "direction",
                ..
            }
        ));
    }

    #[test]
    fn test_relationship_chars() {
        let mut attrs = RelationshipAttributes::default();
        attrs.apply("leftChar", "1".to_owned()).unwrap();
        attrs.apply("rightChar", "*".to_owned()).unwrap();
        attrs.apply("title", "contains".to_owned()).unwrap();

        assert_eq!(attrs.left_char.as_deref(), Some("1"));
        assert_eq!(attrs.right_char.as_deref(), Some("*"));
        assert_eq!(attrs.title.as_deref(), Some("contains"));
    }

    #[test]
    fn test_empty_default() {
        assert!(TermAttributes::default().is_empty());
        assert!(FunctionAttributes::default().is_empty());
        assert!(RelationshipAttributes::default().is_empty());
    }
}
