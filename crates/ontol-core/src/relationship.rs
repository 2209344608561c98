//! Closed tag sets for hierarchy edges.
//!
//! [`RelationshipType`] and [`RelationshipDirection`] are the only values a
//! hierarchy statement may use for its edge kind and `direction` attribute.
//! Both expose a single parse-or-fail constructor, [`RelationshipType::from_tag`]
//! and [`RelationshipDirection::from_tag`], so invalid input surfaces as a
//! typed failure at exactly one place.

use std::fmt;

use serde::Serialize;

/// The kind of an edge between two terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationshipType {
    #[serde(rename = "dependence")]
    Dependence,
    #[serde(rename = "association")]
    Association,
    #[serde(rename = "directAssociation")]
    DirectAssociation,
    #[serde(rename = "inheritance")]
    Inheritance,
    #[serde(rename = "implementation")]
    Implementation,
    #[serde(rename = "aggregation")]
    Aggregation,
    #[serde(rename = "composition")]
    Composition,
}

impl RelationshipType {
    /// All relationship types, in tag order.
    pub const ALL: [RelationshipType; 7] = [
        RelationshipType::Dependence,
        RelationshipType::Association,
        RelationshipType::DirectAssociation,
        RelationshipType::Inheritance,
        RelationshipType::Implementation,
        RelationshipType::Aggregation,
        RelationshipType::Composition,
    ];

    /// Parse a surface tag, returning `None` for anything outside the set.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "dependence" => Some(RelationshipType::Dependence),
            "association" => Some(RelationshipType::Association),
            "directAssociation" => Some(RelationshipType::DirectAssociation),
            "inheritance" => Some(RelationshipType::Inheritance),
            "implementation" => Some(RelationshipType::Implementation),
            "aggregation" => Some(RelationshipType::Aggregation),
            "composition" => Some(RelationshipType::Composition),
            _ => None,
        }
    }

    /// The textual tag used in Ontol source and serialized output.
    pub fn tag(&self) -> &'static str {
        match self {
            RelationshipType::Dependence => "dependence",
            RelationshipType::Association => "association",
            RelationshipType::DirectAssociation => "directAssociation",
            RelationshipType::Inheritance => "inheritance",
            RelationshipType::Implementation => "implementation",
            RelationshipType::Aggregation => "aggregation",
            RelationshipType::Composition => "composition",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// The reading direction of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationshipDirection {
    #[serde(rename = "forward")]
    Forward,
    #[serde(rename = "backward")]
    Backward,
    #[serde(rename = "bidirectional")]
    Bidirectional,
}

impl RelationshipDirection {
    /// All directions, in tag order.
    pub const ALL: [RelationshipDirection; 3] = [
        RelationshipDirection::Forward,
        RelationshipDirection::Backward,
        RelationshipDirection::Bidirectional,
    ];

    /// Parse a surface tag, returning `None` for anything outside the set.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "forward" => Some(RelationshipDirection::Forward),
            "backward" => Some(RelationshipDirection::Backward),
            "bidirectional" => Some(RelationshipDirection::Bidirectional),
            _ => None,
        }
    }

    /// The textual tag used in Ontol source and serialized output.
    pub fn tag(&self) -> &'static str {
        match self {
            RelationshipDirection::Forward => "forward",
            RelationshipDirection::Backward => "backward",
            RelationshipDirection::Bidirectional => "bidirectional",
        }
    }
}

impl fmt::Display for RelationshipDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_round_trip() {
        for ty in RelationshipType::ALL {
            assert_eq!(RelationshipType::from_tag(ty.tag()), Some(ty));
        }
    }

    #[test]
    fn test_type_rejects_unknown() {
        assert_eq!(RelationshipType::from_tag("friendship"), None);
        assert_eq!(RelationshipType::from_tag(""), None);
        // Tags are case sensitive.
        assert_eq!(RelationshipType::from_tag("Inheritance"), None);
        assert_eq!(RelationshipType::from_tag("directassociation"), None);
    }

    #[test]
    fn test_direction_round_trip() {
        for dir in RelationshipDirection::ALL {
            assert_eq!(RelationshipDirection::from_tag(dir.tag()), Some(dir));
        }
    }

    #[test]
    fn test_direction_rejects_unknown() {
        assert_eq!(RelationshipDirection::from_tag("sideways"), None);
        assert_eq!(RelationshipDirection::from_tag("FORWARD"), None);
    }

    #[test]
    fn test_serialize_as_tag() {
        let json = serde_json::to_string(&RelationshipType::DirectAssociation).unwrap();
        assert_eq!(json, "\"directAssociation\"");

        let json = serde_json::to_string(&RelationshipDirection::Bidirectional).unwrap();
        assert_eq!(json, "\"bidirectional\"");
    }
}
