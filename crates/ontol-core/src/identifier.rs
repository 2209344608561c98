//! Identifier management using string interning.
//!
//! Every named entity in an ontology (term, function, relationship, figure
//! member) is keyed by an [`Id`]. Interning keeps comparisons and hash-map
//! lookups cheap while names flow through parsing, merging and generation.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> &'static Mutex<DefaultStringInterner> {
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::new()))
}

/// An interned identifier.
///
/// # Examples
///
/// ```
/// use ontol_core::identifier::Id;
///
/// let set = Id::new("set");
/// let element = Id::new("element");
///
/// assert_ne!(set, element);
/// assert_eq!(set, "set");
/// assert_eq!(set.to_string(), "set");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Intern `name` and return its identifier.
    pub fn new(name: &str) -> Self {
        let mut interner = interner().lock().expect("interner lock poisoned");
        Self(interner.get_or_intern(name))
    }

    /// Resolve the identifier back to its textual name.
    pub fn resolve(&self) -> String {
        let interner = interner().lock().expect("interner lock poisoned");
        interner
            .resolve(self.0)
            .expect("symbol missing from interner")
            .to_owned()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner().lock().expect("interner lock poisoned");
        let name = interner
            .resolve(self.0)
            .expect("symbol missing from interner");
        write!(f, "{name}")
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        let interner = interner().lock().expect("interner lock poisoned");
        let name = interner
            .resolve(self.0)
            .expect("symbol missing from interner");
        name == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.resolve())
    }
}
