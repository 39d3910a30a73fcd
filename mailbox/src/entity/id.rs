use std::{fmt, ops::Deref};

/// The identifier of an element entity or of a list of entities.
///
/// Remote entities are either standalone elements, identified by a
/// single [`Id`], or list elements, identified by an [`IdTuple`]
/// made of the list id and the element id.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Id(String);

impl Id {
    pub fn new(id: impl ToString) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Id {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for Id {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&Id> for Id {
    fn from(id: &Id) -> Self {
        id.clone()
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identifier of a list element entity.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(
    feature = "derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct IdTuple {
    /// The id of the list containing the element.
    pub list_id: Id,

    /// The id of the element inside its list.
    pub element_id: Id,
}

impl IdTuple {
    pub fn new(list_id: impl Into<Id>, element_id: impl Into<Id>) -> Self {
        Self {
            list_id: list_id.into(),
            element_id: element_id.into(),
        }
    }
}

impl<L: Into<Id>, E: Into<Id>> From<(L, E)> for IdTuple {
    fn from((list_id, element_id): (L, E)) -> Self {
        Self::new(list_id, element_id)
    }
}

impl fmt::Display for IdTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.list_id, self.element_id)
    }
}
