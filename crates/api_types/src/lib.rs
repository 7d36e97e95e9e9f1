use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque identifier assigned by the remote store.
///
/// The store may hand out numeric or string ids (json-server keeps whatever the
/// client posted). Both are normalized to their string form when deserialized, so
/// every comparison in the workspace is plain string equality.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl From<RawId> for Id {
    fn from(value: RawId) -> Self {
        match value {
            RawId::Text(text) => Self(text),
            RawId::Signed(number) => Self(number.to_string()),
            RawId::Unsigned(number) => Self(number.to_string()),
        }
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(Id::from)
    }
}

/// Deserializes an optional reference, treating `null` and `""` as unset.
pub fn optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Id>, D::Error> {
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.map(Id::from).filter(|id| !id.is_empty()))
}

pub mod operation {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum OperationKind {
        Income,
        Expense,
    }

    impl OperationKind {
        /// Value used by the store for the `type` field.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "income",
                Self::Expense => "expense",
            }
        }
    }

    impl fmt::Display for OperationKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// A single income or expense ledger entry as stored remotely.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Operation {
        pub id: Id,
        pub description: String,
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: OperationKind,
        #[serde(default, deserialize_with = "optional_id")]
        pub category: Option<Id>,
        /// `YYYY-MM-DD`, no time component.
        pub date: String,
    }

    /// Request body for `POST /operations` and `PUT /operations/{id}`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct OperationNew {
        pub description: String,
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: OperationKind,
        #[serde(default, deserialize_with = "optional_id")]
        pub category: Option<Id>,
        pub date: String,
    }
}

pub mod category {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Category {
        pub id: Id,
        pub name: String,
    }

    /// Request body for `POST /categories` and `PUT /categories/{id}`.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
    }
}

pub mod user {
    use super::*;

    /// A record of `GET /users`.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct User {
        #[serde(default)]
        pub id: Id,
        pub username: String,
        pub password: String,
    }
}

pub mod stats {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;

    use super::*;

    /// Totals over the whole operation set.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct Balance {
        pub income: f64,
        pub expenses: f64,
        pub balance: f64,
    }

    /// Income, expense and balance of one group (category or month).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct Aggregate {
        pub income: f64,
        pub expense: f64,
        pub balance: f64,
    }

    /// The winning group of one report dimension.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Highest {
        pub name: String,
        pub amount: f64,
    }

    impl Highest {
        pub const NOT_AVAILABLE: &'static str = "N/A";

        /// Placeholder reported when no group qualifies.
        pub fn not_available() -> Self {
            Self {
                name: Self::NOT_AVAILABLE.to_string(),
                amount: 0.0,
            }
        }

        pub fn is_available(&self) -> bool {
            self.name != Self::NOT_AVAILABLE
        }
    }

    /// Group name -> [`Aggregate`], kept in order of first appearance.
    ///
    /// Serialized as a JSON object whose keys follow that order.
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct GroupTotals {
        entries: Vec<(String, Aggregate)>,
    }

    impl GroupTotals {
        pub fn len(&self) -> usize {
            self.entries.len()
        }

        pub fn is_empty(&self) -> bool {
            self.entries.is_empty()
        }

        pub fn get(&self, name: &str) -> Option<&Aggregate> {
            self.entries
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, aggregate)| aggregate)
        }

        /// Returns the aggregate for `name`, appending a zeroed one on first use.
        pub fn entry(&mut self, name: &str) -> &mut Aggregate {
            let index = match self.entries.iter().position(|(key, _)| key == name) {
                Some(index) => index,
                None => {
                    self.entries.push((name.to_string(), Aggregate::default()));
                    self.entries.len() - 1
                }
            };
            &mut self.entries[index].1
        }

        pub fn iter(&self) -> impl Iterator<Item = (&str, &Aggregate)> {
            self.entries
                .iter()
                .map(|(name, aggregate)| (name.as_str(), aggregate))
        }

        pub fn names(&self) -> impl Iterator<Item = &str> {
            self.entries.iter().map(|(name, _)| name.as_str())
        }
    }

    impl Serialize for GroupTotals {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.entries.len()))?;
            for (name, aggregate) in &self.entries {
                map.serialize_entry(name, aggregate)?;
            }
            map.end()
        }
    }

    struct GroupTotalsVisitor;

    impl<'de> Visitor<'de> for GroupTotalsVisitor {
        type Value = GroupTotals;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of group name to totals")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut totals = GroupTotals::default();
            while let Some((name, aggregate)) = access.next_entry::<String, Aggregate>()? {
                *totals.entry(&name) = aggregate;
            }
            Ok(totals)
        }
    }

    impl<'de> Deserialize<'de> for GroupTotals {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(GroupTotalsVisitor)
        }
    }

    /// Result of one reporting request.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Report {
        pub category_with_highest_income: Highest,
        pub category_with_highest_expense: Highest,
        pub category_with_highest_balance: Highest,
        pub month_with_highest_income: Highest,
        pub month_with_highest_expense: Highest,
        pub category_totals: GroupTotals,
        /// Keyed by `YYYY-MM`.
        pub month_totals: GroupTotals,
    }

    impl Default for Report {
        fn default() -> Self {
            Self {
                category_with_highest_income: Highest::not_available(),
                category_with_highest_expense: Highest::not_available(),
                category_with_highest_balance: Highest::not_available(),
                month_with_highest_income: Highest::not_available(),
                month_with_highest_expense: Highest::not_available(),
                category_totals: GroupTotals::default(),
                month_totals: GroupTotals::default(),
            }
        }
    }
}
