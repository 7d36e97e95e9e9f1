//! The user's active view over operations.
//!
//! A [`Filter`] is a plain value: it is restored from local state, changed by user
//! action and translated into store query parameters by [`Filter::query`].

use std::{fmt, str::FromStr};

use api_types::{Id, operation::OperationKind};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

const ALL: &str = "all";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    /// The operation kind to filter on, `None` for the `all` sentinel.
    pub fn kind(self) -> Option<OperationKind> {
        match self {
            Self::All => None,
            Self::Income => Some(OperationKind::Income),
            Self::Expense => Some(OperationKind::Expense),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ALL => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::Validation(format!(
                "unknown operation type: {other}"
            ))),
        }
    }
}

/// Either every category or a single category id.
///
/// Stored as a plain string: `"all"` or the category id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Id", into = "Id")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Id),
}

impl CategoryFilter {
    pub fn id(&self) -> Option<&Id> {
        match self {
            Self::All => None,
            Self::Only(id) => Some(id),
        }
    }
}

impl From<Id> for CategoryFilter {
    fn from(value: Id) -> Self {
        if value.is_empty() || value.as_str() == ALL {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<CategoryFilter> for Id {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => Id::from(ALL),
            CategoryFilter::Only(id) => id,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(Id::from(s.trim())))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    #[default]
    #[serde(rename = "recent")]
    Recent,
    #[serde(rename = "less-recent")]
    LessRecent,
    #[serde(rename = "higher-amount")]
    HigherAmount,
    #[serde(rename = "lower-amount")]
    LowerAmount,
    #[serde(rename = "a-z")]
    AToZ,
    #[serde(rename = "z-a")]
    ZToA,
}

impl SortBy {
    pub const ALL: [SortBy; 6] = [
        Self::Recent,
        Self::LessRecent,
        Self::HigherAmount,
        Self::LowerAmount,
        Self::AToZ,
        Self::ZToA,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::LessRecent => "less-recent",
            Self::HigherAmount => "higher-amount",
            Self::LowerAmount => "lower-amount",
            Self::AToZ => "a-z",
            Self::ZToA => "z-a",
        }
    }

    /// Store field and direction this sort order maps to.
    pub fn field_and_direction(self) -> (&'static str, SortDirection) {
        match self {
            Self::Recent => ("date", SortDirection::Desc),
            Self::LessRecent => ("date", SortDirection::Asc),
            Self::HigherAmount => ("amount", SortDirection::Desc),
            Self::LowerAmount => ("amount", SortDirection::Asc),
            Self::AToZ => ("description", SortDirection::Asc),
            Self::ZToA => ("description", SortDirection::Desc),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == wanted)
            .ok_or_else(|| EngineError::Validation(format!("unknown sort order: {wanted}")))
    }
}

/// View constraints applied when listing operations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    #[serde(rename = "type")]
    pub kind: TypeFilter,
    pub category: CategoryFilter,
    #[serde(rename = "sortBy")]
    pub sort_by: SortBy,
}

impl Filter {
    /// Every operation of one category, in the default order.
    pub fn for_category(id: Id) -> Self {
        Self {
            category: CategoryFilter::from(id),
            ..Self::default()
        }
    }

    /// Query parameters for `GET /operations`.
    ///
    /// `type` and `category` are omitted for the `all` sentinel; the sort order is
    /// always sent as `_sort`/`_order`.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if let Some(kind) = self.kind.kind() {
            params.push(("type", kind.as_str().to_string()));
        }
        if let Some(id) = self.category.id() {
            params.push(("category", id.to_string()));
        }
        let (field, direction) = self.sort_by.field_and_direction();
        params.push(("_sort", field.to_string()));
        params.push(("_order", direction.as_str().to_string()));
        params
    }
}

/// Parse an operation kind typed by the user (`income`/`expense`).
pub fn parse_kind(value: &str) -> ResultEngine<OperationKind> {
    TypeFilter::from_str(value)?.kind().ok_or_else(|| {
        EngineError::Validation("operation type must be income or expense".to_string())
    })
}
