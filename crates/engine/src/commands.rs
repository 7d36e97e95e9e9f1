//! Command structs for write operations.
//!
//! A draft carries raw user input. It only becomes a store payload through
//! `validate`, so nothing invalid is ever sent over the network.

use api_types::{
    Id,
    category::CategoryNew,
    operation::{OperationKind, OperationNew},
};

use crate::{
    EngineError, ResultEngine, money,
    util::{normalize_required_text, validate_date},
};

/// Raw input for creating or replacing an operation.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationDraft {
    pub description: String,
    /// Amount as typed; parsed by [`money::parse_amount`].
    pub amount: String,
    pub kind: OperationKind,
    pub category: Option<Id>,
    pub date: String,
}

impl OperationDraft {
    #[must_use]
    pub fn new(kind: OperationKind, amount: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            description: String::new(),
            amount: amount.into(),
            kind,
            category: None,
            date: date.into(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<Id>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Checks every field and builds the request body.
    pub fn validate(&self) -> ResultEngine<OperationNew> {
        let description = normalize_required_text(&self.description, "description")?;
        let amount = money::parse_amount(&self.amount)?;
        let category = self
            .category
            .as_ref()
            .map(|id| Id::new(id.as_str().trim()))
            .filter(|id| !id.is_empty())
            .ok_or_else(|| EngineError::Validation("category is required".to_string()))?;
        let date = validate_date(&self.date)?;

        Ok(OperationNew {
            description,
            amount,
            kind: self.kind,
            category: Some(category),
            date,
        })
    }
}

/// Validate a category name and build the request body.
pub fn category_payload(name: &str) -> ResultEngine<CategoryNew> {
    Ok(CategoryNew {
        name: normalize_required_text(name, "category name")?,
    })
}
