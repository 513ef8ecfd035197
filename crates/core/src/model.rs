//! Canonical data model for medicine lookups.
//!
//! These types mirror the structured output requested from the alternatives
//! service: field names serialise in camelCase (`brandName`,
//! `searchedMedicine`) so a validated result can be handed straight to a
//! front end.

use crate::constants::{
    DIFFERENT_DOSAGE_TITLE, MAX_QUERY_LEN, OTHER_SAME_DOSAGE_TITLE, POPULAR_SAME_DOSAGE_TITLE,
};
use crate::FinderResult;
use medfind_types::NonEmptyText;
use serde::{Deserialize, Serialize};

/// One real-world branded drug product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub brand_name: String,
    pub salt: String,
    pub dosage: String,
    pub company: String,
}

/// A titled group of alternatives. `medicines` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineCategory {
    pub title: String,
    pub medicines: Vec<Medicine>,
}

impl MedicineCategory {
    /// The fixed category this title corresponds to, if any.
    pub fn kind(&self) -> Option<CategoryKind> {
        CategoryKind::from_title(&self.title)
    }
}

/// The three fixed alternative categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    PopularSameDosage,
    OtherSameDosage,
    DifferentDosage,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 3] = [
        CategoryKind::PopularSameDosage,
        CategoryKind::OtherSameDosage,
        CategoryKind::DifferentDosage,
    ];

    pub fn title(self) -> &'static str {
        match self {
            CategoryKind::PopularSameDosage => POPULAR_SAME_DOSAGE_TITLE,
            CategoryKind::OtherSameDosage => OTHER_SAME_DOSAGE_TITLE,
            CategoryKind::DifferentDosage => DIFFERENT_DOSAGE_TITLE,
        }
    }

    /// Matches a service-supplied title, ignoring surrounding whitespace.
    pub fn from_title(title: &str) -> Option<Self> {
        let title = title.trim();
        Self::ALL.into_iter().find(|kind| kind.title() == title)
    }
}

/// Outcome of one lookup.
///
/// `searched_medicine` is `None` exactly when the service could not identify
/// the input. Once built, a result is never mutated; a new search replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    searched_medicine: Option<Medicine>,
    categories: Vec<MedicineCategory>,
}

impl SearchResult {
    pub fn new(searched_medicine: Option<Medicine>, categories: Vec<MedicineCategory>) -> Self {
        Self {
            searched_medicine,
            categories,
        }
    }

    /// The "nothing identified" result.
    pub fn empty() -> Self {
        Self::new(None, Vec::new())
    }

    pub fn searched_medicine(&self) -> Option<&Medicine> {
        self.searched_medicine.as_ref()
    }

    /// Categories in the order the service returned them.
    pub fn categories(&self) -> &[MedicineCategory] {
        &self.categories
    }

    pub fn is_identified(&self) -> bool {
        self.searched_medicine.is_some()
    }

    /// True when at least one category lists a medicine.
    pub fn has_alternatives(&self) -> bool {
        self.categories.iter().any(|c| !c.medicines.is_empty())
    }

    /// Looks up a fixed category regardless of where the service placed it.
    pub fn category(&self, kind: CategoryKind) -> Option<&MedicineCategory> {
        self.categories.iter().find(|c| c.kind() == Some(kind))
    }

    pub fn into_parts(self) -> (Option<Medicine>, Vec<MedicineCategory>) {
        (self.searched_medicine, self.categories)
    }
}

/// A trimmed, non-empty medicine name as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MedicineQuery(NonEmptyText);

impl MedicineQuery {
    /// Parses raw user input.
    ///
    /// # Errors
    ///
    /// Returns `FinderError::InvalidQuery` if the input is blank or longer
    /// than [`MAX_QUERY_LEN`] characters.
    pub fn parse(input: impl AsRef<str>) -> FinderResult<Self> {
        Ok(Self(NonEmptyText::with_max_len(input, MAX_QUERY_LEN)?))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for MedicineQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
