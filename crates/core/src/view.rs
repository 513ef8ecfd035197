//! Presentation decision.
//!
//! Maps a [`SearchState`] to exactly one of the views a front end can show.
//! Rendering itself (cards, spinners, colours) belongs to the front end; the
//! choice between "not found", "no alternatives" and results is made here so
//! every front end makes it the same way.

use crate::model::{Medicine, MedicineCategory, SearchResult};
use crate::search::SearchState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// No search issued yet.
    Prompt,
    Loading {
        query: String,
    },
    Error {
        message: String,
    },
    /// The service did not recognise the query.
    NotFound {
        query: String,
    },
    /// Identified, but every category is empty.
    NoAlternatives {
        searched: Medicine,
    },
    /// Identified, with only the non-empty categories in service order.
    Results {
        searched: Medicine,
        categories: Vec<MedicineCategory>,
    },
}

impl View {
    pub fn for_state(state: &SearchState) -> Self {
        match state {
            SearchState::Idle => View::Prompt,
            SearchState::Searching { query } => View::Loading {
                query: query.clone(),
            },
            SearchState::Failed { message, .. } => View::Error {
                message: message.clone(),
            },
            SearchState::Success { query, result } => View::for_result(query, result),
        }
    }

    pub fn for_result(query: &str, result: &SearchResult) -> Self {
        let Some(searched) = result.searched_medicine() else {
            return View::NotFound {
                query: query.to_string(),
            };
        };

        let categories: Vec<MedicineCategory> = result
            .categories()
            .iter()
            .filter(|c| !c.medicines.is_empty())
            .cloned()
            .collect();

        if categories.is_empty() {
            View::NoAlternatives {
                searched: searched.clone(),
            }
        } else {
            View::Results {
                searched: searched.clone(),
                categories,
            }
        }
    }

    /// Short heading for the view.
    pub fn title(&self) -> &'static str {
        match self {
            View::Prompt => "Medicine Finder",
            View::Loading { .. } => "Searching",
            View::Error { .. } => "Oops! Something went wrong.",
            View::NotFound { .. } => "Medicine Not Found",
            View::NoAlternatives { .. } => "No Alternatives Found",
            View::Results { .. } => "You Searched For",
        }
    }

    /// Body text for the view.
    pub fn message(&self) -> String {
        match self {
            View::Prompt => {
                "Enter a medicine name above to find alternatives with similar compositions.".into()
            }
            View::Loading { .. } => "Finding alternatives...".into(),
            View::Error { message } => message.clone(),
            View::NotFound { query } => format!(
                "We couldn't identify a medicine matching \"{query}\". Please check the spelling and try again."
            ),
            View::NoAlternatives { searched } => format!(
                "While we found information for \"{}\", we couldn't find any alternative medicines at this time.",
                searched.brand_name
            ),
            View::Results { searched, .. } => format!(
                "{} ({}, {}) by {}",
                searched.brand_name, searched.salt, searched.dosage, searched.company
            ),
        }
    }
}
