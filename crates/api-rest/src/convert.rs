//! Core model to wire type conversion.

use api_shared::{
    CategoryRes, MedicineRes, SearchResultRes, SearchStateRes, SearchStatus, ViewKind, ViewRes,
};
use medfind_core::{Medicine, MedicineCategory, SearchResult, SearchState, View};

pub fn medicine_res(medicine: &Medicine) -> MedicineRes {
    MedicineRes {
        brand_name: medicine.brand_name.clone(),
        salt: medicine.salt.clone(),
        dosage: medicine.dosage.clone(),
        company: medicine.company.clone(),
    }
}

pub fn category_res(category: &MedicineCategory) -> CategoryRes {
    CategoryRes {
        title: category.title.clone(),
        medicines: category.medicines.iter().map(medicine_res).collect(),
    }
}

pub fn result_res(result: &SearchResult) -> SearchResultRes {
    SearchResultRes {
        searched_medicine: result.searched_medicine().map(medicine_res),
        categories: result.categories().iter().map(category_res).collect(),
    }
}

pub fn view_res(view: &View) -> ViewRes {
    let (kind, searched, categories) = match view {
        View::Prompt => (ViewKind::Prompt, None, Vec::new()),
        View::Loading { .. } => (ViewKind::Loading, None, Vec::new()),
        View::Error { .. } => (ViewKind::Error, None, Vec::new()),
        View::NotFound { .. } => (ViewKind::NotFound, None, Vec::new()),
        View::NoAlternatives { searched } => {
            (ViewKind::NoAlternatives, Some(medicine_res(searched)), Vec::new())
        }
        View::Results {
            searched,
            categories,
        } => (
            ViewKind::Results,
            Some(medicine_res(searched)),
            categories.iter().map(category_res).collect(),
        ),
    };

    ViewRes {
        kind,
        title: view.title().to_string(),
        message: view.message(),
        searched,
        categories,
    }
}

pub fn state_res(state: &SearchState) -> SearchStateRes {
    match state {
        SearchState::Idle => SearchStateRes {
            status: SearchStatus::Idle,
            query: None,
            message: None,
            result: None,
        },
        SearchState::Searching { query } => SearchStateRes {
            status: SearchStatus::Searching,
            query: Some(query.clone()),
            message: None,
            result: None,
        },
        SearchState::Success { query, result } => SearchStateRes {
            status: SearchStatus::Success,
            query: Some(query.clone()),
            message: None,
            result: Some(result_res(result)),
        },
        SearchState::Failed { query, message } => SearchStateRes {
            status: SearchStatus::Failed,
            query: Some(query.clone()),
            message: Some(message.clone()),
            result: None,
        },
    }
}
