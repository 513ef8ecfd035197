//! Response validation.
//!
//! Turns the raw text returned by the alternatives service into a
//! [`SearchResult`]. Text that is not JSON is a hard failure. JSON with the
//! wrong top-level shape, or an incomplete `searchedMedicine`, is logged and
//! degraded to the empty result so the caller sees "nothing found" instead of
//! an error. A malformed category or alternative is skipped on its own with a
//! warning; the rest of the payload is kept. Content is never rewritten.

use crate::model::{Medicine, MedicineCategory, SearchResult};
use crate::{FinderError, FinderResult};
use serde_json::Value;

/// Why a parsed payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeAnomaly {
    NotAnObject,
    MissingCategories,
    CategoriesNotArray,
    MissingSearchedMedicine,
    SearchedMedicineNotObject,
    /// The identified medicine did not carry the four string fields.
    InvalidEntry(String),
}

impl std::fmt::Display for ShapeAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeAnomaly::NotAnObject => write!(f, "payload is not an object"),
            ShapeAnomaly::MissingCategories => write!(f, "`categories` is missing"),
            ShapeAnomaly::CategoriesNotArray => write!(f, "`categories` is not an array"),
            ShapeAnomaly::MissingSearchedMedicine => write!(f, "`searchedMedicine` is missing"),
            ShapeAnomaly::SearchedMedicineNotObject => {
                write!(f, "`searchedMedicine` is neither an object nor null")
            }
            ShapeAnomaly::InvalidEntry(detail) => write!(f, "invalid entry: {detail}"),
        }
    }
}

/// Validates raw service output.
///
/// # Errors
///
/// Returns `FinderError::MalformedResponse` only when `raw` is not valid JSON.
/// Every other problem degrades to [`SearchResult::empty`].
pub fn validate_response(raw: &str) -> FinderResult<SearchResult> {
    let value: Value = serde_json::from_str(raw.trim()).map_err(FinderError::MalformedResponse)?;

    match check_shape(value) {
        Ok(result) => Ok(result),
        Err(anomaly) => {
            tracing::warn!(%anomaly, "alternatives response has an unexpected shape; treating as not found");
            Ok(SearchResult::empty())
        }
    }
}

/// Shape check on an already-parsed payload.
///
/// Only the top level and `searchedMedicine` can fail the payload. Categories
/// and alternatives that do not match are dropped individually.
pub fn check_shape(value: Value) -> Result<SearchResult, ShapeAnomaly> {
    let Value::Object(mut object) = value else {
        return Err(ShapeAnomaly::NotAnObject);
    };

    let categories = match object.remove("categories") {
        None => return Err(ShapeAnomaly::MissingCategories),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ShapeAnomaly::CategoriesNotArray),
    };

    let searched_medicine = match object.remove("searchedMedicine") {
        None => return Err(ShapeAnomaly::MissingSearchedMedicine),
        Some(Value::Null) => None,
        Some(entry @ Value::Object(_)) => Some(
            serde_json::from_value::<Medicine>(entry)
                .map_err(|e| ShapeAnomaly::InvalidEntry(format!("searchedMedicine: {e}")))?,
        ),
        Some(_) => return Err(ShapeAnomaly::SearchedMedicineNotObject),
    };

    let categories = categories
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| category_entry(index, entry))
        .collect();

    Ok(SearchResult::new(searched_medicine, categories))
}

fn category_entry(index: usize, entry: Value) -> Option<MedicineCategory> {
    let Value::Object(mut object) = entry else {
        tracing::warn!(index, "skipping category that is not an object");
        return None;
    };

    let Some(Value::String(title)) = object.remove("title") else {
        tracing::warn!(index, "skipping category without a string `title`");
        return None;
    };

    let Some(Value::Array(items)) = object.remove("medicines") else {
        tracing::warn!(index, category = %title, "skipping category without a `medicines` array");
        return None;
    };

    let medicines = items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match serde_json::from_value::<Medicine>(item) {
            Ok(medicine) => Some(medicine),
            Err(e) => {
                tracing::warn!(category = %title, position, error = %e, "skipping incomplete alternative");
                None
            }
        })
        .collect();

    Some(MedicineCategory { title, medicines })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CROCIN: &str = r#"{
        "searchedMedicine": {"brandName": "Crocin", "salt": "Paracetamol", "dosage": "500 mg", "company": "GSK"},
        "categories": [
            {
                "title": "Same Salt & Dosage (Popular Brands)",
                "medicines": [
                    {"brandName": "Dolo 650", "salt": "Paracetamol", "dosage": "650 mg", "company": "Micro Labs"}
                ]
            }
        ]
    }"#;

    #[test]
    fn conformant_payload_is_returned_unchanged() {
        let result = validate_response(CROCIN).expect("valid payload");

        let expected = SearchResult::new(
            Some(Medicine {
                brand_name: "Crocin".into(),
                salt: "Paracetamol".into(),
                dosage: "500 mg".into(),
                company: "GSK".into(),
            }),
            vec![MedicineCategory {
                title: "Same Salt & Dosage (Popular Brands)".into(),
                medicines: vec![Medicine {
                    brand_name: "Dolo 650".into(),
                    salt: "Paracetamol".into(),
                    dosage: "650 mg".into(),
                    company: "Micro Labs".into(),
                }],
            }],
        );
        assert_eq!(result, expected);

        let reserialised = serde_json::to_value(&result).expect("serialise");
        let original: Value = serde_json::from_str(CROCIN).expect("fixture is json");
        assert_eq!(reserialised, original);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let padded = format!("\n  {CROCIN}  \n");
        assert!(validate_response(&padded).expect("valid").is_identified());
    }

    #[test]
    fn missing_categories_degrades_to_empty() {
        let raw = r#"{"searchedMedicine": {"brandName": "Crocin", "salt": "Paracetamol", "dosage": "500 mg", "company": "GSK"}}"#;
        let result = validate_response(raw).expect("must not fail");
        assert_eq!(result, SearchResult::empty());
    }

    #[test]
    fn missing_searched_medicine_key_degrades_to_empty() {
        let result = validate_response(r#"{"categories": []}"#).expect("must not fail");
        assert_eq!(result, SearchResult::empty());
    }

    #[test]
    fn explicit_null_is_an_unidentified_medicine() {
        let raw = r#"{"searchedMedicine": null, "categories": [{"title": "Same Salt (Different Dosages)", "medicines": []}]}"#;
        let result = validate_response(raw).expect("valid");
        assert!(!result.is_identified());
        assert_eq!(result.categories().len(), 1);
    }

    #[test]
    fn reports_each_top_level_anomaly() {
        let cases = [
            ("[]", ShapeAnomaly::NotAnObject),
            (r#"{"searchedMedicine": null}"#, ShapeAnomaly::MissingCategories),
            (
                r#"{"searchedMedicine": null, "categories": {}}"#,
                ShapeAnomaly::CategoriesNotArray,
            ),
            (r#"{"categories": []}"#, ShapeAnomaly::MissingSearchedMedicine),
            (
                r#"{"searchedMedicine": "Crocin", "categories": []}"#,
                ShapeAnomaly::SearchedMedicineNotObject,
            ),
        ];

        for (raw, expected) in cases {
            let value: Value = serde_json::from_str(raw).expect("fixture is json");
            assert_eq!(check_shape(value).expect_err(raw), expected);
        }
    }

    #[test]
    fn incomplete_searched_medicine_degrades_to_empty() {
        let raw = r#"{"searchedMedicine": {"brandName": "Crocin", "salt": "Paracetamol"}, "categories": []}"#;
        let value: Value = serde_json::from_str(raw).expect("fixture is json");
        let anomaly = check_shape(value).expect_err("missing fields");
        assert!(matches!(anomaly, ShapeAnomaly::InvalidEntry(ref d) if d.contains("dosage")));

        assert_eq!(
            validate_response(raw).expect("must not fail"),
            SearchResult::empty()
        );
    }

    #[test]
    fn incomplete_alternative_is_skipped_and_the_rest_kept() {
        let raw = r#"{
            "searchedMedicine": {"brandName": "Crocin", "salt": "Paracetamol", "dosage": "500 mg", "company": "GSK"},
            "categories": [
                {
                    "title": "Same Salt & Dosage (Popular Brands)",
                    "medicines": [
                        {"brandName": "Dolo 650", "salt": "Paracetamol", "dosage": "650 mg", "company": "Micro Labs"},
                        {"brandName": "Calpol", "salt": "Paracetamol", "dosage": "500 mg"},
                        {"brandName": "Pacimol", "salt": "Paracetamol", "dosage": 650, "company": "Ipca"}
                    ]
                }
            ]
        }"#;

        let result = validate_response(raw).expect("must not fail");
        assert!(result.is_identified());
        assert_eq!(result.categories().len(), 1);

        let brands: Vec<&str> = result.categories()[0]
            .medicines
            .iter()
            .map(|m| m.brand_name.as_str())
            .collect();
        assert_eq!(brands, ["Dolo 650"]);
    }

    #[test]
    fn malformed_category_is_dropped_alone() {
        let raw = r#"{
            "searchedMedicine": {"brandName": "Crocin", "salt": "Paracetamol", "dosage": "500 mg", "company": "GSK"},
            "categories": [
                "not a category",
                {"title": "Same Salt (Different Dosages)"},
                {"medicines": []},
                {"title": "Same Salt & Dosage (Other Brands)", "medicines": []}
            ]
        }"#;

        let result = validate_response(raw).expect("must not fail");
        assert!(result.is_identified());
        let titles: Vec<&str> = result.categories().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Same Salt & Dosage (Other Brands)"]);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let raw = r#"{"searchedMedicine": null, "categories": [], "note": "extra"}"#;
        assert_eq!(validate_response(raw).expect("valid"), SearchResult::empty());
    }

    #[test]
    fn non_json_text_is_malformed() {
        let err = validate_response("Sorry, I cannot help with that.").expect_err("not json");
        assert!(matches!(err, FinderError::MalformedResponse(_)));

        let err = validate_response("").expect_err("empty text");
        assert!(matches!(err, FinderError::MalformedResponse(_)));
    }
}
