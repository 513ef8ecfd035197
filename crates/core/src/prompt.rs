//! Request formatting for the alternatives service.
//!
//! Builds the natural-language instruction and the structured-output schema
//! sent with every lookup. Changing the wording changes answer quality, so the
//! instruction keeps a fixed order: identify, null-if-unknown, categorise into
//! the three named groups, structured output only.

use crate::model::{CategoryKind, MedicineQuery};
use serde_json::{json, Value};

/// A fully formatted request: instruction text plus response schema.
#[derive(Debug, Clone, PartialEq)]
pub struct AlternativesRequest {
    pub prompt: String,
    pub schema: Value,
}

impl AlternativesRequest {
    pub fn for_medicine(query: &MedicineQuery) -> Self {
        Self {
            prompt: build_prompt(query.as_str()),
            schema: response_schema(),
        }
    }
}

/// Instruction text for a (trimmed) medicine name.
pub fn build_prompt(medicine_name: &str) -> String {
    let name = medicine_name.trim();
    let [popular, other, different] = CategoryKind::ALL.map(CategoryKind::title);

    format!(
        r#"You are an extremely fast and efficient pharmacy assistant. A user is looking for alternatives to the medicine "{name}".

Your task is to:
1. Identify the primary salt, dosage, and manufacturing company of "{name}". Populate this in `searchedMedicine`. If "{name}" is not known, set `searchedMedicine` to null.
2. Find and categorize alternatives based on these rules, including the company:
    - First Category: Popular, well-known brands with the same salt & dosage. Title: "{popular}".
    - Second Category: Other brands with the same salt & dosage. Title: "{other}".
    - Third Category: Same salt, different dosages. Title: "{different}".

Provide output only in the specified JSON format. If there are no alternatives, `categories` can be empty, but `searchedMedicine` should still be populated if identified. Do not invent information."#
    )
}

fn medicine_schema(description: &str, nullable: bool) -> Value {
    let mut schema = json!({
        "type": "OBJECT",
        "description": description,
        "properties": {
            "brandName": { "type": "STRING", "description": "The brand name of the medicine." },
            "salt": { "type": "STRING", "description": "The active salt or chemical composition." },
            "dosage": { "type": "STRING", "description": "The dosage of the medicine, e.g., '500 mg'." },
            "company": { "type": "STRING", "description": "The name of the manufacturing company." }
        },
        "propertyOrdering": ["brandName", "salt", "dosage", "company"]
    });
    if nullable {
        schema["nullable"] = Value::Bool(true);
    } else {
        schema["required"] = json!(["brandName", "salt", "dosage", "company"]);
    }
    schema
}

/// Structured-output schema in the Gemini `Schema` dialect.
///
/// The searched medicine is nullable and its fields are not marked required;
/// the validator checks them instead.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "searchedMedicine": medicine_schema(
                "Details of the medicine the user searched for, or null if the medicine is not found.",
                true,
            ),
            "categories": {
                "type": "ARRAY",
                "description": "A list of categories for medicine alternatives.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {
                            "type": "STRING",
                            "description": format!(
                                "The title of the category, e.g., '{}'.",
                                CategoryKind::PopularSameDosage.title()
                            )
                        },
                        "medicines": {
                            "type": "ARRAY",
                            "description": "A list of medicines within this category.",
                            "items": medicine_schema("An alternative medicine.", false)
                        }
                    },
                    "required": ["title", "medicines"]
                }
            }
        },
        "required": ["searchedMedicine", "categories"],
        "propertyOrdering": ["searchedMedicine", "categories"]
    })
}
