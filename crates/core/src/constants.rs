//! Constants used throughout the Medicine Finder core crate.
//!
//! Category titles, service defaults and user-facing copy live here so the
//! prompt, the validator and the presentation layer agree on them.

/// Title of the first category: popular brands with the same salt and dosage.
pub const POPULAR_SAME_DOSAGE_TITLE: &str = "Same Salt & Dosage (Popular Brands)";

/// Title of the second category: other brands with the same salt and dosage.
pub const OTHER_SAME_DOSAGE_TITLE: &str = "Same Salt & Dosage (Other Brands)";

/// Title of the third category: same salt at a different dosage.
pub const DIFFERENT_DOSAGE_TITLE: &str = "Same Salt (Different Dosages)";

/// Gemini model used when no override is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL of the Gemini REST API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Request timeout in seconds when no override is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound on the length of a medicine name, in characters.
pub const MAX_QUERY_LEN: usize = 200;

/// Message shown to users whenever the alternatives service cannot be used.
pub const SERVICE_FAILURE_MESSAGE: &str =
    "Failed to communicate with the medicine database. Please try again later.";

/// Message shown when the submitted medicine name is blank or unusable.
pub const INVALID_QUERY_MESSAGE: &str = "Please enter a medicine name to search for.";

/// Informational disclaimer rendered alongside results.
pub const DISCLAIMER: &str = "Disclaimer: This tool is for informational purposes only. Always consult a healthcare professional before making any medical decisions.";
