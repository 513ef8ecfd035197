use crate::client::GenerativeClient;
use crate::model::{MedicineQuery, SearchResult};
use crate::prompt::AlternativesRequest;
use crate::validation::validate_response;
use crate::{FinderError, FinderResult};

/// Looks up a medicine and its alternatives through an injected client.
///
/// Each call formats one request, performs one service call and validates
/// the answer. Nothing is cached between calls.
#[derive(Clone, Debug)]
pub struct MedicineFinder<C> {
    client: C,
}

impl<C: GenerativeClient> MedicineFinder<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// # Errors
    ///
    /// - `FinderError::Service` if the call itself fails.
    /// - `FinderError::MalformedResponse` if the answer is not JSON.
    ///
    /// An answer with the wrong shape is not an error; it yields
    /// [`SearchResult::empty`].
    pub async fn find_alternatives(&self, query: &MedicineQuery) -> FinderResult<SearchResult> {
        let request = AlternativesRequest::for_medicine(query);

        let raw = self.client.generate(&request).await.map_err(|e| {
            tracing::error!(medicine = %query, error = %e, "alternatives service call failed");
            FinderError::Service(e)
        })?;

        let result = validate_response(&raw).inspect_err(|e| {
            tracing::error!(medicine = %query, error = %e, "alternatives response is not valid JSON");
        })?;

        tracing::debug!(
            medicine = %query,
            identified = result.is_identified(),
            categories = result.categories().len(),
            "alternatives lookup completed"
        );
        Ok(result)
    }
}
