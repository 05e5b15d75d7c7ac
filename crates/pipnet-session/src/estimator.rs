//! Network commission estimation seam.
//!
//! Some kinds need an externally computed exact fee before send; the session
//! itself only consumes the result. Retries belong to the implementor.

use pipnet_types::Pip;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    #[error("commission can't be calculated right now")]
    Unavailable,
}

/// Asks the network for an exact commission estimate for a payload.
pub trait CommissionEstimator {
    fn estimate(
        &self,
        payload: &[u8],
    ) -> impl std::future::Future<Output = Result<Pip, EstimateError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<Pip>);

    impl CommissionEstimator for Fixed {
        async fn estimate(&self, _payload: &[u8]) -> Result<Pip, EstimateError> {
            self.0.clone().ok_or(EstimateError::Unavailable)
        }
    }

    #[tokio::test]
    async fn test_estimator_success() {
        let est = Fixed(Some(Pip::unit()));
        assert_eq!(est.estimate(&[1, 2, 3]).await, Ok(Pip::unit()));
    }

    #[tokio::test]
    async fn test_estimator_failure_message() {
        let est = Fixed(None);
        let err = est.estimate(&[]).await.unwrap_err();
        assert_eq!(err.to_string(), "commission can't be calculated right now");
    }
}
