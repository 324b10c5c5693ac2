//! Balancer service façade.

use std::sync::Arc;
use video_balancer_types::{BalancerError, TargetResource};

use super::strategy::BalancingStrategy;

/// Entry point used by the request handlers.
#[derive(Clone)]
pub struct BalancerService {
    strategy: Arc<dyn BalancingStrategy>,
}

impl BalancerService {
    pub fn new(strategy: Arc<dyn BalancingStrategy>) -> Self {
        Self { strategy }
    }

    pub async fn get_redirect_address(
        &self,
        source_address: &str,
    ) -> Result<TargetResource, BalancerError> {
        self.strategy.get_target_resource(source_address).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedStrategy(TargetResource);

    #[async_trait]
    impl BalancingStrategy for FixedStrategy {
        async fn get_target_resource(&self, _url: &str) -> Result<TargetResource, BalancerError> {
            Ok(self.0.clone())
        }
    }

    struct Unconfigured;

    #[async_trait]
    impl BalancingStrategy for Unconfigured {
        async fn get_target_resource(&self, _url: &str) -> Result<TargetResource, BalancerError> {
            Err(BalancerError::NotConfigured)
        }
    }

    #[tokio::test]
    async fn test_delegates_to_strategy() {
        let target = TargetResource::cdn("http://cdn.example.net/s1/a.mp4");
        let service = BalancerService::new(Arc::new(FixedStrategy(target.clone())));
        assert_eq!(service.get_redirect_address("http://s1.example.com/a.mp4").await.unwrap(), target);
    }

    #[tokio::test]
    async fn test_passes_errors_through() {
        let service = BalancerService::new(Arc::new(Unconfigured));
        assert_eq!(
            service.get_redirect_address("http://s1.example.com/a.mp4").await.unwrap_err(),
            BalancerError::NotConfigured
        );
    }
}
