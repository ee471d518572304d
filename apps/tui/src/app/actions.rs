use mena_energy_tracker::analysis::{AnalysisClient, AnalysisError};
use mena_energy_tracker::domain::AnalysisResult;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub type FetchOutcome = Result<AnalysisResult, AnalysisError>;

/// Runs analysis requests off the event loop and reports back over a channel.
pub struct AnalysisActions {
    client: AnalysisClient,
    outcomes: UnboundedSender<FetchOutcome>,
}

impl AnalysisActions {
    pub fn new(client: AnalysisClient) -> (Self, UnboundedReceiver<FetchOutcome>) {
        let (outcomes, receiver) = mpsc::unbounded_channel();
        (Self { client, outcomes }, receiver)
    }

    pub fn spawn_fetch(&self) {
        let client = self.client.clone();
        let outcomes = self.outcomes.clone();

        tokio::spawn(async move {
            let outcome = client.fetch_energy_analysis().await;
            if outcomes.send(outcome).is_err() {
                tracing::debug!("dashboard closed before the analysis completed");
            }
        });
    }
}

#[cfg(test)]
pub fn test_actions() -> (AnalysisActions, UnboundedReceiver<FetchOutcome>) {
    use async_trait::async_trait;
    use mena_energy_tracker::analysis::{GenerationBackend, GenerationRequest};

    struct SilentBackend;

    #[async_trait]
    impl GenerationBackend for SilentBackend {
        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<Option<String>, AnalysisError> {
            Ok(None)
        }
    }

    AnalysisActions::new(AnalysisClient::new(SilentBackend))
}
