use crate::{
    error::{LogoError, Result},
    generator::ConceptGenerator,
    logger,
    models::{GenerationOutcome, GenerationRequest, LogoStyle, PresentedConcept},
    presenter::ResultPresenter,
    synthesis::{ImageFetcher, ImageService},
};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    PromptBuilt,
    Generating,
    AllSucceeded,
    Presenting,
    Done,
    BatchFailed,
    ErrorShown,
}

impl FlowState {
    pub fn can_advance_to(self, next: FlowState) -> bool {
        use FlowState::*;
        matches!(
            (self, next),
            (Idle, PromptBuilt)
                | (PromptBuilt, Generating)
                | (Generating, AllSucceeded)
                | (Generating, BatchFailed)
                | (AllSucceeded, Presenting)
                | (Presenting, Done)
                | (BatchFailed, ErrorShown)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, FlowState::Done | FlowState::ErrorShown)
    }
}

/// Records the states one submission passes through.
#[derive(Debug, Clone)]
pub struct FlowTracker {
    trace: Vec<FlowState>,
}

impl Default for FlowTracker {
    fn default() -> Self {
        Self {
            trace: vec![FlowState::Idle],
        }
    }
}

impl FlowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> FlowState {
        self.trace.last().copied().unwrap_or(FlowState::Idle)
    }

    pub fn advance(&mut self, next: FlowState) -> Result<()> {
        let current = self.current();
        if !current.can_advance_to(next) {
            return Err(LogoError::InternalError(format!(
                "Illegal flow transition {:?} -> {:?}",
                current, next
            )));
        }
        log::debug!("Flow {:?} -> {:?}", current, next);
        self.trace.push(next);
        Ok(())
    }

    pub fn trace(&self) -> &[FlowState] {
        &self.trace
    }

    pub fn into_trace(self) -> Vec<FlowState> {
        self.trace
    }
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Input was rejected before any network call.
    Rejected(String),
    /// The batch failed; no concepts are shown.
    Failed { position: usize, cause: LogoError },
    Presented(Vec<PresentedConcept>),
}

#[derive(Debug)]
pub struct Submission {
    pub id: Uuid,
    pub prompt: Option<String>,
    pub trace: Vec<FlowState>,
    pub outcome: SubmissionOutcome,
}

impl Submission {
    pub fn final_state(&self) -> FlowState {
        self.trace.last().copied().unwrap_or(FlowState::Idle)
    }

    pub fn concepts(&self) -> &[PresentedConcept] {
        match &self.outcome {
            SubmissionOutcome::Presented(concepts) => concepts,
            _ => &[],
        }
    }

    /// Message shown in place of the concepts, if any.
    pub fn error_message(&self) -> Option<String> {
        match &self.outcome {
            SubmissionOutcome::Rejected(message) => Some(message.clone()),
            SubmissionOutcome::Failed { cause, .. } => Some(format!(
                "An error occurred while generating images: {}",
                cause
            )),
            SubmissionOutcome::Presented(_) => None,
        }
    }
}

/// Drives one submission from raw form input to presented concepts.
pub struct LogoSpark<S, F> {
    generator: ConceptGenerator<S>,
    presenter: ResultPresenter<F>,
}

impl<S: ImageService, F: ImageFetcher> LogoSpark<S, F> {
    pub fn new(generator: ConceptGenerator<S>, presenter: ResultPresenter<F>) -> Self {
        Self {
            generator,
            presenter,
        }
    }

    pub fn generator(&self) -> &ConceptGenerator<S> {
        &self.generator
    }

    pub fn presenter(&self) -> &ResultPresenter<F> {
        &self.presenter
    }

    pub async fn submit(&self, description: &str, style: LogoStyle, palette: &str) -> Submission {
        let id = Uuid::new_v4();
        let mut flow = FlowTracker::new();

        let request = match GenerationRequest::new(description, style, palette) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("⚠️  Submission {} rejected: {}", id, e);
                let message = match e {
                    LogoError::ValidationError(message) => message,
                    other => other.to_string(),
                };
                return Submission {
                    id,
                    prompt: None,
                    trace: flow.into_trace(),
                    outcome: SubmissionOutcome::Rejected(message),
                };
            }
        };

        match self.run(&request, &mut flow).await {
            Ok((prompt, outcome)) => Submission {
                id,
                prompt: Some(prompt),
                trace: flow.into_trace(),
                outcome,
            },
            Err(e) => {
                log::error!("❌ Submission {} aborted: {}", id, e);
                Submission {
                    id,
                    prompt: None,
                    trace: flow.into_trace(),
                    outcome: SubmissionOutcome::Failed { position: 0, cause: e },
                }
            }
        }
    }

    async fn run(
        &self,
        request: &GenerationRequest,
        flow: &mut FlowTracker,
    ) -> Result<(String, SubmissionOutcome)> {
        let prompt = request.prompt();
        flow.advance(FlowState::PromptBuilt)?;
        log::debug!("Engineered prompt: {}", prompt);

        flow.advance(FlowState::Generating)?;
        let outcome = {
            let _timer = logger::timer("concept batch");
            self.generator.generate(&prompt, request.count()).await
        };

        match outcome {
            GenerationOutcome::Completed(concepts) => {
                flow.advance(FlowState::AllSucceeded)?;
                flow.advance(FlowState::Presenting)?;
                let presented = self.presenter.present(&concepts).await;
                flow.advance(FlowState::Done)?;
                Ok((prompt, SubmissionOutcome::Presented(presented)))
            }
            GenerationOutcome::BatchFailed { position, cause } => {
                flow.advance(FlowState::BatchFailed)?;
                log::error!("🔥 Batch failed at concept {}: {}", position, cause);
                flow.advance(FlowState::ErrorShown)?;
                Ok((prompt, SubmissionOutcome::Failed { position, cause }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GenerationParams;
    use crate::synthesis::mock::{MockImageFetcher, MockImageService};
    use std::sync::Arc;

    type MockSpark = LogoSpark<Arc<MockImageService>, Arc<MockImageFetcher>>;

    fn spark(service: Arc<MockImageService>, fetcher: Arc<MockImageFetcher>) -> MockSpark {
        LogoSpark::new(
            ConceptGenerator::new(service, GenerationParams::default()),
            ResultPresenter::new(fetcher),
        )
    }

    #[test]
    fn test_transition_table() {
        assert!(FlowState::Idle.can_advance_to(FlowState::PromptBuilt));
        assert!(FlowState::Generating.can_advance_to(FlowState::BatchFailed));
        assert!(!FlowState::Idle.can_advance_to(FlowState::Generating));
        assert!(!FlowState::BatchFailed.can_advance_to(FlowState::Generating));
        assert!(!FlowState::Done.can_advance_to(FlowState::Idle));
        assert!(FlowState::ErrorShown.is_terminal());

        let mut flow = FlowTracker::new();
        assert!(flow.advance(FlowState::Presenting).is_err());
        assert_eq!(flow.current(), FlowState::Idle);
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let service = Arc::new(MockImageService::new());
        let fetcher = Arc::new(MockImageFetcher::new());
        let submission = spark(service.clone(), fetcher.clone())
            .submit("coffee shop", LogoStyle::Minimalist, "brown and beige")
            .await;

        assert_eq!(
            submission.trace,
            vec![
                FlowState::Idle,
                FlowState::PromptBuilt,
                FlowState::Generating,
                FlowState::AllSucceeded,
                FlowState::Presenting,
                FlowState::Done
            ]
        );
        assert_eq!(submission.concepts().len(), 4);
        assert!(submission.error_message().is_none());
        assert!(submission.prompt.as_deref().unwrap().contains("brown and beige"));
        assert_eq!(service.calls(), 4);
        assert_eq!(fetcher.calls(), 4);
    }

    #[tokio::test]
    async fn test_empty_description_makes_no_calls() {
        let service = Arc::new(MockImageService::new());
        let fetcher = Arc::new(MockImageFetcher::new());
        let submission = spark(service.clone(), fetcher.clone())
            .submit("", LogoStyle::Abstract, "teal")
            .await;

        assert!(matches!(submission.outcome, SubmissionOutcome::Rejected(_)));
        assert_eq!(submission.final_state(), FlowState::Idle);
        assert!(submission.prompt.is_none());
        assert_eq!(service.calls(), 0);
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_policy_failure_shows_no_images() {
        let service = Arc::new(
            MockImageService::new()
                .fail_on(3, LogoError::PolicyViolation("rejected by safety system".into())),
        );
        let fetcher = Arc::new(MockImageFetcher::new());
        let submission = spark(service.clone(), fetcher.clone())
            .submit("coffee shop", LogoStyle::Minimalist, "brown and beige")
            .await;

        assert_eq!(submission.final_state(), FlowState::ErrorShown);
        assert!(submission.trace.contains(&FlowState::BatchFailed));
        assert!(submission.concepts().is_empty());
        assert!(matches!(
            submission.outcome,
            SubmissionOutcome::Failed { position: 3, cause: LogoError::PolicyViolation(_) }
        ));
        assert!(submission
            .error_message()
            .unwrap()
            .contains("rejected by safety system"));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_single_fetch_failure_keeps_other_downloads() {
        let service = Arc::new(MockImageService::new());
        let fetcher =
            Arc::new(MockImageFetcher::new().fail_for(MockImageService::reference_for(2)));
        let submission = spark(service, fetcher)
            .submit("coffee shop", LogoStyle::Minimalist, "brown and beige")
            .await;

        assert_eq!(submission.final_state(), FlowState::Done);
        let concepts = submission.concepts();
        assert_eq!(concepts.iter().filter(|c| c.download().is_some()).count(), 3);
        assert!(concepts[1].fetch_error().is_some());
    }

    #[tokio::test]
    async fn test_submissions_are_independent() {
        let service = Arc::new(MockImageService::new());
        let spark = spark(service.clone(), Arc::new(MockImageFetcher::new()));

        let first = spark.submit("bakery", LogoStyle::Vintage, "cream").await;
        let second = spark.submit("bakery", LogoStyle::Vintage, "cream").await;

        assert_ne!(first.id, second.id);
        assert_eq!(first.trace, second.trace);
        assert_eq!(first.prompt, second.prompt);
        assert_eq!(service.calls(), 8);
    }
}
