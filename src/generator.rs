use crate::{
    models::{ConceptAttempt, ConceptResult, GenerationOutcome, GenerationParams},
    synthesis::ImageService,
};

/// Produces a batch of concepts by repeating single-image requests.
///
/// Requests are issued one after another. The first failed request ends the
/// batch: earlier successes are discarded and no further requests are sent.
/// Nothing is retried.
pub struct ConceptGenerator<S> {
    service: S,
    params: GenerationParams,
}

impl<S: ImageService> ConceptGenerator<S> {
    pub fn new(service: S, params: GenerationParams) -> Self {
        Self { service, params }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Issues the request at `index` and wraps the result as an attempt.
    pub async fn attempt(&self, prompt: &str, index: usize) -> ConceptAttempt {
        match self.service.generate_image(prompt, &self.params).await {
            Ok(image) => ConceptAttempt::Generated(image),
            Err(cause) => {
                log::warn!("Concept {} failed: {}", index + 1, cause);
                ConceptAttempt::Failed(cause)
            }
        }
    }

    pub async fn generate(&self, prompt: &str, count: usize) -> GenerationOutcome {
        let mut concepts = Vec::with_capacity(count);

        for index in 0..count {
            log::info!("🎨 Sketching concept {}/{}", index + 1, count);

            match self.attempt(prompt, index).await {
                ConceptAttempt::Generated(image) => concepts.push(ConceptResult {
                    index,
                    image_reference: image.reference,
                    revised_prompt: image.revised_prompt,
                }),
                ConceptAttempt::Failed(cause) => {
                    if !concepts.is_empty() {
                        log::debug!("Discarding {} completed concepts", concepts.len());
                    }
                    return GenerationOutcome::BatchFailed {
                        position: index + 1,
                        cause,
                    };
                }
            }
        }

        log::info!("✅ Generated {} concepts", concepts.len());
        GenerationOutcome::Completed(concepts)
    }
}
