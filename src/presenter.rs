use crate::{
    error::Result,
    models::{ConceptResult, Download, DownloadState, ImageReference, PresentedConcept},
    synthesis::ImageFetcher,
};
use std::path::{Path, PathBuf};

/// Fetches concept content for download. Each item fails on its own.
pub struct ResultPresenter<F> {
    fetcher: F,
}

impl<F: ImageFetcher> ResultPresenter<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub async fn fetch(&self, reference: &ImageReference) -> Result<Vec<u8>> {
        self.fetcher.fetch(reference).await
    }

    pub async fn present_one(&self, concept: &ConceptResult) -> PresentedConcept {
        let position = concept.position();

        let download = match self.fetch(&concept.image_reference).await {
            Ok(bytes) => DownloadState::Ready(Download::new(position, bytes)),
            Err(e) => {
                log::warn!("Download for concept #{} unavailable: {}", position, e);
                DownloadState::Unavailable(e.to_string())
            }
        };

        PresentedConcept {
            position,
            caption: format!("Concept #{}", position),
            image_reference: concept.image_reference.clone(),
            revised_prompt: concept.revised_prompt.clone(),
            download,
        }
    }

    /// Fetches every concept in order. Content is never cached.
    pub async fn present(&self, concepts: &[ConceptResult]) -> Vec<PresentedConcept> {
        let mut presented = Vec::with_capacity(concepts.len());
        for concept in concepts {
            presented.push(self.present_one(concept).await);
        }

        let ready = presented.iter().filter(|p| p.download().is_some()).count();
        log::info!("📦 {}/{} downloads ready", ready, presented.len());
        presented
    }
}

/// Writes the downloadable concepts into `dir`, skipping unavailable ones.
pub fn save_downloads(dir: &Path, concepts: &[PresentedConcept]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for download in concepts.iter().filter_map(PresentedConcept::download) {
        let path = dir.join(&download.file_name);
        std::fs::write(&path, &download.bytes)?;
        log::info!("💾 Saved {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::mock::{MockImageFetcher, MockImageService};

    fn concepts(count: usize) -> Vec<ConceptResult> {
        (0..count)
            .map(|index| ConceptResult {
                index,
                image_reference: MockImageService::reference_for(index + 1),
                revised_prompt: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_all_downloads_ready() {
        let presenter = ResultPresenter::new(MockImageFetcher::new());
        let presented = presenter.present(&concepts(4)).await;

        let names: Vec<_> = presented
            .iter()
            .filter_map(|p| p.download().map(|d| d.file_name.clone()))
            .collect();
        assert_eq!(
            names,
            vec![
                "logo_concept_1.png",
                "logo_concept_2.png",
                "logo_concept_3.png",
                "logo_concept_4.png"
            ]
        );
        assert_eq!(presented[0].caption, "Concept #1");
        assert_eq!(presented[3].download().unwrap().mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_one_fetch_failure_is_isolated() {
        let fetcher =
            MockImageFetcher::new().fail_for(MockImageService::reference_for(2));
        let presenter = ResultPresenter::new(fetcher);
        let presented = presenter.present(&concepts(4)).await;

        assert_eq!(presented.len(), 4);
        assert_eq!(presented.iter().filter(|p| p.download().is_some()).count(), 3);
        assert!(presented[1].fetch_error().unwrap().contains("404"));
        assert!(presented[1].download().is_none());
        assert_eq!(presenter.fetcher().calls(), 4);
    }

    #[tokio::test]
    async fn test_every_presentation_refetches() {
        let presenter = ResultPresenter::new(MockImageFetcher::new());
        let batch = concepts(2);
        presenter.present(&batch).await;
        presenter.present(&batch).await;
        assert_eq!(presenter.fetcher().calls(), 4);
    }

    #[tokio::test]
    async fn test_save_downloads_skips_unavailable() {
        let fetcher =
            MockImageFetcher::new().fail_for(MockImageService::reference_for(1));
        let presented = ResultPresenter::new(fetcher).present(&concepts(2)).await;

        let dir = tempfile::tempdir().unwrap();
        let written = save_downloads(dir.path(), &presented).unwrap();

        assert_eq!(written, vec![dir.path().join("logo_concept_2.png")]);
        let bytes = std::fs::read(&written[0]).unwrap();
        assert_eq!(bytes, b"png:https://images.test/concept-2.png");
    }
}
