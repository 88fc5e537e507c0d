pub mod extraction;
pub mod model;
pub mod perspective;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::{Result, StudioError},
    generator::ImageGenerator,
    models::{GeneratedImage, GenerationRequest},
    presenter::{ResultPresenter, SaveAction, ScreenState},
    scenario::Scenario,
};

pub use extraction::ExtractionForm;
pub use model::ModelForm;
pub use perspective::PerspectiveForm;

/// The inputs a screen collects, and how they become a request.
#[async_trait]
pub trait Form: Clone + Send + Sync {
    fn scenario(&self) -> Scenario;

    /// Fails with a `Validation` error naming the first missing input.
    fn validate(&self) -> Result<()>;

    async fn build_request(&self, model: &str) -> Result<GenerationRequest>;
}

/// A form snapshot taken at submit time, ready to be sent.
#[derive(Debug, Clone)]
pub struct Submission<F: Form> {
    pub id: Uuid,
    pub model: String,
    pub form: F,
}

impl<F: Form> Submission<F> {
    /// Encode, assemble, call. Makes exactly one generation call.
    pub async fn run(&self, generator: &dyn ImageGenerator) -> Result<Vec<GeneratedImage>> {
        let request = self.form.build_request(&self.model).await?;
        log::info!(
            "[{}] {} submission with {} parts",
            self.id,
            self.form.scenario(),
            request.parts.len()
        );
        generator.generate(&request).await
    }
}

/// One studio screen: its form and its result state, owned exclusively.
#[derive(Debug, Clone)]
pub struct Screen<F: Form> {
    form: F,
    model: String,
    presenter: ResultPresenter,
}

impl<F: Form> Screen<F> {
    pub fn new(form: F, model: impl Into<String>) -> Self {
        let presenter = ResultPresenter::new(form.scenario());
        Self {
            form,
            model: model.into(),
            presenter,
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn state(&self) -> &ScreenState {
        self.presenter.state()
    }

    pub fn presenter(&self) -> &ResultPresenter {
        &self.presenter
    }

    pub fn can_submit(&self) -> bool {
        !self.presenter.is_submitting()
    }

    pub fn save_actions(&self) -> Vec<SaveAction> {
        self.presenter.save_actions()
    }

    /// Validates and moves to `Submitting`. A missing input is shown on the
    /// screen and reported as `Ok(None)`; a busy screen returns `Busy`.
    pub fn start(&mut self) -> Result<Option<Submission<F>>> {
        if self.presenter.is_submitting() {
            return Err(StudioError::Busy);
        }

        if let Err(err) = self.form.validate() {
            log::warn!("{} submission rejected: {}", self.form.scenario(), err);
            self.presenter.reject(err.to_string())?;
            return Ok(None);
        }

        self.presenter.begin()?;
        Ok(Some(Submission {
            id: Uuid::new_v4(),
            model: self.model.clone(),
            form: self.form.clone(),
        }))
    }

    /// Commits the outcome of a submission started with [`Screen::start`].
    pub fn finish(&mut self, outcome: Result<Vec<GeneratedImage>>) -> Result<()> {
        match outcome {
            Ok(images) => self.presenter.succeed(images),
            Err(err) => {
                log::error!("{} submission failed: {}", self.form.scenario(), err);
                self.presenter.fail(err.to_string())
            }
        }
    }

    /// `start`, `run` and `finish` in one go.
    pub async fn submit(&mut self, generator: &dyn ImageGenerator) -> &ScreenState {
        match self.start() {
            Ok(Some(submission)) => {
                let outcome = submission.run(generator).await;
                if let Err(err) = self.finish(outcome) {
                    log::error!("Could not commit result: {}", err);
                }
            }
            Ok(None) => {}
            Err(err) => log::warn!("Submit ignored: {}", err),
        }
        self.presenter.state()
    }

    pub fn dismiss(&mut self) -> Result<()> {
        self.presenter.dismiss()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::{
        error::Result,
        generator::ImageGenerator,
        models::{GeneratedImage, GenerationRequest},
    };

    /// Records requests and replays canned outcomes.
    pub struct FakeGenerator {
        outcome: Box<dyn Fn() -> Result<Vec<GeneratedImage>> + Send + Sync>,
        pub requests: Mutex<Vec<GenerationRequest>>,
    }

    impl FakeGenerator {
        pub fn returning(n: usize) -> Self {
            Self::with(move || {
                Ok((0..n)
                    .map(|i| GeneratedImage::new("image/png", format!("aW1n{}", i)))
                    .collect())
            })
        }

        pub fn with(
            outcome: impl Fn() -> Result<Vec<GeneratedImage>> + Send + Sync + 'static,
        ) -> Self {
            Self {
                outcome: Box::new(outcome),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().map(|r| r.len()).unwrap_or(0)
        }

        pub fn last_request(&self) -> Option<GenerationRequest> {
            self.requests.lock().ok().and_then(|r| r.last().cloned())
        }
    }

    #[async_trait]
    impl ImageGenerator for FakeGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedImage>> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(request.clone());
            }
            (self.outcome)()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeGenerator;
    use super::*;
    use crate::error::{ErrorKind, SAFETY_MESSAGE};
    use crate::models::ImageAsset;

    fn ready_screen() -> Screen<ExtractionForm> {
        let mut screen = Screen::new(ExtractionForm::default(), "m");
        screen
            .form_mut()
            .image
            .select(ImageAsset::from_bytes(b"x".to_vec(), "image/png"));
        screen
    }

    #[tokio::test]
    async fn test_submit_success() {
        let generator = FakeGenerator::returning(1);
        let mut screen = ready_screen();

        let state = screen.submit(&generator).await;

        assert!(matches!(state, ScreenState::Success(images) if images.len() == 1));
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_submit_failure_becomes_message() {
        let generator = FakeGenerator::with(|| Err(StudioError::Safety));
        let mut screen = ready_screen();

        let state = screen.submit(&generator).await.clone();

        assert_eq!(state, ScreenState::Failed(SAFETY_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_start_refuses_while_in_flight() {
        let mut screen = ready_screen();
        let submission = screen.start().unwrap();
        assert!(submission.is_some());
        assert!(!screen.can_submit());

        assert_eq!(screen.start().unwrap_err().kind(), ErrorKind::Busy);

        let generator = FakeGenerator::returning(1);
        let outcome = submission.unwrap().run(&generator).await;
        screen.finish(outcome).unwrap();
        assert!(screen.can_submit());
        assert_eq!(screen.save_actions().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_image_cleared_when_resubmit_fails() {
        let mut screen = ready_screen();
        screen.submit(&FakeGenerator::returning(1)).await;
        assert_eq!(screen.save_actions().len(), 1);

        let failing = FakeGenerator::with(|| Err(StudioError::unknown("network down")));
        screen.submit(&failing).await;

        assert!(screen.save_actions().is_empty());
        assert_eq!(screen.presenter().error(), Some("network down"));
    }
}
