//! Per-screen result state and the save actions offered for each image.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{
    error::{Result, StudioError, EMPTY_RESULT_MESSAGE},
    models::GeneratedImage,
    scenario::Scenario,
};

/// Visible state of one screen. Images and an error message can never coexist.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScreenState {
    #[default]
    Idle,
    Submitting,
    Success(Vec<GeneratedImage>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    /// Inputs were validated; the request is about to go out.
    Submit,
    /// Required input missing. Nothing is sent.
    Rejected(String),
    Succeeded(Vec<GeneratedImage>),
    Failed(String),
    Dismiss,
}

#[derive(Debug, Clone)]
pub struct ResultPresenter {
    scenario: Scenario,
    state: ScreenState,
}

impl ResultPresenter {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            state: ScreenState::Idle,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == ScreenState::Submitting
    }

    pub fn images(&self) -> &[GeneratedImage] {
        match &self.state {
            ScreenState::Success(images) => images.as_slice(),
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ScreenState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn apply(&mut self, event: ScreenEvent) -> Result<()> {
        let next = match (&self.state, event) {
            (ScreenState::Submitting, ScreenEvent::Submit | ScreenEvent::Rejected(_)) => {
                return Err(StudioError::Busy);
            }
            (_, ScreenEvent::Submit) => ScreenState::Submitting,
            (_, ScreenEvent::Rejected(message)) => ScreenState::Failed(message),
            (ScreenState::Submitting, ScreenEvent::Succeeded(mut images)) => {
                if images.is_empty() {
                    ScreenState::Failed(EMPTY_RESULT_MESSAGE.to_string())
                } else {
                    if !self.scenario.keeps_all_images() {
                        images.truncate(1);
                    }
                    ScreenState::Success(images)
                }
            }
            (ScreenState::Submitting, ScreenEvent::Failed(message)) => ScreenState::Failed(message),
            (state, ScreenEvent::Succeeded(_) | ScreenEvent::Failed(_)) => {
                log::warn!("Ignoring outcome for {} screen in state {:?}", self.scenario, state);
                return Ok(());
            }
            (ScreenState::Submitting, ScreenEvent::Dismiss) => return Err(StudioError::Busy),
            (_, ScreenEvent::Dismiss) => ScreenState::Idle,
        };

        log::debug!("{} screen -> {}", self.scenario, state_name(&next));
        self.state = next;
        Ok(())
    }

    pub fn begin(&mut self) -> Result<()> {
        self.apply(ScreenEvent::Submit)
    }

    pub fn reject(&mut self, message: impl Into<String>) -> Result<()> {
        self.apply(ScreenEvent::Rejected(message.into()))
    }

    pub fn succeed(&mut self, images: Vec<GeneratedImage>) -> Result<()> {
        self.apply(ScreenEvent::Succeeded(images))
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<()> {
        self.apply(ScreenEvent::Failed(message.into()))
    }

    pub fn dismiss(&mut self) -> Result<()> {
        self.apply(ScreenEvent::Dismiss)
    }

    pub fn save_actions(&self) -> Vec<SaveAction> {
        self.images()
            .iter()
            .enumerate()
            .map(|(index, image)| SaveAction {
                file_name: self.scenario.download_name(index),
                image: image.clone(),
            })
            .collect()
    }
}

fn state_name(state: &ScreenState) -> &'static str {
    match state {
        ScreenState::Idle => "idle",
        ScreenState::Submitting => "submitting",
        ScreenState::Success(_) => "success",
        ScreenState::Failed(_) => "failed",
    }
}

/// Where a saved image ends up. Errors are whatever the platform reports.
#[async_trait]
pub trait FileSaver: Send + Sync {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf>;
}

/// Writes into a fixed directory.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl FileSaver for DirectorySaver {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveAction {
    pub file_name: String,
    pub image: GeneratedImage,
}

impl SaveAction {
    pub async fn save(&self, saver: &dyn FileSaver) -> std::io::Result<PathBuf> {
        let bytes = self
            .image
            .bytes()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let path = saver.save(&self.file_name, &bytes).await?;
        log::info!("Saved {}", path.display());
        Ok(path)
    }
}
