//! Fashion image studio.
//!
//! Three screens turn garment photos and short descriptions into prompts for a
//! Gemini image model:
//!
//! - **Extraction** cuts a garment out onto a white background.
//! - **Model** dresses a model in an outfit, optionally on a given background.
//! - **Perspective** re-stages a garment in a described scene.
//!
//! Each submission encodes the selected assets, renders a fixed template,
//! assembles the parts in the screen's order, makes one `generateContent`
//! call and commits the outcome to the screen's [`presenter::ResultPresenter`].

pub mod assembler;
pub mod config;
pub mod encoder;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod logger;
pub mod models;
pub mod presenter;
pub mod prompt;
pub mod scenario;
pub mod screens;
pub mod studio;

pub use assembler::RequestAssembler;
pub use config::StudioConfig;
pub use error::{ErrorKind, Result, StudioError};
pub use gemini::{GeminiClient, ImageClient};
pub use generator::{extract_images, ImageGenerator};
pub use models::*;
pub use presenter::{DirectorySaver, FileSaver, ResultPresenter, SaveAction, ScreenState};
pub use prompt::{build_prompt, ExtractionMode, PromptInput};
pub use scenario::Scenario;
pub use screens::{ExtractionForm, Form, ModelForm, PerspectiveForm, Screen};
pub use studio::Studio;
