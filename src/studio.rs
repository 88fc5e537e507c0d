use crate::{
    config::StudioConfig,
    scenario::Scenario,
    screens::{ExtractionForm, ModelForm, PerspectiveForm, Screen},
};

/// All screens plus the active tab. Screens never share state.
#[derive(Debug, Clone)]
pub struct Studio {
    active: Scenario,
    pub extraction: Screen<ExtractionForm>,
    pub model: Screen<ModelForm>,
    pub perspective: Screen<PerspectiveForm>,
}

impl Studio {
    pub fn new(model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            active: Scenario::default(),
            extraction: Screen::new(ExtractionForm::default(), model.clone()),
            model: Screen::new(ModelForm::default(), model.clone()),
            perspective: Screen::new(PerspectiveForm::default(), model),
        }
    }

    pub fn from_config(config: &StudioConfig) -> Self {
        Self::new(config.model.clone())
    }

    pub fn active(&self) -> Scenario {
        self.active
    }

    pub fn select(&mut self, tab: Scenario) {
        log::debug!("Switching to tab: {}", tab);
        self.active = tab;
    }

    pub fn tabs() -> impl Iterator<Item = (Scenario, &'static str)> {
        Scenario::ALL.into_iter().map(|tab| (tab, tab.title()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageAsset;
    use crate::presenter::ScreenState;
    use crate::screens::testing::FakeGenerator;

    #[test]
    fn test_tabs() {
        let titles: Vec<_> = Studio::tabs().map(|(_, title)| title).collect();
        assert_eq!(titles, vec!["Bóc tách trang phục", "Người mẫu", "Góc nhìn khác"]);

        let mut studio = Studio::new("m");
        assert_eq!(studio.active(), Scenario::Extraction);
        studio.select(Scenario::Perspective);
        assert_eq!(studio.active(), Scenario::Perspective);
    }

    #[tokio::test]
    async fn test_screens_do_not_share_state() {
        let mut studio = Studio::new("m");
        studio
            .extraction
            .form_mut()
            .image
            .select(ImageAsset::from_bytes(b"x".to_vec(), "image/png"));

        studio.extraction.submit(&FakeGenerator::returning(1)).await;
        studio.select(Scenario::Model);

        assert!(matches!(studio.extraction.state(), ScreenState::Success(_)));
        assert_eq!(studio.model.state(), &ScreenState::Idle);
        assert_eq!(studio.perspective.state(), &ScreenState::Idle);
    }
}
