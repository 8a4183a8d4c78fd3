use crate::aggregator::Dashboard;
use crate::api::Result;
use log::error;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded(Dashboard),
    LoadFailed,
}

/// Everything the dashboard view depends on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    pub theme: Theme,
    pub phase: Phase,
}

impl DashboardState {
    pub fn new(theme: Theme) -> Self {
        DashboardState {
            theme,
            phase: Phase::Idle,
        }
    }

    pub fn start_loading(self) -> Self {
        DashboardState {
            phase: Phase::Loading,
            ..self
        }
    }

    /// Moves a loading state to `Loaded` or `LoadFailed`. Any other phase is kept as is.
    pub fn finish(self, result: Result<Dashboard>) -> Self {
        if self.phase != Phase::Loading {
            return self;
        }
        let phase = match result {
            Ok(dashboard) => Phase::Loaded(dashboard),
            Err(err) => {
                error!("Failed to load dashboard: {}", err);
                Phase::LoadFailed
            }
        };
        DashboardState { phase, ..self }
    }

    /// True until a load has finished, either way.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Loading)
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.phase {
            Phase::Loaded(dashboard) => Some(dashboard),
            _ => None,
        }
    }
}

#[test]
fn load_transitions_test() {
    let state = DashboardState::new(Theme::Dark);
    assert_eq!(state.phase, Phase::Idle);
    assert!(state.is_loading());

    let state = state.start_loading();
    assert!(state.is_loading());
    assert_eq!(state.dashboard(), None);

    let state = state.finish(Ok(Dashboard::default()));
    assert!(!state.is_loading());
    assert_eq!(state.dashboard(), Some(&Dashboard::default()));
    assert_eq!(state.theme, Theme::Dark);
}

#[test]
fn load_failure_transition_test() {
    let state = DashboardState::default()
        .start_loading()
        .finish(Err(crate::api::Error::Error("offline")));
    assert_eq!(state.phase, Phase::LoadFailed);
    assert_eq!(state.dashboard(), None);
    assert!(!state.is_loading());
}

#[test]
fn finish_without_loading_test() {
    let state = DashboardState::default().finish(Ok(Dashboard::default()));
    assert_eq!(state.phase, Phase::Idle);
}

#[test]
fn theme_test() {
    let state = DashboardState::default();
    assert_eq!(state.theme, Theme::Light);
    assert_eq!(state.start_loading().finish(Ok(Dashboard::default())).theme, Theme::Light);
    assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
    assert_eq!(Theme::Light.to_string(), "light");
}
