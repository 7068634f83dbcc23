//! Top-level error type.

use thiserror::Error;

use crate::alerts::AlertError;
use crate::cta::CtaError;
use crate::divvy::DivvyError;
use crate::render::PanelError;
use crate::settings::SettingsError;

/// Errors that stop the board from starting.
///
/// Once running, feed errors are logged and absorbed by the board's
/// last-known fallback instead of surfacing here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("CTA client: {0}")]
    Cta(#[from] CtaError),

    #[error("Divvy client: {0}")]
    Divvy(#[from] DivvyError),

    #[error("alert client: {0}")]
    Alert(#[from] AlertError),

    #[error("panel: {0}")]
    Panel(#[from] PanelError),
}
