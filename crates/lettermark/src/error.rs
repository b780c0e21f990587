// Imports
use thiserror::Error;

/// Errors raised by builder validation and font resolution.
///
/// Validation is eager: the offending builder call or the terminal build call fails,
/// never the render. Render-time failures of the drawing backend surface separately
/// as [anyhow::Error] from [crate::Drawable::draw].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A parameter that must be strictly positive received zero or a negative value.
    #[error("invalid parameter '{what}', must be strictly positive")]
    InvalidParameter {
        /// Name of the offending parameter.
        what: &'static str,
    },
    /// A terminal build call was made with neither text nor image content set.
    #[error("missing content, neither text nor image was set")]
    MissingContent,
    /// A named font family could not be resolved by the text backend.
    #[error("font family '{family}' could not be resolved")]
    FontNotFound {
        /// The family name that failed to resolve.
        family: String,
    },
}
