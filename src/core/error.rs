//! Errors raised while building effects from configuration.
//!
//! Inapplicable casts are not errors; those are reported through the
//! [`Problem`](crate::effects::Problem) sink. Commit and session failures
//! live next to the code that produces them.

/// Errors surfaced while loading effect configuration or constructing effects.
#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    /// No factory is registered under this effect id.
    #[error("unknown effect '{0}'")]
    UnknownEffect(String),

    /// The configuration document is not valid JSON.
    #[error("malformed effect configuration: {0}")]
    MalformedConfig(#[source] serde_json::Error),

    /// An effect's configuration block does not match its schema.
    #[error("invalid configuration for effect '{effect}': {source}")]
    InvalidConfig {
        effect: String,
        #[source]
        source: serde_json::Error,
    },

    /// `targetsToAttack` must be at least one.
    #[error("targetsToAttack must be positive, got {0}")]
    InvalidTargetsToAttack(u32),
}
