//! Application-level errors.

use aula_cache::MutationError;
use aula_core::ClientError;

/// Errors surfaced by the application wiring and the CLI.
///
/// Page controllers return [`ClientError`] / [`MutationError`] directly;
/// this type only gathers them where the caller does not care which.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Mutation(#[from] MutationError),
}
