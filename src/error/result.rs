//! Result type alias for explorer operations.

use super::explorer_error::ExplorerError;

/// Type alias for Results using ExplorerError.
///
/// # Example
///
/// ```ignore
/// use explorer::error::ExplorerResult;
///
/// async fn refresh(client: &mut DatasetClient<ReqwestHttpClient>) -> ExplorerResult<()> {
///     client.load_index().await.map(|_| ())
/// }
/// ```
pub type ExplorerResult<T> = Result<T, ExplorerError>;
