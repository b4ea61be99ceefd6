//! Storage-backed session loading and deletion

use crate::{ImportError, ImportSession, Result, SharedSession};
use pool_client::PoolClient;
use tracing::info;

/// List importable files and build a session from them.
///
/// # Errors
/// Returns the client error, or `Duplicate` if the listing repeats a key.
pub async fn load_session(
    client: &PoolClient,
    prefix: Option<&str>,
    default_label: &str,
) -> Result<ImportSession> {
    let listing = client.storage().list_importable(prefix).await?;
    info!(
        files = listing.files.len(),
        importable = listing.importable_count,
        "Storage listing loaded"
    );
    Ok(ImportSession::from_listing(listing.files, default_label)?)
}

/// Delete the given keys from storage and drop them from the session.
///
/// # Errors
/// Returns `NothingSelected` for an empty key list, or the client error.
/// The session is untouched on error.
pub async fn delete_keys(
    client: &PoolClient,
    session: &SharedSession,
    keys: &[String],
) -> Result<usize> {
    if keys.is_empty() {
        return Err(ImportError::NothingSelected("delete"));
    }

    let response = client.storage().delete_files(keys).await?;
    let removed = session.write().await.remove(keys);
    info!(
        deleted = response.deleted,
        removed,
        message = %response.message,
        "Files deleted"
    );
    Ok(removed)
}
