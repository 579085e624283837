use crate::Result;

/// Download the feed at `url`.
///
/// Any non-success status is an error. There are no retries.
pub async fn fetch(url: &str) -> Result<Vec<u8>> {
    tracing::debug!(url, "fetching feed");
    let response = reqwest::get(url).await?.error_for_status()?;
    let body = response.bytes().await?;
    tracing::debug!(bytes = body.len(), "fetched feed");
    Ok(body.to_vec())
}
