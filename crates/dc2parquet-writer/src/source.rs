//! Source CSV download

use crate::error::{Result, WriterError};

/// Download the CSV behind a signed URL
///
/// Any transport failure or non-2xx status is a data-access error. The
/// query string of a signed URL carries its signature, so only the part
/// before `?` is ever logged, and reqwest errors are stripped of their URL.
pub(crate) async fn fetch_csv(http: &reqwest::Client, source_url: &str) -> Result<Vec<u8>> {
    let display_url = strip_query(source_url);
    tracing::debug!(source = %display_url, "Fetching source CSV");

    let response = http
        .get(source_url)
        .send()
        .await
        .map_err(|e| WriterError::data_access(format!("{}: {}", display_url, e.without_url())))?;

    let status = response.status();
    if !status.is_success() {
        return Err(WriterError::data_access(format!(
            "{} answered HTTP {}",
            display_url, status
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| WriterError::data_access(format!("{}: {}", display_url, e.without_url())))?;

    tracing::debug!(source = %display_url, bytes = bytes.len(), "Fetched source CSV");
    Ok(bytes.to_vec())
}

/// Drop the query string (signature, expiry) from a URL
pub fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_query() {
        assert_eq!(
            strip_query("https://bucket.s3.amazonaws.com/a.csv?X-Amz-Signature=abc"),
            "https://bucket.s3.amazonaws.com/a.csv"
        );
        assert_eq!(strip_query("https://host/a.csv"), "https://host/a.csv");
    }
}
