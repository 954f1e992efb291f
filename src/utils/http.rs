// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::Result;
use crate::models::CrawlerConfig;

/// Create a configured asynchronous HTTP client.
///
/// Cookies are kept between requests so basket calls share one session.
pub fn create_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .cookie_store(true);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Fetch a page body as text. Non-success statuses are errors.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(client: &reqwest::Client, url: &str, form: &[(&str, &str)]) -> Result<()> {
    client
        .post(url)
        .form(form)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

/// POST a form and return the response body as text.
pub async fn post_form_text(
    client: &reqwest::Client,
    url: &str,
    form: &[(&str, &str)],
) -> Result<String> {
    let response = client
        .post(url)
        .form(form)
        .send()
        .await?
        .error_for_status()?;
    Ok(response.text().await?)
}
