//! Sending requests to SurveyCTO with authentication fallback.

use crate::auth::{AuthScheme, Credentials, DigestChallenge, AUTH_FALLBACK};
use crate::endpoints::Endpoints;
use crate::errors::{check, SctoError};
use log::{debug, error};
use reqwest::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Response, StatusCode};
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};

/// Header required by every SurveyCTO API request.
pub const OPENROSA_VERSION: (&str, &str) = ("X-OpenRosa-Version", "1.0");

/// Issues requests to SurveyCTO, trying each scheme of [AUTH_FALLBACK] in turn.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: ClientWithMiddleware,
    endpoints: Endpoints,
    credentials: Credentials,
}

impl RequestExecutor {
    pub(crate) fn new(
        client: ClientWithMiddleware,
        endpoints: Endpoints,
        credentials: Credentials,
    ) -> Self {
        Self {
            client,
            endpoints,
            credentials,
        }
    }

    pub(crate) fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Fetch a URL: set (or reset) the CSV line-break replacement, then GET the
    /// URL, or POST to it with the private key if `key` is given.
    pub async fn fetch(
        &self,
        url: &str,
        line_breaks: Option<&str>,
        key: Option<&[u8]>,
    ) -> Result<Response, SctoError> {
        let settings_url = self.endpoints.line_break_setting(line_breaks);
        let settings_method = if line_breaks.is_some() {
            Method::POST
        } else {
            Method::DELETE
        };
        self.execute_with_fallback(settings_method, &settings_url, None)
            .await?;

        let method = if key.is_some() {
            Method::POST
        } else {
            Method::GET
        };
        self.execute_with_fallback(method, url, key).await
    }

    /// Send a request with each scheme of [AUTH_FALLBACK] until one succeeds.
    /// If all fail, the error of the last attempt is returned.
    pub async fn execute_with_fallback(
        &self,
        method: Method,
        url: &str,
        key: Option<&[u8]>,
    ) -> Result<Response, SctoError> {
        let [primary, fallbacks @ ..] = AUTH_FALLBACK;
        let mut result = self.execute(method.clone(), url, key, primary).await;
        for scheme in fallbacks {
            match result {
                Ok(res) => return Ok(res),
                Err(e) => {
                    debug!("{} {} failed, retrying with {:?} authentication: {}", method, url, scheme, e)
                }
            }
            result = self.execute(method.clone(), url, key, scheme).await;
        }
        result.map_err(report_server_message)
    }

    /// Send a request once using the given authentication scheme.
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        key: Option<&[u8]>,
        scheme: AuthScheme,
    ) -> Result<Response, SctoError> {
        debug!("{} {} ({:?} authentication)", method, url, scheme);
        match scheme {
            AuthScheme::Basic => {
                let res = self
                    .request(method, url, key)
                    .basic_auth(
                        self.credentials.username(),
                        Some(self.credentials.password()),
                    )
                    .send()
                    .await?;
                check(res).await
            }
            AuthScheme::Digest => {
                let res = self.request(method.clone(), url, key).send().await?;
                if res.status() != StatusCode::UNAUTHORIZED {
                    return check(res).await;
                }
                let challenge = res
                    .headers()
                    .get_all(WWW_AUTHENTICATE)
                    .iter()
                    .filter_map(|v| v.to_str().ok())
                    .find_map(DigestChallenge::parse);
                let Some(challenge) = challenge else {
                    return check(res).await;
                };
                let authorization =
                    challenge.respond(&self.credentials, method.as_str(), &request_uri(url)?);
                let res = self
                    .request(method, url, key)
                    .header(AUTHORIZATION, authorization)
                    .send()
                    .await?;
                check(res).await
            }
        }
    }

    fn request(&self, method: Method, url: &str, key: Option<&[u8]>) -> RequestBuilder {
        let (name, value) = OPENROSA_VERSION;
        let req = self.client.request(method, url).header(name, value);
        match key {
            Some(key) => req.multipart(private_key_form(key)),
            None => req,
        }
    }
}

/// Multipart form with the private key as a file named `private_key`.
fn private_key_form(key: &[u8]) -> Form {
    Form::new().part(
        "private_key",
        Part::bytes(key.to_vec()).file_name("private_key"),
    )
}

/// The path and query of a URL, as used in the Digest `uri` parameter.
fn request_uri(url: &str) -> Result<String, SctoError> {
    let url = url::Url::parse(url)?;
    Ok(match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    })
}

fn report_server_message(e: SctoError) -> SctoError {
    if let SctoError::Error {
        message: Some(message),
        ..
    } = &e
    {
        error!("Error message: {}", message);
    }
    e
}
