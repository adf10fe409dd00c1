//! Session login for the SurveyCTO web console API, which is not covered by
//! the REST API's Basic/Digest authentication.

use super::executor::{RequestExecutor, OPENROSA_VERSION};
use crate::endpoints::Endpoints;
use crate::errors::{check, SctoError};
use crate::types::FormId;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE};
use reqwest::{Method, Response, Url};
use reqwest_middleware::RequestBuilder;

pub const CSRF_HEADER: &str = "X-csrf-token";

/// CSRF token and session cookies of a logged in console session.
#[derive(Debug, Default)]
pub struct AuthContext {
    pub csrf_token: String,
    cookies: Jar,
}

impl AuthContext {
    /// Remember the CSRF token and cookies sent by the server.
    fn update(&mut self, res: &Response) -> Result<(), SctoError> {
        self.csrf_token = res
            .headers()
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| SctoError::MissingCsrfToken(res.url().to_string()))?
            .to_string();
        self.store_cookies(res.headers(), res.url());
        Ok(())
    }

    fn store_cookies(&self, headers: &HeaderMap, url: &Url) {
        self.cookies
            .set_cookies(&mut headers.get_all(SET_COOKIE).iter(), url);
    }

    /// Value for the `Cookie` header of a request to `url`, if any cookie applies.
    pub fn cookie_header(&self, url: &Url) -> Option<HeaderValue> {
        self.cookies.cookies(url)
    }

    /// Build a request which carries the CSRF token and session cookies.
    fn request(
        &self,
        executor: &RequestExecutor,
        method: Method,
        url: &str,
    ) -> Result<RequestBuilder, SctoError> {
        let parsed = Url::parse(url)?;
        let (name, value) = OPENROSA_VERSION;
        let req = executor
            .client()
            .request(method, parsed.clone())
            .header(name, value)
            .header(CSRF_HEADER, &self.csrf_token);
        Ok(match self.cookie_header(&parsed) {
            Some(cookies) => req.header(COOKIE, cookies),
            None => req,
        })
    }
}

/// Get a CSRF token from the server root, then log in with Basic authentication.
pub(crate) async fn login(
    executor: &RequestExecutor,
    endpoints: &Endpoints,
) -> Result<AuthContext, SctoError> {
    let mut auth = AuthContext::default();

    let (name, value) = OPENROSA_VERSION;
    let res = executor
        .client()
        .head(endpoints.root())
        .header(name, value)
        .send()
        .await?;
    auth.update(&check(res).await?)?;

    let credentials = executor.credentials();
    let res = auth
        .request(executor, Method::POST, &endpoints.login())?
        .basic_auth(credentials.username(), Some(credentials.password()))
        .send()
        .await?;
    auth.update(&check(res).await?)?;
    Ok(auth)
}

/// Log in and download the form definition.
pub(crate) async fn get_form_definition(
    executor: &RequestExecutor,
    endpoints: &Endpoints,
    form_id: &FormId,
) -> Result<serde_json::Value, SctoError> {
    let auth = login(executor, endpoints).await?;
    let res = auth
        .request(executor, Method::GET, &endpoints.form_design(form_id))?
        .send()
        .await?;
    Ok(check(res).await?.json().await?)
}
