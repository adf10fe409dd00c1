//! SurveyCTO credentials and the HTTP authentication schemes they are used with.
//!
//! Newer SurveyCTO servers accept HTTP Basic authentication, older ones
//! only HTTP Digest. Data requests try the schemes of [AUTH_FALLBACK] in order.

use crate::types::Username;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

/// Order in which authentication schemes are tried for data requests.
pub const AUTH_FALLBACK: [AuthScheme; 2] = [AuthScheme::Basic, AuthScheme::Digest];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AuthScheme {
    Basic,
    Digest,
}

/// SurveyCTO username and password.
#[derive(Clone)]
pub struct Credentials {
    username: Username,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<Username>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// A `WWW-Authenticate: Digest ...` challenge (RFC 2617).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DigestChallenge {
    realm: String,
    nonce: String,
    opaque: Option<String>,
    algorithm: Option<String>,
    qop_auth: bool,
}

impl DigestChallenge {
    /// Parse the value of a `WWW-Authenticate` header. Returns `None` if it
    /// is not a Digest challenge or is missing the realm or nonce.
    pub fn parse(header: &str) -> Option<Self> {
        let (scheme, rest) = header.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("digest") {
            return None;
        }
        let mut params = parse_params(rest);
        let qop_auth = params
            .get("qop")
            .map(|qop| qop.split(',').any(|q| q.trim() == "auth"))
            .unwrap_or(false);
        Some(Self {
            realm: params.remove("realm")?,
            nonce: params.remove("nonce")?,
            opaque: params.remove("opaque"),
            algorithm: params.remove("algorithm"),
            qop_auth,
        })
    }

    /// Compute the `Authorization` header value for a request.
    /// `uri` is the path and query of the request URL.
    pub fn respond(&self, credentials: &Credentials, method: &str, uri: &str) -> String {
        let cnonce = uuid::Uuid::new_v4().simple().to_string();
        self.respond_with_cnonce(credentials, method, uri, &cnonce)
    }

    fn respond_with_cnonce(
        &self,
        credentials: &Credentials,
        method: &str,
        uri: &str,
        cnonce: &str,
    ) -> String {
        const NC: &str = "00000001";
        let mut ha1 = md5_hex(&format!(
            "{}:{}:{}",
            credentials.username(),
            self.realm,
            credentials.password()
        ));
        let sess = self
            .algorithm
            .as_deref()
            .map(|a| a.eq_ignore_ascii_case("MD5-sess"))
            .unwrap_or(false);
        if sess {
            ha1 = md5_hex(&format!("{}:{}:{}", ha1, self.nonce, cnonce));
        }
        let ha2 = md5_hex(&format!("{}:{}", method, uri));
        let response = if self.qop_auth {
            md5_hex(&format!(
                "{}:{}:{}:{}:auth:{}",
                ha1, self.nonce, NC, cnonce, ha2
            ))
        } else {
            md5_hex(&format!("{}:{}:{}", ha1, self.nonce, ha2))
        };

        let mut header = format!(
            "Digest username=\"{}\", realm=\"{}\", nonce=\"{}\", uri=\"{}\", response=\"{}\"",
            credentials.username(),
            self.realm,
            self.nonce,
            uri,
            response
        );
        if let Some(opaque) = &self.opaque {
            header.push_str(&format!(", opaque=\"{}\"", opaque));
        }
        if let Some(algorithm) = &self.algorithm {
            header.push_str(&format!(", algorithm={}", algorithm));
        }
        if self.qop_auth {
            header.push_str(&format!(", qop=auth, nc={}, cnonce=\"{}\"", NC, cnonce));
        }
        header
    }
}

fn md5_hex(data: &str) -> String {
    format!("{:x}", md5::compute(data))
}

/// Split `key="value", key=value` pairs. Commas inside quotes are kept.
fn parse_params(s: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let mut rest = s.trim();
    while !rest.is_empty() {
        let Some((key, after)) = rest.split_once('=') else {
            break;
        };
        let key = key.trim().trim_start_matches(',').trim().to_ascii_lowercase();
        let after = after.trim_start();
        let (value, remaining) = if let Some(quoted) = after.strip_prefix('"') {
            match quoted.split_once('"') {
                Some((value, remaining)) => (value, remaining),
                None => (quoted, ""),
            }
        } else {
            match after.split_once(',') {
                Some((value, remaining)) => (value.trim(), remaining),
                None => (after.trim(), ""),
            }
        };
        params.insert(key, value.to_string());
        rest = remaining.trim_start().trim_start_matches(',').trim_start();
    }
    params
}
