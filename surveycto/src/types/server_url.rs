//! NewTypes for values used by users when first connecting to a SurveyCTO server.

use crate::errors::InvalidServerUrl;
use aliri_braid::braid;

/// A [ServerUrl] is the base URL of a SurveyCTO server, e.g.
/// `https://myorg.surveycto.com`
#[braid(validator, serde)]
pub struct ServerUrl(String);

impl aliri_braid::Validator for ServerUrl {
    type Error = InvalidServerUrl;

    fn validate(s: &str) -> Result<(), Self::Error> {
        if !(s.starts_with("http://") || s.starts_with("https://")) {
            Err(InvalidServerUrl::Protocol(s.to_string()))
        } else if s.ends_with('/') {
            Err(InvalidServerUrl::TrailingSlash(s.to_string()))
        } else {
            Ok(())
        }
    }
}

impl ServerUrl {
    /// Base URL of a server hosted by SurveyCTO, `https://{server_name}.surveycto.com`
    pub fn from_server_name(server_name: &str) -> Result<Self, InvalidServerUrl> {
        let valid = !server_name.is_empty()
            && server_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if valid {
            Self::new(format!("https://{}.surveycto.com", server_name))
        } else {
            Err(InvalidServerUrl::ServerName(server_name.to_string()))
        }
    }
}
