use std::time::Duration;

use color_eyre::eyre::{bail, OptionExt, Result};

use surveycto::types::{ServerUrl, Username};
use surveycto::SurveyCtoClient;

/// Command-line options of `scto` which are relevant to obtaining a client object.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub server: Option<String>,
    pub base_url: Option<ServerUrl>,
    pub username: Option<Username>,
    pub password: Option<String>,
    /// Request timeout in seconds.
    pub timeout: Option<u64>,
}

impl Credentials {
    /// Get a client for `--base-url` if given, else for `--server`.
    pub fn get_client(self) -> Result<SurveyCtoClient> {
        let Credentials {
            server,
            base_url,
            username,
            password,
            timeout,
        } = self;
        let url = server_url(server, base_url)?;
        let username = username.ok_or_eyre("--username is required")?;
        let password = password.ok_or_eyre("--password is required")?;
        log::debug!("Connecting to {} as {}", url, username);
        let builder = SurveyCtoClient::build(url, surveycto::Credentials::new(username, password));
        let builder = if let Some(seconds) = timeout {
            builder.timeout(Duration::from_secs(seconds))
        } else {
            builder
        };
        Ok(builder.build()?)
    }
}

fn server_url(server: Option<String>, base_url: Option<ServerUrl>) -> Result<ServerUrl> {
    match (base_url, server) {
        (Some(url), _) => Ok(url),
        (None, Some(name)) => Ok(ServerUrl::from_server_name(&name)?),
        (None, None) => bail!("--server is required"),
    }
}
