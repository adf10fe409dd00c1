use super::catalog::RepeatGroupCatalog;
use super::definition;
use super::executor::RequestExecutor;
use crate::auth::Credentials;
use crate::endpoints::{with_statuses, Endpoints};
use crate::errors::SctoError;
use crate::models::{FormData, RepeatGroupData};
use crate::requests::{FormDataRequest, RepeatGroupRequest, Target};
use crate::types::*;
use bytes::Bytes;
use log::warn;
use reqwest_middleware::{ClientWithMiddleware, Middleware};
use std::sync::Arc;
use std::time::Duration;

/// SurveyCTO REST API client.
#[derive(Debug, Clone)]
pub struct SurveyCtoClient {
    executor: RequestExecutor,
    endpoints: Endpoints,
}

pub struct SurveyCtoClientBuilder {
    url: ServerUrl,
    credentials: Credentials,
    http: reqwest::ClientBuilder,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl SurveyCtoClientBuilder {
    pub(crate) fn new(url: ServerUrl, credentials: Credentials) -> Self {
        Self {
            url,
            credentials,
            http: reqwest::ClientBuilder::new(),
            middleware: Vec::new(),
        }
    }

    /// Add middleware to the HTTP client.
    pub fn with<M: Middleware>(mut self, middleware: M) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Set a timeout for each HTTP request.
    pub fn timeout(self, timeout: Duration) -> Self {
        Self {
            http: self.http.timeout(timeout),
            ..self
        }
    }

    /// Create the client. No request is sent.
    pub fn build(self) -> Result<SurveyCtoClient, reqwest::Error> {
        let client = self
            .middleware
            .into_iter()
            .fold(
                reqwest_middleware::ClientBuilder::new(self.http.build()?),
                |builder, m| builder.with_arc(m),
            )
            .build();
        Ok(SurveyCtoClient::from_client(client, self.url, self.credentials))
    }
}

impl SurveyCtoClient {
    /// Create a client builder.
    pub fn build(url: ServerUrl, credentials: Credentials) -> SurveyCtoClientBuilder {
        SurveyCtoClientBuilder::new(url, credentials)
    }

    /// Create a client builder for a server hosted at `https://{server_name}.surveycto.com`.
    pub fn server(
        server_name: &str,
        credentials: Credentials,
    ) -> Result<SurveyCtoClientBuilder, crate::errors::InvalidServerUrl> {
        Ok(Self::build(
            ServerUrl::from_server_name(server_name)?,
            credentials,
        ))
    }

    /// Create a client which uses an existing connection pool.
    pub fn from_client(client: ClientWithMiddleware, url: ServerUrl, credentials: Credentials) -> Self {
        let endpoints = Endpoints::new(url);
        Self {
            executor: RequestExecutor::new(client, endpoints.clone(), credentials),
            endpoints,
        }
    }

    /// Get the server URL.
    pub fn url(&self) -> &ServerUrl {
        self.endpoints.base()
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// Fetch form data in CSV or JSON format.
    ///
    /// Options which do not apply to the requested format are ignored with a
    /// warning, see [FormDataRequest::plan]. Long CSV data with repeat groups
    /// is fetched one table at a time, and the first failure aborts the call.
    pub async fn get_form_data(&self, request: &FormDataRequest) -> Result<FormData, SctoError> {
        let plan = request.plan()?;
        for warning in &plan.warnings {
            warn!("{}", warning);
        }
        let form_id = plan.form_id;
        let line_breaks = plan.line_breaks;
        let key = plan.key;

        match &plan.target {
            Target::WideCsv(statuses) => {
                let url = self.endpoints.wide_csv(form_id, statuses);
                self.fetch_text(&url, line_breaks, key).await.map(FormData::Csv)
            }
            Target::LongCsv(statuses) => {
                let url = self.endpoints.long_csv(form_id, statuses);
                self.fetch_text(&url, line_breaks, key).await.map(FormData::Csv)
            }
            Target::RepeatGroups(statuses) => {
                let catalog = self.repeat_groups(form_id).await?;
                let mut data = RepeatGroupData::default();
                for (name, url) in catalog.iter() {
                    let csv = self
                        .fetch_text(&with_statuses(url, statuses), line_breaks, key)
                        .await?;
                    data.push(name.clone(), csv);
                }
                Ok(FormData::RepeatGroups(data))
            }
            Target::JsonByStatus(statuses) => {
                let url = self.endpoints.wide_json_by_status(form_id, statuses);
                self.fetch_json(&url, key).await.map(FormData::Json)
            }
            Target::JsonSince(since) => {
                let url = self.endpoints.wide_json_since(form_id, since.as_ref())?;
                self.fetch_json(&url, key).await.map(FormData::Json)
            }
        }
    }

    /// Fetch the long CSV data of one repeat group of a form.
    pub async fn get_repeatgroup(&self, request: &RepeatGroupRequest) -> Result<String, SctoError> {
        let statuses = request.statuses()?;
        let catalog = self.repeat_groups(request.form_id()).await?.without_main();
        catalog.require(request.group())?;
        let url = self
            .endpoints
            .repeat_group_csv(request.form_id(), request.group(), &statuses);
        self.fetch_text(&url, request.line_break_replacement(), None)
            .await
    }

    /// Fetch the CSV data of a server dataset.
    pub async fn get_server_dataset(
        &self,
        dataset_id: &DatasetId,
        line_breaks: Option<&str>,
    ) -> Result<String, SctoError> {
        let url = self.endpoints.dataset_csv(dataset_id);
        self.fetch_text(&url, line_breaks, None).await
    }

    /// Download a file attached to a submission, e.g. an image or audio
    /// recording. `url` is the absolute URL found in the form data.
    pub async fn get_attachment(&self, url: &str, key: Option<&[u8]>) -> Result<Bytes, SctoError> {
        let res = self.executor.fetch(url, None, key).await?;
        Ok(res.bytes().await?)
    }

    /// Fetch the definition of a form. This logs into the web console with
    /// Basic authentication, there is no Digest fallback.
    pub async fn get_form_definition(&self, form_id: &FormId) -> Result<serde_json::Value, SctoError> {
        definition::get_form_definition(&self.executor, &self.endpoints, form_id).await
    }

    /// Fetch any SurveyCTO URL, see [RequestExecutor::fetch].
    pub async fn get_url_data(
        &self,
        url: &str,
        line_breaks: Option<&str>,
        key: Option<&[u8]>,
    ) -> Result<reqwest::Response, SctoError> {
        self.executor.fetch(url, line_breaks, key).await
    }

    /// List the data URLs of a form's top-level data and repeat groups.
    pub async fn repeat_groups(&self, form_id: &FormId) -> Result<RepeatGroupCatalog, SctoError> {
        let listing = self
            .fetch_text(&self.endpoints.form_files(form_id), None, None)
            .await?;
        Ok(RepeatGroupCatalog::parse(&listing))
    }

    // ==================================================
    //                 HELPER METHODS
    // ==================================================

    async fn fetch_text(
        &self,
        url: &str,
        line_breaks: Option<&str>,
        key: Option<&[u8]>,
    ) -> Result<String, SctoError> {
        let res = self.executor.fetch(url, line_breaks, key).await?;
        Ok(res.text().await?)
    }

    async fn fetch_json(&self, url: &str, key: Option<&[u8]>) -> Result<serde_json::Value, SctoError> {
        let res = self.executor.fetch(url, None, key).await?;
        Ok(res.json().await?)
    }
}
