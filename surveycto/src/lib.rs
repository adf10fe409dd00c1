//! Client for the [SurveyCTO](https://www.surveycto.com) REST API.
//!
//! ```no_run
//! use surveycto::requests::FormDataRequest;
//! use surveycto::types::OutputFormat;
//! use surveycto::{Credentials, SurveyCtoClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SurveyCtoClient::server("myorg", Credentials::new("me@example.org", "secret"))?
//!     .build()?;
//! let request = FormDataRequest::new("household_survey").format(OutputFormat::Json);
//! let data = client.get_form_data(&request).await?;
//! println!("{:?}", data.as_json());
//! # Ok(())
//! # }
//! ```

pub mod auth;
mod client;
pub mod endpoints;
pub mod errors;
pub mod models;
pub mod requests;
pub mod types;

pub use auth::{AuthScheme, Credentials};
pub use client::executor::RequestExecutor;
pub use client::{AuthContext, RepeatGroupCatalog, SurveyCtoClient, SurveyCtoClientBuilder};
pub use errors::SctoError;
pub use models::{FormData, RepeatGroupData, Warning};
pub use reqwest;
pub use reqwest_middleware;
