use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::eyre::Result;

use surveycto::requests::{FormDataRequest, RepeatGroupRequest};
use surveycto::types::{CompletionDate, FormId, OutputFormat, RepeatGroupName, Shape};

use crate::credentials::Credentials;
use crate::output;

#[derive(Parser)]
pub struct FormDataArgs {
    /// Form ID
    form_id: FormId,

    /// Output format: csv or json
    #[clap(short, long, default_value = "csv")]
    format: OutputFormat,

    /// Shape of CSV data: wide or long
    #[clap(long, default_value = "wide")]
    shape: Shape,

    /// Only download submissions completed at or after this time,
    /// e.g. "2020-01-12" or "2020-01-12T13:42:42". Only used with --format=json.
    #[clap(long)]
    since: Option<CompletionDate>,

    /// Only download submissions with this review status:
    /// approved, pending or rejected. May be repeated.
    #[clap(short, long = "review-status")]
    review_statuses: Vec<String>,

    /// Do not download repeat groups of long CSV data
    #[clap(long)]
    no_repeat_groups: bool,

    /// Replace line breaks in CSV values with this string
    #[clap(long)]
    line_breaks: Option<String>,

    /// Private key (PEM file) to decrypt encrypted form data
    #[clap(short, long)]
    key: Option<Utf8PathBuf>,

    /// Write data to this file instead of stdout
    #[clap(short, long)]
    output: Option<Utf8PathBuf>,
}

impl FormDataArgs {
    fn request(&self, key: Option<Vec<u8>>) -> FormDataRequest {
        let mut request = FormDataRequest::new(self.form_id.clone())
            .format(self.format)
            .shape(self.shape);
        if let Some(since) = self.since {
            request = request.oldest_completion_date(since);
        }
        if !self.review_statuses.is_empty() {
            request = request.review_statuses(self.review_statuses.iter().cloned());
        }
        if self.no_repeat_groups {
            request = request.repeat_groups(false);
        }
        if let Some(line_breaks) = &self.line_breaks {
            request = request.line_breaks(line_breaks.clone());
        }
        if let Some(key) = key {
            request = request.key(key);
        }
        request
    }
}

pub async fn form_data(credentials: Credentials, args: FormDataArgs) -> Result<()> {
    let key = output::read_key(args.key.as_deref())?;
    let client = credentials.get_client()?;
    let data = client.get_form_data(&args.request(key)).await?;
    output::write(args.output.as_deref(), output::render(&data)?.as_bytes())
}

#[derive(Parser)]
pub struct RepeatGroupArgs {
    /// Form ID
    form_id: FormId,

    /// Name of the repeat group
    group: RepeatGroupName,

    /// Only download submissions with this review status:
    /// approved, pending or rejected. May be repeated.
    #[clap(short, long = "review-status")]
    review_statuses: Vec<String>,

    /// Replace line breaks in CSV values with this string
    #[clap(long)]
    line_breaks: Option<String>,

    /// Write data to this file instead of stdout
    #[clap(short, long)]
    output: Option<Utf8PathBuf>,
}

impl RepeatGroupArgs {
    fn request(&self) -> RepeatGroupRequest {
        let mut request = RepeatGroupRequest::new(self.form_id.clone(), self.group.clone());
        if !self.review_statuses.is_empty() {
            request = request.review_statuses(self.review_statuses.iter().cloned());
        }
        if let Some(line_breaks) = &self.line_breaks {
            request = request.line_breaks(line_breaks.clone());
        }
        request
    }
}

pub async fn repeat_group(credentials: Credentials, args: RepeatGroupArgs) -> Result<()> {
    let client = credentials.get_client()?;
    let csv = client.get_repeatgroup(&args.request()).await?;
    output::write(args.output.as_deref(), csv.as_bytes())
}
