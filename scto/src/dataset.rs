use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::eyre::Result;

use surveycto::types::DatasetId;

use crate::credentials::Credentials;
use crate::output;

#[derive(Parser)]
pub struct DatasetArgs {
    /// Dataset ID
    dataset_id: DatasetId,

    /// Replace line breaks in CSV values with this string
    #[clap(long)]
    line_breaks: Option<String>,

    /// Write data to this file instead of stdout
    #[clap(short, long)]
    output: Option<Utf8PathBuf>,
}

pub async fn dataset(credentials: Credentials, args: DatasetArgs) -> Result<()> {
    let client = credentials.get_client()?;
    let csv = client
        .get_server_dataset(&args.dataset_id, args.line_breaks.as_deref())
        .await?;
    output::write(args.output.as_deref(), csv.as_bytes())
}
