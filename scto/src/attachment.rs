use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::eyre::Result;

use crate::credentials::Credentials;
use crate::output;

#[derive(Parser)]
pub struct AttachmentArgs {
    /// URL of the attachment, as found in form data
    url: String,

    /// Private key (PEM file) if the attachment is encrypted
    #[clap(short, long)]
    key: Option<Utf8PathBuf>,

    /// File to save the attachment to
    #[clap(short, long)]
    output: Utf8PathBuf,
}

pub async fn attachment(credentials: Credentials, args: AttachmentArgs) -> Result<()> {
    let key = output::read_key(args.key.as_deref())?;
    let client = credentials.get_client()?;
    let data = client.get_attachment(&args.url, key.as_deref()).await?;
    output::write(Some(args.output.as_path()), &data)
}
