use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::eyre::Result;

use surveycto::types::FormId;
use surveycto::FormData;

use crate::credentials::Credentials;
use crate::output;

#[derive(Parser)]
pub struct DefinitionArgs {
    /// Form ID
    form_id: FormId,

    /// Write the definition to this file instead of stdout
    #[clap(short, long)]
    output: Option<Utf8PathBuf>,
}

pub async fn definition(credentials: Credentials, args: DefinitionArgs) -> Result<()> {
    let client = credentials.get_client()?;
    let definition = client.get_form_definition(&args.form_id).await?;
    let text = output::render(&FormData::Json(definition))?;
    output::write(args.output.as_deref(), text.as_bytes())
}
