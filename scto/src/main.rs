mod attachment;
mod credentials;
mod dataset;
mod definition;
mod form_data;
mod output;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use env_logger::Env;

use surveycto::types::{ServerUrl, Username};

use crate::attachment::AttachmentArgs;
use crate::credentials::Credentials;
use crate::dataset::DatasetArgs;
use crate::definition::DefinitionArgs;
use crate::form_data::{FormDataArgs, RepeatGroupArgs};

#[derive(Parser)]
#[clap(
    author, version, about, long_about = None,
    propagate_version = false, disable_help_subcommand = true
)]
struct Cli {
    /// SurveyCTO server name, i.e. "myorg" for https://myorg.surveycto.com
    #[clap(short, long, env = "SCTO_SERVER")]
    server: Option<String>,

    /// Server address, overrides --server
    #[clap(long)]
    base_url: Option<ServerUrl>,

    /// account username
    #[clap(short, long, env = "SCTO_USERNAME")]
    username: Option<Username>,

    /// account password
    #[clap(long, env = "SCTO_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Request timeout in seconds
    #[clap(long)]
    timeout: Option<u64>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the data of a form
    FormData(FormDataArgs),

    /// Download the long CSV data of a repeat group
    RepeatGroup(RepeatGroupArgs),

    /// Download the CSV data of a server dataset
    Dataset(DatasetArgs),

    /// Download a file attached to a submission
    Attachment(AttachmentArgs),

    /// Print the definition of a form as JSON
    Definition(DefinitionArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init_from_env(Env::default().default_filter_or("warn"));
    let args = Cli::parse();

    let credentials = Credentials {
        server: args.server,
        base_url: args.base_url,
        username: args.username,
        password: args.password,
        timeout: args.timeout,
    };

    match args.command {
        Commands::FormData(args) => form_data::form_data(credentials, args).await,
        Commands::RepeatGroup(args) => form_data::repeat_group(credentials, args).await,
        Commands::Dataset(args) => dataset::dataset(credentials, args).await,
        Commands::Attachment(args) => attachment::attachment(credentials, args).await,
        Commands::Definition(args) => definition::definition(credentials, args).await,
    }
}
