use clap::{CommandFactory, Parser};

#[derive(Parser, Debug, Default)]
#[clap(author, version, about, long_about = None)]
#[clap(dont_collapse_args_in_usage = true)]
pub struct Args {
    /// Node http endpoint, e.g. http://127.0.0.1:12973
    pub node_url: Option<String>,

    /// Sent as the X-API-KEY header with every request.
    pub api_key: Option<String>,

    /// Per request timeout in seconds.
    #[clap(long)]
    pub timeout: Option<u64>,

    /// Address of the token contract to read.
    #[clap(long)]
    pub contract_address: Option<String>,

    /// Group of the token contract.
    #[clap(long)]
    pub group: Option<i32>,

    /// Check that the node is reachable before reading the token.
    #[clap(long)]
    pub probe: bool,
}

pub fn usage() -> String {
    format!(
        "Please specify the node url\n{}",
        Args::command().render_usage()
    )
}
