use crate::{cli, Settings, TokenInfoClient};
use std::io::Write;

/// Reads the token info of the configured contract and writes a single line to `out`: the
/// results as json, a `Request error`/`Marshal error` diagnostic, or the usage message when no
/// node url is configured. Errors are reported in the output only, the returned error is
/// about writing to `out`.
pub async fn run<W: Write>(settings: &Settings, out: &mut W) -> std::io::Result<()> {
    let Some(client_config) = settings.client_config() else {
        return writeln!(out, "{}", cli::usage());
    };

    let client = match TokenInfoClient::new(client_config).await {
        Ok(client) => client,
        Err(err) => return writeln!(out, "Request error: {err}"),
    };

    tracing::info!(
        contract_address = %settings.contract_address,
        group = settings.group,
        "requesting token info"
    );
    let result = match client
        .get_token_info(&settings.contract_address, settings.group)
        .await
    {
        Ok(result) => result,
        Err(err) => return writeln!(out, "Request error: {err}"),
    };

    match serde_json::to_string(&result) {
        Ok(object) => writeln!(out, "{object}"),
        Err(err) => writeln!(out, "Marshal error: {err}"),
    }
}
