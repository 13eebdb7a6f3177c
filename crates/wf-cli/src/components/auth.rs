/// Token pair management: `wf login`, `wf logout` and `wf token`
use wf_api::{TokenStore, TokenStoreError};
use wf_core::format::mask_token;

/// Store an access/refresh token pair for later API calls and the TUI
#[derive(clap::Args)]
#[command(version, about, long_about = None)]
pub struct LoginArgs {
    /// Access token sent as the bearer credential
    #[arg(long, short)]
    pub access: String,

    /// Refresh token kept alongside it
    #[arg(long, short)]
    pub refresh: String,
}

pub fn handle_login(args: LoginArgs, tokens: &dyn TokenStore) -> Result<(), TokenStoreError> {
    tokens.set(args.access.trim(), args.refresh.trim())?;
    log::info!("Token pair stored");
    println!("Signed in");
    Ok(())
}

pub fn handle_logout(tokens: &dyn TokenStore) -> Result<(), TokenStoreError> {
    tokens.clear()?;
    println!("Signed out");
    Ok(())
}

/// What `wf token` prints
pub fn token_summary(tokens: &dyn TokenStore) -> String {
    match tokens.access_token() {
        Some(token) if !token.is_empty() => mask_token(&token),
        _ => "not signed in".to_string(),
    }
}

pub fn handle_token(tokens: &dyn TokenStore) {
    println!("{}", token_summary(tokens));
}
