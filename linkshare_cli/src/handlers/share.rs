use std::env;
use std::path::Path;
use std::time::Duration;
use linkshare::common::constants::{APP_PASSWORD_ENV, NO_PERMISSION};
use linkshare::operation::{CreateShareViaLinkOperation, LinkShareOptions, SyncOperation};
use linkshare::remote::{NextcloudClient, ServerCredentials};
use crate::errors::CliError;
use crate::handlers::{open_account, validate_remote_path};

pub fn handle_share(
    dir: &Path,
    remote_path: &str,
    ask_password: bool,
    permissions: Option<i32>,
) -> Result<(), CliError> {
    validate_remote_path(remote_path)?;
    let (config, storage) = open_account(dir)?;

    let password = if ask_password {
        Some(prompt_link_password()?)
    } else {
        None
    };

    let app_password = match env::var(APP_PASSWORD_ENV) {
        Ok(p) if !p.is_empty() => p,
        _ => rpassword::prompt_password(format!(
            "App password for {}@{}: ",
            config.username, config.server_url
        ))?,
    };
    let client = NextcloudClient::with_timeout(
        ServerCredentials {
            server_url: config.server_url.clone(),
            username: config.username.clone(),
            password: app_password,
        },
        Duration::from_secs(config.timeout_secs),
    )?;

    let operation = CreateShareViaLinkOperation::new(
        remote_path,
        storage,
        LinkShareOptions {
            password,
            permissions: permissions.unwrap_or(NO_PERMISSION),
        },
    );
    let result = operation.run(&client)?;
    if !result.is_success() {
        return Err(CliError::ShareFailed(result.to_string()));
    }

    let link = result
        .data()
        .and_then(|shares| shares.first())
        .and_then(|first| first.as_ref())
        .and_then(|share| share.share_link.clone());
    match link {
        Some(url) => println!("{}", url),
        None => println!("Link share created for '{}'", remote_path),
    }
    Ok(())
}

fn prompt_link_password() -> Result<String, CliError> {
    let pass = rpassword::prompt_password("Link password: ")?;
    let pass_confirm = rpassword::prompt_password("Confirm link password: ")?;
    if pass != pass_confirm {
        return Err(CliError::PasswordMismatch);
    }
    if pass.is_empty() {
        return Err(CliError::EmptyPassword);
    }
    Ok(pass)
}
