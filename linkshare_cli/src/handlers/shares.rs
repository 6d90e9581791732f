use std::path::Path;
use linkshare::share::Share;
use crate::errors::CliError;
use crate::handlers::open_account;

pub fn handle_shares(dir: &Path, path: Option<&str>) -> Result<(), CliError> {
    let (_config, storage) = open_account(dir)?;
    let shares = match path {
        Some(p) => storage.shares_by_path(p)?,
        None => storage.all_shares()?,
    };

    if shares.is_empty() {
        println!("No shares in the local cache.");
        return Ok(());
    }
    for share in &shares {
        print_share(share);
    }
    Ok(())
}

fn print_share(share: &Share) {
    let kind = if share.is_folder { "dir " } else { "file" };
    println!(
        "{:>8}  {}  {:<12}  {}  {}",
        share.remote_id,
        kind,
        share.share_type,
        share.path,
        share.share_link.as_deref().unwrap_or("-")
    );
}
