use std::path::Path;
use linkshare::file::FileEntry;
use linkshare::storage::StorageManager;
use crate::errors::CliError;
use crate::handlers::{open_account, validate_remote_path};

pub fn handle_track(dir: &Path, remote_path: &str, encrypted_path: Option<&str>) -> Result<(), CliError> {
    validate_remote_path(remote_path)?;
    let (_config, storage) = open_account(dir)?;

    let entry = match encrypted_path {
        Some(encrypted) => {
            validate_remote_path(encrypted)?;
            FileEntry::new_encrypted(remote_path, encrypted)
        }
        None => FileEntry::new(remote_path),
    };
    // 保留已有条目的共享标志
    let entry = match storage.find_file_by_path(&entry.encrypted_remote_path)? {
        Some(existing) => FileEntry {
            shared_via_link: existing.shared_via_link,
            ..entry
        },
        None => entry,
    };
    let id = storage.save_file(&entry)?;

    println!("Tracking '{}' (id {})", remote_path, id);
    Ok(())
}
