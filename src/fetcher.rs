//! Artifact Fetcher
//!
//! Downloads a single matched asset into the current directory under its
//! original name and marks it executable.

use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::finder::ReleaseCandidate;
use crate::github::GithubClient;
use crate::logging::log_download;

/// Download the candidate's asset and leave it executable in the CWD.
///
/// Each step fails with its own context. A failure after file creation
/// leaves a partial, non-executable file behind; nothing cleans it up.
pub fn download_and_prepare(
    client: &GithubClient,
    candidate: &ReleaseCandidate,
) -> Result<(), Box<dyn Error>> {
    log_download(&format!(
        "Downloading {} from {}/{}...",
        candidate.asset_name, candidate.repo_owner, candidate.repo_name
    ));

    let reader = client
        .download_asset(
            &candidate.repo_owner,
            &candidate.repo_name,
            candidate.asset_id,
        )
        .map_err(|e| format!("could not download asset content: {}", e))?;

    write_executable(reader, Path::new(&candidate.asset_name))
}

/// Write a stream to `path` and chmod it 0755 (rwxr-xr-x).
fn write_executable(mut reader: impl Read, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut file = fs::File::create(path)
        .map_err(|e| format!("could not create file {}: {}", path.display(), e))?;

    io::copy(&mut reader, &mut file)
        .and_then(|_| file.flush())
        .map_err(|e| format!("could not write to file: {}", e))?;
    drop(file);

    let mut perms = fs::metadata(path)
        .map_err(|e| format!("could not make file executable: {}", e))?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
        .map_err(|e| format!("could not make file executable: {}", e))?;

    Ok(())
}
