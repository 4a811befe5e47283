//! Rendered file output.
//!
//! Writes a rendered config under `<output>/<service>/`, mirroring the
//! file's path on the node. Shell scripts are made executable.

use color_eyre::eyre::{eyre, WrapErr};
use std::path::{Component, Path, PathBuf};

/// Location of `filename` for `service` inside the output directory.
///
/// Absolute node paths such as `/etc/ssh/sshd_config` are placed relative to
/// the service directory. Paths that try to leave it are rejected.
pub fn output_path(output_dir: &Path, service: &str, filename: &str) -> color_eyre::eyre::Result<PathBuf> {
    let relative = Path::new(filename.trim_start_matches('/'));
    if relative.as_os_str().is_empty()
        || relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(eyre!("Refusing to write {:?} outside the output directory", filename));
    }
    Ok(output_dir.join(service).join(relative))
}

/// Write one rendered file and return where it was written.
///
/// # Parameters
/// - `output_dir`: Root output directory (created if missing)
/// - `service`: Service name, used as the sub-directory
/// - `filename`: File name as declared by the service
/// - `content`: Rendered text
pub fn write_rendered_file(
    output_dir: &Path,
    service: &str,
    filename: &str,
    content: &str,
) -> color_eyre::eyre::Result<PathBuf> {
    let path = output_path(output_dir, service, filename)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create directory {:?}", parent))?;
    }
    std::fs::write(&path, content)
        .map_err(|e| eyre!("Failed to write {:?}: {}", path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if filename.ends_with(".sh") {
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms)?;
        }
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_strips_root() {
        let out = Path::new("/tmp/out");
        assert_eq!(
            output_path(out, "SSH", "/etc/ssh/sshd_config").unwrap(),
            PathBuf::from("/tmp/out/SSH/etc/ssh/sshd_config")
        );
        assert_eq!(
            output_path(out, "SSH", "startsshd.sh").unwrap(),
            PathBuf::from("/tmp/out/SSH/startsshd.sh")
        );
    }

    #[test]
    fn test_output_path_rejects_escape() {
        let out = Path::new("/tmp/out");
        assert!(output_path(out, "x", "../../etc/passwd").is_err());
        assert!(output_path(out, "x", "/").is_err());
    }

    #[test]
    fn test_write_rendered_script_is_executable() {
        let dir = TempDir::new().unwrap();
        let path = write_rendered_file(dir.path(), "IPForward", "ipforward.sh", "#!/bin/sh\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "#!/bin/sh\n");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn test_write_nested_config() {
        let dir = TempDir::new().unwrap();
        let path = write_rendered_file(dir.path(), "DHCP", "/etc/dhcp/dhcpd.conf", "x").unwrap();
        assert!(path.ends_with("DHCP/etc/dhcp/dhcpd.conf"));
        assert!(path.exists());
    }
}
