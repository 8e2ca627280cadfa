//! Host platform gate
//!
//! The tool only targets Linux binaries, so it refuses to run anywhere else.

use std::env::consts::{ARCH, OS};

/// Platform signature used to match release asset names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: &'static str,
    pub arch: &'static str,
}

/// Detect the host platform, failing on anything but linux amd64/arm64.
pub fn detect() -> Result<Platform, String> {
    match (OS, normalize_arch(ARCH)) {
        ("linux", Some(arch)) => Ok(Platform { os: "linux", arch }),
        _ => Err(format!(
            "this program runs only on linux/amd64 or linux/arm64 (detected: {}/{})",
            OS, ARCH
        )),
    }
}

/// Map Rust's arch names onto the Go-style names used in release assets.
fn normalize_arch(arch: &str) -> Option<&'static str> {
    match arch {
        "x86_64" | "amd64" => Some("amd64"),
        "aarch64" | "arm64" => Some("arm64"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arch_normalization() {
        assert_eq!(normalize_arch("x86_64"), Some("amd64"));
        assert_eq!(normalize_arch("amd64"), Some("amd64"));
        assert_eq!(normalize_arch("aarch64"), Some("arm64"));
        assert_eq!(normalize_arch("arm64"), Some("arm64"));
        assert_eq!(normalize_arch("riscv64"), None);
        assert_eq!(normalize_arch(""), None);
    }

    #[test]
    #[cfg(all(target_os = "linux", any(target_arch = "x86_64", target_arch = "aarch64")))]
    fn test_detect_on_supported_host() {
        let platform = detect().expect("host should be supported");
        assert_eq!(platform.os, "linux");
        assert!(platform.arch == "amd64" || platform.arch == "arm64");
    }
}
