use std::path::Path;

use crate::host::Host;

/// Kernel version string, WSL kernels mention "microsoft"
const PROC_VERSION: &str = "/proc/version";
/// WSLg bridge mount
const WSLG_MOUNT: &str = "/mnt/wslg";
const WAYLAND_DISPLAY: &str = "WAYLAND_DISPLAY";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter, strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum PlatformKind {
    Linux,
    Wsl2,
    Windows,
    MacOs,
    Other,
}

impl PlatformKind {
    /// Never fails, anything unknown is `Other`
    pub fn detect<H: Host>(host: &H) -> Self {
        match host.os() {
            "linux" => {
                // unreadable just means plain linux
                let wsl = host
                    .read_file(Path::new(PROC_VERSION))
                    .map(|v| v.to_lowercase().contains("microsoft"))
                    .unwrap_or(false);

                if wsl {
                    PlatformKind::Wsl2
                } else {
                    PlatformKind::Linux
                }
            }
            "windows" => PlatformKind::Windows,
            "macos" => PlatformKind::MacOs,
            _ => PlatformKind::Other,
        }
    }

    /// WSLg: both the compositor variable and the bridge mount must be there
    pub fn supports_integrated_display<H: Host>(self, host: &H) -> bool {
        self == PlatformKind::Wsl2
            && host.var(WAYLAND_DISPLAY).is_some_and(|v| !v.is_empty())
            && host.exists(Path::new(WSLG_MOUNT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    #[test]
    fn test_detect() {
        let host = FakeHost::new("linux")
            .with_file("/proc/version", "Linux version 6.1.0-18-amd64 (gcc-12)");
        assert_eq!(PlatformKind::detect(&host), PlatformKind::Linux);

        let host = FakeHost::new("linux").with_file(
            "/proc/version",
            "Linux version 5.15.133.1-Microsoft-standard-WSL2",
        );
        assert_eq!(PlatformKind::detect(&host), PlatformKind::Wsl2);

        // no /proc/version at all
        assert_eq!(PlatformKind::detect(&FakeHost::new("linux")), PlatformKind::Linux);

        assert_eq!(PlatformKind::detect(&FakeHost::new("windows")), PlatformKind::Windows);
        assert_eq!(PlatformKind::detect(&FakeHost::new("macos")), PlatformKind::MacOs);
        assert_eq!(PlatformKind::detect(&FakeHost::new("freebsd")), PlatformKind::Other);
    }

    #[test]
    fn test_integrated_display_needs_both() {
        let both = FakeHost::new("linux")
            .with_var("WAYLAND_DISPLAY", "wayland-0")
            .with_path("/mnt/wslg");
        assert!(PlatformKind::Wsl2.supports_integrated_display(&both));

        // only on wsl2
        assert!(!PlatformKind::Linux.supports_integrated_display(&both));

        let no_mount = FakeHost::new("linux").with_var("WAYLAND_DISPLAY", "wayland-0");
        assert!(!PlatformKind::Wsl2.supports_integrated_display(&no_mount));

        let no_var = FakeHost::new("linux").with_path("/mnt/wslg");
        assert!(!PlatformKind::Wsl2.supports_integrated_display(&no_var));

        let empty_var = FakeHost::new("linux")
            .with_var("WAYLAND_DISPLAY", "")
            .with_path("/mnt/wslg");
        assert!(!PlatformKind::Wsl2.supports_integrated_display(&empty_var));
    }

    #[test]
    fn test_names() {
        assert_eq!(PlatformKind::Wsl2.to_string(), "wsl2");
        assert_eq!(PlatformKind::MacOs.to_string(), "macos");
        let name: &'static str = PlatformKind::Linux.into();
        assert_eq!(name, "linux");
    }
}
