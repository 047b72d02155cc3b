use std::fmt;
use std::path::{Path, PathBuf};

use rmmp_platform::command::Command;
use rmmp_platform::os::is_android;
use tracing::{debug, info, warn};

use crate::error::{Result, RootError};
use crate::module::{ModuleInfo, scan_modules_dir};

/// Where root managers keep their binaries and modules on a device.
pub const ADB_ROOT: &str = "/data/adb";

/// Supported root managers, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeKind {
    KernelSu,
    APatch,
    Magisk,
}

impl RuntimeKind {
    pub const PRIORITY: [RuntimeKind; 3] =
        [RuntimeKind::KernelSu, RuntimeKind::APatch, RuntimeKind::Magisk];

    pub fn name(self) -> &'static str {
        match self {
            RuntimeKind::KernelSu => "KernelSU",
            RuntimeKind::APatch => "APatch",
            RuntimeKind::Magisk => "Magisk",
        }
    }

    /// Entry probed under the adb root.
    fn probe_name(self) -> &'static str {
        match self {
            RuntimeKind::KernelSu => "ksud",
            RuntimeKind::APatch => "apd",
            RuntimeKind::Magisk => "magisk",
        }
    }
}

impl fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The root manager found on this device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootRuntime {
    kind: RuntimeKind,
    binary: PathBuf,
    adb_root: PathBuf,
}

impl RootRuntime {
    /// Probe the device. Always `None` off Android.
    pub fn detect() -> Option<Self> {
        if !is_android() {
            debug!("not an Android host, skipping root manager probe");
            return None;
        }
        Self::detect_in(ADB_ROOT)
    }

    /// Like [`detect`](Self::detect), but failing with [`RootError::NoRuntime`].
    pub fn require() -> Result<Self> {
        Self::detect().ok_or(RootError::NoRuntime)
    }

    /// Probe an arbitrary adb root, first match in [`RuntimeKind::PRIORITY`] wins.
    ///
    /// KernelSU and APatch are recognised by their daemon binary. Magisk keeps
    /// either a binary or a directory holding one at `magisk`.
    pub fn detect_in(adb_root: impl AsRef<Path>) -> Option<Self> {
        let adb_root = adb_root.as_ref();
        RuntimeKind::PRIORITY.into_iter().find_map(|kind| {
            let probe = adb_root.join(kind.probe_name());
            let binary = match kind {
                RuntimeKind::Magisk if probe.is_dir() => probe.join("magisk"),
                _ if probe.is_file() => probe,
                _ => return None,
            };
            info!(runtime = %kind, binary = %binary.display(), "root manager detected");
            Some(Self::new(kind, binary, adb_root))
        })
    }

    pub fn new(kind: RuntimeKind, binary: impl Into<PathBuf>, adb_root: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            binary: binary.into(),
            adb_root: adb_root.into(),
        }
    }

    pub fn kind(&self) -> RuntimeKind {
        self.kind
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Install a module archive, streaming the manager's output to the terminal.
    pub fn install(&self, archive: &Path) -> Result<()> {
        if !archive.is_file() {
            return Err(RootError::MissingArchive {
                path: archive.to_path_buf(),
            });
        }
        if !archive
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
        {
            warn!(archive = %archive.display(), "archive does not have a .zip extension");
        }

        let archive = std::path::absolute(archive).map_err(|e| RootError::io(archive, e))?;
        let mut command = self.install_command(&archive);
        info!(runtime = %self.kind, archive = %archive.display(), "installing module");

        let status = command.status()?;
        if !status.success() {
            return Err(RootError::ExitStatus {
                cmd: command.display(),
                code: status.code(),
            });
        }
        Ok(())
    }

    /// Installed modules as reported by the manager.
    pub fn list_modules(&self) -> Result<Vec<ModuleInfo>> {
        match self.kind {
            RuntimeKind::Magisk => scan_modules_dir(&self.adb_root.join("modules")),
            RuntimeKind::KernelSu | RuntimeKind::APatch => self.list_via_binary(),
        }
    }

    fn install_command(&self, archive: &Path) -> Command {
        let command = Command::new(self.binary.to_string_lossy());
        match self.kind {
            RuntimeKind::Magisk => command.arg("--install-module").arg(archive),
            RuntimeKind::KernelSu | RuntimeKind::APatch => {
                command.args(["module", "install"]).arg(archive)
            }
        }
    }

    fn list_via_binary(&self) -> Result<Vec<ModuleInfo>> {
        let mut command = Command::new(self.binary.to_string_lossy()).args(["module", "list"]);
        let output = command.output()?;
        if !output.status.success() {
            return Err(RootError::ExitStatus {
                cmd: command.display(),
                code: output.status.code(),
            });
        }
        Ok(serde_json::from_slice(&output.stdout)?)
    }
}
