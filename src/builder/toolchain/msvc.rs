//! Visual Studio (MSVC) discovery through `vswhere`.
//!
//! MSVC is not found on `PATH`. `vswhere` reports the installation root,
//! and every `VC/Tools/MSVC/<version>` directory under it is a toolset.
//! Only the newest version of each toolset line is offered, once per
//! host/target pairing that has a `cl.exe`.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use semver::Version;

use crate::core::Toolchain;
use crate::util::process::{find_executable, ProcessBuilder, ProcessExecutor, StdioMode};

/// Host/target directory pairs under `bin/`, with the name Visual Studio uses for them.
const PAIRINGS: [(&str, &str, &str); 4] = [
    ("x64", "x64", "amd64"),
    ("x64", "x86", "amd64_x86"),
    ("x86", "x86", "x86"),
    ("x86", "x64", "x86_amd64"),
];

const VC_COMPONENT: &str = "Microsoft.VisualStudio.Component.VC.Tools.x86.x64";

/// Finds MSVC toolsets of the latest Visual Studio installation.
#[derive(Debug, Clone, Default)]
pub struct MsvcDiscoverer {
    vswhere: Option<PathBuf>,
}

impl MsvcDiscoverer {
    /// Locate `vswhere.exe` in the Visual Studio installer directory or on `PATH`.
    pub fn locate() -> Self {
        let installer = env::var_os("ProgramFiles(x86)")
            .map(PathBuf::from)
            .map(|p| {
                p.join("Microsoft Visual Studio")
                    .join("Installer")
                    .join("vswhere.exe")
            })
            .filter(|p| p.is_file());

        MsvcDiscoverer {
            vswhere: installer.or_else(|| find_executable("vswhere")),
        }
    }

    /// Use a specific `vswhere` binary (or none).
    pub fn with_vswhere(vswhere: Option<PathBuf>) -> Self {
        MsvcDiscoverer { vswhere }
    }

    /// Discover MSVC toolchains. Any failure along the way yields an empty list.
    pub fn discover(&self, executor: &dyn ProcessExecutor) -> Vec<Toolchain> {
        let Some(ref vswhere) = self.vswhere else {
            tracing::debug!("vswhere not found, skipping MSVC discovery");
            return Vec::new();
        };

        let cmd = ProcessBuilder::new(vswhere).args([
            "-latest",
            "-products",
            "*",
            "-requires",
            VC_COMPONENT,
            "-property",
            "installationPath",
        ]);

        let root = match executor.execute(&cmd, StdioMode::Capture) {
            Ok(out) if out.success() => out.stdout.trim().to_string(),
            Ok(out) => {
                tracing::warn!("vswhere failed: {}", out.combined().trim());
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("failed to run vswhere: {:#}", e);
                return Vec::new();
            }
        };

        if root.is_empty() {
            tracing::warn!("vswhere found no Visual Studio installation with C++ tools");
            return Vec::new();
        }

        tracing::debug!("found Visual Studio at {}", root);
        toolchains_in(Path::new(&root))
    }
}

/// Toolchains for every usable toolset under a Visual Studio installation root.
pub fn toolchains_in(root: &Path) -> Vec<Toolchain> {
    let msvc_dir = root.join("VC").join("Tools").join("MSVC");
    let entries = match fs::read_dir(&msvc_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("cannot read {}: {}", msvc_dir.display(), e);
            return Vec::new();
        }
    };

    let versions: Vec<Version> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            match Version::parse(&name) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::debug!("skipping non-version directory {}", name);
                    None
                }
            }
        })
        .collect();

    let mut toolchains = Vec::new();
    for version in latest_per_line(versions) {
        let Some((year, toolset)) = product_for(&version) else {
            tracing::debug!("unknown MSVC toolset line {}", version);
            continue;
        };

        let bin = msvc_dir.join(version.to_string()).join("bin");
        for (host, target, pairing) in PAIRINGS {
            let cl = bin
                .join(format!("Host{}", host))
                .join(target)
                .join("cl.exe");
            if !cl.is_file() {
                tracing::debug!("no cl.exe for {} in {}", pairing, version);
                continue;
            }

            toolchains.push(Toolchain::msvc(
                format!("Visual Studio {} Release {} - {}", year, version, pairing),
                format!("{},host={},version={}", toolset, host, version),
                target,
            ));
        }
    }

    toolchains
}

/// Keep the numerically greatest version of each `major.minor/10` line, newest line first.
pub fn latest_per_line(versions: impl IntoIterator<Item = Version>) -> Vec<Version> {
    let mut lines: BTreeMap<(u64, u64), Version> = BTreeMap::new();
    for v in versions {
        let key = (v.major, v.minor / 10);
        match lines.get(&key) {
            Some(best) if *best >= v => {}
            _ => {
                lines.insert(key, v);
            }
        }
    }
    lines.into_values().rev().collect()
}

/// Visual Studio product year and platform toolset for a compiler version.
fn product_for(version: &Version) -> Option<(u32, &'static str)> {
    if version.major != 14 {
        return None;
    }
    match version.minor / 10 {
        1 => Some((2017, "v141")),
        2 => Some((2019, "v142")),
        3 | 4 => Some((2022, "v143")),
        _ => None,
    }
}
