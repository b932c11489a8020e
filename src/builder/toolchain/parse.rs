//! Compiler version banner parsing.

use std::sync::LazyLock;

use regex::Regex;

use super::{CandidateCompiler, CompilerFamily, Metadata};
use crate::builder::error::DiscoveryError;
use crate::core::Toolchain;
use crate::util::process::{ProcessBuilder, ProcessExecutor, StdioMode};

/// `clang version X.Y.Z` then, lines later, `Target: <triple>`.
static CLANG_BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)clang version (\d+\.\d+\.\d+).*?Target:\s*(\S+)")
        .expect("invalid clang banner regex")
});

/// `Target: <triple>` then, lines later, `gcc version X.Y.Z`.
static GCC_BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Target:\s*(\S+).*?gcc version (\d+\.\d+\.\d+)")
        .expect("invalid gcc banner regex")
});

/// Extracts version and target from the output of `<compiler> -v`.
pub trait CompilerInfoParser {
    fn parse(&self, family: CompilerFamily, raw: &str) -> Result<Metadata, DiscoveryError>;
}

/// The stock parser: one regex per family.
#[derive(Debug, Clone, Copy, Default)]
pub struct BannerParser;

impl CompilerInfoParser for BannerParser {
    fn parse(&self, family: CompilerFamily, raw: &str) -> Result<Metadata, DiscoveryError> {
        let (version, target) = match family {
            CompilerFamily::Clang | CompilerFamily::ClangCl => CLANG_BANNER
                .captures(raw)
                .map(|caps| (caps[1].to_string(), caps[2].to_string())),
            CompilerFamily::Gcc => GCC_BANNER
                .captures(raw)
                .map(|caps| (caps[2].to_string(), caps[1].to_string())),
        }
        .ok_or_else(|| DiscoveryError::NoMatch {
            family,
            raw: raw.to_string(),
        })?;

        let version = semver::Version::parse(&version)
            .map_err(|_| DiscoveryError::InvalidVersion { version })?;

        Ok(Metadata {
            family,
            version,
            target,
        })
    }
}

/// Run `<cxx> -v` and turn the candidate into a toolchain.
///
/// Banners usually go to stderr, so both streams are parsed together.
/// The exit status is ignored: some drivers return non-zero for `-v`
/// without inputs but still print the banner.
pub fn probe_candidate(
    executor: &dyn ProcessExecutor,
    parser: &dyn CompilerInfoParser,
    candidate: &CandidateCompiler,
) -> Result<Toolchain, DiscoveryError> {
    let cmd = ProcessBuilder::new(&candidate.cxx_path).arg("-v");
    let output = executor
        .execute(&cmd, StdioMode::Capture)
        .map_err(|e| DiscoveryError::Spawn {
            program: candidate.cxx_path.clone(),
            message: format!("{:#}", e),
        })?;

    let meta = parser.parse(candidate.family, &output.combined())?;
    Ok(Toolchain::new(
        meta.display_name(),
        &candidate.c_path,
        &candidate.cxx_path,
        Some(meta.target),
    ))
}
