use std::fmt;
use std::path::Path;

/// File suffixes the installer accepts, without the leading dot.
pub const ACCEPTED_SUFFIXES: [&str; 2] = ["zxp", "zxpinstall"];

/// Errors raised before a package path is handed to the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackageError {
    #[error("Drop a .zxp or .zxpinstall file.")]
    UnsupportedSuffix(String),
}

/// The two file variants of the extension package format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    Zxp,
    ZxpInstall,
}

impl PackageKind {
    /// Classify a path by its suffix. Matching ignores ASCII case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case(ACCEPTED_SUFFIXES[0]) {
            Some(Self::Zxp)
        } else if ext.eq_ignore_ascii_case(ACCEPTED_SUFFIXES[1]) {
            Some(Self::ZxpInstall)
        } else {
            None
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Zxp => ACCEPTED_SUFFIXES[0],
            Self::ZxpInstall => ACCEPTED_SUFFIXES[1],
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.suffix())
    }
}

/// Check that `path` names an installable package.
pub fn validate_package_path(path: &Path) -> Result<PackageKind, PackageError> {
    PackageKind::from_path(path)
        .ok_or_else(|| PackageError::UnsupportedSuffix(path.display().to_string()))
}
