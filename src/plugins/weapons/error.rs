use std::path::PathBuf;

/// Errors raised while loading or validating a weapon loadout.
#[derive(Debug, thiserror::Error)]
pub enum WeaponError {
    #[error("failed to read weapon config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed weapon config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid weapon config: `{field}` {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl WeaponError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}
