use std::path::PathBuf;

use crate::loader::LoadError;

/// Errors that can occur while importing a BK3D file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("'{0}' is not a BK3D file")]
    NotSupported(PathBuf),

    #[error("failed to load container '{path}'")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error(transparent)]
    Decode(#[from] bk3d_decode::DecodeError),
}

/// Result type for importer operations.
pub type Result<T> = std::result::Result<T, Error>;
