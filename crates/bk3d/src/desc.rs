//! Importer registration record.

use std::path::Path;

/// Capabilities advertised to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImporterFlags {
    pub text: bool,
    pub binary: bool,
    pub compressed: bool,
}

/// Static description of an importer, used by hosts to pick one for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImporterDesc {
    pub name: &'static str,
    pub flags: ImporterFlags,
    /// Plain file extension, without a leading dot.
    pub extension: &'static str,
    /// Suffix of compressed files the host should hand to this importer.
    pub compressed_suffix: &'static str,
}

/// The BK3D importer's registration record.
pub const IMPORTER_DESC: ImporterDesc = ImporterDesc {
    name: "BK3D Importer",
    flags: ImporterFlags {
        text: false,
        binary: true,
        compressed: false,
    },
    extension: "bk3d",
    compressed_suffix: "bk3d.gz",
};

impl ImporterDesc {
    /// Whether the file name ends in `.<extension>` or `.<compressed_suffix>`,
    /// ignoring ASCII case.
    #[must_use]
    pub fn matches_path(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let name = name.to_ascii_lowercase();
        [self.extension, self.compressed_suffix]
            .iter()
            .any(|suffix| {
                name.strip_suffix(suffix)
                    .is_some_and(|stem| stem.len() > 1 && stem.ends_with('.'))
            })
    }
}

/// Whether `bytes` starts with the gzip magic number.
#[must_use]
pub fn has_gzip_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0x1f, 0x8b])
}
