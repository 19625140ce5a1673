//! Diagnostic log collection for attachment sets

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// How an uploaded log is named in the attachment set
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum AttachmentNaming {
    /// Final path component (`/var/log/nvidia-bug-report.log.gz` → `nvidia-bug-report.log.gz`)
    #[default]
    BaseName,
    /// The path exactly as given on the command line
    LiteralPath,
}

impl AttachmentNaming {
    /// Attachment file name for a path
    pub fn file_name(self, path: &Path) -> String {
        match self {
            AttachmentNaming::BaseName => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned()),
            AttachmentNaming::LiteralPath => path.to_string_lossy().into_owned(),
        }
    }
}

/// A log file read into memory, ready to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogAttachment {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Read every log file fully into memory, in order.
///
/// The first unreadable file aborts the whole read, so a partial set is
/// never returned. Files that end up with the same attachment name are all
/// kept, in order.
pub async fn read_log_files(
    paths: &[PathBuf],
    naming: AttachmentNaming,
) -> Result<Vec<LogAttachment>> {
    let mut attachments = Vec::with_capacity(paths.len());
    let mut seen = HashSet::new();

    for path in paths {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read log file: {}", path.display()))?;
        let file_name = naming.file_name(path);

        debug!(path = %path.display(), file_name = %file_name, size = data.len(), "Read log file");
        if !seen.insert(file_name.clone()) {
            warn!(
                path = %path.display(),
                file_name = %file_name,
                "Duplicate attachment name, use --attachment-names literal-path to keep paths"
            );
        }

        attachments.push(LogAttachment { file_name, data });
    }

    Ok(attachments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_naming() {
        let path = Path::new("./logs/nvidia-bug-report.log.gz");
        assert_eq!(
            AttachmentNaming::BaseName.file_name(path),
            "nvidia-bug-report.log.gz"
        );
        assert_eq!(
            AttachmentNaming::LiteralPath.file_name(path),
            "./logs/nvidia-bug-report.log.gz"
        );
        assert_eq!(AttachmentNaming::BaseName.file_name(Path::new("..")), "..");
    }

    #[test]
    fn test_naming_parse() {
        assert_eq!(
            "literal-path".parse::<AttachmentNaming>().unwrap(),
            AttachmentNaming::LiteralPath
        );
        assert_eq!(AttachmentNaming::BaseName.to_string(), "base-name");
    }

    #[tokio::test]
    async fn test_read_preserves_bytes_and_order() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("nvidia-bug-report.log.gz");
        let second = dir.path().join("dmesg.log");
        let binary: Vec<u8> = (0..=255).collect();
        std::fs::write(&first, &binary).unwrap();
        std::fs::write(&second, b"Xid 79: GPU has fallen off the bus").unwrap();

        let attachments =
            read_log_files(&[first, second], AttachmentNaming::BaseName).await.unwrap();

        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].file_name, "nvidia-bug-report.log.gz");
        assert_eq!(attachments[0].data, binary);
        assert_eq!(attachments[1].file_name, "dmesg.log");
        assert_eq!(attachments[1].data, b"Xid 79: GPU has fallen off the bus");
    }

    #[tokio::test]
    async fn test_read_empty_list() {
        let attachments = read_log_files(&[], AttachmentNaming::BaseName).await.unwrap();
        assert!(attachments.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("present.log");
        std::fs::write(&present, b"ok").unwrap();
        let missing = dir.path().join("missing.log");

        let err = read_log_files(&[present, missing.clone()], AttachmentNaming::BaseName)
            .await
            .unwrap_err();

        assert!(err.to_string().contains(&missing.display().to_string()));
        assert_eq!(
            err.downcast_ref::<std::io::Error>().map(|e| e.kind()),
            Some(std::io::ErrorKind::NotFound)
        );
    }

    #[tokio::test]
    async fn test_duplicate_base_names_kept_in_order() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        std::fs::create_dir(dir.path().join("b")).unwrap();
        let first = dir.path().join("a").join("x.log");
        let second = dir.path().join("b").join("x.log");
        std::fs::write(&first, b"first").unwrap();
        std::fs::write(&second, b"second").unwrap();
        let paths = [first.clone(), second.clone()];

        let attachments = read_log_files(&paths, AttachmentNaming::BaseName).await.unwrap();
        let names: Vec<_> = attachments.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, ["x.log", "x.log"]);
        assert_eq!(attachments[0].data, b"first");
        assert_eq!(attachments[1].data, b"second");

        let attachments = read_log_files(&paths, AttachmentNaming::LiteralPath).await.unwrap();
        assert_eq!(attachments[0].file_name, first.to_string_lossy());
        assert_eq!(attachments[1].file_name, second.to_string_lossy());
    }
}
