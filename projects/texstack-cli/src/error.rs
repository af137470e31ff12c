use std::path::PathBuf;
use texstack_formats::FormatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}: {}", .path.display(), .source)]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("{}: image has no planes", .0.display())]
    EmptyImage(PathBuf),
}

impl CliError {
    pub fn format(path: &std::path::Path, source: FormatError) -> Self {
        Self::Format {
            path: path.to_path_buf(),
            source,
        }
    }
}
