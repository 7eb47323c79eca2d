use std::path::PathBuf;

/// Errors raised while loading or validating load-test input files.
///
/// Every variant is fatal for the run: the reporter aborts before writing
/// any artifact. Recoverable detail-file failures are handled inside the
/// detail aggregator and never surface here.
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("reading {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("summary is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("summary {} contains no data rows", path.display())]
    Empty { path: PathBuf },
}

impl DatasetError {
    pub(crate) fn read(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &std::path::Path, source: csv::Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type DatasetResult<T> = Result<T, DatasetError>;
