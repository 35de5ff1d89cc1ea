//! qs-session: Session file loading for run comparison
//!
//! A session document is the JSON file a simulation run writes when it
//! finishes. Only the fields the comparison needs are deserialized here;
//! plot file paths, scattering trajectories and other viewer state are
//! skipped on load.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a session document.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid session document {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "{}: {field} has {found} values, expected {expected} to match test_distances",
        path.display()
    )]
    LengthMismatch {
        path: PathBuf,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{}: loss_history is empty", path.display())]
    EmptyLossHistory { path: PathBuf },
}

/// One simulation run's serialized results.
///
/// The three value series are index-aligned: entry `i` of each refers to
/// the same sample point.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Training loss per recorded step, in recording order.
    pub loss_history: Vec<(u64, f64)>,
    /// Quark separation distances the run was evaluated at.
    pub test_distances: Vec<f64>,
    /// Cornell potential value at each test distance (the reference).
    pub cornell_values: Vec<f64>,
    /// Network prediction at each test distance.
    pub nn_values: Vec<f64>,
}

impl Session {
    /// Loss value of the last recorded training step.
    pub fn final_loss(&self) -> Option<f64> {
        self.loss_history.last().map(|&(_, loss)| loss)
    }

    fn validate(&self, path: &Path) -> Result<(), SessionError> {
        let expected = self.test_distances.len();
        for (field, found) in [
            ("cornell_values", self.cornell_values.len()),
            ("nn_values", self.nn_values.len()),
        ] {
            if found != expected {
                return Err(SessionError::LengthMismatch {
                    path: path.to_path_buf(),
                    field,
                    expected,
                    found,
                });
            }
        }

        if self.loss_history.is_empty() {
            return Err(SessionError::EmptyLossHistory {
                path: path.to_path_buf(),
            });
        }

        Ok(())
    }
}

/// Load and validate a session document.
pub fn load_session(path: impl AsRef<Path>) -> Result<Session, SessionError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let session: Session =
        serde_json::from_reader(reader).map_err(|source| SessionError::Format {
            path: path.to_path_buf(),
            source,
        })?;

    session.validate(path)?;
    Ok(session)
}
