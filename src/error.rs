//! Subroutine errors.
//!
//! Each variant carries the record name, so `Display` is the single
//! diagnostic line reported to the host.

use thiserror::Error;
use wfstats::prelude::StatsError;

use crate::record::FieldType;

/// Failures of one subroutine invocation. No output is written on failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubroutineError {
    /// FTA, FTB or FTC is not DOUBLE, LONG, LONG respectively.
    #[error("WFS: ({record}) incorrect FTA, FTB and/or FTC type specified.")]
    TypeContractViolation {
        record: String,
        fta: FieldType,
        ftb: FieldType,
        ftc: FieldType,
    },

    /// The selection window is empty.
    #[error(
        "WFS: ({record}) size, min of (noa={len} - inpc={offset}, inpb={requested}), must be at least 1"
    )]
    InvalidRange {
        record: String,
        len: usize,
        offset: i64,
        requested: i64,
    },

    /// The mask excluded every selected element.
    #[error("WFS: ({record}) at least one element must be included")]
    EmptyAfterMask { record: String },

    /// The kernel configuration was rejected.
    #[error("WFS: ({record}) {source}")]
    Configuration {
        record: String,
        #[source]
        source: StatsError,
    },
}

impl SubroutineError {
    /// Attach the record name to a kernel failure.
    pub fn from_kernel(record: &str, err: StatsError) -> Self {
        let record = record.to_owned();
        match err {
            StatsError::InvalidRange {
                len,
                offset,
                requested,
            } => SubroutineError::InvalidRange {
                record,
                len,
                offset,
                requested,
            },
            StatsError::EmptyAfterMask => SubroutineError::EmptyAfterMask { record },
            other => SubroutineError::Configuration {
                record,
                source: other,
            },
        }
    }

    pub fn record(&self) -> &str {
        match self {
            SubroutineError::TypeContractViolation { record, .. }
            | SubroutineError::InvalidRange { record, .. }
            | SubroutineError::EmptyAfterMask { record }
            | SubroutineError::Configuration { record, .. } => record,
        }
    }
}
