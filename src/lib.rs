//! Waveform statistics subroutine for host control-system records.
//!
//! Provides the host with an init routine and a process routine that read
//! typed input fields from a record, run the [`wfstats`] kernel, and write
//! the statistics back to the record's typed output fields.
//!
//! # Field usage
//!
//! | Field | Type | Role |
//! |---|---|---|
//! | A | DOUBLE array | samples; NOA elements valid |
//! | B | LONG | requested size, must be > 0 |
//! | C | LONG | offset, must be >= 0 and < NOA |
//! | D | DOUBLE | sample interval; 1 if not DOUBLE or zero |
//! | E | LONG array | mask (LSB); all in use if not LONG, or past NOE |
//! | VALA..VALK | DOUBLE | mean, min, max, sample std dev, sum, median, slope, intercept, max abs, RMS, population std dev |
//! | VALL | LONG | number of elements used |
//!
//! Each output is written only if its advertised type is the one listed;
//! otherwise it is silently skipped.

#![allow(non_snake_case)]

pub mod error;
pub mod record;
pub mod registry;

use tracing::{debug, error, trace};
use wfstats::prelude::{
    MedianStrategy, Request, Statistic, StatisticKind, Statistics, WaveformStatistics,
};

pub use crate::error::SubroutineError;
pub use crate::record::{FieldType, FieldValue, Input, MemoryRecord, Output, Record};
pub use crate::registry::{FunctionDescriptor, RecordFn};

/// Status returned to the host on success.
pub const STATUS_OK: i64 = 0;

/// Status returned to the host on failure.
pub const STATUS_ERROR: i64 = -1;

// ============================================================================
// Helper Functions
// ============================================================================

/// Output slot table: which statistic goes to which value field.
const OUTPUT_SLOTS: [(Output, Statistic); 12] = [
    (Output::A, Statistic::Mean),
    (Output::B, Statistic::Min),
    (Output::C, Statistic::Max),
    (Output::D, Statistic::SampleStdDev),
    (Output::E, Statistic::Sum),
    (Output::F, Statistic::Median),
    (Output::G, Statistic::Slope),
    (Output::H, Statistic::Intercept),
    (Output::I, Statistic::MaxAbs),
    (Output::J, Statistic::Rms),
    (Output::K, Statistic::PopStdDev),
    (Output::L, Statistic::Count),
];

/// Scalar inputs decoded from links B, C and D.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Scalars {
    requested_size: i32,
    offset: i32,
    interval: Option<f64>,
}

/// Reject records whose A, B, C links do not carry DOUBLE, LONG, LONG.
fn check_type_contract(record: &dyn Record) -> Result<(), SubroutineError> {
    let fta = record.input_type(Input::A);
    let ftb = record.input_type(Input::B);
    let ftc = record.input_type(Input::C);

    if fta != FieldType::Double || ftb != FieldType::Long || ftc != FieldType::Long {
        return Err(SubroutineError::TypeContractViolation {
            record: record.name().to_owned(),
            fta,
            ftb,
            ftc,
        });
    }
    Ok(())
}

fn first_i32(record: &dyn Record, link: Input) -> Option<i32> {
    record.input_i32(link).and_then(|v| v.first().copied())
}

fn read_scalars(record: &dyn Record) -> Scalars {
    let interval = match record.input_type(Input::D) {
        FieldType::Double => record.input_f64(Input::D).and_then(|v| v.first().copied()),
        _ => None,
    };

    Scalars {
        requested_size: first_i32(record, Input::B).unwrap_or(0),
        offset: first_i32(record, Input::C).unwrap_or(0),
        interval,
    }
}

/// Valid samples on link A (NOA, clamped to the stored length).
fn sample_count(record: &dyn Record) -> usize {
    let stored = record.input_f64(Input::A).map_or(0, <[f64]>::len);
    record.input_count(Input::A).min(stored)
}

/// Mask on link E, if it is LONG; limited to NOE elements.
fn read_mask(record: &dyn Record) -> Option<&[i32]> {
    if record.input_type(Input::E) != FieldType::Long {
        return None;
    }
    let mask = record.input_i32(Input::E)?;
    let noe = record.input_count(Input::E).min(mask.len());
    Some(&mask[..noe])
}

fn request<'a>(scalars: &Scalars, mask: Option<&'a [i32]>) -> Request<'a, f64> {
    Request {
        offset: scalars.offset,
        requested_size: scalars.requested_size,
        interval: scalars.interval,
        mask,
    }
}

/// Write every slot whose advertised output type matches.
fn write_outputs(record: &mut dyn Record, stats: &Statistics<f64>) {
    for (link, stat) in OUTPUT_SLOTS {
        let written = match stat.kind() {
            StatisticKind::Float => {
                record.output_type(link) == FieldType::Double
                    && record.write_f64(link, stats.value(stat))
            }
            StatisticKind::Count => {
                record.output_type(link) == FieldType::Long
                    && record.write_i32(link, i32::try_from(stats.count).unwrap_or(i32::MAX))
            }
        };
        if !written {
            trace!(
                field = link.field_name(),
                statistic = stat.name(),
                ftype = %record.output_type(link),
                "output skipped"
            );
        }
    }
}

// ============================================================================
// Record Functions
// ============================================================================

/// Run the subroutine on `record` with a configured kernel.
///
/// Checks the A/B/C type contract before reading any content, decodes the
/// inputs, runs the kernel and writes the gated outputs. Nothing is written
/// when an error is returned.
pub fn process_record(
    kernel: &WaveformStatistics,
    record: &mut dyn Record,
) -> Result<Statistics<f64>, SubroutineError> {
    check_type_contract(record)?;

    let scalars = read_scalars(record);
    let len = sample_count(record);

    let result = match kernel.median_strategy() {
        MedianStrategy::Scratch => {
            let samples = record.input_f64(Input::A).unwrap_or(&[]);
            kernel.compute(&samples[..len], &request(&scalars, read_mask(record)))
        }
        MedianStrategy::CompactInPlace => {
            // The mask is copied so the samples can be borrowed mutably.
            let mask: Option<Vec<i32>> = read_mask(record).map(<[i32]>::to_vec);
            let req = request(&scalars, mask.as_deref());
            match record.input_f64_mut(Input::A) {
                Some(samples) => kernel.compute_mut(&mut samples[..len], &req),
                None => kernel.compute_mut(&mut [], &req),
            }
        }
    };

    let stats = result.map_err(|e| SubroutineError::from_kernel(record.name(), e))?;
    write_outputs(record, &stats);

    debug!(
        record = record.name(),
        count = stats.count,
        mean = stats.mean,
        "waveform statistics updated"
    );
    Ok(stats)
}

/// Init routine. Nothing to prepare; always succeeds.
pub fn Waveform_Statistics_Init(_record: &mut dyn Record) -> i64 {
    STATUS_OK
}

/// Process routine with the default kernel.
///
/// Returns [`STATUS_OK`], or [`STATUS_ERROR`] after logging the diagnostic
/// line.
pub fn Waveform_Statistics_Process(record: &mut dyn Record) -> i64 {
    status(process_record(&WaveformStatistics::new(), record))
}

fn status(result: Result<Statistics<f64>, SubroutineError>) -> i64 {
    match result {
        Ok(_) => STATUS_OK,
        Err(e) => {
            error!(record = e.record(), "{}", e);
            STATUS_ERROR
        }
    }
}

/// Process a set of independent records, one status per record.
///
/// With the `parallel` feature the records are spread over the rayon pool.
#[cfg(feature = "parallel")]
pub fn process_all<R: Record + Send>(kernel: &WaveformStatistics, records: &mut [R]) -> Vec<i64> {
    use rayon::prelude::*;

    records
        .par_iter_mut()
        .map(|record| status(process_record(kernel, record)))
        .collect()
}

/// Process a set of independent records, one status per record.
#[cfg(not(feature = "parallel"))]
pub fn process_all<R: Record>(kernel: &WaveformStatistics, records: &mut [R]) -> Vec<i64> {
    records
        .iter_mut()
        .map(|record| status(process_record(kernel, record)))
        .collect()
}

// ============================================================================
// Function Registration
// ============================================================================

/// Functions exported to the host's function registry.
pub static FUNCTIONS: &[FunctionDescriptor] = &[
    FunctionDescriptor {
        name: "Waveform_Statistics_Init",
        doc: "Init routine; placeholder that always succeeds",
        function: Waveform_Statistics_Init,
    },
    FunctionDescriptor {
        name: "Waveform_Statistics_Process",
        doc: "Compute waveform statistics from A..E into VALA..VALL",
        function: Waveform_Statistics_Process,
    },
];
