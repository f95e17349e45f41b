//! End-to-end runs of the process routine against in-memory records.

use approx::assert_relative_eq;
use waveform_statistics::{
    process_all, process_record, registry, FieldType, FieldValue, Input, MemoryRecord, Output,
    SubroutineError, Waveform_Statistics_Process, STATUS_ERROR, STATUS_OK,
};
use wfstats::prelude::{MedianStrategy, WaveformStatistics};

fn record(samples: Vec<f64>, size: i32, offset: i32) -> MemoryRecord {
    MemoryRecord::new("SR00:WFS")
        .with_input(Input::A, samples)
        .with_input(Input::B, vec![size])
        .with_input(Input::C, vec![offset])
        .with_statistics_outputs()
}

fn f(rec: &MemoryRecord, link: Output) -> f64 {
    rec.output_f64(link).expect("DOUBLE output")
}

#[test]
fn writes_every_slot_in_order() {
    let mut rec = record(vec![1.0, 2.0, 3.0, 4.0, 5.0], 5, 0).with_input(Input::D, vec![1.0]);
    assert_eq!(Waveform_Statistics_Process(&mut rec), STATUS_OK);

    assert_relative_eq!(f(&rec, Output::A), 3.0);
    assert_eq!(f(&rec, Output::B), 1.0);
    assert_eq!(f(&rec, Output::C), 5.0);
    assert_relative_eq!(f(&rec, Output::D), 2.5_f64.sqrt());
    assert_relative_eq!(f(&rec, Output::E), 15.0);
    assert_eq!(f(&rec, Output::F), 3.0);
    assert_relative_eq!(f(&rec, Output::G), 1.0);
    assert_relative_eq!(f(&rec, Output::H), 5.0);
    assert_eq!(f(&rec, Output::I), 5.0);
    assert_relative_eq!(f(&rec, Output::J), 11.0_f64.sqrt());
    assert_relative_eq!(f(&rec, Output::K), 2.0_f64.sqrt());
    assert_eq!(rec.output_i32(Output::L), Some(5));
}

#[test]
fn offset_and_oversized_request() {
    let mut rec = record(vec![10.0, 20.0, 30.0, 40.0], 10, 1);
    assert_eq!(Waveform_Statistics_Process(&mut rec), STATUS_OK);

    assert_eq!(rec.output_i32(Output::L), Some(3));
    assert_relative_eq!(f(&rec, Output::A), 30.0);
    assert_eq!(f(&rec, Output::F), 30.0);
    assert_relative_eq!(f(&rec, Output::G), 10.0);
    assert_relative_eq!(f(&rec, Output::H), 40.0);
}

#[test]
fn long_mask_excludes_cleared_bits() {
    let mut rec =
        record(vec![1.0, 2.0, 3.0, 4.0, 5.0], 5, 0).with_input(Input::E, vec![1, 0, 1, 0, 1]);
    assert_eq!(Waveform_Statistics_Process(&mut rec), STATUS_OK);

    assert_eq!(rec.output_i32(Output::L), Some(3));
    assert_relative_eq!(f(&rec, Output::A), 3.0);
    assert_eq!(f(&rec, Output::F), 3.0);
}

#[test]
fn non_long_mask_means_all_in_use() {
    let mut rec = record(vec![1.0, 2.0, 3.0], 3, 0).with_input(Input::E, vec![0.0, 0.0, 0.0]);
    assert_eq!(Waveform_Statistics_Process(&mut rec), STATUS_OK);
    assert_eq!(rec.output_i32(Output::L), Some(3));
}

#[test]
fn noe_limits_the_mask() {
    let mut rec = record(vec![1.0, 2.0, 3.0], 3, 0).with_input(Input::E, vec![0, 0, 0]);
    rec.set_input_count(Input::E, 1);
    assert_eq!(Waveform_Statistics_Process(&mut rec), STATUS_OK);
    assert_eq!(rec.output_i32(Output::L), Some(2));
    assert_relative_eq!(f(&rec, Output::A), 2.5);
}

#[test]
fn interval_is_ignored_unless_double() {
    let samples = vec![0.0, 2.0, 4.0, 6.0];

    let mut long_interval = record(samples.clone(), 4, 0).with_input(Input::D, vec![4]);
    assert_eq!(Waveform_Statistics_Process(&mut long_interval), STATUS_OK);
    assert_relative_eq!(f(&long_interval, Output::G), 2.0);

    let mut zero_interval = record(samples.clone(), 4, 0).with_input(Input::D, vec![0.0]);
    assert_eq!(Waveform_Statistics_Process(&mut zero_interval), STATUS_OK);
    assert_relative_eq!(f(&zero_interval, Output::G), 2.0);

    let mut half = record(samples, 4, 0).with_input(Input::D, vec![0.5]);
    assert_eq!(Waveform_Statistics_Process(&mut half), STATUS_OK);
    assert_relative_eq!(f(&half, Output::G), 4.0);
    assert_relative_eq!(f(&half, Output::H), 6.0);
}

#[test]
fn single_sample_record() {
    let mut rec = record(vec![7.0], 1, 0);
    assert_eq!(Waveform_Statistics_Process(&mut rec), STATUS_OK);

    for link in [Output::A, Output::B, Output::C, Output::F, Output::H, Output::J] {
        assert_eq!(f(&rec, link), 7.0, "{}", link.field_name());
    }
    assert_eq!(f(&rec, Output::D), 0.0);
    assert_eq!(f(&rec, Output::G), 0.0);
    assert_eq!(f(&rec, Output::K), 0.0);
    assert_eq!(rec.output_i32(Output::L), Some(1));
}

#[test]
fn outputs_with_other_types_are_skipped() {
    let mut rec = record(vec![1.0, 2.0, 3.0], 3, 0)
        .with_output_type(Output::A, FieldType::Float)
        .with_output_type(Output::L, FieldType::Double);
    assert_eq!(Waveform_Statistics_Process(&mut rec), STATUS_OK);

    assert_eq!(rec.output(Output::A), &FieldValue::Float(vec![0.0]));
    assert_eq!(rec.output_f64(Output::L), Some(0.0));
    assert_relative_eq!(f(&rec, Output::B), 1.0);
}

#[test]
fn wrong_sample_type_is_fatal() {
    let mut rec = record(vec![], 3, 0).with_input(Input::A, vec![1, 2, 3]);
    let err = process_record(&WaveformStatistics::new(), &mut rec).unwrap_err();
    assert!(matches!(
        err,
        SubroutineError::TypeContractViolation {
            fta: FieldType::Long,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "WFS: (SR00:WFS) incorrect FTA, FTB and/or FTC type specified."
    );
}

#[test]
fn invalid_range_writes_nothing() {
    let mut rec = record(vec![1.0, 2.0], 5, 2);
    let err = process_record(&WaveformStatistics::new(), &mut rec).unwrap_err();
    assert_eq!(
        err,
        SubroutineError::InvalidRange {
            record: "SR00:WFS".into(),
            len: 2,
            offset: 2,
            requested: 5,
        }
    );
    for link in Output::ALL.iter().take(11) {
        assert_eq!(rec.output_f64(*link), Some(0.0));
    }
    assert_eq!(rec.output_i32(Output::L), Some(0));
}

#[test]
fn fully_masked_is_fatal() {
    let mut rec = record(vec![1.0, 2.0, 3.0], 3, 0).with_input(Input::E, vec![0, 0, 0]);
    assert_eq!(Waveform_Statistics_Process(&mut rec), STATUS_ERROR);
    let err = process_record(&WaveformStatistics::new(), &mut rec).unwrap_err();
    assert_eq!(
        err.to_string(),
        "WFS: (SR00:WFS) at least one element must be included"
    );
}

#[test]
fn default_kernel_leaves_samples_untouched() {
    let mut rec =
        record(vec![9.0, 1.0, 9.0, 3.0, 5.0], 5, 0).with_input(Input::E, vec![0, 1, 0, 1, 1]);
    assert_eq!(Waveform_Statistics_Process(&mut rec), STATUS_OK);
    assert_eq!(
        rec.input(Input::A),
        &FieldValue::Double(vec![9.0, 1.0, 9.0, 3.0, 5.0])
    );
}

#[test]
fn compacting_kernel_rearranges_samples() {
    let kernel = WaveformStatistics::builder()
        .median_strategy(MedianStrategy::CompactInPlace)
        .build()
        .unwrap();
    let mut rec =
        record(vec![9.0, 1.0, 9.0, 3.0, 5.0], 5, 0).with_input(Input::E, vec![0, 1, 0, 1, 1]);

    let stats = process_record(&kernel, &mut rec).unwrap();
    assert_eq!(stats.median, 3.0);
    assert_eq!(f(&rec, Output::F), 3.0);
    assert_eq!(
        rec.input(Input::A),
        &FieldValue::Double(vec![1.0, 3.0, 5.0, 3.0, 5.0])
    );
}

#[test]
fn batch_statuses_follow_input_order() {
    let mut records = vec![
        record(vec![1.0, 2.0, 3.0], 3, 0),
        record(vec![1.0, 2.0], 5, 2),
        record(vec![4.0], 1, 0),
    ];
    let statuses = process_all(&WaveformStatistics::new(), &mut records);

    assert_eq!(statuses, vec![STATUS_OK, STATUS_ERROR, STATUS_OK]);
    assert_eq!(records[0].output_i32(Output::L), Some(3));
    assert_eq!(records[2].output_f64(Output::A), Some(4.0));
}

#[test]
fn registry_dispatches_process() {
    let mut rec = record(vec![2.0, 4.0], 2, 0);
    assert_eq!(
        registry::call("Waveform_Statistics_Process", &mut rec),
        Some(STATUS_OK)
    );
    assert_relative_eq!(f(&rec, Output::A), 3.0);
}
