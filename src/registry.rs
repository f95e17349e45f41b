//! Function registry.
//!
//! The host resolves subroutines by name. [`crate::FUNCTIONS`] lists the
//! routines this crate exports; the helpers here provide lookup and
//! dispatch by name.
//!
//! # Example
//!
//! ```
//! use waveform_statistics::{registry, Input, MemoryRecord};
//!
//! let mut record = MemoryRecord::new("SR:WFS")
//!     .with_input(Input::A, vec![1.0, 2.0, 3.0])
//!     .with_input(Input::B, vec![3])
//!     .with_input(Input::C, vec![0])
//!     .with_statistics_outputs();
//!
//! assert!(registry::is_known("Waveform_Statistics_Process"));
//! assert_eq!(registry::call("Waveform_Statistics_Process", &mut record), Some(0));
//! ```

use crate::record::Record;
use crate::FUNCTIONS;

/// Signature of a host-callable record routine.
pub type RecordFn = fn(&mut dyn Record) -> i64;

/// Descriptor for a registered routine.
pub struct FunctionDescriptor {
    /// Name the host resolves.
    pub name: &'static str,
    /// One-line description.
    pub doc: &'static str,
    /// The implementation.
    pub function: RecordFn,
}

impl FunctionDescriptor {
    pub fn call(&self, record: &mut dyn Record) -> i64 {
        (self.function)(record)
    }
}

/// All registered routine names.
pub fn all_names() -> impl Iterator<Item = &'static str> {
    FUNCTIONS.iter().map(|f| f.name)
}

/// Look up a routine by name.
pub fn get(name: &str) -> Option<&'static FunctionDescriptor> {
    FUNCTIONS.iter().find(|f| f.name == name)
}

/// Check if a routine name is registered.
pub fn is_known(name: &str) -> bool {
    get(name).is_some()
}

/// Invoke a routine by name.
pub fn call(name: &str, record: &mut dyn Record) -> Option<i64> {
    get(name).map(|f| f.call(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MemoryRecord;

    #[test]
    fn both_routines_are_registered() {
        let names: Vec<_> = all_names().collect();
        assert_eq!(
            names,
            vec!["Waveform_Statistics_Init", "Waveform_Statistics_Process"]
        );
        assert!(!is_known("Waveform_Statistics"));
    }

    #[test]
    fn unknown_names_are_not_dispatched() {
        let mut rec = MemoryRecord::new("r");
        assert_eq!(call("nonexistent", &mut rec), None);
    }

    #[test]
    fn init_is_a_no_op() {
        let mut rec = MemoryRecord::new("r");
        let before = rec.clone();
        assert_eq!(call("Waveform_Statistics_Init", &mut rec), Some(0));
        assert_eq!(rec, before);
    }

    #[test]
    fn process_rejects_a_default_record() {
        // every link defaults to DOUBLE, so FTB/FTC break the contract
        let mut rec = MemoryRecord::new("r");
        assert_eq!(call("Waveform_Statistics_Process", &mut rec), Some(-1));
    }
}
