//! Host record model.
//!
//! The host runtime owns a record with five typed input links (A..E) and
//! twelve typed output values (VALA..VALL). Every field advertises its type
//! through a tag from the host's field-type menu; the subroutine reads those
//! tags to decide what it may read and which outputs it may write.
//!
//! [`Record`] is the seam to the host. [`MemoryRecord`] is a self-contained
//! implementation for tests and for embedding the subroutine without a host
//! runtime.

use core::fmt;

// ============================================================================
// Field types and links
// ============================================================================

/// The host's field-type menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Char,
    UChar,
    Short,
    UShort,
    Long,
    ULong,
    Int64,
    UInt64,
    Float,
    Double,
    Enum,
}

impl FieldType {
    /// Menu name as the host spells it.
    pub fn name(self) -> &'static str {
        match self {
            FieldType::String => "STRING",
            FieldType::Char => "CHAR",
            FieldType::UChar => "UCHAR",
            FieldType::Short => "SHORT",
            FieldType::UShort => "USHORT",
            FieldType::Long => "LONG",
            FieldType::ULong => "ULONG",
            FieldType::Int64 => "INT64",
            FieldType::UInt64 => "UINT64",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
            FieldType::Enum => "ENUM",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Input links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    /// Sample waveform (DOUBLE array).
    A,
    /// Requested size (LONG).
    B,
    /// Offset (LONG).
    C,
    /// Sample interval (DOUBLE, optional).
    D,
    /// Mask (LONG array, optional).
    E,
}

impl Input {
    pub const ALL: [Input; 5] = [Input::A, Input::B, Input::C, Input::D, Input::E];

    fn index(self) -> usize {
        self as usize
    }
}

/// Output value fields VALA..VALL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Output {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
}

impl Output {
    pub const ALL: [Output; 12] = [
        Output::A,
        Output::B,
        Output::C,
        Output::D,
        Output::E,
        Output::F,
        Output::G,
        Output::H,
        Output::I,
        Output::J,
        Output::K,
        Output::L,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Host field name, e.g. `VALA`.
    pub fn field_name(self) -> &'static str {
        const NAMES: [&str; 12] = [
            "VALA", "VALB", "VALC", "VALD", "VALE", "VALF", "VALG", "VALH", "VALI", "VALJ",
            "VALK", "VALL",
        ];
        NAMES[self.index()]
    }
}

// ============================================================================
// Record trait
// ============================================================================

/// A host record handle as seen by the subroutine for one invocation.
///
/// Typed accessors return `None` when the field's advertised type does not
/// match the requested element type; writers return `false` in that case.
pub trait Record {
    /// Record name used in diagnostics.
    fn name(&self) -> &str;

    /// Advertised type of an input link (FTA..FTE).
    fn input_type(&self, link: Input) -> FieldType;

    /// Advertised type of an output value (FTVA..FTVL).
    fn output_type(&self, link: Output) -> FieldType;

    /// Number of valid elements on an input link (NOA..NOE).
    fn input_count(&self, link: Input) -> usize;

    /// Storage of a DOUBLE input.
    fn input_f64(&self, link: Input) -> Option<&[f64]>;

    /// Mutable storage of a DOUBLE input.
    fn input_f64_mut(&mut self, link: Input) -> Option<&mut [f64]>;

    /// Storage of a LONG input.
    fn input_i32(&self, link: Input) -> Option<&[i32]>;

    /// Write the first element of a DOUBLE output.
    fn write_f64(&mut self, link: Output, value: f64) -> bool;

    /// Write the first element of a LONG output.
    fn write_i32(&mut self, link: Output, value: i32) -> bool;
}

// ============================================================================
// In-memory record
// ============================================================================

/// Field storage tagged by element type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(Vec<String>),
    Char(Vec<i8>),
    UChar(Vec<u8>),
    Short(Vec<i16>),
    UShort(Vec<u16>),
    Long(Vec<i32>),
    ULong(Vec<u32>),
    Int64(Vec<i64>),
    UInt64(Vec<u64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Enum(Vec<u16>),
}

impl FieldValue {
    /// Zero-filled storage of `len` elements for `ftype`.
    pub fn zeroed(ftype: FieldType, len: usize) -> Self {
        match ftype {
            FieldType::String => FieldValue::String(vec![String::new(); len]),
            FieldType::Char => FieldValue::Char(vec![0; len]),
            FieldType::UChar => FieldValue::UChar(vec![0; len]),
            FieldType::Short => FieldValue::Short(vec![0; len]),
            FieldType::UShort => FieldValue::UShort(vec![0; len]),
            FieldType::Long => FieldValue::Long(vec![0; len]),
            FieldType::ULong => FieldValue::ULong(vec![0; len]),
            FieldType::Int64 => FieldValue::Int64(vec![0; len]),
            FieldType::UInt64 => FieldValue::UInt64(vec![0; len]),
            FieldType::Float => FieldValue::Float(vec![0.0; len]),
            FieldType::Double => FieldValue::Double(vec![0.0; len]),
            FieldType::Enum => FieldValue::Enum(vec![0; len]),
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::String(_) => FieldType::String,
            FieldValue::Char(_) => FieldType::Char,
            FieldValue::UChar(_) => FieldType::UChar,
            FieldValue::Short(_) => FieldType::Short,
            FieldValue::UShort(_) => FieldType::UShort,
            FieldValue::Long(_) => FieldType::Long,
            FieldValue::ULong(_) => FieldType::ULong,
            FieldValue::Int64(_) => FieldType::Int64,
            FieldValue::UInt64(_) => FieldType::UInt64,
            FieldValue::Float(_) => FieldType::Float,
            FieldValue::Double(_) => FieldType::Double,
            FieldValue::Enum(_) => FieldType::Enum,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FieldValue::String(v) => v.len(),
            FieldValue::Char(v) => v.len(),
            FieldValue::UChar(v) => v.len(),
            FieldValue::Short(v) => v.len(),
            FieldValue::UShort(v) | FieldValue::Enum(v) => v.len(),
            FieldValue::Long(v) => v.len(),
            FieldValue::ULong(v) => v.len(),
            FieldValue::Int64(v) => v.len(),
            FieldValue::UInt64(v) => v.len(),
            FieldValue::Float(v) => v.len(),
            FieldValue::Double(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_f64(&self) -> Option<&[f64]> {
        match self {
            FieldValue::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<&[i32]> {
        match self {
            FieldValue::Long(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Vec<f64>> for FieldValue {
    fn from(v: Vec<f64>) -> Self {
        FieldValue::Double(v)
    }
}

impl From<Vec<i32>> for FieldValue {
    fn from(v: Vec<i32>) -> Self {
        FieldValue::Long(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct InputField {
    value: FieldValue,
    count: usize,
}

impl InputField {
    fn host_default() -> Self {
        Self {
            value: FieldValue::zeroed(FieldType::Double, 1),
            count: 1,
        }
    }
}

/// Self-contained record.
///
/// A new record advertises DOUBLE with one element on every link, which is
/// the host's default. In particular an unconfigured mask (E) is not LONG,
/// so every sample is in use, and an unconfigured VALL is not LONG, so the
/// count is not written.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRecord {
    name: String,
    inputs: [InputField; 5],
    outputs: [FieldValue; 12],
}

impl MemoryRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: core::array::from_fn(|_| InputField::host_default()),
            outputs: core::array::from_fn(|_| FieldValue::zeroed(FieldType::Double, 1)),
        }
    }

    /// Attach `value` to an input link; the element count becomes its length.
    pub fn with_input(mut self, link: Input, value: impl Into<FieldValue>) -> Self {
        self.set_input(link, value);
        self
    }

    /// Change the advertised type of an output, resetting it to zero.
    pub fn with_output_type(mut self, link: Output, ftype: FieldType) -> Self {
        self.outputs[link.index()] = FieldValue::zeroed(ftype, 1);
        self
    }

    /// Advertise the types the subroutine writes to: DOUBLE on VALA..VALK,
    /// LONG on VALL.
    pub fn with_statistics_outputs(mut self) -> Self {
        for link in Output::ALL {
            let ftype = if link == Output::L {
                FieldType::Long
            } else {
                FieldType::Double
            };
            self.outputs[link.index()] = FieldValue::zeroed(ftype, 1);
        }
        self
    }

    pub fn set_input(&mut self, link: Input, value: impl Into<FieldValue>) {
        let value = value.into();
        let count = value.len();
        self.inputs[link.index()] = InputField { value, count };
    }

    /// Override NOA..NOE without touching storage.
    pub fn set_input_count(&mut self, link: Input, count: usize) {
        self.inputs[link.index()].count = count;
    }

    pub fn input(&self, link: Input) -> &FieldValue {
        &self.inputs[link.index()].value
    }

    pub fn output(&self, link: Output) -> &FieldValue {
        &self.outputs[link.index()]
    }

    /// First element of a DOUBLE output.
    pub fn output_f64(&self, link: Output) -> Option<f64> {
        self.output(link).as_f64().and_then(|v| v.first().copied())
    }

    /// First element of a LONG output.
    pub fn output_i32(&self, link: Output) -> Option<i32> {
        self.output(link).as_i32().and_then(|v| v.first().copied())
    }
}

impl Record for MemoryRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_type(&self, link: Input) -> FieldType {
        self.inputs[link.index()].value.field_type()
    }

    fn output_type(&self, link: Output) -> FieldType {
        self.outputs[link.index()].field_type()
    }

    fn input_count(&self, link: Input) -> usize {
        self.inputs[link.index()].count
    }

    fn input_f64(&self, link: Input) -> Option<&[f64]> {
        self.inputs[link.index()].value.as_f64()
    }

    fn input_f64_mut(&mut self, link: Input) -> Option<&mut [f64]> {
        match &mut self.inputs[link.index()].value {
            FieldValue::Double(v) => Some(v),
            _ => None,
        }
    }

    fn input_i32(&self, link: Input) -> Option<&[i32]> {
        self.inputs[link.index()].value.as_i32()
    }

    fn write_f64(&mut self, link: Output, value: f64) -> bool {
        match &mut self.outputs[link.index()] {
            FieldValue::Double(v) if !v.is_empty() => {
                v[0] = value;
                true
            }
            _ => false,
        }
    }

    fn write_i32(&mut self, link: Output, value: i32) -> bool {
        match &mut self.outputs[link.index()] {
            FieldValue::Long(v) if !v.is_empty() => {
                v[0] = value;
                true
            }
            _ => false,
        }
    }
}
