use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicU64, Ordering};

/// The numeric kind a metric instrument is declared over.
///
/// Every instrument fixes its kind at construction time; the [`Number`]s it
/// produces must carry the matching variant. The facade never converts
/// between kinds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// A signed 64-bit integer.
    I64,
    /// A 64-bit floating point number.
    F64,
}

/// Number represents either an integral or a floating point metric value.
///
/// The active variant is fixed at construction via `From<i64>` or `From<f64>`
/// and must match the declared [`NumberKind`] of the instrument recording it.
/// Equality and ordering are bitwise within a kind; comparing across kinds is
/// unsupported and always reports unequal/unordered.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    /// A signed 64-bit integer value.
    I64(i64),
    /// A 64-bit floating point value.
    F64(f64),
}

impl Number {
    /// The kind of value held by this number.
    pub fn kind(&self) -> NumberKind {
        match self {
            Number::I64(_) => NumberKind::I64,
            Number::F64(_) => NumberKind::F64,
        }
    }

    /// The integer payload, or `None` when this number holds a float.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Number::I64(value) => Some(*value),
            Number::F64(_) => None,
        }
    }

    /// The floating point payload, or `None` when this number holds an
    /// integer.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Number::I64(_) => None,
            Number::F64(value) => Some(*value),
        }
    }

    /// The raw 64-bit representation of the payload.
    pub fn to_bits(&self) -> u64 {
        match self {
            Number::I64(value) => *value as u64,
            Number::F64(value) => value.to_bits(),
        }
    }

    /// Reconstruct a number of the given kind from its raw representation.
    pub fn from_bits(kind: &NumberKind, bits: u64) -> Self {
        match kind {
            NumberKind::I64 => Number::I64(bits as i64),
            NumberKind::F64 => Number::F64(f64::from_bits(bits)),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => a == b,
            (Number::F64(a), Number::F64(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => a.partial_cmp(b),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::I64(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::F64(value)
    }
}

/// A word-aligned, atomically updatable carrier for a [`Number`].
///
/// Backends that keep a running total (e.g. a sum aggregator) can store the
/// raw representation of a number here and fold updates in lock-free. The
/// facade itself never mutates one; this type exists so the numeric
/// representation satisfies that requirement.
#[derive(Debug, Default)]
pub struct AtomicNumber(AtomicU64);

impl AtomicNumber {
    /// Create an atomic carrier initialized to the given number.
    pub fn new(number: Number) -> Self {
        AtomicNumber(AtomicU64::new(number.to_bits()))
    }

    /// Load the current value as a number of the given kind.
    pub fn load(&self, kind: &NumberKind) -> Number {
        Number::from_bits(kind, self.0.load(Ordering::Acquire))
    }

    /// Store a new value.
    pub fn store(&self, number: Number) {
        self.0.store(number.to_bits(), Ordering::Release)
    }

    /// Atomically add `delta` to the current value, interpreting both under
    /// the given kind.
    pub fn add(&self, kind: &NumberKind, delta: Number) {
        let delta = delta.to_bits();
        let mut current = self.0.load(Ordering::Acquire);
        loop {
            let new = match kind {
                NumberKind::I64 => ((current as i64).wrapping_add(delta as i64)) as u64,
                NumberKind::F64 => (f64::from_bits(current) + f64::from_bits(delta)).to_bits(),
            };
            match self
                .0
                .compare_exchange_weak(current, new, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }
}
