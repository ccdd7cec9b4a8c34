//! Binary byte units used by the calculator inputs and the byte formatter.

use serde::{Deserialize, Serialize};

pub const KIB: f64 = 1024.0;
pub const MIB: f64 = 1024.0 * KIB;
pub const GIB: f64 = 1024.0 * MIB;
pub const TIB: f64 = 1024.0 * GIB;

/// A power-of-1024 byte unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByteUnit {
    B,
    KiB,
    MiB,
    GiB,
    TiB,
}

impl ByteUnit {
    /// Units in ascending order of magnitude.
    pub const ALL: [ByteUnit; 5] = [
        ByteUnit::B,
        ByteUnit::KiB,
        ByteUnit::MiB,
        ByteUnit::GiB,
        ByteUnit::TiB,
    ];

    /// Number of bytes in one of this unit.
    pub fn multiplier(&self) -> f64 {
        match self {
            ByteUnit::B => 1.0,
            ByteUnit::KiB => KIB,
            ByteUnit::MiB => MIB,
            ByteUnit::GiB => GIB,
            ByteUnit::TiB => TIB,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ByteUnit::B => "B",
            ByteUnit::KiB => "KiB",
            ByteUnit::MiB => "MiB",
            ByteUnit::GiB => "GiB",
            ByteUnit::TiB => "TiB",
        }
    }

    /// Map a unit token to a unit, ignoring case ("gib", "GiB", "GIB").
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|u| u.label().eq_ignore_ascii_case(label))
    }

    /// Largest unit whose multiplier does not exceed `bytes` (B for anything below 1 KiB).
    pub fn for_magnitude(bytes: f64) -> Self {
        let abs = bytes.abs();
        if abs < KIB {
            ByteUnit::B
        } else if abs < MIB {
            ByteUnit::KiB
        } else if abs < GIB {
            ByteUnit::MiB
        } else if abs < TIB {
            ByteUnit::GiB
        } else {
            ByteUnit::TiB
        }
    }
}
