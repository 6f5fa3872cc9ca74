// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error taxonomy for the CPU/bus core.
//!
//! Every fallible operation in [`crate::core`] returns [`Result<T>`], an
//! alias for `std::result::Result<T, Fault>`. `Fault` unifies bus faults,
//! decode/dispatch faults, and startup I/O errors; no variant is caught
//! inside the core, so a `Fault` propagating out of
//! [`crate::core::cpu::Cpu::step`] always reflects the first thing that went
//! wrong.

use std::io;

/// Memory operation kind, used to describe an `UnmappedAccess` fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemOp {
    Load,
    Store,
}

impl std::fmt::Display for MemOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemOp::Load => write!(f, "load"),
            MemOp::Store => write!(f, "store"),
        }
    }
}

/// Everything that can go wrong while stepping the core or loading a BIOS.
#[derive(Debug, thiserror::Error)]
pub enum Fault {
    #[error("unaligned access at 0x{addr:08X} (width {width})")]
    UnalignedAccess { addr: u32, width: u8 },

    #[error("unmapped {op} at 0x{addr:08X}")]
    UnmappedAccess { addr: u32, op: MemOp },

    #[error("write to read-only region at 0x{addr:08X}")]
    WriteToReadOnly { addr: u32 },

    #[error("unsupported MemoryControl remap at 0x{addr:08X}: 0x{value:08X}")]
    UnsupportedRemap { addr: u32, value: u32 },

    #[error(
        "unhandled opcode: primary=0x{primary:02X} secondary=0x{secondary:02X} cop_op=0x{cop_op:02X} raw=0x{raw:08X}"
    )]
    UnhandledOpcode {
        primary: u8,
        secondary: u8,
        cop_op: u8,
        raw: u32,
    },

    #[error("arithmetic overflow in {op}")]
    ArithmeticOverflow { op: &'static str },

    #[error("unhandled COP0 register {index} ({op})")]
    UnhandledCop0Register { index: u8, op: &'static str },

    #[error("failed to load BIOS from {path}: {cause}")]
    IoError {
        path: String,
        #[source]
        cause: io::Error,
    },
}

/// Crate-local result alias; every fallible core operation returns this.
pub type Result<T> = std::result::Result<T, Fault>;
