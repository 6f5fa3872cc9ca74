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

//! Coprocessor 0 (System Control): only the Status register carries real
//! semantics here. A handful of debug registers accept writes as no-ops and
//! fault on read; every other index is unrecognized and faults both ways.

use bitflags::bitflags;

use crate::core::error::{Fault, Result};

/// Debug registers the real BIOS pokes during startup (breakpoint/cache
/// control) but that this interpreter does not implement: BPC, BDA, TAR,
/// DCIC, BDAM, BPCM.
const DEBUG_NOOP_REGISTERS: [u8; 6] = [3, 5, 6, 7, 9, 11];

/// Status register index.
const SR: u8 = 12;
/// Cause register index; writes are accepted as no-ops, reads fault.
const CAUSE: u8 = 13;

bitflags! {
    /// The bits of Status this interpreter actually gives meaning to.
    /// Everything else round-trips through [`Cop0::write`]/[`Cop0::read`]
    /// untouched, since `bits()` preserves unknown bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Status: u32 {
        /// IsC: isolate cache. While set, LB/LW/SB/SH/SW never reach the bus.
        const ISOLATE_CACHE = 1 << 16;
    }
}

/// System Control coprocessor state.
///
/// Real hardware boots with CU0 and BEV set in Status; this interpreter
/// never vectors an exception so those bits are inert, but the reset value
/// is kept for parity with what a BIOS image actually observes on MFC0.
pub(super) struct Cop0 {
    status: Status,
}

impl Cop0 {
    const RESET_STATUS: u32 = 0x1090_0000;

    pub(super) fn new() -> Self {
        Self {
            status: Status::from_bits_retain(Self::RESET_STATUS),
        }
    }

    pub(super) fn reset(&mut self) {
        self.status = Status::from_bits_retain(Self::RESET_STATUS);
    }

    /// Whether Status.IsC is set; the data side of the bus is disconnected
    /// while this is true.
    pub(super) fn cache_isolated(&self) -> bool {
        self.status.contains(Status::ISOLATE_CACHE)
    }

    /// The raw Status register, exposed to the driver for display.
    pub(super) fn status(&self) -> u32 {
        self.status.bits()
    }

    /// MFC0 read path: only Status is readable.
    pub(super) fn read(&self, index: u8) -> Result<u32> {
        if index == SR {
            return Ok(self.status.bits());
        }
        Err(unhandled(index, "read"))
    }

    /// MTC0 write path: Status is writable; the debug registers and CAUSE
    /// accept the write as a no-op; anything else faults.
    pub(super) fn write(&mut self, index: u8, value: u32) -> Result<()> {
        if index == SR {
            self.status = Status::from_bits_retain(value);
            return Ok(());
        }
        if index == CAUSE || DEBUG_NOOP_REGISTERS.contains(&index) {
            return Ok(());
        }
        Err(unhandled(index, "write"))
    }
}

fn unhandled(index: u8, op: &'static str) -> Fault {
    let fault = Fault::UnhandledCop0Register { index, op };
    log::error!("{fault}");
    fault
}
