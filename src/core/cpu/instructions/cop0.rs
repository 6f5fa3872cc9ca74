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

//! MFC0/MTC0: the only coprocessor-0 moves this core implements.

use crate::core::cpu::Cpu;
use crate::core::error::Result;

impl Cpu {
    /// Read COP0 register `rd` into the load-delay slot targeting `rt`.
    /// MFC0 observes the same one-slot delay as a memory load.
    pub(crate) fn op_mfc0(&mut self, rt: u8, rd: u8) -> Result<()> {
        let value = self.cop0.read(rd)?;
        self.schedule_load(rt, value);
        Ok(())
    }

    /// Write `read_regs[rt]` into COP0 register `rd`. Unlike MFC0, this
    /// takes effect immediately.
    pub(crate) fn op_mtc0(&mut self, rt: u8, rd: u8) -> Result<()> {
        let value = self.reg(rt);
        self.cop0.write(rd, value)
    }
}
