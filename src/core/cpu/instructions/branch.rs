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

//! BEQ/BNE: the only conditional branches this core implements. Both route
//! through [`Cpu::branch`], which encodes the `-4` compensation for the
//! already-bumped `pc` described in the branch-delay-slot design.

use crate::core::cpu::Cpu;
use crate::core::error::Result;

impl Cpu {
    /// Branch to `pc + (offset << 2)` if `rs == rt`.
    pub(crate) fn op_beq(&mut self, rs: u8, rt: u8, imm16_se: u32) -> Result<()> {
        if self.reg(rs) == self.reg(rt) {
            self.branch(imm16_se);
        }
        Ok(())
    }

    /// Branch to `pc + (offset << 2)` if `rs != rt`.
    pub(crate) fn op_bne(&mut self, rs: u8, rt: u8, imm16_se: u32) -> Result<()> {
        if self.reg(rs) != self.reg(rt) {
            self.branch(imm16_se);
        }
        Ok(())
    }
}
