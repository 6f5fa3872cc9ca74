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

//! J/JAL/JR: unconditional jumps. Like BEQ/BNE, these only ever write `pc`;
//! the instruction already sitting in the pipeline still retires first.

use crate::core::cpu::Cpu;
use crate::core::error::Result;

impl Cpu {
    /// `pc = (pc & 0xF0000000) | (imm26 << 2)`, using the already-bumped
    /// `pc` for this step.
    pub(crate) fn op_j(&mut self, imm26: u32) -> Result<()> {
        self.pc = (self.pc & 0xF000_0000) | (imm26 << 2);
        Ok(())
    }

    /// Link register 31 to the return address, then behave exactly like J.
    pub(crate) fn op_jal(&mut self, imm26: u32) -> Result<()> {
        self.set_reg(31, self.pc);
        self.op_j(imm26)
    }

    /// `pc = rs`, unconditionally.
    pub(crate) fn op_jr(&mut self, rs: u8) -> Result<()> {
        self.pc = self.reg(rs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::bios::BIOS_SIZE;
    use crate::core::memory::Bus;

    fn test_cpu() -> Cpu {
        Cpu::for_test(Bus::with_bios_bytes(&vec![0u8; BIOS_SIZE]))
    }

    #[test]
    fn j_preserves_top_four_bits_of_pc() {
        let mut cpu = test_cpu();
        cpu.pc = 0x8000_1004;
        cpu.op_j(0x0010_0000).unwrap();
        assert_eq!(cpu.pc(), 0x8040_0000);
    }

    #[test]
    fn jal_links_return_address_and_jumps() {
        let mut cpu = test_cpu();
        cpu.pc = 0xBFC0_0104;
        cpu.op_jal(0x0000_0100).unwrap();
        assert_eq!(cpu.test_write_reg(31), 0xBFC0_0104);
        assert_eq!(cpu.pc(), 0xB000_0400);
    }

    #[test]
    fn jr_jumps_to_register_value() {
        let mut cpu = test_cpu();
        cpu.test_set_reg(31, 0x8000_1234);
        cpu.op_jr(31).unwrap();
        assert_eq!(cpu.pc(), 0x8000_1234);
    }
}
