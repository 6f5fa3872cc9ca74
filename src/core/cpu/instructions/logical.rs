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

//! AND/OR/SLTU/ANDI/ORI/LUI: bitwise and compare logic, plus the one
//! immediate-load instruction. ANDI/ORI use the zero-extended `imm16`, never
//! the sign-extended form ADDI/ADDIU use.

use crate::core::cpu::Cpu;
use crate::core::error::Result;

impl Cpu {
    /// `rd = rs & rt`.
    pub(crate) fn op_and(&mut self, rd: u8, rs: u8, rt: u8) -> Result<()> {
        self.set_reg(rd, self.reg(rs) & self.reg(rt));
        Ok(())
    }

    /// `rd = rs | rt`.
    pub(crate) fn op_or(&mut self, rd: u8, rs: u8, rt: u8) -> Result<()> {
        self.set_reg(rd, self.reg(rs) | self.reg(rt));
        Ok(())
    }

    /// `rd = (rs < rt) ? 1 : 0`, unsigned comparison.
    pub(crate) fn op_sltu(&mut self, rd: u8, rs: u8, rt: u8) -> Result<()> {
        let value = (self.reg(rs) < self.reg(rt)) as u32;
        self.set_reg(rd, value);
        Ok(())
    }

    /// `rt = rs & imm16` (zero-extended).
    pub(crate) fn op_andi(&mut self, rt: u8, rs: u8, imm16: u16) -> Result<()> {
        self.set_reg(rt, self.reg(rs) & imm16 as u32);
        Ok(())
    }

    /// `rt = rs | imm16` (zero-extended).
    pub(crate) fn op_ori(&mut self, rt: u8, rs: u8, imm16: u16) -> Result<()> {
        self.set_reg(rt, self.reg(rs) | imm16 as u32);
        Ok(())
    }

    /// `rt = imm16 << 16`.
    pub(crate) fn op_lui(&mut self, rt: u8, imm16: u16) -> Result<()> {
        self.set_reg(rt, (imm16 as u32) << 16);
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
    fn and_masks_bits() {
        let mut cpu = test_cpu();
        cpu.test_set_reg(1, 0b1111_0000);
        cpu.test_set_reg(2, 0b1100_1100);
        cpu.op_and(3, 1, 2).unwrap();
        assert_eq!(cpu.test_write_reg(3), 0b1100_0000);
    }

    #[test]
    fn or_combines_bits() {
        let mut cpu = test_cpu();
        cpu.test_set_reg(1, 0xDEAD_0000);
        cpu.test_set_reg(2, 0x0000_BEEF);
        cpu.op_or(3, 1, 2).unwrap();
        assert_eq!(cpu.test_write_reg(3), 0xDEAD_BEEF);
    }

    #[test]
    fn sltu_compares_unsigned() {
        let mut cpu = test_cpu();
        cpu.test_set_reg(1, 1);
        cpu.test_set_reg(2, 0xFFFF_FFFF); // would be -1 signed, but SLTU is unsigned
        cpu.op_sltu(3, 1, 2).unwrap();
        assert_eq!(cpu.test_write_reg(3), 1);
        cpu.op_sltu(4, 2, 1).unwrap();
        assert_eq!(cpu.test_write_reg(4), 0);
    }

    #[test]
    fn andi_zero_extends_immediate() {
        let mut cpu = test_cpu();
        cpu.test_set_reg(1, 0xFFFF_FFFF);
        cpu.op_andi(2, 1, 0x8000).unwrap();
        assert_eq!(cpu.test_write_reg(2), 0x0000_8000);
    }

    #[test]
    fn ori_zero_extends_immediate() {
        let mut cpu = test_cpu();
        cpu.test_set_reg(1, 0);
        cpu.op_ori(2, 1, 0x8000).unwrap();
        assert_eq!(cpu.test_write_reg(2), 0x0000_8000);
    }

    #[test]
    fn lui_loads_upper_half_and_clears_lower() {
        let mut cpu = test_cpu();
        cpu.test_set_reg(1, 0xFFFF_FFFF);
        cpu.op_lui(1, 0xDEAD).unwrap();
        assert_eq!(cpu.test_write_reg(1), 0xDEAD_0000);
    }

    #[test]
    fn writes_to_r0_are_discarded() {
        let mut cpu = test_cpu();
        cpu.test_set_reg(1, 0xFFFF_FFFF);
        cpu.op_and(0, 1, 1).unwrap();
        assert_eq!(cpu.register(0), 0);
        cpu.op_lui(0, 0xFFFF).unwrap();
        assert_eq!(cpu.register(0), 0);
    }
}
