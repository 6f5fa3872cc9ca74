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

//! ADD/ADDU/ADDI/ADDIU: the only arithmetic this core implements. ADD and
//! ADDI trap on signed overflow; the U-suffixed forms wrap.

use crate::core::cpu::Cpu;
use crate::core::error::{Fault, Result};

/// Signed 32-bit add via the native checked-add primitive. Returns the
/// wrapped sum and whether it overflowed.
fn checked_add(a: u32, b: u32) -> (u32, bool) {
    match (a as i32).checked_add(b as i32) {
        Some(sum) => (sum as u32, false),
        None => (a.wrapping_add(b), true),
    }
}

impl Cpu {
    /// `rd = rs + rt` (signed); faults `ArithmeticOverflow` on overflow.
    pub(crate) fn op_add(&mut self, rd: u8, rs: u8, rt: u8) -> Result<()> {
        let (sum, overflowed) = checked_add(self.reg(rs), self.reg(rt));
        if overflowed {
            return Err(overflow("ADD"));
        }
        self.set_reg(rd, sum);
        Ok(())
    }

    /// `rd = rs + rt`, wrapping on overflow.
    pub(crate) fn op_addu(&mut self, rd: u8, rs: u8, rt: u8) -> Result<()> {
        self.set_reg(rd, self.reg(rs).wrapping_add(self.reg(rt)));
        Ok(())
    }

    /// `rt = rs + imm16_se` (signed); faults `ArithmeticOverflow` on overflow.
    pub(crate) fn op_addi(&mut self, rt: u8, rs: u8, imm16_se: u32) -> Result<()> {
        let (sum, overflowed) = checked_add(self.reg(rs), imm16_se);
        if overflowed {
            return Err(overflow("ADDI"));
        }
        self.set_reg(rt, sum);
        Ok(())
    }

    /// `rt = rs + imm16_se`, wrapping on overflow.
    pub(crate) fn op_addiu(&mut self, rt: u8, rs: u8, imm16_se: u32) -> Result<()> {
        self.set_reg(rt, self.reg(rs).wrapping_add(imm16_se));
        Ok(())
    }
}

fn overflow(op: &'static str) -> Fault {
    let fault = Fault::ArithmeticOverflow { op };
    log::error!("{fault}");
    fault
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
    fn addu_wraps_on_overflow() {
        let mut cpu = test_cpu();
        cpu.test_set_reg(1, i32::MAX as u32);
        cpu.test_set_reg(2, 1);
        cpu.op_addu(3, 1, 2).unwrap();
        assert_eq!(cpu.test_write_reg(3), 0x8000_0000);
    }

    #[test]
    fn add_faults_on_signed_overflow() {
        let mut cpu = test_cpu();
        cpu.test_set_reg(1, i32::MAX as u32);
        cpu.test_set_reg(2, 1);
        let err = cpu.op_add(3, 1, 2).unwrap_err();
        assert!(matches!(err, Fault::ArithmeticOverflow { op: "ADD" }));
    }

    #[test]
    fn addi_faults_on_signed_overflow() {
        let mut cpu = test_cpu();
        cpu.test_set_reg(1, i32::MAX as u32);
        let err = cpu.op_addi(2, 1, 1).unwrap_err();
        assert!(matches!(err, Fault::ArithmeticOverflow { op: "ADDI" }));
    }

    #[test]
    fn addiu_write_to_r0_is_discarded() {
        let mut cpu = test_cpu();
        cpu.op_addiu(0, 0, 0xFFFF_FFFF).unwrap();
        assert_eq!(cpu.test_write_reg(0), 0);
    }
}
