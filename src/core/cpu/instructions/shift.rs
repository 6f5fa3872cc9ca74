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

//! SLL: the only shift this core implements. `SLL $0, $0, 0` is the
//! canonical NOP encoding, which falls out of the zero-register rule with
//! no special case needed.

use crate::core::cpu::Cpu;
use crate::core::error::Result;

impl Cpu {
    /// `rd = rt << shamt`.
    pub(crate) fn op_sll(&mut self, rd: u8, rt: u8, shamt: u8) -> Result<()> {
        self.set_reg(rd, self.reg(rt) << shamt);
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
    fn sll_shifts_left() {
        let mut cpu = test_cpu();
        cpu.test_set_reg(1, 1);
        cpu.op_sll(2, 1, 4).unwrap();
        assert_eq!(cpu.test_write_reg(2), 0x10);
    }

    #[test]
    fn sll_zero_zero_zero_is_nop() {
        let mut cpu = test_cpu();
        cpu.op_sll(0, 0, 0).unwrap();
        assert_eq!(cpu.register(0), 0);
    }

    #[test]
    fn sll_bits_shifted_out_are_lost() {
        let mut cpu = test_cpu();
        cpu.test_set_reg(1, 0x8000_0001);
        cpu.op_sll(2, 1, 1).unwrap();
        assert_eq!(cpu.test_write_reg(2), 2);
    }

    #[test]
    fn sll_to_r0_is_discarded() {
        let mut cpu = test_cpu();
        cpu.test_set_reg(1, 0xFFFF_FFFF);
        cpu.op_sll(0, 1, 5).unwrap();
        assert_eq!(cpu.register(0), 0);
    }
}
