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

//! LB/LW/SB/SH/SW: the data-memory instructions. Every one of them checks
//! COP0 Status.IsC (cache isolation) before touching the bus: while the
//! BIOS has the data cache isolated, loads don't schedule a delayed write
//! and stores never reach RAM.

use crate::core::cpu::Cpu;
use crate::core::error::Result;

impl Cpu {
    /// Signed byte load with load-delay; sign-extends to 32 bits.
    /// Dropped under cache isolation (the destination keeps its prior value).
    pub(crate) fn op_lb(&mut self, rt: u8, rs: u8, imm16_se: u32) -> Result<()> {
        if self.cache_isolated() {
            return Ok(());
        }
        let addr = self.reg(rs).wrapping_add(imm16_se);
        let value = self.bus.load8(addr)? as i8 as i32 as u32;
        self.schedule_load(rt, value);
        Ok(())
    }

    /// Word load with load-delay. Dropped under cache isolation.
    pub(crate) fn op_lw(&mut self, rt: u8, rs: u8, imm16_se: u32) -> Result<()> {
        if self.cache_isolated() {
            return Ok(());
        }
        let addr = self.reg(rs).wrapping_add(imm16_se);
        let value = self.bus.load32(addr)?;
        self.schedule_load(rt, value);
        Ok(())
    }

    /// Store the low byte of `rt`. Silently dropped under cache isolation.
    pub(crate) fn op_sb(&mut self, rt: u8, rs: u8, imm16_se: u32) -> Result<()> {
        if self.cache_isolated() {
            return Ok(());
        }
        let addr = self.reg(rs).wrapping_add(imm16_se);
        self.bus.store8(addr, (self.reg(rt) & 0xFF) as u8)
    }

    /// Store the low halfword of `rt`. Silently dropped under cache isolation.
    pub(crate) fn op_sh(&mut self, rt: u8, rs: u8, imm16_se: u32) -> Result<()> {
        if self.cache_isolated() {
            return Ok(());
        }
        let addr = self.reg(rs).wrapping_add(imm16_se);
        self.bus.store16(addr, (self.reg(rt) & 0xFFFF) as u16)
    }

    /// Store all of `rt`. Silently dropped under cache isolation.
    pub(crate) fn op_sw(&mut self, rt: u8, rs: u8, imm16_se: u32) -> Result<()> {
        if self.cache_isolated() {
            return Ok(());
        }
        let addr = self.reg(rs).wrapping_add(imm16_se);
        self.bus.store32(addr, self.reg(rt))
    }
}
