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

//! CPU (MIPS R3000A) emulation core (C6).
//!
//! Owns the [`Bus`] and steps it one instruction at a time, maintaining the
//! two-register-file load-delay discipline and the pipelined branch-delay
//! slot. See [`Cpu::step`] for the exact substep ordering.

mod cop0;
mod decode;
pub mod disassembler;
mod instructions;

use crate::core::error::Result;
use crate::core::memory::Bus;
use cop0::Cop0;
use decode::{decode, Decoded};

/// Address of the BIOS reset vector in KSEG1; the R3000A starts fetching here.
pub const RESET_PC: u32 = 0xBFC0_0000;

/// A single pending load-delay write: `(target register, value)`.
///
/// Index 0 is indistinguishable from "no pending load" since writes to
/// register 0 are always discarded by [`Cpu::set_reg`].
#[derive(Debug, Clone, Copy, Default)]
struct LoadDelay {
    index: u8,
    value: u32,
}

/// MIPS R3000A interpreter: two register files, a pipelined next
/// instruction, a one-slot load delay, and the Status-only COP0.
///
/// # Example
/// ```no_run
/// use psrx::core::cpu::Cpu;
///
/// let mut cpu = Cpu::new("scph1001.bin").unwrap();
/// cpu.step().unwrap();
/// assert_eq!(cpu.register(0), 0); // r0 is always 0
/// ```
pub struct Cpu {
    bus: Bus,

    /// Values visible to the instruction currently executing.
    read_regs: [u32; 32],
    /// Values the next instruction will observe, after this step commits.
    write_regs: [u32; 32],

    /// Address of the next instruction to fetch.
    pc: u32,
    /// Address of the instruction retired on the previous step.
    prev_pc: u32,

    /// The value `pc`/`prev_pc` are re-seeded to on construction and
    /// [`Cpu::reset`]: [`RESET_PC`] unless overridden for a test harness.
    reset_pc: u32,

    /// The instruction fetched on the previous step; executes this step.
    next_instruction: Decoded,

    load_delay: LoadDelay,

    cop0: Cop0,

    step_count: u64,
}

impl Cpu {
    /// Build a CPU from a BIOS image at `path`, priming the pipeline so the
    /// first call to [`Cpu::step`] executes the BIOS's first instruction.
    pub fn new(bios_path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::with_start_pc(bios_path, None)
    }

    /// Build a CPU from a BIOS image at `path`, seeding `pc` from
    /// `start_pc` instead of [`RESET_PC`] when given. Test harnesses that
    /// want to drop straight into a fixture routine rather than the real
    /// BIOS entry point use this; [`Cpu::reset`] re-seeds to the same
    /// override, not back to `RESET_PC`.
    pub fn with_start_pc(
        bios_path: impl AsRef<std::path::Path>,
        start_pc: Option<u32>,
    ) -> Result<Self> {
        let bios = crate::core::memory::bios::Bios::load(bios_path)?;
        let bus = Bus::new(bios);
        let reset_pc = start_pc.unwrap_or(RESET_PC);
        let mut cpu = Self {
            bus,
            read_regs: [0; 32],
            write_regs: [0; 32],
            pc: reset_pc,
            prev_pc: reset_pc,
            reset_pc,
            next_instruction: Decoded::Sll {
                rd: 0,
                rt: 0,
                shamt: 0,
            },
            load_delay: LoadDelay::default(),
            cop0: Cop0::new(),
            step_count: 0,
        };
        cpu.prime_pipeline();
        Ok(cpu)
    }

    /// Re-seed the architectural state as if freshly constructed, without
    /// reloading RAM or the BIOS image.
    pub fn reset(&mut self) {
        self.read_regs = [0; 32];
        self.write_regs = [0; 32];
        self.pc = self.reset_pc;
        self.prev_pc = self.reset_pc;
        self.load_delay = LoadDelay::default();
        self.cop0.reset();
        self.step_count = 0;
        self.prime_pipeline();
    }

    /// Fetch the reset-vector instruction into `next_instruction` and
    /// advance `pc` past it, so the pipeline already holds one fetched
    /// instruction before the first real step runs.
    ///
    /// The reset vector is always 4-aligned and within the BIOS region, so
    /// this fetch cannot fail.
    fn prime_pipeline(&mut self) {
        let raw = self
            .bus
            .load32(self.pc)
            .expect("reset vector fetch is always in-range and aligned");
        self.next_instruction = decode(raw);
        self.pc = self.pc.wrapping_add(4);
    }

    /// Advance the machine by exactly one retired instruction.
    ///
    /// Order, per step: fetch the following instruction into the pipeline,
    /// record `prev_pc`/bump `pc`, retire any pending load-delay write,
    /// execute the instruction that was already sitting in the pipeline,
    /// then commit `read_regs ← write_regs`.
    pub fn step(&mut self) -> Result<()> {
        let retiring = self.next_instruction;

        let raw = self.bus.load32(self.pc)?;
        self.next_instruction = decode(raw);

        self.prev_pc = self.pc;
        self.pc = self.pc.wrapping_add(4);

        let delay = std::mem::take(&mut self.load_delay);
        self.set_reg(delay.index, delay.value);

        self.execute(retiring)?;

        self.read_regs = self.write_regs;
        self.step_count += 1;

        Ok(())
    }

    fn execute(&mut self, decoded: Decoded) -> Result<()> {
        match decoded {
            Decoded::Sll { rd, rt, shamt } => self.op_sll(rd, rt, shamt),
            Decoded::Jr { rs } => self.op_jr(rs),
            Decoded::Add { rd, rs, rt } => self.op_add(rd, rs, rt),
            Decoded::Addu { rd, rs, rt } => self.op_addu(rd, rs, rt),
            Decoded::And { rd, rs, rt } => self.op_and(rd, rs, rt),
            Decoded::Or { rd, rs, rt } => self.op_or(rd, rs, rt),
            Decoded::Sltu { rd, rs, rt } => self.op_sltu(rd, rs, rt),
            Decoded::J { imm26 } => self.op_j(imm26),
            Decoded::Jal { imm26 } => self.op_jal(imm26),
            Decoded::Beq { rs, rt, imm16_se } => self.op_beq(rs, rt, imm16_se),
            Decoded::Bne { rs, rt, imm16_se } => self.op_bne(rs, rt, imm16_se),
            Decoded::Addi { rt, rs, imm16_se } => self.op_addi(rt, rs, imm16_se),
            Decoded::Addiu { rt, rs, imm16_se } => self.op_addiu(rt, rs, imm16_se),
            Decoded::Andi { rt, rs, imm16 } => self.op_andi(rt, rs, imm16),
            Decoded::Ori { rt, rs, imm16 } => self.op_ori(rt, rs, imm16),
            Decoded::Lui { rt, imm16 } => self.op_lui(rt, imm16),
            Decoded::Mfc0 { rt, rd } => self.op_mfc0(rt, rd),
            Decoded::Mtc0 { rt, rd } => self.op_mtc0(rt, rd),
            Decoded::Lb { rt, rs, imm16_se } => self.op_lb(rt, rs, imm16_se),
            Decoded::Lw { rt, rs, imm16_se } => self.op_lw(rt, rs, imm16_se),
            Decoded::Sb { rt, rs, imm16_se } => self.op_sb(rt, rs, imm16_se),
            Decoded::Sh { rt, rs, imm16_se } => self.op_sh(rt, rs, imm16_se),
            Decoded::Sw { rt, rs, imm16_se } => self.op_sw(rt, rs, imm16_se),
            Decoded::Unknown {
                raw,
                primary,
                secondary,
                cop_op,
            } => {
                let fault = crate::core::error::Fault::UnhandledOpcode {
                    primary,
                    secondary,
                    cop_op,
                    raw,
                };
                log::error!("{fault}");
                Err(fault)
            }
        }
    }

    /// Read `read_regs[index]`; register 0 is always 0.
    fn reg(&self, index: u8) -> u32 {
        self.read_regs[index as usize]
    }

    /// Write `write_regs[index]`, discarding writes to register 0 and
    /// re-forcing `write_regs[0]` to 0 on every call.
    fn set_reg(&mut self, index: u8, value: u32) {
        if index != 0 {
            self.write_regs[index as usize] = value;
        }
        self.write_regs[0] = 0;
    }

    /// Schedule a value into the one-slot load-delay, to be retired into
    /// `write_regs` at the start of the following step.
    fn schedule_load(&mut self, index: u8, value: u32) {
        self.load_delay = LoadDelay { index, value };
    }

    /// Relative branch target: `pc + (offset << 2) - 4`, where `pc` is the
    /// already-bumped value for this step (the `-4` compensates for that
    /// bump so the net effect is `retired_pc + 4 + (offset << 2)`).
    fn branch(&mut self, offset16_se: u32) {
        self.pc = self.pc.wrapping_add(offset16_se << 2).wrapping_sub(4);
    }

    /// Whether Status.IsC is set; while true, LB/LW/SB/SH/SW are dropped
    /// before reaching the bus.
    fn cache_isolated(&self) -> bool {
        self.cop0.cache_isolated()
    }

    /// Address of the next instruction to fetch.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Address of the instruction retired on the previous step.
    pub fn prev_pc(&self) -> u32 {
        self.prev_pc
    }

    /// Number of instructions retired since construction or the last reset.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Current value of general-purpose register `index` (0..=31).
    pub fn register(&self, index: u8) -> u32 {
        self.read_regs[index as usize]
    }

    /// HI register. Always 0: MULT/DIV are not implemented by this core.
    pub fn hi(&self) -> u32 {
        0
    }

    /// LO register. Always 0: MULT/DIV are not implemented by this core.
    pub fn lo(&self) -> u32 {
        0
    }

    /// Raw COP0 Status register, for display.
    pub fn cop0_status(&self) -> u32 {
        self.cop0.status()
    }

    /// Same contract as `Bus::load32`, exposed for a debugger/disassembler
    /// view; never consulted by `step` itself.
    pub fn load32_for_debug(&self, addr: u32) -> Result<u32> {
        self.bus.load32_for_debug(addr)
    }

    /// The instruction sitting in the pipeline, about to retire on the next
    /// call to `step`. Used by trace mode to disassemble ahead of execution.
    pub fn pending_instruction(&self) -> Decoded {
        self.next_instruction
    }
}

#[cfg(test)]
impl Cpu {
    /// Build a bare CPU over an already-constructed bus, for instruction
    /// unit tests that don't need a full BIOS program.
    pub(crate) fn for_test(bus: Bus) -> Self {
        let mut cpu = Self {
            bus,
            read_regs: [0; 32],
            write_regs: [0; 32],
            pc: RESET_PC,
            prev_pc: RESET_PC,
            reset_pc: RESET_PC,
            next_instruction: Decoded::Sll {
                rd: 0,
                rt: 0,
                shamt: 0,
            },
            load_delay: LoadDelay::default(),
            cop0: Cop0::new(),
            step_count: 0,
        };
        cpu.prime_pipeline();
        cpu
    }

    /// Seed both register files directly, bypassing the zero-register rule,
    /// for setting up instruction unit test fixtures.
    pub(crate) fn test_set_reg(&mut self, index: u8, value: u32) {
        self.read_regs[index as usize] = value;
        self.write_regs[index as usize] = value;
    }

    /// Seed the COP0 Status register (index 12) directly, for
    /// cache-isolation tests.
    pub(crate) fn test_set_status(&mut self, value: u32) {
        self.cop0.write(12, value).unwrap();
    }

    /// Read `write_regs[index]` directly, for asserting on an `op_*` call's
    /// effect without going through a full `step()` commit.
    pub(crate) fn test_write_reg(&self, index: u8) -> u32 {
        self.write_regs[index as usize]
    }

    /// Read the pending load-delay slot, for load-instruction unit tests.
    pub(crate) fn test_load_delay(&self) -> (u8, u32) {
        (self.load_delay.index, self.load_delay.value)
    }
}
