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

//! The memory bus (C4): routes typed loads/stores to the BIOS, RAM, or a
//! named MMIO stub, enforcing alignment and the per-region permission
//! matrix of the physical memory map.

pub mod bios;
pub mod ram;
pub mod region;

use crate::core::error::{Fault, MemOp, Result};
use bios::Bios;
use ram::Ram;
use region::{mask_region, region_of, MemoryRegion};

/// Owns the BIOS and RAM stores exclusively; the CPU owns the bus.
pub struct Bus {
    bios: Bios,
    ram: Ram,
}

impl Bus {
    pub fn new(bios: Bios) -> Self {
        Self {
            bios,
            ram: Ram::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_bios_bytes(bytes: &[u8]) -> Self {
        Self::new(Bios::from_bytes(bytes))
    }

    pub fn load32(&self, addr: u32) -> Result<u32> {
        let phys = mask_region(addr);
        if phys & 3 != 0 {
            return Err(unaligned(phys, 32));
        }
        match region_of(phys) {
            Some(MemoryRegion::Ram) => Ok(self.ram.load32(phys - region::RAM_BASE)),
            Some(MemoryRegion::Bios) => Ok(self.bios.load32(phys - region::BIOS_BASE)),
            _ => Err(unmapped(phys, MemOp::Load)),
        }
    }

    pub fn load16(&self, addr: u32) -> Result<u16> {
        let phys = mask_region(addr);
        if phys & 1 != 0 {
            return Err(unaligned(phys, 16));
        }
        match region_of(phys) {
            Some(MemoryRegion::Ram) => Ok(self.ram.load16(phys - region::RAM_BASE)),
            _ => Err(unmapped(phys, MemOp::Load)),
        }
    }

    pub fn load8(&self, addr: u32) -> Result<u8> {
        let phys = mask_region(addr);
        match region_of(phys) {
            Some(MemoryRegion::Ram) => Ok(self.ram.load8(phys - region::RAM_BASE)),
            Some(MemoryRegion::Bios) => Ok(self.bios.load8(phys - region::BIOS_BASE)),
            _ => Err(unmapped(phys, MemOp::Load)),
        }
    }

    pub fn store32(&mut self, addr: u32, value: u32) -> Result<()> {
        let phys = mask_region(addr);
        if phys & 3 != 0 {
            return Err(unaligned(phys, 32));
        }
        match region_of(phys) {
            Some(MemoryRegion::Ram) => {
                self.ram.store32(phys - region::RAM_BASE, value);
                Ok(())
            }
            Some(MemoryRegion::Bios) => Err(write_to_read_only(phys)),
            Some(MemoryRegion::MemoryControl) => self.store_memory_control(phys, value),
            Some(MemoryRegion::RamSize) => {
                log::trace!("RamSize no-op store32 at 0x{phys:08X} = 0x{value:08X}");
                Ok(())
            }
            Some(MemoryRegion::SpuControl) => {
                log::trace!("SpuControl no-op store32 at 0x{phys:08X} = 0x{value:08X}");
                Ok(())
            }
            Some(MemoryRegion::CacheControl) => {
                log::trace!("CacheControl no-op store32 at 0x{phys:08X} = 0x{value:08X}");
                Ok(())
            }
            _ => Err(unmapped(phys, MemOp::Store)),
        }
    }

    pub fn store16(&mut self, addr: u32, value: u16) -> Result<()> {
        let phys = mask_region(addr);
        if phys & 1 != 0 {
            return Err(unaligned(phys, 16));
        }
        match region_of(phys) {
            Some(MemoryRegion::Ram) => {
                self.ram.store16(phys - region::RAM_BASE, value);
                Ok(())
            }
            Some(MemoryRegion::Bios) => Err(write_to_read_only(phys)),
            Some(MemoryRegion::SpuControl) => {
                log::trace!("SpuControl no-op store16 at 0x{phys:08X} = 0x{value:04X}");
                Ok(())
            }
            _ => Err(unmapped(phys, MemOp::Store)),
        }
    }

    pub fn store8(&mut self, addr: u32, value: u8) -> Result<()> {
        let phys = mask_region(addr);
        match region_of(phys) {
            Some(MemoryRegion::Ram) => {
                self.ram.store8(phys - region::RAM_BASE, value);
                Ok(())
            }
            Some(MemoryRegion::Bios) => Err(write_to_read_only(phys)),
            Some(MemoryRegion::ExpansionRegion2IntDipPost) => {
                log::trace!(
                    "ExpansionRegion2IntDipPost no-op store8 at 0x{phys:08X} = 0x{value:02X}"
                );
                Ok(())
            }
            _ => Err(unmapped(phys, MemOp::Store)),
        }
    }

    /// `load32` contract reused by the debugger/disassembler collaborator.
    pub fn load32_for_debug(&self, addr: u32) -> Result<u32> {
        self.load32(addr)
    }

    fn store_memory_control(&mut self, phys: u32, value: u32) -> Result<()> {
        let offset = phys - region::MEMORY_CONTROL_BASE;
        match offset {
            0x0 if value == 0x1F00_0000 => {
                log::trace!("MemoryControl base0 remap accepted: 0x{value:08X}");
                Ok(())
            }
            0x4 if value == 0x1F80_2000 => {
                log::trace!("MemoryControl base1 remap accepted: 0x{value:08X}");
                Ok(())
            }
            0x0 | 0x4 => {
                let fault = Fault::UnsupportedRemap { addr: phys, value };
                log::error!("{fault}");
                Err(fault)
            }
            _ => {
                log::trace!(
                    "MemoryControl no-op store32 at offset 0x{offset:02X} = 0x{value:08X}"
                );
                Ok(())
            }
        }
    }
}

fn unaligned(addr: u32, width: u8) -> Fault {
    let fault = Fault::UnalignedAccess { addr, width };
    log::error!("{fault}");
    fault
}

fn unmapped(addr: u32, op: MemOp) -> Fault {
    let fault = Fault::UnmappedAccess { addr, op };
    log::error!("{fault}");
    fault
}

fn write_to_read_only(addr: u32) -> Fault {
    let fault = Fault::WriteToReadOnly { addr };
    log::error!("{fault}");
    fault
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus() -> Bus {
        Bus::with_bios_bytes(&vec![0u8; bios::BIOS_SIZE])
    }

    #[test]
    fn ram_round_trips_through_all_three_mirrors() {
        let mut bus = bus();
        bus.store32(0x10, 0xDEADBEEF).unwrap();
        assert_eq!(bus.load32(0x00000010).unwrap(), 0xDEADBEEF);
        assert_eq!(bus.load32(0x80000010).unwrap(), 0xDEADBEEF);
        assert_eq!(bus.load32(0xA0000010).unwrap(), 0xDEADBEEF);
    }

    #[test]
    fn bios_write_faults_and_leaves_bytes_unchanged() {
        let mut bus = bus();
        let before = bus.load32(0xBFC00000).unwrap();
        let err = bus.store32(0xBFC00000, 0x12345678).unwrap_err();
        assert!(matches!(err, Fault::WriteToReadOnly { .. }));
        assert_eq!(bus.load32(0xBFC00000).unwrap(), before);
    }

    #[test]
    fn bios_does_not_support_16_bit_reads() {
        let bus = bus();
        let err = bus.load16(0xBFC00000).unwrap_err();
        assert!(matches!(err, Fault::UnmappedAccess { .. }));
    }

    #[test]
    fn unaligned_word_access_faults() {
        let bus = bus();
        let err = bus.load32(1).unwrap_err();
        assert!(matches!(err, Fault::UnalignedAccess { addr: 1, width: 32 }));
    }

    #[test]
    fn unaligned_half_access_faults() {
        let mut bus = bus();
        let err = bus.store16(1, 0).unwrap_err();
        assert!(matches!(err, Fault::UnalignedAccess { addr: 1, width: 16 }));
    }

    #[test]
    fn expansion1_always_faults() {
        let bus = bus();
        let err = bus.load8(0x1F000000).unwrap_err();
        assert!(matches!(err, Fault::UnmappedAccess { .. }));
    }

    #[test]
    fn memory_control_accepts_documented_remap() {
        let mut bus = bus();
        bus.store32(0x1F801000, 0x1F000000).unwrap();
        bus.store32(0x1F801004, 0x1F802000).unwrap();
    }

    #[test]
    fn memory_control_rejects_other_remap_values() {
        let mut bus = bus();
        let err = bus.store32(0x1F801000, 0x00000000).unwrap_err();
        assert!(matches!(err, Fault::UnsupportedRemap { .. }));
    }

    #[test]
    fn memory_control_other_offsets_are_noop() {
        let mut bus = bus();
        bus.store32(0x1F801008, 0xFFFFFFFF).unwrap();
    }

    #[test]
    fn ram_size_store_is_noop_and_not_readable() {
        let mut bus = bus();
        bus.store32(0x1F801060, 0x00000B88).unwrap();
        assert!(bus.load32(0x1F801060).is_err());
    }

    #[test]
    fn spu_control_accepts_16_and_32_bit_stores_only() {
        let mut bus = bus();
        bus.store16(0x1F801D80, 0x0000).unwrap();
        bus.store32(0x1F801D88, 0x00000000).unwrap();
        assert!(bus.store8(0x1F801D80, 0).is_err());
    }

    #[test]
    fn expansion2_accepts_only_8_bit_stores() {
        let mut bus = bus();
        bus.store8(0x1F802000, 1).unwrap();
        assert!(bus.store16(0x1F802000, 1).is_err());
        assert!(bus.store32(0x1F802000, 1).is_err());
    }

    #[test]
    fn cache_control_store32_is_noop_reachable_via_kseg2() {
        let mut bus = bus();
        bus.store32(0xFFFE0130, 0x00000900).unwrap();
    }
}
