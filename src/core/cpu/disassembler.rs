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

//! A pure mnemonic-text renderer (C10) for trace mode. Takes whatever the
//! decoder already produced rather than re-parsing the raw word, so it can
//! never disagree with what `step` actually executed.

use super::decode::Decoded;

/// Render one decoded instruction as a mnemonic line, GNU-assembler style
/// (`op $rd, $rs, $rt`). `pc` is the address the instruction was fetched
/// from, used to resolve J/JAL's absolute target.
pub fn disassemble(decoded: Decoded, pc: u32) -> String {
    match decoded {
        Decoded::Sll { rd, rt, shamt } => format!("sll  ${rd}, ${rt}, {shamt}"),
        Decoded::Jr { rs } => format!("jr   ${rs}"),
        Decoded::Add { rd, rs, rt } => format!("add  ${rd}, ${rs}, ${rt}"),
        Decoded::Addu { rd, rs, rt } => format!("addu ${rd}, ${rs}, ${rt}"),
        Decoded::And { rd, rs, rt } => format!("and  ${rd}, ${rs}, ${rt}"),
        Decoded::Or { rd, rs, rt } => format!("or   ${rd}, ${rs}, ${rt}"),
        Decoded::Sltu { rd, rs, rt } => format!("sltu ${rd}, ${rs}, ${rt}"),
        Decoded::J { imm26 } => format!("j    0x{:08X}", jump_target(pc, imm26)),
        Decoded::Jal { imm26 } => format!("jal  0x{:08X}", jump_target(pc, imm26)),
        Decoded::Beq { rs, rt, imm16_se } => format!("beq  ${rs}, ${rt}, {}", imm16_se as i32),
        Decoded::Bne { rs, rt, imm16_se } => format!("bne  ${rs}, ${rt}, {}", imm16_se as i32),
        Decoded::Addi { rt, rs, imm16_se } => format!("addi ${rt}, ${rs}, {}", imm16_se as i32),
        Decoded::Addiu { rt, rs, imm16_se } => format!("addiu ${rt}, ${rs}, {}", imm16_se as i32),
        Decoded::Andi { rt, rs, imm16 } => format!("andi ${rt}, ${rs}, 0x{imm16:04X}"),
        Decoded::Ori { rt, rs, imm16 } => format!("ori  ${rt}, ${rs}, 0x{imm16:04X}"),
        Decoded::Lui { rt, imm16 } => format!("lui  ${rt}, 0x{imm16:04X}"),
        Decoded::Mfc0 { rt, rd } => format!("mfc0 ${rt}, ${rd}"),
        Decoded::Mtc0 { rt, rd } => format!("mtc0 ${rt}, ${rd}"),
        Decoded::Lb { rt, rs, imm16_se } => format!("lb   ${rt}, {}(${rs})", imm16_se as i32),
        Decoded::Lw { rt, rs, imm16_se } => format!("lw   ${rt}, {}(${rs})", imm16_se as i32),
        Decoded::Sb { rt, rs, imm16_se } => format!("sb   ${rt}, {}(${rs})", imm16_se as i32),
        Decoded::Sh { rt, rs, imm16_se } => format!("sh   ${rt}, {}(${rs})", imm16_se as i32),
        Decoded::Sw { rt, rs, imm16_se } => format!("sw   ${rt}, {}(${rs})", imm16_se as i32),
        Decoded::Unknown {
            raw,
            primary,
            secondary,
            cop_op,
        } => format!(
            "??? 0x{raw:08X} (primary=0x{primary:02X} secondary=0x{secondary:02X} cop_op=0x{cop_op:02X})"
        ),
    }
}

/// `(pc & 0xF0000000) | (imm26 << 2)`, the same target math `Cpu::op_j`
/// uses; `pc` here is the already-bumped fetch address.
fn jump_target(pc: u32, imm26: u32) -> u32 {
    (pc & 0xF000_0000) | (imm26 << 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disassembles_lui() {
        assert_eq!(
            disassemble(Decoded::Lui { rt: 1, imm16: 0xDEAD }, 0),
            "lui  $1, 0xDEAD"
        );
    }

    #[test]
    fn disassembles_negative_immediates_as_signed() {
        assert_eq!(
            disassemble(
                Decoded::Addiu {
                    rt: 1,
                    rs: 0,
                    imm16_se: 0xFFFF_FFFF
                },
                0
            ),
            "addiu $1, $0, -1"
        );
    }

    #[test]
    fn disassembles_j_with_resolved_absolute_target() {
        let rendered = disassemble(Decoded::J { imm26: 0x0010_0000 }, 0x8000_1004);
        assert_eq!(rendered, "j    0x80400000");
    }

    #[test]
    fn disassembles_load_store_with_offset_syntax() {
        assert_eq!(
            disassemble(
                Decoded::Sw {
                    rt: 2,
                    rs: 1,
                    imm16_se: 0xFFFF_FFF0
                },
                0
            ),
            "sw   $2, -16($1)"
        );
    }

    #[test]
    fn disassembles_unknown_without_panicking() {
        let rendered = disassemble(
            Decoded::Unknown {
                raw: 0xFFFF_FFFF,
                primary: 0x3F,
                secondary: 0x3F,
                cop_op: 0,
            },
            0,
        );
        assert!(rendered.starts_with("???"));
    }
}
