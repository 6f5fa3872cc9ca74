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

use std::io::Write;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use psrx::core::cpu::Cpu;
use psrx::core::memory::bios::BIOS_SIZE;

/// A tight loop that never branches out of BIOS ROM: LUI/ORI/SW/LW, looping
/// back to itself with BEQ. Exercises decode, both register files, the
/// load-delay slot, and the bus on every iteration. `r1` is reset to 0x10
/// by LUI/ORI every pass, so the SW/LW address never drifts off alignment.
fn write_looping_bios() -> tempfile::NamedTempFile {
    let words: [u32; 5] = [
        0x3C01_0000, // LUI  r1, 0x0000
        0x3421_0010, // ORI  r1, r1, 0x0010
        0xAC20_0000, // SW   r0, 0(r1)
        0x8C22_0000, // LW   r2, 0(r1)
        0x1000_FFFB, // BEQ  r0, r0, -5 (back to the top)
    ];
    let mut bytes = vec![0u8; BIOS_SIZE];
    for (i, word) in words.iter().enumerate() {
        bytes[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
    }

    let mut file = tempfile::NamedTempFile::new().expect("create temp BIOS file");
    file.write_all(&bytes).expect("write temp BIOS file");
    file
}

fn bench_step(c: &mut Criterion) {
    let bios_file = write_looping_bios();
    let mut cpu = Cpu::new(bios_file.path()).expect("construct CPU over the bench BIOS");

    c.bench_function("cpu_step", |b| {
        b.iter(|| {
            black_box(cpu.step().unwrap());
        });
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
