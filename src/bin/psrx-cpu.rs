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

//! Headless entry point (C11): load a BIOS, step the CPU until `max_steps`
//! is reached (or forever), optionally tracing every retired instruction.

use std::process::ExitCode;

use env_logger::Env;
use psrx::core::config::Config;
use psrx::core::cpu::disassembler::disassemble;
use psrx::core::cpu::Cpu;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(fault) => {
            eprintln!("psrx-cpu: {fault}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("loading BIOS from {}", config.bios_path.display());

    let mut cpu = match Cpu::with_start_pc(&config.bios_path, config.start_pc) {
        Ok(cpu) => cpu,
        Err(fault) => {
            eprintln!("psrx-cpu: {fault}");
            return ExitCode::FAILURE;
        }
    };

    loop {
        if let Some(max_steps) = config.max_steps {
            if cpu.step_count() >= max_steps {
                break;
            }
        }

        if config.trace {
            let pc = cpu.pc();
            let pending = cpu.pending_instruction();
            println!("{:08X}: {}", pc, disassemble(pending, pc));
        }

        if let Err(fault) = cpu.step() {
            eprintln!(
                "psrx-cpu: fault at step {} (pc=0x{:08X}): {fault}",
                cpu.step_count(),
                cpu.prev_pc()
            );
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
