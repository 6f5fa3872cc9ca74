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

//! psrx-cpu: a MIPS R3000A interpreter and memory bus for the PlayStation.
//!
//! This crate covers the CPU and its address space only: the BIOS ROM, main
//! RAM, and the handful of MMIO registers the BIOS touches before any GPU,
//! SPU, DMA, or interrupt controller exists. Everything downstream of the
//! bus (video, audio, the CD-ROM, the gamepad, the GTE) is out of scope.
//!
//! # Example
//!
//! ```no_run
//! use psrx::core::cpu::Cpu;
//!
//! let mut cpu = Cpu::new("scph1001.bin")?;
//! cpu.step()?;
//! assert_eq!(cpu.register(0), 0); // r0 is always 0
//! # Ok::<(), psrx::core::error::Fault>(())
//! ```
//!
//! # Modules
//!
//! - [`core::cpu`]: the MIPS R3000A interpreter, its decoder, and COP0
//! - [`core::memory`]: the address bus, BIOS ROM, and main RAM
//! - [`core::error`]: the [`core::error::Fault`] taxonomy returned by every
//!   fallible operation
//! - [`core::config`]: CLI/TOML/env configuration for the headless runner

pub mod core;

pub use core::error::{Fault, Result};
