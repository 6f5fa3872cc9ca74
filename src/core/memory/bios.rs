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

//! The BIOS ROM image (C1): a fixed 512 KiB, read-only byte store.

use crate::core::error::{Fault, Result};
use std::fs;
use std::path::Path;

/// Exact size of a PlayStation BIOS image, in bytes.
pub const BIOS_SIZE: usize = 0x80000;

/// Immutable 512 KiB firmware image.
///
/// Constructed once from a file at CPU startup; never mutated afterward.
/// Out-of-range offsets are not checked here — the [`crate::core::memory::Bus`]
/// is responsible for classifying and bounding every address before it
/// reaches the store.
pub struct Bios {
    data: Box<[u8; BIOS_SIZE]>,
}

impl Bios {
    /// Load a BIOS image from `path`.
    ///
    /// Fails with [`Fault::IoError`] if the file cannot be read or is not
    /// exactly [`BIOS_SIZE`] bytes. A short or long file both fail: the
    /// interpreter treats a file of the wrong length as corrupt rather than
    /// truncating or zero-padding it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|cause| {
            let fault = Fault::IoError {
                path: path.display().to_string(),
                cause,
            };
            log::error!("{fault}");
            fault
        })?;

        if bytes.len() != BIOS_SIZE {
            let cause = io_error_wrong_size(bytes.len());
            let fault = Fault::IoError {
                path: path.display().to_string(),
                cause,
            };
            log::error!("{fault}");
            return Err(fault);
        }

        let mut data = Box::new([0u8; BIOS_SIZE]);
        data.copy_from_slice(&bytes);
        Ok(Self { data })
    }

    /// Build a BIOS image directly from bytes already in memory (used by tests).
    #[cfg(test)]
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        let mut data = Box::new([0u8; BIOS_SIZE]);
        let len = bytes.len().min(BIOS_SIZE);
        data[..len].copy_from_slice(&bytes[..len]);
        Self { data }
    }

    /// Little-endian byte read at `off`.
    #[inline]
    pub fn load8(&self, off: u32) -> u8 {
        self.data[off as usize]
    }

    /// Little-endian 32-bit read at `off`. `off` must be 4-aligned; callers
    /// (the bus) are responsible for enforcing that.
    #[inline]
    pub fn load32(&self, off: u32) -> u32 {
        let off = off as usize;
        u32::from_le_bytes([
            self.data[off],
            self.data[off + 1],
            self.data[off + 2],
            self.data[off + 3],
        ])
    }
}

fn io_error_wrong_size(got: usize) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        format!("expected a {BIOS_SIZE}-byte BIOS image, got {got} bytes"),
    )
}
