/*!
 * User Memory
 * Copy-out primitive into a process's address space
 */

use super::types::{SyscallError, SyscallResult};
use crate::core::types::UserAddr;

/// Destination address space of a syscall
pub trait UserMemory {
    /// Copy `src` to user address `dst`; fails without writing anything if any byte is unmapped
    fn copy_out(&mut self, dst: UserAddr, src: &[u8]) -> SyscallResult<()>;
}

/// A single contiguous mapped region of user memory
#[derive(Debug, Clone)]
pub struct AddressSpace {
    base: UserAddr,
    bytes: Vec<u8>,
}

impl AddressSpace {
    /// Map `size` zeroed bytes starting at `base`
    ///
    /// The mapping is clipped so it never reaches past `UserAddr::MAX`.
    pub fn new(base: UserAddr, size: usize) -> Self {
        let room = usize::try_from(UserAddr::MAX - base).unwrap_or(usize::MAX);
        Self {
            base,
            bytes: vec![0; size.min(room)],
        }
    }

    #[inline]
    pub fn base(&self) -> UserAddr {
        self.base
    }

    /// One past the last mapped address
    #[inline]
    pub fn end(&self) -> UserAddr {
        self.base + self.bytes.len() as UserAddr
    }

    /// Read `len` bytes at `addr`
    pub fn read(&self, addr: UserAddr, len: usize) -> SyscallResult<&[u8]> {
        let range = self.range(addr, len)?;
        Ok(&self.bytes[range])
    }

    /// Everything mapped from `addr` to the end of the region
    pub fn read_to_end(&self, addr: UserAddr) -> SyscallResult<&[u8]> {
        let len = self.end().saturating_sub(addr) as usize;
        self.read(addr, len)
    }

    fn range(&self, addr: UserAddr, len: usize) -> SyscallResult<std::ops::Range<usize>> {
        let fault = || SyscallError::invalid_address(addr, len);
        let start = addr
            .checked_sub(self.base)
            .and_then(|offset| usize::try_from(offset).ok())
            .ok_or_else(fault)?;
        let end = start.checked_add(len).ok_or_else(fault)?;
        if end > self.bytes.len() {
            return Err(fault());
        }
        Ok(start..end)
    }
}

impl UserMemory for AddressSpace {
    fn copy_out(&mut self, dst: UserAddr, src: &[u8]) -> SyscallResult<()> {
        let range = self.range(dst, src.len())?;
        self.bytes[range].copy_from_slice(src);
        Ok(())
    }
}
