/*!
 * Wire Encoding
 * bincode layout of records copied out to user space
 *
 * Fixed-width little-endian integers in field-declaration order; enums as a
 * u32 variant index; strings as a u64 length followed by UTF-8 bytes.
 */

use super::types::{SyscallError, SyscallResult};
use serde::{de::DeserializeOwned, Serialize};

/// Encode a record for copy-out
#[inline]
pub fn to_vec<T: Serialize>(value: &T) -> SyscallResult<Vec<u8>> {
    bincode::serialize(value).map_err(|e| SyscallError::encoding(e.to_string()))
}

/// Decode a record read back from user memory (trailing bytes are ignored)
#[inline]
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> SyscallResult<T> {
    bincode::deserialize(bytes).map_err(|e| SyscallError::encoding(e.to_string()))
}

/// Encoded size of a record
#[inline]
pub fn serialized_size<T: Serialize>(value: &T) -> SyscallResult<usize> {
    bincode::serialized_size(value)
        .map(|size| size as usize)
        .map_err(|e| SyscallError::encoding(e.to_string()))
}
