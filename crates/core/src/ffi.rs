//! C FFI bindings, for embedding the hasher in non-Rust miners.

use crate::{Hasher, HASH_SIZE, INPUT_LEN};
use core::slice;

/// Opaque hasher handle for FFI callers.
pub struct XelisHasher {
    inner: Hasher,
}

/// Create a new hasher instance. Caller must free it with
/// [`xelis_hash_free`].
#[unsafe(no_mangle)]
pub extern "C" fn xelis_hash_new() -> *mut XelisHasher {
    let hasher = Box::new(XelisHasher {
        inner: Hasher::new(),
    });
    Box::into_raw(hasher)
}

/// Free a hasher instance created by [`xelis_hash_new`].
#[unsafe(no_mangle)]
pub extern "C" fn xelis_hash_free(hasher: *mut XelisHasher) {
    if !hasher.is_null() {
        unsafe {
            let _ = Box::from_raw(hasher);
        }
    }
}

/// Compute the hash of a 112-byte input.
///
/// - `hasher`: pointer from [`xelis_hash_new`]
/// - `input`: pointer to exactly [`INPUT_LEN`] bytes
/// - `output`: pointer to a buffer of at least [`HASH_SIZE`] bytes
///
/// Does nothing if any pointer is null. Reading fewer than `INPUT_LEN`
/// bytes from `input`, or writing fewer than `HASH_SIZE` bytes to `output`,
/// is the caller's responsibility to avoid by allocating correctly sized
/// buffers.
#[unsafe(no_mangle)]
pub extern "C" fn xelis_hash_compute(
    hasher: *mut XelisHasher,
    input: *const u8,
    output: *mut u8,
) {
    if hasher.is_null() || input.is_null() || output.is_null() {
        return;
    }

    unsafe {
        let hasher = &mut *hasher;
        let input_slice = slice::from_raw_parts(input, INPUT_LEN);
        let input_array: [u8; INPUT_LEN] = input_slice.try_into().unwrap();
        let result = hasher.inner.hash(&input_array);

        let output_slice = slice::from_raw_parts_mut(output, HASH_SIZE);
        output_slice.copy_from_slice(&result);
    }
}
