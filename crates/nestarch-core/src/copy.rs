//! Entry materialization copy loop with a reusable buffer.
//!
//! One traversal allocates a single [`CopyBuffer`] sized by
//! [`TraversalConfig::buffer_size`](crate::TraversalConfig::buffer_size) and
//! reuses it for every entry it writes to scratch storage.

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::Result;
use crate::TraversalError;

/// Heap buffer reused across copy operations within one traversal.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a zeroed copy buffer of `size` bytes (at least 1).
    #[must_use]
    pub fn with_size(size: usize) -> Self {
        Self {
            buf: vec![0u8; size.max(1)].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

/// Copies everything from `reader` into `writer` through `buffer`.
///
/// Interrupted reads are retried. Returns the number of bytes copied.
///
/// # Errors
///
/// Returns [`TraversalError::Io`] if reading or writing fails.
///
/// # Examples
///
/// ```
/// use nestarch_core::copy::CopyBuffer;
/// use nestarch_core::copy::copy_with_buffer;
///
/// # fn main() -> Result<(), nestarch_core::TraversalError> {
/// let mut buffer = CopyBuffer::with_size(4);
/// let mut input: &[u8] = b"nested bytes";
/// let mut output = Vec::new();
///
/// let copied = copy_with_buffer(&mut input, &mut output, &mut buffer)?;
/// assert_eq!(copied, 12);
/// # Ok(())
/// # }
/// ```
pub fn copy_with_buffer<R, W>(reader: &mut R, writer: &mut W, buffer: &mut CopyBuffer) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(TraversalError::Io(e)),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;
        total = total.saturating_add(bytes_read as u64);
    }

    Ok(total)
}
