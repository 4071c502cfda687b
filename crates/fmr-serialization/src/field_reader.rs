// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use fmr_structures::FmrError;
use std::io::{self, Read};

/// Maps a failed read of `field` to an [`FmrError`]. End of input becomes `TruncatedInput`.
pub(crate) fn truncated_at(field: &'static str) -> impl FnOnce(io::Error) -> FmrError {
    move |error| match error.kind() {
        io::ErrorKind::UnexpectedEof => FmrError::TruncatedInput { field },
        _ => FmrError::Io(error),
    }
}

/// Reads and drops `N` reserved bytes.
pub(crate) fn skip_reserved<R: Read, const N: usize>(
    reader: &mut R,
    field: &'static str,
) -> Result<(), FmrError> {
    let mut reserved = [0u8; N];
    reader.read_exact(&mut reserved).map_err(truncated_at(field))
}

/// Passes reads through while counting how many bytes have been consumed.
pub(crate) struct CountingReader<'a, R: Read> {
    inner: &'a mut R,
    bytes_read: u64,
}

impl<'a, R: Read> CountingReader<'a, R> {
    pub(crate) fn new(inner: &'a mut R) -> Self {
        Self {
            inner,
            bytes_read: 0,
        }
    }

    pub(crate) fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

impl<R: Read> Read for CountingReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let number_read = self.inner.read(buf)?;
        self.bytes_read += number_read as u64;
        Ok(number_read)
    }
}
