//! `std::io::Write` adapter
//!
//! Lets any [`OutputStream`] be used where the standard library expects a
//! writer (`write!`, `io::copy`, serializers). Stream errors are converted
//! with `From<StreamError> for io::Error`, and `From<io::Error> for
//! StreamError` turns `Closed` and `OutOfRange` back into themselves.

use std::io;

use crate::traits::OutputStream;

/// Wraps an [`OutputStream`] as an `io::Write`
///
/// ```rust
/// use std::io::Write;
/// use saife_core::stream::{MemoryOutputStream, StreamWriter};
///
/// let mut writer = StreamWriter::new(MemoryOutputStream::new());
/// write!(writer, "id={}", 7)?;
/// assert_eq!(writer.get_ref().contents(), b"id=7");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct StreamWriter<S> {
    inner: S,
}

impl<S: OutputStream> StreamWriter<S> {
    /// Wrap `inner`
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Borrow the stream
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Mutably borrow the stream
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Unwrap the stream without closing it
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: OutputStream> io::Write for StreamWriter<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
