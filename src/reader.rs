//! Streaming Line Reader
//!
//! Reads one line of unbounded length at a time from a byte stream.
//!
//! The line buffer starts at one chunk and grows by one chunk whenever it
//! fills up before a `\n` is seen. Every growth step is requested through
//! the store's [`BufferAllocator`], so a refused or failed allocation ends
//! the read with [`ConfError::OutOfMemory`](crate::ConfError::OutOfMemory).

use std::io::{self, BufRead, BufReader, Read};
use std::sync::Arc;

use crate::alloc::{self, BufferAllocator};
use crate::error::{ConfError, Result};

/// Reads `\n`-terminated lines from a stream
pub struct LineReader<R> {
    inner: BufReader<R>,
    chunk_size: usize,
    alloc: Arc<dyn BufferAllocator>,
}

impl<R: Read> LineReader<R> {
    /// Wrap `inner`, growing line buffers `chunk_size` bytes at a time
    pub fn new(inner: R, chunk_size: usize, alloc: Arc<dyn BufferAllocator>) -> Result<Self> {
        if chunk_size == 0 {
            return Err(ConfError::InvalidArgument(
                "chunk size must be non-zero".to_string(),
            ));
        }

        Ok(Self {
            inner: BufReader::new(inner),
            chunk_size,
            alloc,
        })
    }

    /// Read the next line
    ///
    /// The terminator (`\n` or `\r\n`) is not included. Returns `Ok(None)`
    /// only when the stream is exhausted before any byte was read; a final
    /// line without a terminator is still returned.
    pub fn next_line(&mut self) -> Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        alloc::grow(self.alloc.as_ref(), &mut line, self.chunk_size)?;

        let mut read_any = false;
        loop {
            let available = match self.inner.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            if available.is_empty() {
                break;
            }
            read_any = true;

            let (take, found_newline) = match available.iter().position(|&b| b == b'\n') {
                Some(pos) => (pos + 1, true),
                None => (available.len(), false),
            };

            let content = if found_newline {
                &available[..take - 1]
            } else {
                &available[..take]
            };

            let mut copied = 0;
            while copied < content.len() {
                let room = line.capacity() - line.len();
                if room == 0 {
                    alloc::grow(self.alloc.as_ref(), &mut line, self.chunk_size)?;
                    continue;
                }
                let n = room.min(content.len() - copied);
                line.extend_from_slice(&content[copied..copied + n]);
                copied += n;
            }

            self.inner.consume(take);

            if found_newline {
                break;
            }
        }

        if !read_any {
            return Ok(None);
        }

        if line.last() == Some(&b'\r') {
            line.pop();
        }

        Ok(Some(line))
    }

    /// Iterate over all remaining lines
    pub fn lines(self) -> Lines<R> {
        Lines {
            reader: self,
            done: false,
        }
    }

    /// Chunk size this reader grows by
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

/// Iterator over the lines of a [`LineReader`]
///
/// Stops after the first error.
pub struct Lines<R> {
    reader: LineReader<R>,
    done: bool,
}

impl<R: Read> Iterator for Lines<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.next_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
