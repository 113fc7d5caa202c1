//! Map snapshot persistence.
//!
//! Provides [`MapEncoder`] and [`MapDecoder`] for persisting a [`GridMap`]
//! to a byte stream.
//!
//! ## Wire format
//!
//! ```text
//! [width: i32 LE]
//! [height: i32 LE]
//! for x in 0..width:
//!   for y in 0..height:
//!     [tile: u8]   (0 = collision, 1 = road)
//! ```

use std::io::{self, Read, Write};

use gridway_core::Point;

use crate::error::{Error, Result};
use crate::map::{GridMap, Tile, cell_count};

/// Header size: width(4) + height(4)
const HEADER_SIZE: usize = 8;

/// Serialize `map` into a fresh buffer.
pub fn to_bytes(map: &GridMap) -> Vec<u8> {
    let (w, h) = (map.width(), map.height());
    let mut buf = Vec::with_capacity(HEADER_SIZE + w as usize * h as usize);
    buf.extend_from_slice(&w.to_le_bytes());
    buf.extend_from_slice(&h.to_le_bytes());
    for x in 0..w {
        for y in 0..h {
            let tile = map.at(Point::new(x, y)).unwrap_or_default();
            buf.push(tile.as_byte());
        }
    }
    buf
}

/// Parse a snapshot produced by [`to_bytes`]. Bytes past the last cell
/// are rejected; use [`MapDecoder`] to read several maps from one stream.
pub fn from_bytes(bytes: &[u8]) -> Result<GridMap> {
    let mut decoder = MapDecoder::new(bytes);
    let map = decoder.decode()?;
    let rest = decoder.into_inner().len();
    if rest != 0 {
        return Err(Error::Snapshot(format!(
            "{rest} trailing bytes after the last cell"
        )));
    }
    Ok(map)
}

// ---------------------------------------------------------------------------
// MapEncoder
// ---------------------------------------------------------------------------

/// Encodes [`GridMap`]s to a byte-oriented writer.
pub struct MapEncoder<W: Write> {
    writer: W,
}

impl<W: Write> MapEncoder<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a single map.
    pub fn encode(&mut self, map: &GridMap) -> io::Result<()> {
        self.writer.write_all(&to_bytes(map))
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Consume the encoder, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

// ---------------------------------------------------------------------------
// MapDecoder
// ---------------------------------------------------------------------------

/// Decodes [`GridMap`]s from a byte-oriented reader.
pub struct MapDecoder<R: Read> {
    reader: R,
}

impl<R: Read> MapDecoder<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read one map.
    ///
    /// Truncated input surfaces as [`Error::Io`] with
    /// [`io::ErrorKind::UnexpectedEof`]; bad dimensions or tile bytes as
    /// [`Error::Snapshot`].
    pub fn decode(&mut self) -> Result<GridMap> {
        let mut header = [0u8; HEADER_SIZE];
        self.reader.read_exact(&mut header)?;
        let [w0, w1, w2, w3, h0, h1, h2, h3] = header;
        let width = i32::from_le_bytes([w0, w1, w2, w3]);
        let height = i32::from_le_bytes([h0, h1, h2, h3]);

        let Some(len) = cell_count(width, height) else {
            return Err(Error::Snapshot(format!(
                "map size {width}x{height} is not a valid map size"
            )));
        };

        let mut data = Vec::with_capacity(len.min(1 << 20));
        self.reader.by_ref().take(len as u64).read_to_end(&mut data)?;
        if data.len() != len {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("snapshot has {} of {} cell bytes", data.len(), len),
            )));
        }

        let mut map = GridMap::new(width, height)?;
        let mut bytes = data.into_iter();
        for x in 0..width {
            for y in 0..height {
                let b = bytes.next().unwrap_or_default();
                let tile = Tile::from_byte(b).ok_or_else(|| {
                    Error::Snapshot(format!("invalid tile byte {b} at ({x}, {y})"))
                })?;
                map.set(Point::new(x, y), tile);
            }
        }
        Ok(map)
    }

    /// Consume the decoder, returning the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
