//! Total Control Lighting frame encoding.
//!
//! Each LED takes a 4-byte frame `[flag, blue, green, red]`. The flag byte
//! repeats the top two bits of every channel, inverted, so the strip can
//! detect framing errors. A buffer is one zero start frame, the LED frames,
//! then two zero end frames to latch the last pixels.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::sink::FrameSink;
use crate::types::Rgb;

/// Bytes per LED frame
pub const FRAME_BYTES: usize = 4;

/// Start frame plus two end frames
const FRAMING_FRAMES: usize = 3;

/// Linux `EMSGSIZE`: the SPI driver rejects transfers above its buffer size.
const EMSGSIZE: i32 = 90;

/// Flag byte for a color
pub fn flag(color: Rgb) -> u8 {
    let mut flag = (color.r & 0xc0) >> 6;
    flag |= (color.g & 0xc0) >> 4;
    flag |= (color.b & 0xc0) >> 2;
    !flag
}

/// Encoded size of a buffer holding `leds` pixels
pub fn buffer_len(leds: usize) -> usize {
    (leds + FRAMING_FRAMES) * FRAME_BYTES
}

/// Encode a full TCL buffer for `pixels` into `out`
pub fn encode_into(pixels: &[Rgb], out: &mut Vec<u8>) {
    out.clear();
    out.reserve(buffer_len(pixels.len()));
    out.extend_from_slice(&[0; FRAME_BYTES]);
    for &color in pixels {
        out.extend_from_slice(&[flag(color), color.b, color.g, color.r]);
    }
    out.extend_from_slice(&[0; FRAME_BYTES * 2]);
}

/// Write the whole buffer, retrying interrupted writes and halving the chunk
/// size whenever the device reports the transfer as too large.
pub fn write_all_chunked<W: Write>(dev: &mut W, mut buf: &[u8]) -> io::Result<()> {
    let mut attempt = buf.len();
    while !buf.is_empty() {
        match dev.write(&buf[..attempt.min(buf.len())]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "device accepted no bytes",
                ))
            }
            Ok(n) => buf = &buf[n..],
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.raw_os_error() == Some(EMSGSIZE) && attempt > 1 => attempt /= 2,
            Err(e) => return Err(e),
        }
        attempt = attempt.min(buf.len()).max(1);
    }
    dev.flush()
}

/// Streams TCL-encoded frames to a writer (normally the SPI device node)
#[derive(Debug)]
pub struct TclSink<W: Write> {
    dev: W,
    buf: Vec<u8>,
}

impl<W: Write> TclSink<W> {
    pub fn new(dev: W) -> Self {
        Self { dev, buf: Vec::new() }
    }

    pub fn get_ref(&self) -> &W {
        &self.dev
    }

    pub fn into_inner(self) -> W {
        self.dev
    }
}

impl<W: Write> FrameSink for TclSink<W> {
    fn send(&mut self, pixels: &[Rgb]) -> Result<()> {
        encode_into(pixels, &mut self.buf);
        write_all_chunked(&mut self.dev, &self.buf).context("tcl: frame write failed")
    }
}
