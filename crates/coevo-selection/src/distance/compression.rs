//! Normalized compression distance (NCD).
//!
//! NCD approximates the information distance between two sequences with a
//! general-purpose compressor:
//!
//! ```text
//! NCD(x, y) = (C(xy) - min(C(x), C(y))) / max(C(x), C(y))
//! ```
//!
//! where `C` is the compressed size. Similar sequences compress well together,
//! so `C(xy)` stays close to the larger of `C(x)` and `C(y)`.
//!
//! Real compressors are not ideal: headers and block boundaries push results
//! slightly below 0 or above the configured maximum. Such values are clamped to
//! `[0, 1]` and reported through `tracing`, since they reflect compressor noise
//! rather than a failure.

use std::io::Write as _;

use flate2::{Compression, write::DeflateEncoder};
use tracing::warn;

/// Returns the DEFLATE-compressed size of `data`.
fn compressed_len(data: &[u8]) -> usize {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(data)
        .expect("writing to an in-memory buffer never fails");
    encoder
        .finish()
        .expect("writing to an in-memory buffer never fails")
        .len()
}

/// Computes the NCD between `x` and `y`, divided by `max_ncd` and clamped to `[0, 1]`.
///
/// Identical sequences are at distance `0.0` without running the compressor.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn normalized_compression_distance(x: &[u8], y: &[u8], max_ncd: f64) -> f64 {
    if x == y {
        return 0.0;
    }

    let x_len = compressed_len(x);
    let y_len = compressed_len(y);
    let xy_len = compressed_len(&[x, y].concat());

    let min = x_len.min(y_len) as f64;
    let max = x_len.max(y_len) as f64;
    let distance = (xy_len as f64 - min) / max / max_ncd;

    if distance < 0.0 {
        warn!(distance, x_len, y_len, xy_len, "NCD below 0.0, clamping");
        return 0.0;
    }
    if distance > 1.0 {
        warn!(distance, x_len, y_len, xy_len, "NCD above 1.0, clamping");
        return 1.0;
    }
    distance
}

/// Serializes a token trace into the byte stream fed to the compressor.
#[must_use]
pub fn concat_tokens(tokens: &[String]) -> Vec<u8> {
    tokens.concat().into_bytes()
}
