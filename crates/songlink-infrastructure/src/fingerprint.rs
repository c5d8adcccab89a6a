// SPDX-License-Identifier: GPL-3.0-or-later
//! Cache keys.
//!
//! A fingerprint is the key-sorted JSON encoding of
//! `{album, artist, query, v}` with `", "` and `": "` separators and
//! non-ASCII text kept verbatim. Absent values encode as `""`.

use anyhow::Result;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// Bumped whenever the key layout or the normalization feeding it changes.
pub const FINGERPRINT_VERSION: u32 = 1;

// Field order is the sorted key order.
#[derive(Serialize)]
struct Payload<'a> {
    album: &'a str,
    artist: &'a str,
    query: &'a str,
    v: u32,
}

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

pub fn fingerprint(artist: Option<&str>, album: Option<&str>, query: Option<&str>) -> Result<String> {
    let payload = Payload {
        album: album.unwrap_or_default(),
        artist: artist.unwrap_or_default(),
        query: query.unwrap_or_default(),
        v: FINGERPRINT_VERSION,
    };

    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    payload.serialize(&mut serializer)?;
    Ok(String::from_utf8(out)?)
}
