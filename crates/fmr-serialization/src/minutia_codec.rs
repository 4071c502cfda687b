// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The 6 byte minutia record: `(type:2 | x:14)`, `(reserved:2 | y:14)`, direction, quality.

use crate::field_reader::truncated_at;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use fmr_structures::{FmrResult, Minutia, MinutiaType};
use std::io::{Read, Write};

pub const MINUTIA_BYTE_COUNT: usize = 6;

const COORDINATE_MASK: u16 = Minutia::MAX_COORDINATE;

const TYPE_SHIFT: u32 = Minutia::NUMBER_OF_COORDINATE_BITS;

pub fn read_minutia<R: Read>(reader: &mut R) -> FmrResult<Minutia> {
    let type_and_x = reader
        .read_u16::<BigEndian>()
        .map_err(truncated_at("minutia type and x"))?;
    let y_word = reader
        .read_u16::<BigEndian>()
        .map_err(truncated_at("minutia y"))?;
    let direction = reader.read_u8().map_err(truncated_at("minutia direction"))?;
    let quality = reader.read_u8().map_err(truncated_at("minutia quality"))?;

    Ok(Minutia::new(
        MinutiaType::from_bits((type_and_x >> TYPE_SHIFT) as u8),
        type_and_x & COORDINATE_MASK,
        y_word & COORDINATE_MASK, // top 2 bits reserved
        direction,
        quality,
    ))
}

/// Writes one minutia. Coordinates are checked before anything is written.
pub fn write_minutia<W: Write>(minutia: &Minutia, writer: &mut W) -> FmrResult<()> {
    minutia.verify_coordinates()?;
    let type_and_x = ((minutia.minutia_type as u16) << TYPE_SHIFT) | minutia.x;
    writer.write_u16::<BigEndian>(type_and_x)?;
    writer.write_u16::<BigEndian>(minutia.y)?;
    writer.write_u8(minutia.direction)?;
    writer.write_u8(minutia.quality)?;
    Ok(())
}
