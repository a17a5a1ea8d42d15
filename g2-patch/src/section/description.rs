//! PatchDescription (0x21) and PerformanceDescription (0x11)

use std::io::SeekFrom;

use crate::bits::BitStream;
use crate::error::Result;
use crate::model::{PatchDescription, Performance};

/// The description fields start after 7 bytes that are always written as zero
const DESCRIPTION_OFFSET: u64 = 7 * 8;

/// Slot names are 16 bytes, NUL terminated when shorter
const SLOT_NAME_LEN: usize = 16;

pub(super) fn parse_patch(desc: &mut PatchDescription, bits: &mut BitStream) -> Result<()> {
    bits.seek_bit(SeekFrom::Start(DESCRIPTION_OFFSET))?;
    let [reserved, voices, height, unk2] = bits.read_fields([5, 5, 14, 3])?;
    let [red, blue, yellow, orange, green, purple, white] = bits.read_fields([1; 7])?;
    let [monopoly, variation, category] = bits.read_fields([2, 8, 8])?;

    *desc = PatchDescription {
        reserved: reserved as u8,
        voices: voices as u8,
        height: height as u16,
        unk2: unk2 as u8,
        red: red != 0,
        blue: blue != 0,
        yellow: yellow != 0,
        orange: orange != 0,
        green: green != 0,
        purple: purple != 0,
        white: white != 0,
        monopoly: monopoly as u8,
        variation: variation as u8,
        category: category as u8,
    };
    Ok(())
}

pub(super) fn format_patch(desc: &PatchDescription, bits: &mut BitStream) -> Result<()> {
    bits.seek_bit(SeekFrom::Start(DESCRIPTION_OFFSET))?;
    bits.write_fields(
        [5, 5, 14, 3],
        [
            desc.reserved as u32,
            desc.voices as u32,
            desc.height as u32,
            desc.unk2 as u32,
        ],
    )?;
    bits.write_fields(
        [1; 7],
        [
            desc.red,
            desc.blue,
            desc.yellow,
            desc.orange,
            desc.green,
            desc.purple,
            desc.white,
        ]
        .map(u32::from),
    )?;
    bits.write_fields(
        [2, 8, 8],
        [
            desc.monopoly as u32,
            desc.variation as u32,
            desc.category as u32,
        ],
    )?;
    // pad
    bits.write_bits(8, 0)
}

pub(super) fn parse_performance(perf: &mut Performance, bits: &mut BitStream) -> Result<()> {
    let [unk1, unk2, focus, unk3, range_select, bpm, split, clock, unk4, unk5] =
        bits.read_fields([8, 4, 2, 2, 8, 8, 8, 8, 8, 8])?;
    let desc = &mut perf.description;
    desc.unk1 = unk1 as u8;
    desc.unk2 = unk2 as u8;
    desc.focus = focus as u8;
    desc.unk3 = unk3 as u8;
    desc.range_select = range_select as u8;
    desc.bpm = bpm as u8;
    desc.split = split as u8;
    desc.clock = clock as u8;
    desc.unk4 = unk4 as u8;
    desc.unk5 = unk5 as u8;

    for slot in &mut perf.slots {
        slot.name = bits.read_string(SLOT_NAME_LEN)?;
        let [active, keyboard, hold, bank, patch, key_low, key_high, unk3, unk4, unk5] =
            bits.read_fields([8; 10])?;
        let d = &mut slot.description;
        d.active = active as u8;
        d.keyboard = keyboard as u8;
        d.hold = hold as u8;
        d.bank = bank as u8;
        d.patch = patch as u8;
        d.key_low = key_low as u8;
        d.key_high = key_high as u8;
        d.unk3 = unk3 as u8;
        d.unk4 = unk4 as u8;
        d.unk5 = unk5 as u8;
    }
    Ok(())
}

pub(super) fn format_performance(perf: &Performance, bits: &mut BitStream) -> Result<()> {
    let d = &perf.description;
    bits.write_fields(
        [8, 4, 2, 2, 8, 8, 8, 8, 8, 8],
        [
            d.unk1, d.unk2, d.focus, d.unk3, d.range_select, d.bpm, d.split, d.clock, d.unk4,
            d.unk5,
        ]
        .map(u32::from),
    )?;

    for slot in &perf.slots {
        bits.write_string(&slot.name, SLOT_NAME_LEN)?;
        let d = &slot.description;
        bits.write_fields(
            [8; 10],
            [
                d.active, d.keyboard, d.hold, d.bank, d.patch, d.key_low, d.key_high, d.unk3,
                d.unk4, d.unk5,
            ]
            .map(u32::from),
        )?;
    }
    Ok(())
}
