//! CurrentNote (0x69): the last played note and the recent-note list

use crate::bits::BitStream;
use crate::error::Result;
use crate::model::{Note, Patch};

/// The 5-bit count field stores `len - 1`
const MAX_NOTES: usize = 32;

fn read_note(bits: &mut BitStream) -> Result<Note> {
    let [note, attack, release] = bits.read_fields([7, 7, 7])?;
    Ok(Note {
        note: note as u8,
        attack: attack as u8,
        release: release as u8,
    })
}

fn write_note(bits: &mut BitStream, note: &Note) -> Result<()> {
    bits.write_fields(
        [7, 7, 7],
        [note.note, note.attack, note.release].map(u32::from),
    )
}

pub(super) fn parse(patch: &mut Patch, bits: &mut BitStream) -> Result<()> {
    patch.last_note = read_note(bits)?;
    let count = bits.read_bits(5)? as usize + 1;
    patch.notes = (0..count)
        .map(|_| read_note(bits))
        .collect::<Result<_>>()?;
    Ok(())
}

pub(super) fn format(patch: &Patch, bits: &mut BitStream) -> Result<()> {
    if patch.notes.is_empty() {
        // nothing played yet: middle C without velocity, listed once
        let note = Note::default();
        write_note(bits, &note)?;
        bits.write_bits(5, 0)?;
        return write_note(bits, &note);
    }

    if patch.notes.len() > MAX_NOTES {
        tracing::warn!(
            "{} recent notes, only the first {} are written",
            patch.notes.len(),
            MAX_NOTES
        );
    }
    let notes = &patch.notes[..patch.notes.len().min(MAX_NOTES)];
    write_note(bits, &patch.last_note)?;
    bits.write_bits(5, (notes.len() - 1) as u32)?;
    for note in notes {
        write_note(bits, note)?;
    }
    Ok(())
}
