//! Tests for the section codec

use super::*;
use crate::catalog::{ModuleType, SignalRate};
use crate::model::{
    Knob, MorphMap, Note, ParamRef, PatchDescription, PortRef, SettingsParam,
};

fn catalog() -> ModuleCatalog {
    ModuleCatalog::from_types([
        ModuleType::new(1, "Keyboard")
            .output("Pitch", SignalRate::Control)
            .output("Gate", SignalRate::Logic),
        ModuleType::new(4, "2-Out")
            .input("InL", SignalRate::Audio)
            .input("InR", SignalRate::Audio)
            .param("Level", 100),
        ModuleType::new(7, "OscB")
            .input("Pitch", SignalRate::Control)
            .output("Out", SignalRate::Audio)
            .param("Coarse", 64)
            .param("Fine", 64)
            .mode("Waveform", 2),
        ModuleType::new(121, "SeqNote").param("Steps", 16),
    ])
}

/// VOICE: OscB(1), 2-Out(2), SeqNote(3). FX: Keyboard(1)
fn sample_patch(catalog: &ModuleCatalog) -> Patch {
    let mut patch = Patch::new();
    for id in [7, 4, 121] {
        patch.voice.add_module(catalog.require(id).unwrap()).unwrap();
    }
    patch.fx.add_module(catalog.require(1).unwrap()).unwrap();
    patch
}

/// Format `section` from `from`, parse it into `into`, and check that
/// formatting again gives the same bytes
fn reparse(section: Section, from: &Patch, into: &mut Patch, catalog: &ModuleCatalog) -> Vec<u8> {
    let payload = format_patch_section(section, from).unwrap();
    parse_patch_section(section.tag(), &payload, into, catalog).unwrap();
    assert_eq!(format_patch_section(section, into).unwrap(), payload);
    payload
}

// =============================================================================
// Framing and records
// =============================================================================

#[test]
fn test_section_tags() {
    for tag in [0x11, 0x21, 0x4a, 0x4d, 0x52, 0x5a, 0x5b, 0x5f, 0x60, 0x62, 0x65, 0x69, 0x6f] {
        assert_eq!(SectionTag::from_tag(tag).unwrap().tag(), tag);
    }
    assert_eq!(SectionTag::from_tag(0x99), None);
    assert!(!SectionTag::GlobalKnobAssignments.in_patch());
    assert!(SectionTag::TextPad.in_patch());
    assert_eq!(SectionTag::CableList.to_string(), "CableList");
}

#[test]
fn test_patch_section_order() {
    let tags: Vec<u8> = PATCH_SECTIONS.iter().map(|s| s.tag().tag()).collect();
    assert_eq!(
        tags,
        vec![
            0x21, 0x4a, 0x4a, 0x69, 0x52, 0x52, 0x4d, 0x4d, 0x4d, 0x65, 0x62, 0x60, 0x5b, 0x5b,
            0x5b, 0x5a, 0x5a, 0x6f
        ]
    );
}

#[test]
fn test_split_and_write_section() {
    let mut out = Vec::new();
    write_section(&mut out, SectionTag::TextPad, b"hi").unwrap();
    out.push(0xff);
    assert_eq!(&out[..3], &[0x6f, 0x00, 0x02]);

    let (tag, payload, rest) = split_section(&out).unwrap();
    assert_eq!((tag, payload, rest), (0x6f, &b"hi"[..], &[0xff][..]));

    assert!(matches!(
        split_section(&[0x6f, 0x00]),
        Err(G2Error::Truncated("section header"))
    ));
    assert!(matches!(
        split_section(&[0x6f, 0x00, 0x05, 1, 2]),
        Err(G2Error::Truncated("section payload"))
    ));

    let big = vec![0u8; 70_000];
    assert!(matches!(
        write_section(&mut Vec::new(), SectionTag::TextPad, &big),
        Err(G2Error::SectionTooLarge { len: 70_000, .. })
    ));
}

#[test]
fn test_patch_record_round_trip() {
    let catalog = catalog();
    let mut patch = sample_patch(&catalog);
    patch.text_pad = "init".to_string();
    patch.description.voices = 4;
    let voice = &patch.voice;
    let (out, inp) = (
        voice.find_module(1).unwrap().output("Out").unwrap(),
        voice.find_module(2).unwrap().input("InL").unwrap(),
    );
    patch.voice.connect(out, inp, 0).unwrap();

    let mut bytes = Vec::new();
    format_patch(&mut bytes, &patch).unwrap();
    let len = bytes.len();
    bytes.extend_from_slice(&[0x99, 0x00, 0x00]);

    let mut parsed = Patch::new();
    let rest = parse_patch(&bytes, &mut parsed, &catalog).unwrap();
    assert_eq!(rest, &[0x99, 0x00, 0x00]);
    assert_eq!(parsed.text_pad, "init");
    assert_eq!(parsed.voice.modules().len(), 3);
    assert_eq!(parsed.voice.netlist().len(), 1);

    let mut again = Vec::new();
    format_patch(&mut again, &parsed).unwrap();
    assert_eq!(again, bytes[..len]);
}

#[test]
fn test_patch_record_stops_at_next_description() {
    let catalog = catalog();
    let mut bytes = Vec::new();
    format_patch(&mut bytes, &Patch::new()).unwrap();
    let first = bytes.len();
    format_patch(&mut bytes, &Patch::new()).unwrap();

    let rest = parse_patch(&bytes, &mut Patch::new(), &catalog).unwrap();
    assert_eq!(rest.len(), bytes.len() - first);
    assert_eq!(rest[0], 0x21);
}

#[test]
fn test_patch_record_must_start_with_description() {
    let mut bytes = Vec::new();
    write_section(&mut bytes, SectionTag::TextPad, b"x").unwrap();
    let err = parse_patch(&bytes, &mut Patch::new(), &catalog()).unwrap_err();
    assert!(matches!(
        err,
        G2Error::UnexpectedSection {
            expected: SectionTag::PatchDescription,
            found: 0x6f
        }
    ));
}

// =============================================================================
// Description and notes
// =============================================================================

#[test]
fn test_description_round_trip() {
    let catalog = catalog();
    let mut patch = Patch::new();
    patch.description = PatchDescription {
        voices: 5,
        height: 374,
        red: true,
        white: true,
        monopoly: 2,
        variation: 3,
        category: 11,
        ..Default::default()
    };
    let mut parsed = Patch::new();
    let payload = reparse(Section::PatchDescription, &patch, &mut parsed, &catalog);

    assert_eq!(payload.len(), 15);
    assert_eq!(&payload[..7], &[0; 7]);
    assert_eq!(parsed.description, patch.description);
}

#[test]
fn test_current_note_without_notes() {
    let catalog = catalog();
    let mut parsed = Patch::new();
    let payload = reparse(Section::CurrentNote, &Patch::new(), &mut parsed, &catalog);
    assert_eq!(payload, vec![0x80, 0x00, 0x00, 0x20, 0x00, 0x00]);
    assert_eq!(parsed.last_note, Note::default());
    assert_eq!(parsed.notes, vec![Note::default()]);
}

#[test]
fn test_current_note_round_trip() {
    let catalog = catalog();
    let mut patch = Patch::new();
    patch.last_note = Note {
        note: 60,
        attack: 100,
        release: 30,
    };
    patch.notes = (0..3)
        .map(|i| Note {
            note: 60 + i,
            attack: 90,
            release: 0,
        })
        .collect();
    let mut parsed = Patch::new();
    reparse(Section::CurrentNote, &patch, &mut parsed, &catalog);
    assert_eq!(parsed.last_note, patch.last_note);
    assert_eq!(parsed.notes, patch.notes);
}

// =============================================================================
// Modules and cables
// =============================================================================

/// ModuleList(VOICE) with a Keyboard at index 0 and a 2-Out at index 1
fn two_module_list() -> Vec<u8> {
    let mut bits = BitStream::new();
    bits.write_fields([2, 8], [1, 2]).unwrap();
    for (type_id, index) in [(1, 0), (4, 1)] {
        bits.write_bits(8, type_id).unwrap();
        bits.write_fields([8, 7, 7, 8, 1, 1, 6], [index, 0, index * 3, 0, 0, 0, 0])
            .unwrap();
        bits.write_bits(4, 0).unwrap();
    }
    bits.into_bytes()
}

fn cable_list(cables: &[[u32; 6]]) -> Vec<u8> {
    let mut bits = BitStream::new();
    bits.write_fields([2, 6, 16], [1, 0, cables.len() as u32]).unwrap();
    for &cable in cables {
        bits.write_fields([3, 8, 6, 1, 8, 6], cable).unwrap();
    }
    bits.into_bytes()
}

#[test]
fn test_module_and_cable_scenario() {
    let catalog = catalog();
    let mut patch = Patch::new();
    let modules = two_module_list();
    parse_patch_section(SectionTag::ModuleList, &modules, &mut patch, &catalog).unwrap();
    let cables = cable_list(&[[0, 0, 0, 1, 1, 0]]);
    parse_patch_section(SectionTag::CableList, &cables, &mut patch, &catalog).unwrap();

    let nets = patch.voice.netlist().nets();
    assert_eq!(nets.len(), 1);
    assert_eq!(nets[0].output, Some(PortRef::output(0, 0)));
    assert_eq!(nets[0].inputs, vec![PortRef::input(1, 0)]);
    assert_eq!(patch.voice.find_module(1).unwrap().vert, 3);

    assert_eq!(
        format_patch_section(Section::ModuleList(AreaId::Voice), &patch).unwrap(),
        modules
    );
    assert_eq!(
        format_patch_section(Section::CableList(AreaId::Voice), &patch).unwrap(),
        cables
    );
}

#[test]
fn test_invalid_cables_are_dropped() {
    let catalog = catalog();
    let mut patch = Patch::new();
    parse_patch_section(SectionTag::ModuleList, &two_module_list(), &mut patch, &catalog).unwrap();
    let cables = cable_list(&[
        // 2-Out has no input 5
        [0, 0, 0, 1, 1, 5],
        // Keyboard has no output 2
        [0, 0, 2, 1, 1, 0],
        // no module 9
        [0, 9, 0, 1, 1, 0],
        // Keyboard has no inputs to tie from
        [0, 0, 0, 0, 1, 1],
        [2, 0, 1, 1, 1, 1],
    ]);
    parse_patch_section(SectionTag::CableList, &cables, &mut patch, &catalog).unwrap();

    assert_eq!(patch.voice.cables().len(), 1);
    assert_eq!(patch.voice.cables()[0].color, 2);
    assert_eq!(patch.voice.netlist().len(), 1);
    assert!(patch.voice.netlist().net_of(&PortRef::input(1, 0)).is_none());
}

#[test]
fn test_two_outputs_on_one_net_is_fatal() {
    let catalog = catalog();
    let mut patch = Patch::new();
    parse_patch_section(SectionTag::ModuleList, &two_module_list(), &mut patch, &catalog).unwrap();
    let cables = cable_list(&[[0, 0, 0, 1, 1, 0], [0, 0, 1, 1, 1, 0]]);
    let err = parse_patch_section(SectionTag::CableList, &cables, &mut patch, &catalog).unwrap_err();
    assert!(matches!(
        &err,
        G2Error::Section { tag: SectionTag::CableList, source }
            if matches!(**source, G2Error::MultipleOutputs { .. })
    ));
    assert!(err.is_structural());
}

#[test]
fn test_missing_modes_use_type_defaults() {
    let catalog = catalog();
    let mut bits = BitStream::new();
    bits.write_fields([2, 8, 8], [0, 1, 7]).unwrap();
    bits.write_fields([8, 7, 7, 8, 1, 1, 6], [1, 2, 3, 4, 1, 1, 0]).unwrap();
    bits.write_bits(4, 0).unwrap();

    let mut patch = Patch::new();
    parse_patch_section(SectionTag::ModuleList, &bits.into_bytes(), &mut patch, &catalog).unwrap();
    let osc = patch.fx.find_module(1).unwrap();
    assert_eq!(osc.modes, vec![2]);
    assert_eq!((osc.horiz, osc.vert, osc.color), (2, 3, 4));
    assert!(osc.uprate);
}

#[test]
fn test_unknown_module_type_is_fatal() {
    let mut bits = BitStream::new();
    bits.write_fields([2, 8, 8], [1, 1, 99]).unwrap();
    bits.write_fields([8, 7, 7, 8, 1, 1, 6, 4], [1, 0, 0, 0, 0, 0, 0, 0]).unwrap();

    let err = parse_patch_section(SectionTag::ModuleList, &bits.into_bytes(), &mut Patch::new(), &catalog())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "section ModuleList: unknown module type id 99"
    );
}

#[test]
fn test_module_list_rejects_settings_area() {
    let mut bits = BitStream::new();
    bits.write_fields([2, 8], [2, 0]).unwrap();
    let err = parse_patch_section(SectionTag::ModuleList, &bits.into_bytes(), &mut Patch::new(), &catalog())
        .unwrap_err();
    assert!(matches!(
        err,
        G2Error::Section { source, .. } if matches!(*source, G2Error::InvalidArea(2))
    ));
}

// =============================================================================
// Parameters and morphs
// =============================================================================

#[test]
fn test_zero_parameters_scenario() {
    let catalog = catalog();
    let mut patch = Patch::new();
    patch.voice.add_module(catalog.require(7).unwrap()).unwrap();

    let mut bits = BitStream::new();
    bits.write_fields([2, 8, 8], [1, 1, 9]).unwrap();
    bits.write_fields([8, 7], [1, 2]).unwrap();
    for variation in 0..9 {
        bits.write_fields([8, 7, 7], [variation, 0, 0]).unwrap();
    }
    let payload = bits.into_bytes();

    parse_patch_section(SectionTag::Parameters, &payload, &mut patch, &catalog).unwrap();
    let osc = patch.voice.find_module(1).unwrap();
    for param in &osc.params {
        assert_eq!(param.variations, [0; 9]);
    }
    assert_eq!(
        format_patch_section(Section::Parameters(AreaId::Voice), &patch).unwrap(),
        payload
    );
}

#[test]
fn test_parameters_skip_unknown_entries() {
    let catalog = catalog();
    let mut patch = sample_patch(&catalog);

    let mut bits = BitStream::new();
    bits.write_fields([2, 8, 8], [1, 2, 10]).unwrap();
    // module 9 does not exist
    bits.write_fields([8, 7], [9, 1]).unwrap();
    for variation in 0..10 {
        bits.write_fields([8, 7], [variation, 5]).unwrap();
    }
    // OscB with a third, unknown parameter
    bits.write_fields([8, 7], [1, 3]).unwrap();
    for variation in 0..10 {
        bits.write_fields([8, 7, 7, 7], [variation, 10 + variation, 20, 30]).unwrap();
    }
    parse_patch_section(SectionTag::Parameters, &bits.into_bytes(), &mut patch, &catalog).unwrap();

    let osc = patch.voice.find_module(1).unwrap();
    assert_eq!(osc.params[0].variations, [10, 11, 12, 13, 14, 15, 16, 17, 18]);
    assert_eq!(osc.params[1].variations, [20; 9]);
}

#[test]
fn test_empty_area_parameters() {
    let payload = format_patch_section(Section::Parameters(AreaId::Fx), &Patch::new()).unwrap();
    // area:2 count:8 pad:8
    assert_eq!(payload, vec![0x00, 0x00, 0x00]);
}

#[test]
fn test_settings_round_trip() {
    let catalog = catalog();
    let mut patch = Patch::new();
    patch.settings.get_mut(SettingsParam::PatchVolume).set_all(100);
    patch.settings.get_mut(SettingsParam::Octaves).variations[8] = 3;
    patch.settings.morphs[5].dial.variations[1] = 127;
    patch.settings.morphs[0].mode.variations[0] = 2;

    let mut parsed = Patch::new();
    let payload = reparse(Section::Parameters(AreaId::Settings), &patch, &mut parsed, &catalog);
    assert_eq!(payload.len(), 323);
    assert_eq!(parsed.settings, patch.settings);
}

#[test]
fn test_morph_round_trip() {
    let catalog = catalog();
    let mut patch = sample_patch(&catalog);
    let coarse = ParamRef::new(AreaId::Voice, 1, 0);
    let level = ParamRef::new(AreaId::Voice, 2, 0);
    patch
        .add_morph_map(0, MorphMap { param: level, morph: 7, range: -128 })
        .unwrap();
    patch
        .add_morph_map(0, MorphMap { param: coarse, morph: 0, range: 64 })
        .unwrap();
    patch
        .add_morph_map(8, MorphMap { param: coarse, morph: 2, range: -1 })
        .unwrap();

    let mut parsed = sample_patch(&catalog);
    let payload = reparse(Section::MorphParameters, &patch, &mut parsed, &catalog);
    // 32 header bits, 72 per variation less the final nibble, 29 per map
    assert_eq!(payload.len(), (32 + 9 * 72 - 4 + 3 * 29usize).div_ceil(8));
    assert_eq!(parsed.settings.morph_maps, patch.settings.morph_maps);
}

#[test]
fn test_morph_map_count_overflow() {
    let catalog = catalog();
    let mut patch = sample_patch(&catalog);
    let map = MorphMap { param: ParamRef::new(AreaId::Voice, 1, 0), morph: 1, range: 5 };
    patch.settings.morph_maps[0] = vec![map; 255];
    let payload = format_patch_section(Section::MorphParameters, &patch).unwrap();
    let mut parsed = sample_patch(&catalog);
    parse_patch_section(SectionTag::MorphParameters, &payload, &mut parsed, &catalog).unwrap();
    assert_eq!(parsed.settings.morph_maps[0].len(), 255);

    patch.settings.morph_maps[0].push(map);
    let err = format_patch_section(Section::MorphParameters, &patch).unwrap_err();
    assert_eq!(
        err.to_string(),
        "section MorphParameters: morph map count of 256 does not fit its field"
    );
}

#[test]
fn test_morph_maps_for_missing_params_are_dropped() {
    let catalog = catalog();
    let mut patch = sample_patch(&catalog);
    patch
        .add_morph_map(3, MorphMap { param: ParamRef::new(AreaId::Voice, 1, 1), morph: 4, range: 9 })
        .unwrap();
    let payload = format_patch_section(Section::MorphParameters, &patch).unwrap();

    let mut empty = Patch::new();
    parse_patch_section(SectionTag::MorphParameters, &payload, &mut empty, &catalog).unwrap();
    assert!(empty.settings.morph_maps.iter().all(Vec::is_empty));
}

// =============================================================================
// Assignments
// =============================================================================

#[test]
fn test_knob_round_trip() {
    let catalog = catalog();
    let mut patch = sample_patch(&catalog);
    patch.assign_knob(0, ParamRef::new(AreaId::Voice, 1, 1), 1).unwrap();
    patch.assign_knob(119, ParamRef::new(AreaId::Voice, 2, 0), 0).unwrap();
    patch.assign_knob(17, SettingsParam::Glide.param_ref(), 0).unwrap();
    patch.assign_knob(18, patch.settings.morphs[3].dial_ref(), 2).unwrap();

    let mut parsed = sample_patch(&catalog);
    let payload = reparse(Section::KnobAssignments, &patch, &mut parsed, &catalog);
    // count:16, 120 flags, 4 * 19 bits
    assert_eq!(payload.len(), (16 + 120 + 4 * 19usize).div_ceil(8));
    assert_eq!(parsed.knobs, patch.knobs);
    assert_eq!(parsed.knob_for(SettingsParam::Glide.param_ref()).unwrap().0, 17);
}

#[test]
fn test_knobs_for_missing_params_become_unassigned() {
    let catalog = catalog();
    let mut patch = sample_patch(&catalog);
    patch.assign_knob(2, ParamRef::new(AreaId::Fx, 1, 0), 0).unwrap_err();
    patch.knobs[2] = Some(Knob {
        param: ParamRef::new(AreaId::Voice, 2, 0),
        is_led: 0,
        slot: 0,
    });
    let payload = format_patch_section(Section::KnobAssignments, &patch).unwrap();

    let mut parsed = Patch::new();
    parse_patch_section(SectionTag::KnobAssignments, &payload, &mut parsed, &catalog).unwrap();
    assert_eq!(parsed.knobs.len(), 120);
    assert!(parsed.knobs.iter().all(Option::is_none));
}

#[test]
fn test_ctrl_round_trip() {
    let catalog = catalog();
    let mut patch = sample_patch(&catalog);
    patch.assign_ctrl(7, SettingsParam::PatchVolume.param_ref()).unwrap();
    patch.assign_ctrl(1, ParamRef::new(AreaId::Voice, 1, 0)).unwrap();

    let mut parsed = sample_patch(&catalog);
    reparse(Section::CtrlAssignments, &patch, &mut parsed, &catalog);
    assert_eq!(parsed.ctrls, patch.ctrls);

    let mut bare = Patch::new();
    let payload = format_patch_section(Section::CtrlAssignments, &patch).unwrap();
    parse_patch_section(SectionTag::CtrlAssignments, &payload, &mut bare, &catalog).unwrap();
    assert_eq!(bare.ctrls.len(), 1);
    assert_eq!(bare.ctrls[0].midi_cc, 7);
}

// =============================================================================
// Labels, names, text
// =============================================================================

#[test]
fn test_morph_labels_round_trip() {
    let catalog = catalog();
    let mut patch = Patch::new();
    patch.settings.morphs[2].label = "Filter".to_string();

    let mut parsed = Patch::new();
    parsed.settings.morphs[0].label.clear();
    let payload = reparse(Section::Labels(AreaId::Settings), &patch, &mut parsed, &catalog);
    assert_eq!(payload.len(), (2 + 8 * 83usize).div_ceil(8));
    let mut bits = BitStream::from_bytes(&payload[..]);
    bits.read_bits(2).unwrap();
    assert_eq!(bits.read_bytes(3).unwrap(), [1, 1, 80]);
    for i in 0..8u8 {
        assert_eq!(bits.read_bytes(3).unwrap(), [1, 1, 8 + i]);
        bits.read_bytes(7).unwrap();
    }
    let labels: Vec<_> = parsed.settings.morphs.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(
        labels,
        ["Wheel", "Vel", "Filter", "Aft.Tch", "Sust.Pd", "Ctrl.Pd", "P.Stick", "G.Wh 2"]
    );
}

#[test]
fn test_param_labels_round_trip() {
    let catalog = catalog();
    let mut patch = sample_patch(&catalog);
    {
        let osc = patch.voice.find_module_mut(1).unwrap();
        osc.params[1].labels = Some(vec!["Lo".to_string(), "Hi".to_string()]);
        osc.params[0].labels = Some(vec![]);
    }
    patch.voice.find_module_mut(3).unwrap().edit_modes = Some(vec![0, 1, 2, 0, 1, 4]);

    let mut parsed = sample_patch(&catalog);
    let payload = reparse(Section::Labels(AreaId::Voice), &patch, &mut parsed, &catalog);

    // area:2 count:8, then OscB (2 + 3 + 17 bytes) and SeqNote (2 + 6 bytes)
    assert_eq!(payload.len(), (10 + 8 * (22 + 8usize)).div_ceil(8));
    let osc = parsed.voice.find_module(1).unwrap();
    assert_eq!(osc.params[0].labels, Some(vec![]));
    assert_eq!(
        osc.params[1].labels,
        Some(vec!["Lo".to_string(), "Hi".to_string()])
    );
    assert_eq!(parsed.voice.find_module(2).unwrap().params[0].labels, None);
    assert_eq!(
        parsed.voice.find_module(3).unwrap().edit_modes,
        Some(vec![0, 1, 2, 0, 1, 4])
    );
}

#[test]
fn test_labels_for_missing_module_are_skipped() {
    let catalog = catalog();
    let mut patch = sample_patch(&catalog);
    patch.voice.find_module_mut(2).unwrap().params[0].labels = Some(vec!["Vol".to_string()]);
    let payload = format_patch_section(Section::Labels(AreaId::Voice), &patch).unwrap();

    let mut parsed = Patch::new();
    parse_patch_section(SectionTag::Labels, &payload, &mut parsed, &catalog).unwrap();
    assert!(parsed.voice.modules().is_empty());
}

#[test]
fn test_module_names_round_trip() {
    let catalog = catalog();
    let mut patch = sample_patch(&catalog);
    patch.voice.find_module_mut(1).unwrap().name = "Osc1".to_string();
    patch.voice.find_module_mut(2).unwrap().name = "SixteenCharsLong".to_string();

    let mut parsed = sample_patch(&catalog);
    let payload = reparse(Section::ModuleNames(AreaId::Voice), &patch, &mut parsed, &catalog);
    assert_eq!(payload[0], 0b0100_0001);
    assert_eq!(parsed.voice.find_module(1).unwrap().name, "Osc1");
    assert_eq!(parsed.voice.find_module(2).unwrap().name, "SixteenCharsLong");
    assert_eq!(parsed.voice.find_module(3).unwrap().name, "SeqNote");
}

#[test]
fn test_text_pad_round_trip() {
    let catalog = catalog();
    let mut patch = Patch::new();
    patch.text_pad = "Mod wheel opens the filter.\r\nCaf\u{e9}".to_string();
    let mut parsed = Patch::new();
    let payload = reparse(Section::TextPad, &patch, &mut parsed, &catalog);
    assert_eq!(payload.last(), Some(&0xe9));
    assert_eq!(parsed.text_pad, patch.text_pad);
}
