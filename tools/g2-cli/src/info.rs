//! Info command - print the content of patch and performance files

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use g2_patch::model::SettingsParam;
use g2_patch::{Area, G2Document, G2File, ModuleCatalog, Patch};

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Patch or performance files (.pch2 / .prf2)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Also list parameter values of the active variation
    #[arg(long)]
    pub params: bool,
}

/// Execute the info command
pub fn execute(args: InfoArgs, catalog: &ModuleCatalog) -> Result<()> {
    crate::for_each_file(&args.files, |path| {
        let file = G2File::read(path, catalog)?;
        println!("=== {} ===", path.display());
        print_file(&file, args.params);
        Ok(())
    })
}

fn print_file(file: &G2File, params: bool) {
    println!(
        "  {} (format version {}, build {})",
        file.file_type(),
        file.binary_version,
        file.header.build
    );
    if let Some(status) = file.checksum_status() {
        let state = if status.is_valid() { "ok" } else { "BAD" };
        println!("  Checksum: 0x{:04x} {}", status.stored, state);
    }

    match &file.document {
        G2Document::Patch(patch) => print_patch(patch, "  ", params),
        G2Document::Performance(perf) => {
            println!(
                "  BPM {}, focus slot {}",
                perf.description.bpm, perf.description.focus
            );
            for (i, slot) in perf.slots.iter().enumerate() {
                println!("  Slot {} {:?}:", (b'A' + i as u8) as char, slot.name);
                print_patch(&slot.patch, "    ", params);
            }
            let global = perf.global_knobs.iter().flatten().count();
            println!("  Global knobs: {}", global);
        }
    }
}

fn print_patch(patch: &Patch, indent: &str, params: bool) {
    let variation = patch.description.variation as usize;
    println!(
        "{}Voices {}, variation {}",
        indent,
        u32::from(patch.description.voices) + 1,
        variation + 1
    );
    for area in [&patch.voice, &patch.fx] {
        print_area(area, indent, variation, params);
    }

    if params {
        let settings: Vec<String> = SettingsParam::ALL
            .iter()
            .filter_map(|&p| {
                patch
                    .settings
                    .get(p)
                    .get(variation)
                    .map(|v| format!("{}={}", p.name(), v))
            })
            .collect();
        println!("{}Settings: {}", indent, settings.join(" "));
    }

    let morphs: Vec<&str> = patch.settings.morphs.iter().map(|m| m.label.as_str()).collect();
    println!("{}Morphs: {}", indent, morphs.join(", "));
    let maps: usize = patch.settings.morph_maps.iter().map(Vec::len).sum();
    println!(
        "{}Bindings: {} knobs, {} controllers, {} morph ranges",
        indent,
        patch.knobs.iter().flatten().count(),
        patch.ctrls.len(),
        maps
    );
    if !patch.text_pad.is_empty() {
        for line in patch.text_pad.lines() {
            println!("{}| {}", indent, line);
        }
    }
}

fn print_area(area: &Area, indent: &str, variation: usize, params: bool) {
    println!(
        "{}{} area: {} modules, {} cables, {} nets",
        indent,
        area.id(),
        area.modules().len(),
        area.cables().len(),
        area.netlist().len()
    );
    for module in area.modules() {
        println!(
            "{}  [{:3}] {:<12} {:<16} at {},{}",
            indent,
            module.index(),
            module.module_type().name,
            module.name,
            module.horiz,
            module.vert
        );
        if params && !module.params.is_empty() {
            let values: Vec<String> = module
                .module_type()
                .params
                .iter()
                .zip(&module.params)
                .filter_map(|(ty, p)| p.get(variation).map(|v| format!("{}={}", ty.name, v)))
                .collect();
            println!("{}        {}", indent, values.join(" "));
        }
    }
    for cable in area.cables() {
        println!(
            "{}  {} -> {} (color {})",
            indent, cable.source, cable.dest, cable.color
        );
    }
}
