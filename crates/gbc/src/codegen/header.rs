//! Fixed assembly prologue and epilogue
//!
//! The prologue is an interrupt vector stub plus the Mega Drive ROM header
//! block. The downstream assembler and the console both depend on this exact
//! byte layout, padded string fields included, so the lines are emitted
//! verbatim.

use super::symtab::SymbolTable;

pub fn prologue(out: &mut Vec<String>) {
    const LINES: [&str; 28] = [
        "; GenesisBASIC Compiled ROM",
        "    org $000000",
        "    dc.l $00FFFE00      ; Stack pointer",
        "    dc.l rom_header     ; ROM start",
        "    dc.l $00000000      ; Unused",
        "    dc.l Start          ; Reset vector",
        "",
        "rom_header:",
        "    dc.b 'SEGA GENESIS    '  ; Console name",
        "    dc.b '(C) 2025       '   ; Copyright",
        "    dc.b 'GenesisBASIC Demo   '  ; Domestic name",
        "    dc.b 'GenesisBASIC Demo   '  ; Overseas name",
        "    dc.b 'GM 00000000-00'    ; Serial",
        "    dc.w $0000               ; Checksum (post-calculate)",
        "    dc.b 'J               '   ; I/O support",
        "    dc.l rom_start",
        "    dc.l rom_end",
        "    dc.l $00FF0000           ; RAM start",
        "    dc.l $00FFFFFF           ; RAM end",
        "    dc.b $40, $00, $00       ; Subtitles",
        "    dc.b '    '              ; Region",
        "    dc.b $00                 ; ROM type",
        "    dc.w $0000               ; Product number",
        "    dc.b $40                 ; Data area size",
        "    dc.b $00                 ; Reserved",
        "",
        "rom_start:",
        "Start:",
    ];
    out.extend(LINES.iter().map(|l| (*l).to_string()));
}

/// One storage-reservation directive per declared variable, in declaration
/// order, then alignment and the end-of-module marker.
pub fn epilogue(out: &mut Vec<String>, symbols: &SymbolTable) {
    out.push(String::new());
    out.push("; Variable allocations".to_string());
    for var in symbols.iter() {
        out.push(format!("{}: ds.{} 1", var.name, var.class.suffix()));
    }
    out.push("    even".to_string());
    out.push("rom_end:".to_string());
    out.push("    end".to_string());
}
