//! Statement code generation
//!
//! One pass over the token stream, dispatching per statement kind. Failures
//! accumulate as diagnostics and never abort mid-statement; the instruction
//! sequence is fully materialized either way, and the driver decides at the
//! boundary whether any output is produced.

pub mod header;
pub mod labels;
pub mod operand;
pub mod symtab;

use crate::common::{Diagnostic, DiagnosticKind};
use crate::lexer::token::{
    BinOpStmt, CmpOp, DeclareStmt, IfStmt, MoveStmt, PaletteStmt, PokeStmt, SoundStmt, SpriteStmt,
    TileStmt, Token, TokenKind, VdpSetStmt,
};
use labels::LabelStack;
use operand::{ResolvedOperand, parse_literal, resolve};
use std::collections::HashSet;
use symtab::SymbolTable;

/// VDP control port
const VDP_CTRL: &str = "$C00004";
/// VDP data port
const VDP_DATA: &str = "$C00000";
/// Colors per palette line in CRAM
const PALETTE_SIZE: usize = 16;

/// Everything produced by one translation pass
#[derive(Debug)]
pub struct CompilationUnit {
    /// Emitted assembly lines, prologue through epilogue
    pub lines: Vec<String>,
    pub symbols: SymbolTable,
    /// User label names referenced or defined by branch/label statements
    pub labels: HashSet<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationUnit {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            symbols: SymbolTable::new(),
            labels: HashSet::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// The assembly text, one line per emitted instruction.
    pub fn render(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Per-statement assembly emitter
pub struct CodeGenerator {
    unit: CompilationUnit,
    labels: LabelStack,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self {
            unit: CompilationUnit::new(),
            labels: LabelStack::new(),
        }
    }

    /// Translate the whole token stream, prologue and epilogue included.
    pub fn generate(mut self, tokens: &[Token]) -> CompilationUnit {
        header::prologue(&mut self.unit.lines);
        for token in tokens {
            self.statement(token);
        }
        header::epilogue(&mut self.unit.lines, &self.unit.symbols);
        self.unit
    }

    fn statement(&mut self, token: &Token) {
        match &token.kind {
            TokenKind::Declare(stmt) => self.declare(stmt, token),
            TokenKind::Assign(stmt) => {
                let size = self.size_for(&stmt.name);
                let dst = self.operand(&stmt.name, token);
                self.emit(format!("    move.{size} #{}, {dst}", stmt.value));
            }
            TokenKind::VdpSet(stmt) => self.vdp_set(stmt, token),
            TokenKind::Tile(stmt) => self.tile(stmt, token),
            TokenKind::Sprite(stmt) => self.sprite(stmt, token),
            TokenKind::Palette(stmt) => self.palette(stmt, token),
            TokenKind::ReadController(port) => self.read_controller(*port),
            TokenKind::Sound(stmt) => self.sound(stmt),
            TokenKind::Move(stmt) => self.move_stmt(stmt, token),
            TokenKind::Add(stmt) => self.arith("add", stmt, token),
            TokenKind::Sub(stmt) => self.arith("sub", stmt, token),
            TokenKind::If(stmt) => self.conditional(stmt, token),
            TokenKind::EndIf => match self.labels.pop() {
                Some(label) => self.emit(format!("{label}:")),
                None => self.diag(DiagnosticKind::UnmatchedEndif, token),
            },
            TokenKind::Goto(label) => {
                self.emit(format!("    bra {label}"));
                self.unit.labels.insert(label.clone());
            }
            TokenKind::LabelDef(label) => {
                self.emit(format!("{label}:"));
                self.unit.labels.insert(label.clone());
            }
            TokenKind::Poke(stmt) => self.poke(stmt, token),
            TokenKind::WaitVblank => {
                self.emit(".wait_vblank:");
                self.emit(format!("    btst #3, {VDP_CTRL}  ; V-blank flag"));
                self.emit("    beq .wait_vblank");
            }
            TokenKind::Halt => self.emit("Halt: bra Halt"),
            // Recognized statement shapes with no lowering, plus the bare
            // identifier/number/hex catch-alls and unmatchable spans.
            _ => self.diag(DiagnosticKind::UnknownToken(token.text.clone()), token),
        }
    }

    fn declare(&mut self, stmt: &DeclareStmt, token: &Token) {
        if self.unit.symbols.declare(&stmt.name, stmt.class).is_none() {
            self.diag(DiagnosticKind::RedeclaredVariable(stmt.name.clone()), token);
            return;
        }
        if let Some(init) = &stmt.init {
            self.emit(format!(
                "    move.{} #{init}, {}",
                stmt.class.suffix(),
                stmt.name
            ));
        }
    }

    fn vdp_set(&mut self, stmt: &VdpSetStmt, token: &Token) {
        let Some(value) = self.literal(&stmt.value, token) else {
            return;
        };
        let word = (0x8000 | (u32::from(stmt.reg) << 8) | (value & 0xFF)) & 0xFFFF;
        self.emit(format!("    move.w #${word:04X}, {VDP_CTRL}"));
    }

    fn tile(&mut self, stmt: &TileStmt, token: &Token) {
        let Some(addr) = self.literal(&stmt.addr, token) else {
            return;
        };
        // VRAM write command: address in the high word over the region tag.
        let command = (addr << 16) | 0x4000_0002;
        self.emit(format!(
            "    move.l #${command:08X}, {VDP_CTRL}  ; Set VRAM write addr"
        ));
        self.emit(format!("    ; TODO: DMA {} words to VRAM", stmt.words));
    }

    fn sprite(&mut self, stmt: &SpriteStmt, token: &Token) {
        let table = ((0xE000 | (u32::from(stmt.id) * 8)) << 16) | 3;
        self.emit(format!(
            "    move.l #${table:08X}, {VDP_CTRL}  ; Sprite table"
        ));

        let y = self.operand(&stmt.y, token);
        self.emit(format!("    move.w {y}, {VDP_DATA}  ; Y pos"));

        let link = ((u32::from(stmt.id) << 8) | (u32::from(stmt.palette) << 5)
            | u32::from(stmt.tile))
            & 0xFFFF;
        self.emit(format!("    move.w #${link:04X}, {VDP_DATA}  ; Link/Pal/Tile"));

        // Flip bits fold into the X word only when X is a literal; a variable
        // X is written as-is.
        match parse_literal(&stmt.x) {
            Some(x) => {
                let word =
                    ((u32::from(stmt.hflip) << 11) | (u32::from(stmt.vflip) << 12) | x) & 0xFFFF;
                self.emit(format!("    move.w #${word:04X}, {VDP_DATA}  ; X pos"));
            }
            None => {
                let x = self.operand(&stmt.x, token);
                self.emit(format!("    move.w {x}, {VDP_DATA}  ; X pos"));
            }
        }
    }

    fn palette(&mut self, stmt: &PaletteStmt, token: &Token) {
        let command = ((0xC000 | (u32::from(stmt.id) * 32)) << 16) | 9;
        self.emit(format!("    move.l #${command:08X}, {VDP_CTRL}  ; CRAM write"));
        // A palette line holds 16 colors; excess entries are dropped.
        for color in stmt.colors.iter().take(PALETTE_SIZE) {
            let color = self.operand(color, token);
            self.emit(format!("    move.w {color}, {VDP_DATA}"));
        }
    }

    fn read_controller(&mut self, port: u16) {
        let addr: u32 = if port == 0 { 0xA10003 } else { 0xA10005 };
        self.emit(format!("    move.b #$40, ${addr:06X}  ; Latch"));
        self.emit("    nop");
        self.emit("    nop");
        self.emit(format!("    move.b ${addr:06X}, D0"));
        self.emit("    not.b D0  ; Invert bits");
    }

    fn sound(&mut self, stmt: &SoundStmt) {
        self.emit(format!(
            "    move.b #{}, $4000  ; YM2612 port A",
            stmt.channel
        ));
        self.emit(format!("    move.b #{}, $4001", stmt.note));
        self.emit(format!(
            "    move.b #{}, $4000  ; Volume",
            u16::from(stmt.channel) + 0x10
        ));
        // The total-level register holds 7 bits of attenuation; volumes past
        // 127 clamp to zero attenuation (full loudness).
        self.emit(format!(
            "    move.b #{}, $4001  ; Inverted volume",
            127u8.saturating_sub(stmt.volume)
        ));
    }

    fn move_stmt(&mut self, stmt: &MoveStmt, token: &Token) {
        let size = self.size_for(&stmt.dst);
        let src = self.operand(&stmt.src, token);
        let dst = self.operand(&stmt.dst, token);
        self.emit(format!("    move.{size} {src}, {dst}"));
    }

    fn arith(&mut self, mnemonic: &str, stmt: &BinOpStmt, token: &Token) {
        let size = self.size_for(&stmt.dst);
        let src = self.operand(&stmt.src, token);
        let dst = self.operand(&stmt.dst, token);
        self.emit(format!("    {mnemonic}.{size} {src}, {dst}"));
    }

    /// Emit the inverted-condition test/branch pair for an IF and leave its
    /// skip label pending for the matching ENDIF.
    fn conditional(&mut self, stmt: &IfStmt, token: &Token) {
        let skip = self.labels.push_skip();
        let var = self.operand(&stmt.var, token);
        match stmt.op {
            CmpOp::And => {
                self.emit(format!("    btst #{}, {var}", stmt.value));
                self.emit(format!("    beq {skip}"));
            }
            CmpOp::Eq => {
                let value = self.operand(&stmt.value, token);
                self.emit(format!("    cmp.w {value}, {var}"));
                self.emit(format!("    bne {skip}"));
            }
            CmpOp::Gt => {
                let value = self.operand(&stmt.value, token);
                self.emit(format!("    cmp.w {value}, {var}"));
                self.emit(format!("    ble {skip}"));
            }
            CmpOp::Lt => {
                let value = self.operand(&stmt.value, token);
                self.emit(format!("    cmp.w {value}, {var}"));
                self.emit(format!("    bge {skip}"));
            }
        }
    }

    fn poke(&mut self, stmt: &PokeStmt, token: &Token) {
        let value = self.operand(&stmt.value, token);
        let addr = self.operand(&stmt.addr, token);
        self.emit(format!("    move.w {value}, {addr}"));
    }

    fn emit(&mut self, line: impl Into<String>) {
        self.unit.lines.push(line.into());
    }

    fn diag(&mut self, kind: DiagnosticKind, token: &Token) {
        self.unit
            .diagnostics
            .push(Diagnostic::new(kind, token.line, token.span));
    }

    /// Resolve and render an operand, recording a diagnostic when it is
    /// unclassifiable (generation proceeds with the raw lexeme).
    fn operand(&mut self, lexeme: &str, token: &Token) -> String {
        match resolve(lexeme, &self.unit.symbols) {
            ResolvedOperand::Invalid(raw) => {
                self.diag(DiagnosticKind::InvalidOperand(raw.clone()), token);
                raw
            }
            resolved => resolved.render(),
        }
    }

    /// Numeric value of a literal field, recording a diagnostic on failure.
    fn literal(&mut self, lexeme: &str, token: &Token) -> Option<u32> {
        let value = parse_literal(lexeme);
        if value.is_none() {
            self.diag(DiagnosticKind::InvalidOperand(lexeme.to_string()), token);
        }
        value
    }

    /// Operand-size suffix for a destination: word for declared Word
    /// variables and data registers, long otherwise.
    fn size_for(&self, lexeme: &str) -> char {
        match resolve(lexeme, &self.unit.symbols) {
            ResolvedOperand::MemoryRef(name) => self
                .unit
                .symbols
                .lookup(&name)
                .map_or('l', |v| v.class.suffix()),
            ResolvedOperand::Register(reg) if reg.starts_with('D') => 'w',
            _ => 'l',
        }
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
