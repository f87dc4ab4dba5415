//! Statement tokens for the GenesisBASIC recognizer
//!
//! Each statement shape is a single case-insensitive logos pattern with its
//! captured operand fields extracted by a callback. Pattern precedence is part
//! of the language contract: logos picks the longest match, so the
//! declaration-with-initializer shape always beats the plain assignment shape,
//! and bare identifier/number/hex catch-alls only fire when no statement
//! shape matches. The patterns are matched one source line at a time (see the
//! scanner), so shapes with optional tails end at end of input rather than
//! running into a neighboring line. Tokenization is total; anything unmatched
//! becomes `Unknown` and surfaces as a generation-time diagnostic.

use crate::common::Span;
use logos::{Lexer, Logos};

/// Token with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw statement text as written (trimmed)
    pub text: String,
    /// 1-based line the statement starts on
    pub line: u32,
    pub span: Span,
}

/// Declared storage width of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    Word,
    Long,
}

impl StorageClass {
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("WORD") {
            Some(Self::Word)
        } else if s.eq_ignore_ascii_case("LONG") {
            Some(Self::Long)
        } else {
            None
        }
    }

    /// Allocation size in bytes
    pub fn size(self) -> u32 {
        match self {
            Self::Word => 2,
            Self::Long => 4,
        }
    }

    /// M68k operand-size suffix
    pub fn suffix(self) -> char {
        match self {
            Self::Word => 'w',
            Self::Long => 'l',
        }
    }
}

/// Comparison operator of an IF statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// Bit test (`AND`)
    And,
    Eq,
    Gt,
    Lt,
}

impl CmpOp {
    fn parse(s: &str) -> Option<Self> {
        match s {
            _ if s.eq_ignore_ascii_case("AND") => Some(Self::And),
            "=" => Some(Self::Eq),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclareStmt {
    pub name: String,
    pub class: StorageClass,
    /// Initializer literal as written (`5` or `$1F`)
    pub init: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VdpSetStmt {
    pub reg: u16,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileStmt {
    pub id: u16,
    pub addr: String,
    pub words: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteStmt {
    pub id: u16,
    pub x: String,
    pub y: String,
    pub tile: u16,
    pub palette: u16,
    pub hflip: u16,
    pub vflip: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaletteStmt {
    pub id: u16,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoundStmt {
    pub channel: u8,
    pub note: u8,
    pub volume: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveStmt {
    pub src: String,
    pub dst: String,
}

/// `ADD x, 3` style two-operand arithmetic (destination first)
#[derive(Debug, Clone, PartialEq)]
pub struct BinOpStmt {
    pub dst: String,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PokeStmt {
    pub addr: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub var: String,
    pub op: CmpOp,
    pub value: String,
}

/// All statement shapes of GenesisBASIC
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\f]+")]
    Whitespace,

    #[regex(
        r"DIM\s+[A-Za-z_][A-Za-z0-9_]*\s+AS\s+(WORD|LONG)(\s*=\s*(\$[0-9A-Fa-f]+|[0-9]+))?",
        declare,
        ignore(ascii_case)
    )]
    Declare(DeclareStmt),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*\s*=\s*(\$[0-9A-Fa-f]+|[0-9]+)", assign)]
    Assign(AssignStmt),

    #[regex(r"VDP\s+SET\s+[0-9]+,\s*(\$[0-9A-Fa-f]+|[0-9]+)", vdp_set, ignore(ascii_case))]
    VdpSet(VdpSetStmt),

    #[regex(
        r"TILE\s+[0-9]+,\s*(\$[0-9A-Fa-f]+|[0-9]+),\s*[0-9]+",
        tile,
        ignore(ascii_case)
    )]
    Tile(TileStmt),

    #[regex(
        r"SPRITE\s+[0-9]+,\s*(\$[0-9A-Fa-f]+|[0-9]+|[A-Za-z_][A-Za-z0-9_]*),\s*(\$[0-9A-Fa-f]+|[0-9]+|[A-Za-z_][A-Za-z0-9_]*),\s*[0-9]+,\s*[0-9]+,\s*[0-9]+,\s*[0-9]+",
        sprite,
        ignore(ascii_case)
    )]
    Sprite(SpriteStmt),

    #[regex(r"PALETTE\s+[0-9]+,\s*[^\n]+", palette, ignore(ascii_case))]
    Palette(PaletteStmt),

    // The port number is not range-checked; anything past port 0 reads the
    // second pad.
    #[regex(r"READCONTROLLER\s+[0-9]+", read_controller, ignore(ascii_case))]
    ReadController(u16),

    #[regex(r"SOUND\s+[0-9]+,\s*[0-9]+,\s*[0-9]+", sound, ignore(ascii_case))]
    Sound(SoundStmt),

    #[regex(r"SOUNDSTOP\s+[0-9]+", ignore(ascii_case))]
    SoundStop,

    #[regex(
        r"MOVE\s+([A-Za-z_][A-Za-z0-9_]*|[0-9]+),\s*([A-Za-z_][A-Za-z0-9_]*|[0-9]+)",
        move_stmt,
        ignore(ascii_case)
    )]
    Move(MoveStmt),

    #[regex(
        r"ADD\s+[A-Za-z_][A-Za-z0-9_]*,\s*(\$[0-9A-Fa-f]+|[0-9]+|[A-Za-z_][A-Za-z0-9_]*)",
        |lex| bin_op(lex, "ADD"),
        ignore(ascii_case)
    )]
    Add(BinOpStmt),

    #[regex(
        r"SUB\s+[A-Za-z_][A-Za-z0-9_]*,\s*(\$[0-9A-Fa-f]+|[0-9]+|[A-Za-z_][A-Za-z0-9_]*)",
        |lex| bin_op(lex, "SUB"),
        ignore(ascii_case)
    )]
    Sub(BinOpStmt),

    #[regex(
        r"MUL\s+[A-Za-z_][A-Za-z0-9_]*,\s*(\$[0-9A-Fa-f]+|[0-9]+|[A-Za-z_][A-Za-z0-9_]*)",
        ignore(ascii_case)
    )]
    Mul,

    #[regex(
        r"DIV\s+[A-Za-z_][A-Za-z0-9_]*,\s*(\$[0-9A-Fa-f]+|[0-9]+|[A-Za-z_][A-Za-z0-9_]*)",
        ignore(ascii_case)
    )]
    Div,

    #[regex(
        r"CMP\s+[A-Za-z_][A-Za-z0-9_]*,\s*(\$[0-9A-Fa-f]+|[0-9]+|[A-Za-z_][A-Za-z0-9_]*)",
        ignore(ascii_case)
    )]
    Cmp,

    #[regex(
        r"IF\s+[A-Za-z_][A-Za-z0-9_]*\s+(AND|=|>|<)\s+([0-9]+|[A-Za-z_][A-Za-z0-9_]*|\$[0-9A-Fa-f]+)\s+THEN",
        if_stmt,
        ignore(ascii_case)
    )]
    If(IfStmt),

    #[token("ELSE", priority = 10, ignore(ascii_case))]
    Else,

    #[token("ENDIF", priority = 10, ignore(ascii_case))]
    EndIf,

    #[regex(
        r"FOR\s+[A-Za-z_][A-Za-z0-9_]*\s*=\s*[0-9]+\s+TO\s+[0-9]+(\s+STEP\s+[0-9]+)?",
        ignore(ascii_case)
    )]
    For,

    #[regex(r"NEXT\s+[A-Za-z_][A-Za-z0-9_]*", ignore(ascii_case))]
    Next,

    #[regex(
        r"WHILE\s+[A-Za-z_][A-Za-z0-9_]*\s+(=|>|<)\s+([0-9]+|[A-Za-z_][A-Za-z0-9_]*|\$[0-9A-Fa-f]+)",
        ignore(ascii_case)
    )]
    While,

    #[token("WEND", priority = 10, ignore(ascii_case))]
    Wend,

    #[regex(r"GOTO\s+[A-Za-z_][A-Za-z0-9_]*", goto, ignore(ascii_case))]
    Goto(String),

    #[regex(r"GOSUB\s+[A-Za-z_][A-Za-z0-9_]*", ignore(ascii_case))]
    Gosub,

    #[token("RETURN", priority = 10, ignore(ascii_case))]
    Return,

    #[regex(
        r"POKE\s+(\$[0-9A-Fa-f]+|[0-9]+|[A-Za-z_][A-Za-z0-9_]*),\s*(\$[0-9A-Fa-f]+|[0-9]+|[A-Za-z_][A-Za-z0-9_]*)",
        poke,
        ignore(ascii_case)
    )]
    Poke(PokeStmt),

    #[regex(
        r"PEEK\s*\((\$[0-9A-Fa-f]+|[0-9]+|[A-Za-z_][A-Za-z0-9_]*)\)",
        ignore(ascii_case)
    )]
    Peek,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*:", label_def)]
    LabelDef(String),

    #[regex(r"PROC\s+[A-Za-z_][A-Za-z0-9_]*\s*\([^)\n]*\)", ignore(ascii_case))]
    Proc,

    #[token("ENDPROC", priority = 10, ignore(ascii_case))]
    EndProc,

    #[regex(r#"INCLUDE\s+"[^"\n]*""#, ignore(ascii_case))]
    Include,

    #[token("HALT", priority = 10, ignore(ascii_case))]
    Halt,

    #[token("WAITVBLANK", priority = 10, ignore(ascii_case))]
    WaitVblank,

    #[regex(r"\$[0-9A-Fa-f]+", priority = 2)]
    Hex,

    #[regex(r"[0-9]+", priority = 2)]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", priority = 1)]
    Identifier,

    /// Produced by the scanner for any span no pattern matches
    Unknown,
}

/// Case-insensitively strip a leading keyword plus following whitespace.
fn strip_kw<'a>(s: &'a str, kw: &str) -> Option<&'a str> {
    let t = s.trim_start();
    let head = t.get(..kw.len())?;
    if head.eq_ignore_ascii_case(kw) {
        Some(t[kw.len()..].trim_start())
    } else {
        None
    }
}

fn declare(lex: &mut Lexer<TokenKind>) -> Option<DeclareStmt> {
    let (head, init) = match lex.slice().split_once('=') {
        Some((h, v)) => (h, Some(v.trim().to_string())),
        None => (lex.slice(), None),
    };
    let rest = strip_kw(head, "DIM")?;
    let mut words = rest.split_whitespace();
    let name = words.next()?.to_string();
    if !words.next()?.eq_ignore_ascii_case("AS") {
        return None;
    }
    let class = StorageClass::parse(words.next()?)?;
    Some(DeclareStmt { name, class, init })
}

fn assign(lex: &mut Lexer<TokenKind>) -> Option<AssignStmt> {
    let (name, value) = lex.slice().split_once('=')?;
    Some(AssignStmt {
        name: name.trim().to_string(),
        value: value.trim().to_string(),
    })
}

fn vdp_set(lex: &mut Lexer<TokenKind>) -> Option<VdpSetStmt> {
    let rest = strip_kw(strip_kw(lex.slice(), "VDP")?, "SET")?;
    let mut fields = rest.split(',').map(str::trim);
    Some(VdpSetStmt {
        reg: fields.next()?.parse().ok()?,
        value: fields.next()?.to_string(),
    })
}

fn tile(lex: &mut Lexer<TokenKind>) -> Option<TileStmt> {
    let rest = strip_kw(lex.slice(), "TILE")?;
    let mut fields = rest.split(',').map(str::trim);
    Some(TileStmt {
        id: fields.next()?.parse().ok()?,
        addr: fields.next()?.to_string(),
        words: fields.next()?.parse().ok()?,
    })
}

fn sprite(lex: &mut Lexer<TokenKind>) -> Option<SpriteStmt> {
    let rest = strip_kw(lex.slice(), "SPRITE")?;
    let mut fields = rest.split(',').map(str::trim);
    Some(SpriteStmt {
        id: fields.next()?.parse().ok()?,
        x: fields.next()?.to_string(),
        y: fields.next()?.to_string(),
        tile: fields.next()?.parse().ok()?,
        palette: fields.next()?.parse().ok()?,
        hflip: fields.next()?.parse().ok()?,
        vflip: fields.next()?.parse().ok()?,
    })
}

fn palette(lex: &mut Lexer<TokenKind>) -> Option<PaletteStmt> {
    let rest = strip_kw(lex.slice(), "PALETTE")?;
    let (id, colors) = rest.split_once(',')?;
    Some(PaletteStmt {
        id: id.trim().parse().ok()?,
        colors: colors
            .split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect(),
    })
}

fn read_controller(lex: &mut Lexer<TokenKind>) -> Option<u16> {
    strip_kw(lex.slice(), "READCONTROLLER")?.parse().ok()
}

fn sound(lex: &mut Lexer<TokenKind>) -> Option<SoundStmt> {
    let rest = strip_kw(lex.slice(), "SOUND")?;
    let mut fields = rest.split(',').map(str::trim);
    Some(SoundStmt {
        channel: fields.next()?.parse().ok()?,
        note: fields.next()?.parse().ok()?,
        volume: fields.next()?.parse().ok()?,
    })
}

fn move_stmt(lex: &mut Lexer<TokenKind>) -> Option<MoveStmt> {
    let rest = strip_kw(lex.slice(), "MOVE")?;
    let mut fields = rest.split(',').map(str::trim);
    Some(MoveStmt {
        src: fields.next()?.to_string(),
        dst: fields.next()?.to_string(),
    })
}

fn bin_op(lex: &mut Lexer<TokenKind>, kw: &str) -> Option<BinOpStmt> {
    let rest = strip_kw(lex.slice(), kw)?;
    let mut fields = rest.split(',').map(str::trim);
    Some(BinOpStmt {
        dst: fields.next()?.to_string(),
        src: fields.next()?.to_string(),
    })
}

fn poke(lex: &mut Lexer<TokenKind>) -> Option<PokeStmt> {
    let rest = strip_kw(lex.slice(), "POKE")?;
    let mut fields = rest.split(',').map(str::trim);
    Some(PokeStmt {
        addr: fields.next()?.to_string(),
        value: fields.next()?.to_string(),
    })
}

fn if_stmt(lex: &mut Lexer<TokenKind>) -> Option<IfStmt> {
    let rest = strip_kw(lex.slice(), "IF")?.trim_end();
    let head = rest.get(..rest.len().checked_sub(4)?)?;
    if !rest[head.len()..].eq_ignore_ascii_case("THEN") {
        return None;
    }
    let mut words = head.split_whitespace();
    Some(IfStmt {
        var: words.next()?.to_string(),
        op: CmpOp::parse(words.next()?)?,
        value: words.next()?.to_string(),
    })
}

fn goto(lex: &mut Lexer<TokenKind>) -> Option<String> {
    Some(strip_kw(lex.slice(), "GOTO")?.to_string())
}

fn label_def(lex: &mut Lexer<TokenKind>) -> Option<String> {
    Some(lex.slice().trim().strip_suffix(':')?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_class() {
        assert_eq!(StorageClass::parse("WORD"), Some(StorageClass::Word));
        assert_eq!(StorageClass::parse("long"), Some(StorageClass::Long));
        assert_eq!(StorageClass::parse("BYTE"), None);
        assert_eq!(StorageClass::Word.size(), 2);
        assert_eq!(StorageClass::Long.size(), 4);
        assert_eq!(StorageClass::Word.suffix(), 'w');
        assert_eq!(StorageClass::Long.suffix(), 'l');
    }

    #[test]
    fn test_cmp_op() {
        assert_eq!(CmpOp::parse("AND"), Some(CmpOp::And));
        assert_eq!(CmpOp::parse("and"), Some(CmpOp::And));
        assert_eq!(CmpOp::parse("="), Some(CmpOp::Eq));
        assert_eq!(CmpOp::parse(">"), Some(CmpOp::Gt));
        assert_eq!(CmpOp::parse("<"), Some(CmpOp::Lt));
        assert_eq!(CmpOp::parse("<>"), None);
    }

    #[test]
    fn test_strip_kw() {
        assert_eq!(strip_kw("DIM x AS WORD", "DIM"), Some("x AS WORD"));
        assert_eq!(strip_kw("dim x", "DIM"), Some("x"));
        assert_eq!(strip_kw("DIMMER x", "DIM"), Some("MER x"));
        assert_eq!(strip_kw("MOVE x", "DIM"), None);
    }
}
