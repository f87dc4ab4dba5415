//! Total, line-oriented tokenization
//!
//! GenesisBASIC is one statement per line, and the recognizer leans on that:
//! each line is stripped of comments, trimmed of trailing whitespace, and
//! matched on its own, so every well-formed statement pattern terminates
//! exactly at end of input. Running the statement patterns over the whole
//! source instead would let shapes with optional tails (`DIM ... [= lit]`,
//! `FOR ... [STEP n]`, the assignment `ident =` lookahead) consume trailing
//! newlines they cannot complete, and the generated automaton does not rewind
//! past them.
//!
//! Recognition never fails: comment and blank lines are discarded, and any
//! span matching no pattern becomes an `Unknown` token so malformed input
//! surfaces as a generation-time diagnostic instead of aborting the pass.

use super::token::{Token, TokenKind};
use crate::common::Span;
use logos::Logos;

/// Statement recognizer for GenesisBASIC source text
pub struct Scanner<'a> {
    source: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Tokenize the entire source.
    pub fn tokenize_all(self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut offset = 0;
        let mut line_no = 0u32;
        for raw in self.source.split_inclusive('\n') {
            line_no += 1;
            let stmt = statement_text(raw);
            let mut lexer = TokenKind::lexer(stmt);
            while let Some(result) = lexer.next() {
                let kind = match result {
                    Ok(TokenKind::Whitespace) => continue,
                    Ok(kind) => kind,
                    Err(()) => TokenKind::Unknown,
                };
                let span = lexer.span();
                tokens.push(Token {
                    kind,
                    text: lexer.slice().trim().to_string(),
                    line: line_no,
                    span: Span::new(offset + span.start, offset + span.end),
                });
            }
            offset += raw.len();
        }
        tokens
    }
}

/// The statement portion of a source line: the comment tail and trailing
/// whitespace removed, or the empty string for comment-only lines.
fn statement_text(line: &str) -> &str {
    let code = line.find("//").map_or(line, |pos| &line[..pos]);
    let lead = code.trim_start();
    let is_rem = lead.len() >= 3
        && lead[..3].eq_ignore_ascii_case("REM")
        && lead.as_bytes().get(3).is_none_or(u8::is_ascii_whitespace);
    if is_rem { "" } else { code.trim_end() }
}

/// Tokenize a whole compilation unit.
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source).tokenize_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::{CmpOp, StorageClass, TokenKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declare_forms() {
        let tokens = tokenize("DIM x AS WORD\nDIM hp AS LONG = $0A\ndim lives as word = 3");
        assert_eq!(tokens.len(), 3);

        assert!(matches!(
            &tokens[0].kind,
            TokenKind::Declare(d) if d.name == "x" && d.class == StorageClass::Word && d.init.is_none()
        ));
        assert!(matches!(
            &tokens[1].kind,
            TokenKind::Declare(d) if d.name == "hp"
                && d.class == StorageClass::Long
                && d.init.as_deref() == Some("$0A")
        ));
        assert!(matches!(
            &tokens[2].kind,
            TokenKind::Declare(d) if d.name == "lives" && d.init.as_deref() == Some("3")
        ));
    }

    #[test]
    fn test_declare_without_init_before_other_statements() {
        // Trailing blanks and following lines must not bleed into the
        // optional-initializer tail of the declaration shape.
        let tokens = tokenize("DIM x AS WORD \nADD x, 3\n");
        assert_eq!(tokens.len(), 2);
        assert!(matches!(
            &tokens[0].kind,
            TokenKind::Declare(d) if d.name == "x" && d.init.is_none()
        ));
        assert!(matches!(
            &tokens[1].kind,
            TokenKind::Add(a) if a.dst == "x" && a.src == "3"
        ));
    }

    #[test]
    fn test_declare_beats_assignment() {
        // The initializer belongs to the declaration shape; it must not be
        // misrecognized as `WORD = 5`.
        let tokens = tokenize("DIM x AS WORD = 5");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(&tokens[0].kind, TokenKind::Declare(_)));

        let tokens = tokenize("x = 5");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(
            &tokens[0].kind,
            TokenKind::Assign(a) if a.name == "x" && a.value == "5"
        ));
    }

    #[test]
    fn test_bare_keywords_across_lines() {
        let tokens = tokenize("WAITVBLANK\nHALT\n");
        assert_eq!(tokens.len(), 2);
        assert!(matches!(tokens[0].kind, TokenKind::WaitVblank));
        assert!(matches!(tokens[1].kind, TokenKind::Halt));
    }

    #[test]
    fn test_hardware_statements() {
        let tokens = tokenize("VDP SET 1, $04\nTILE 0, $1000, 16\nREADCONTROLLER 0\nSOUND 1, 60, 100\nSOUNDSTOP 1");
        assert!(matches!(
            &tokens[0].kind,
            TokenKind::VdpSet(v) if v.reg == 1 && v.value == "$04"
        ));
        assert!(matches!(
            &tokens[1].kind,
            TokenKind::Tile(t) if t.id == 0 && t.addr == "$1000" && t.words == 16
        ));
        assert!(matches!(tokens[2].kind, TokenKind::ReadController(0)));
        assert!(matches!(
            &tokens[3].kind,
            TokenKind::Sound(s) if s.channel == 1 && s.note == 60 && s.volume == 100
        ));
        assert!(matches!(tokens[4].kind, TokenKind::SoundStop));
    }

    #[test]
    fn test_controller_port_is_unrestricted() {
        let tokens = tokenize("READCONTROLLER 999");
        assert!(matches!(tokens[0].kind, TokenKind::ReadController(999)));
    }

    #[test]
    fn test_sprite_and_palette() {
        let tokens = tokenize("SPRITE 2, 100, 80, 5, 1, 1, 0\nPALETTE 0, $0EEE, $0000, 42");
        assert!(matches!(
            &tokens[0].kind,
            TokenKind::Sprite(s) if s.id == 2
                && s.x == "100"
                && s.y == "80"
                && s.tile == 5
                && s.palette == 1
                && s.hflip == 1
                && s.vflip == 0
        ));
        match &tokens[1].kind {
            TokenKind::Palette(p) => {
                assert_eq!(p.id, 0);
                assert_eq!(p.colors, vec!["$0EEE", "$0000", "42"]);
            }
            other => panic!("expected palette, got {other:?}"),
        }
    }

    #[test]
    fn test_arithmetic_and_moves() {
        let tokens = tokenize("MOVE x, D0\nADD x, 3\nSUB y, $10\nMUL x, 2\nDIV x, 2\nCMP x, y");
        assert!(matches!(
            &tokens[0].kind,
            TokenKind::Move(m) if m.src == "x" && m.dst == "D0"
        ));
        assert!(matches!(
            &tokens[1].kind,
            TokenKind::Add(a) if a.dst == "x" && a.src == "3"
        ));
        assert!(matches!(
            &tokens[2].kind,
            TokenKind::Sub(s) if s.dst == "y" && s.src == "$10"
        ));
        assert!(matches!(tokens[3].kind, TokenKind::Mul));
        assert!(matches!(tokens[4].kind, TokenKind::Div));
        assert!(matches!(tokens[5].kind, TokenKind::Cmp));
    }

    #[test]
    fn test_control_flow() {
        let tokens = tokenize("IF pad AND 4 THEN\nENDIF\nIF x = 5 THEN\nELSE\nGOTO loop\nmain:\nHALT\nWAITVBLANK");
        assert!(matches!(
            &tokens[0].kind,
            TokenKind::If(i) if i.var == "pad" && i.op == CmpOp::And && i.value == "4"
        ));
        assert!(matches!(tokens[1].kind, TokenKind::EndIf));
        assert!(matches!(
            &tokens[2].kind,
            TokenKind::If(i) if i.var == "x" && i.op == CmpOp::Eq && i.value == "5"
        ));
        assert!(matches!(tokens[3].kind, TokenKind::Else));
        assert!(matches!(&tokens[4].kind, TokenKind::Goto(l) if l == "loop"));
        assert!(matches!(&tokens[5].kind, TokenKind::LabelDef(l) if l == "main"));
        assert!(matches!(tokens[6].kind, TokenKind::Halt));
        assert!(matches!(tokens[7].kind, TokenKind::WaitVblank));
    }

    #[test]
    fn test_recognized_but_unlowered_shapes() {
        let tokens = tokenize(
            "FOR i = 1 TO 10 STEP 2\nNEXT i\nWHILE x > 0\nWEND\nGOSUB sub1\nRETURN\nPEEK($FF0000)\nPROC f(a, b)\nENDPROC\nINCLUDE \"lib.gb\"",
        );
        let kinds: Vec<_> = tokens.iter().map(|t| &t.kind).collect();
        assert!(matches!(kinds[0], TokenKind::For));
        assert!(matches!(kinds[1], TokenKind::Next));
        assert!(matches!(kinds[2], TokenKind::While));
        assert!(matches!(kinds[3], TokenKind::Wend));
        assert!(matches!(kinds[4], TokenKind::Gosub));
        assert!(matches!(kinds[5], TokenKind::Return));
        assert!(matches!(kinds[6], TokenKind::Peek));
        assert!(matches!(kinds[7], TokenKind::Proc));
        assert!(matches!(kinds[8], TokenKind::EndProc));
        assert!(matches!(kinds[9], TokenKind::Include));
    }

    #[test]
    fn test_for_without_step() {
        let tokens = tokenize("FOR i = 1 TO 10\nNEXT i\n");
        assert_eq!(tokens.len(), 2);
        assert!(matches!(tokens[0].kind, TokenKind::For));
        assert!(matches!(tokens[1].kind, TokenKind::Next));
    }

    #[test]
    fn test_comments_discarded_lines_counted() {
        let source = "// header comment\nREM another\nDIM x AS WORD\n\nHALT";
        let tokens = tokenize(source);
        assert_eq!(tokens.len(), 2);
        assert!(matches!(&tokens[0].kind, TokenKind::Declare(_)));
        assert_eq!(tokens[0].line, 3);
        assert!(matches!(tokens[1].kind, TokenKind::Halt));
        assert_eq!(tokens[1].line, 5);
    }

    #[test]
    fn test_trailing_comment_stripped() {
        let tokens = tokenize("DIM score AS WORD // player score\nHALT // stop");
        assert_eq!(tokens.len(), 2);
        assert!(matches!(
            &tokens[0].kind,
            TokenKind::Declare(d) if d.name == "score" && d.init.is_none()
        ));
        assert!(matches!(tokens[1].kind, TokenKind::Halt));
    }

    #[test]
    fn test_rem_needs_word_boundary() {
        // REMARK is an identifier, not a comment.
        let tokens = tokenize("REMARK\nrem skipped");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0].kind, TokenKind::Identifier));
        assert_eq!(tokens[0].text, "REMARK");
    }

    #[test]
    fn test_catch_all_is_total() {
        let tokens = tokenize("MOVE\n1234\n$FF\n@!");
        assert!(matches!(tokens[0].kind, TokenKind::Identifier));
        assert_eq!(tokens[0].text, "MOVE");
        assert!(matches!(tokens[1].kind, TokenKind::Number));
        assert!(matches!(tokens[2].kind, TokenKind::Hex));
        // Unmatchable characters still tokenize.
        assert!(tokens[3..]
            .iter()
            .all(|t| matches!(t.kind, TokenKind::Unknown)));
    }

    #[test]
    fn test_case_insensitive_statements() {
        let tokens = tokenize("vdp set 0, $04\nwaitvblank\nhalt");
        assert!(matches!(&tokens[0].kind, TokenKind::VdpSet(v) if v.reg == 0));
        assert!(matches!(tokens[1].kind, TokenKind::WaitVblank));
        assert!(matches!(tokens[2].kind, TokenKind::Halt));
    }
}
