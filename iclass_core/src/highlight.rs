//! Per-line syntax highlighting
//!
//! The tokenizer is stateless: every line is scanned on its own, so a string
//! or comment never continues onto the next line. Each call walks the line
//! left to right and emits one [`Span`] per token; the spans cover every
//! byte exactly once and in order.

use alloc::vec::Vec;
use core::ops::Range;

use crate::language::Language;

/// Abstract color category of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Default,
    Keyword,
    String,
    Register,
    Number,
    Comment,
    Symbol,
}

/// Contiguous run of bytes rendered in one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub category: Category,
}

impl Span {
    pub const fn new(start: usize, end: usize, category: Category) -> Self {
        Self {
            start,
            end,
            category,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Reserved words, sorted so that words sharing a first byte are adjacent.
struct WordSet(&'static [&'static [u8]]);

impl WordSet {
    /// Length of the longest word that prefixes `rest` and is not followed
    /// by an alphanumeric byte.
    fn match_len(&self, rest: &[u8]) -> Option<usize> {
        let first = *rest.first()?;
        let words = self.0;
        let start = words.partition_point(|w| w[0] < first);

        words[start..]
            .iter()
            .take_while(|w| w[0] == first)
            .filter(|w| rest.starts_with(w))
            .filter(|w| !rest.get(w.len()).is_some_and(|b| b.is_ascii_alphanumeric()))
            .map(|w| w.len())
            .max()
    }
}

const C_KEYWORDS: WordSet = WordSet(&[
    b"#include", b"char", b"define", b"double", b"else", b"float", b"for", b"if", b"int",
    b"main", b"return", b"void", b"while",
]);

const PYTHON_KEYWORDS: WordSet = WordSet(&[
    b"as", b"class", b"def", b"elif", b"else", b"except", b"for", b"from", b"if", b"import",
    b"return", b"try", b"while", b"with",
]);

const ASM_KEYWORDS: WordSet = WordSet(&[
    b"add", b"call", b"cmp", b"div", b"global", b"int", b"je", b"jmp", b"jne", b"mov", b"mul",
    b"pop", b"push", b"ret", b"section", b"sub",
]);

const ASM_REGISTERS: WordSet = WordSet(&[
    b"eax", b"ebp", b"ebx", b"ecx", b"edi", b"edx", b"esi", b"esp", b"rax", b"rbp", b"rbx",
    b"rcx", b"rdi", b"rdx", b"rsi", b"rsp",
]);

const SYMBOLS: &[u8] = b"{}()[];:=+-*/%&|^~!<>";

fn keywords(language: Language) -> Option<&'static WordSet> {
    match language {
        Language::C => Some(&C_KEYWORDS),
        Language::Python => Some(&PYTHON_KEYWORDS),
        Language::Asm => Some(&ASM_KEYWORDS),
        Language::None => None,
    }
}

fn is_number_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.' || b == b'x' || matches!(b, b'a'..=b'f' | b'A'..=b'F')
}

fn starts_comment(rest: &[u8], language: Language) -> bool {
    match language {
        Language::Asm => rest.starts_with(b";"),
        Language::C => rest.starts_with(b"//"),
        Language::Python => rest.starts_with(b"//") || rest.starts_with(b"#"),
        Language::None => false,
    }
}

/// Iterator over the highlighted spans of one line
pub struct Tokens<'a> {
    line: &'a [u8],
    language: Language,
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a [u8], language: Language) -> Self {
        Self {
            line,
            language,
            pos: 0,
        }
    }

    fn next_span(&self) -> (usize, Category) {
        let line = self.line;
        let rest = &line[self.pos..];
        let byte = rest[0];

        if self.language == Language::None {
            return (rest.len(), Category::Default);
        }

        if byte == b' ' || byte == b'\t' {
            return (1, Category::Default);
        }

        if let Some(len) = keywords(self.language).and_then(|set| set.match_len(rest)) {
            return (len, Category::Keyword);
        }

        if self.language == Language::Asm {
            if let Some(len) = ASM_REGISTERS.match_len(rest) {
                return (len, Category::Register);
            }
        }

        if byte == b'"' || byte == b'\'' {
            let len = match rest[1..].iter().position(|b| *b == byte) {
                Some(close) => close + 2,
                None => rest.len(),
            };
            return (len, Category::String);
        }

        if byte.is_ascii_digit() {
            let len = rest.iter().take_while(|b| is_number_byte(**b)).count();
            return (len, Category::Number);
        }

        if starts_comment(rest, self.language) {
            return (rest.len(), Category::Comment);
        }

        if SYMBOLS.contains(&byte) {
            return (1, Category::Symbol);
        }

        (1, Category::Default)
    }
}

impl Iterator for Tokens<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if self.pos >= self.line.len() {
            return None;
        }

        let (len, category) = self.next_span();
        let span = Span::new(self.pos, self.pos + len, category);
        self.pos = span.end;
        Some(span)
    }
}

/// Tokenize one line for the given language.
pub fn highlight_line(line: &[u8], language: Language) -> Vec<Span> {
    Tokens::new(line, language).collect()
}
