//! Tolerant markup parser.
//!
//! Recovers an element tree from real-world markup: void elements need no
//! closing tag, a closing tag implicitly closes anything left open inside
//! it, and damage (interrupted tags, unmatched or missing closes) is
//! reported as warning diagnostics while parsing continues. Text content
//! is skipped; only elements and their attributes are kept.

use logos::Logos;
use smol_str::SmolStr;

use crate::base::{Diagnostic, DiagnosticCollector, FileId, TextRange, TextSize, codes};

use super::lexer::Token;
use super::{AttributeValue, MarkupAttribute, MarkupDocument, MarkupElement, MarkupParse};

/// Elements that never take content and need no closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| name.eq_ignore_ascii_case(v))
}

/// A start tag being assembled.
struct PendingTag {
    name: SmolStr,
    start: TextSize,
    attributes: Vec<MarkupAttribute>,
    /// Attribute name seen but not yet completed by a value.
    pending_name: Option<(SmolStr, TextRange)>,
    /// True between `=` and the value token.
    awaiting_value: bool,
}

impl PendingTag {
    fn new(name: &str, start: TextSize) -> Self {
        Self {
            name: SmolStr::new(name),
            start,
            attributes: Vec::new(),
            pending_name: None,
            awaiting_value: false,
        }
    }

    /// Complete a name-only attribute (`<input disabled>`).
    fn flush_pending(&mut self) {
        if let Some((name, name_range)) = self.pending_name.take() {
            self.attributes.push(MarkupAttribute {
                name,
                name_range,
                value: None,
            });
        }
        self.awaiting_value = false;
    }

    fn push_value(&mut self, text: &str, range: TextRange) {
        if let Some((name, name_range)) = self.pending_name.take() {
            self.attributes.push(MarkupAttribute {
                name,
                name_range,
                value: Some(AttributeValue {
                    text: SmolStr::new(text),
                    range,
                }),
            });
        }
        self.awaiting_value = false;
    }
}

enum State {
    /// Between tags.
    Content,
    /// Saw `<`, waiting for the tag name.
    AfterTagStart(TextSize),
    /// Inside a start tag.
    Tag(PendingTag),
    /// Saw `</`, waiting for the tag name.
    AfterCloseStart,
    /// Inside a closing tag, consuming up to `>`.
    CloseTag(Option<SmolStr>),
}

struct Parser {
    file: FileId,
    document: MarkupDocument,
    stack: Vec<super::ElementId>,
    diagnostics: DiagnosticCollector,
}

pub(crate) fn parse_document(file: FileId, text: &str) -> MarkupParse {
    let mut parser = Parser {
        file,
        document: MarkupDocument::new(file),
        stack: Vec::new(),
        diagnostics: DiagnosticCollector::new(),
    };

    let mut lex = Token::lexer(text);
    let mut state = State::Content;
    while let Some(token) = lex.next() {
        let span = lex.span();
        let range = TextRange::new(
            TextSize::from(span.start as u32),
            TextSize::from(span.end as u32),
        );
        state = parser.step(state, token, range, text);
    }
    parser.finish(state, TextSize::of(text));

    MarkupParse {
        document: parser.document,
        diagnostics: parser.diagnostics.take(),
    }
}

impl Parser {
    fn step(
        &mut self,
        state: State,
        token: Result<Token, ()>,
        range: TextRange,
        text: &str,
    ) -> State {
        match state {
            State::Content => match token {
                Ok(Token::TagStart) => State::AfterTagStart(range.start()),
                Ok(Token::CloseTagStart) => State::AfterCloseStart,
                // everything else is text content
                _ => State::Content,
            },
            State::AfterTagStart(start) => match token {
                Ok(Token::Name) => State::Tag(PendingTag::new(&text[range], start)),
                // a stray `<`; whatever follows is handled as if in content
                Ok(Token::TagStart) => State::AfterTagStart(range.start()),
                Ok(Token::CloseTagStart) => State::AfterCloseStart,
                _ => State::Content,
            },
            State::Tag(mut tag) => match token {
                Ok(Token::Name) => {
                    if tag.awaiting_value && tag.pending_name.is_some() {
                        // unquoted attribute value
                        tag.push_value(&text[range], range);
                    } else {
                        tag.flush_pending();
                        tag.pending_name = Some((SmolStr::new(&text[range]), range));
                    }
                    State::Tag(tag)
                }
                Ok(Token::Equals) => {
                    if tag.pending_name.is_some() {
                        tag.awaiting_value = true;
                    }
                    State::Tag(tag)
                }
                Ok(Token::DoubleQuoted | Token::SingleQuoted) => {
                    if tag.awaiting_value && tag.pending_name.is_some() {
                        let inner = TextRange::new(
                            range.start() + TextSize::from(1),
                            range.end() - TextSize::from(1),
                        );
                        tag.push_value(&text[inner], inner);
                    }
                    State::Tag(tag)
                }
                Ok(Token::TagEnd) => {
                    self.open_element(tag, range.end(), false);
                    State::Content
                }
                Ok(Token::SelfCloseEnd) => {
                    self.open_element(tag, range.end(), true);
                    State::Content
                }
                Ok(Token::TagStart) => {
                    self.report_unterminated(&tag, range);
                    self.open_element(tag, range.start(), false);
                    State::AfterTagStart(range.start())
                }
                Ok(Token::CloseTagStart) => {
                    self.report_unterminated(&tag, range);
                    self.open_element(tag, range.start(), false);
                    State::AfterCloseStart
                }
                // slashes, comments, declarations, garbage bytes
                _ => State::Tag(tag),
            },
            State::AfterCloseStart => match token {
                Ok(Token::Name) => State::CloseTag(Some(SmolStr::new(&text[range]))),
                Ok(Token::TagEnd) => State::Content,
                _ => State::CloseTag(None),
            },
            State::CloseTag(name) => match token {
                Ok(Token::TagEnd) => {
                    self.close_element(name.as_deref(), range);
                    State::Content
                }
                _ => State::CloseTag(name),
            },
        }
    }

    /// Wrap up at end of input: complete an interrupted start tag and
    /// report anything left open.
    fn finish(&mut self, state: State, eof: TextSize) {
        if let State::Tag(tag) = state {
            self.diagnostics.add(
                Diagnostic::warning(
                    self.file,
                    TextRange::new(tag.start, eof),
                    format!("start tag '{}' is not terminated", tag.name),
                )
                .with_code(codes::UNTERMINATED_TAG),
            );
            self.open_element(tag, eof, true);
        }
        for id in self.stack.drain(..) {
            let element = self.document.element_mut(id);
            let range = element.range;
            element.range = TextRange::new(range.start(), eof);
            let name = element.name.clone();
            self.diagnostics.add(
                Diagnostic::warning(self.file, range, format!("element '{name}' is never closed"))
                    .with_code(codes::UNCLOSED_ELEMENT),
            );
        }
    }

    fn open_element(&mut self, mut tag: PendingTag, end: TextSize, self_closing: bool) {
        tag.flush_pending();
        let parent = self.stack.last().copied();
        let void = is_void(&tag.name);
        let id = self.document.alloc(
            MarkupElement {
                name: tag.name,
                range: TextRange::new(tag.start, end),
                attributes: tag.attributes,
                parent,
                children: Vec::new(),
            },
            parent,
        );
        if !self_closing && !void {
            self.stack.push(id);
        }
    }

    fn close_element(&mut self, name: Option<&str>, close_range: TextRange) {
        let Some(name) = name else {
            return;
        };
        let matched = self
            .stack
            .iter()
            .rposition(|&id| self.document.element(id).name.eq_ignore_ascii_case(name));
        match matched {
            Some(pos) => {
                // implicitly closes anything opened inside the match
                for id in self.stack.drain(pos..) {
                    let element = self.document.element_mut(id);
                    element.range = TextRange::new(element.range.start(), close_range.end());
                }
            }
            None => {
                self.diagnostics.add(
                    Diagnostic::warning(
                        self.file,
                        close_range,
                        format!("closing tag '{name}' matches no open element"),
                    )
                    .with_code(codes::UNMATCHED_CLOSE),
                );
            }
        }
    }

    fn report_unterminated(&mut self, tag: &PendingTag, range: TextRange) {
        self.diagnostics.add(
            Diagnostic::warning(
                self.file,
                TextRange::new(tag.start, range.start()),
                format!("start tag '{}' is interrupted by another tag", tag.name),
            )
            .with_code(codes::UNTERMINATED_TAG),
        );
    }
}
