//! Instruction document model and a line-oriented build-recipe parser.
//!
//! The parser handles what rules need to see: instruction keywords, raw
//! instruction text with continuation lines and heredoc bodies joined, and
//! source lines. Argument syntax (JSON arrays, flags) is left to the rules.

use std::collections::{BTreeSet, VecDeque};
use thiserror::Error;
use tracing::debug;

/// Default escape character for line continuations.
const DEFAULT_ESCAPE: char = '\\';

/// Errors that can occur while parsing a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The instruction keyword is not recognised.
    #[error("line {line}: unknown instruction: {keyword}")]
    UnknownInstruction {
        /// Line the instruction starts on.
        line: usize,
        /// The keyword as written.
        keyword: String,
    },

    /// The `escape` parser directive names an unsupported character.
    #[error("line {line}: invalid escape directive value {value:?} (expected '\\' or '`')")]
    InvalidEscape {
        /// Line of the directive.
        line: usize,
        /// The directive value as written.
        value: String,
    },
}

/// Kind of a build-recipe instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InstructionKind {
    /// `ADD`
    Add,
    /// `ARG`
    Arg,
    /// `CMD`
    Cmd,
    /// `COPY`
    Copy,
    /// `ENTRYPOINT`
    Entrypoint,
    /// `ENV`
    Env,
    /// `EXPOSE`
    Expose,
    /// `FROM`
    From,
    /// `HEALTHCHECK`
    Healthcheck,
    /// `LABEL`
    Label,
    /// `MAINTAINER`
    Maintainer,
    /// `ONBUILD`
    Onbuild,
    /// `RUN`
    Run,
    /// `SHELL`
    Shell,
    /// `STOPSIGNAL`
    Stopsignal,
    /// `USER`
    User,
    /// `VOLUME`
    Volume,
    /// `WORKDIR`
    Workdir,
}

impl InstructionKind {
    /// Every instruction kind.
    pub const ALL: [Self; 18] = [
        Self::Add,
        Self::Arg,
        Self::Cmd,
        Self::Copy,
        Self::Entrypoint,
        Self::Env,
        Self::Expose,
        Self::From,
        Self::Healthcheck,
        Self::Label,
        Self::Maintainer,
        Self::Onbuild,
        Self::Run,
        Self::Shell,
        Self::Stopsignal,
        Self::User,
        Self::Volume,
        Self::Workdir,
    ];

    /// Returns the lowercase keyword (e.g. "run").
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Arg => "arg",
            Self::Cmd => "cmd",
            Self::Copy => "copy",
            Self::Entrypoint => "entrypoint",
            Self::Env => "env",
            Self::Expose => "expose",
            Self::From => "from",
            Self::Healthcheck => "healthcheck",
            Self::Label => "label",
            Self::Maintainer => "maintainer",
            Self::Onbuild => "onbuild",
            Self::Run => "run",
            Self::Shell => "shell",
            Self::Stopsignal => "stopsignal",
            Self::User => "user",
            Self::Volume => "volume",
            Self::Workdir => "workdir",
        }
    }

    /// Returns true if the instruction may carry `<<EOF` heredoc bodies.
    #[must_use]
    pub fn accepts_heredoc(self) -> bool {
        matches!(self, Self::Run | Self::Copy | Self::Add)
    }

    /// Looks up a kind by keyword, ignoring ASCII case.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(keyword))
    }
}

impl std::fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.keyword().to_ascii_uppercase())
    }
}

/// One parsed instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    kind: InstructionKind,
    original: String,
    start_line: usize,
    end_line: usize,
}

impl Instruction {
    /// Creates a single-line instruction.
    ///
    /// `original` is the raw text, keyword included (e.g. `RUN make`).
    #[must_use]
    pub fn new(kind: InstructionKind, original: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            original: original.into(),
            start_line: line,
            end_line: line,
        }
    }

    /// Sets the last source line of a multi-line instruction.
    #[must_use]
    pub fn with_end_line(mut self, end_line: usize) -> Self {
        self.end_line = end_line.max(self.start_line);
        self
    }

    /// Returns the instruction kind.
    #[must_use]
    pub fn kind(&self) -> InstructionKind {
        self.kind
    }

    /// Returns the lowercase keyword.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        self.kind.keyword()
    }

    /// Returns the raw instruction text.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Returns the text after the keyword and its separator.
    ///
    /// `None` when the raw text is too short to hold an argument tail.
    #[must_use]
    pub fn arguments(&self) -> Option<&str> {
        self.original.get(self.keyword().len() + 1..)
    }

    /// First source line (1-indexed).
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// Last source line (1-indexed).
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.end_line
    }

    /// Location of the start of this instruction.
    #[must_use]
    pub fn location(&self) -> crate::Location {
        crate::Location::new(self.start_line)
    }
}

/// A parsed build-recipe document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    instructions: Vec<Instruction>,
}

impl Document {
    /// Creates a document from already parsed instructions.
    #[must_use]
    pub fn from_instructions(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Parses a document.
    ///
    /// # Errors
    ///
    /// Returns an error on unknown instruction keywords or an invalid
    /// `escape` directive.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let mut escape = DEFAULT_ESCAPE;
        let mut in_directives = true;
        let mut instructions = Vec::new();
        let mut pending: Option<Pending> = None;

        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;

            if let Some(entry) = pending.as_mut().filter(|p| p.in_heredoc()) {
                if entry.push_heredoc_line(line, raw) {
                    if let Some(done) = pending.take() {
                        instructions.push(done.finish()?);
                    }
                }
                continue;
            }

            let trimmed = raw.trim();

            if in_directives {
                if let Some((key, value)) = parse_directive(trimmed) {
                    if key.eq_ignore_ascii_case("escape") {
                        escape = parse_escape(line, value)?;
                    }
                    continue;
                }
                in_directives = false;
            }

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let text = raw.trim_end();
            let (content, continues) = match text.strip_suffix(escape) {
                Some(rest) => (rest.trim_end(), true),
                None => (text, false),
            };

            let entry = pending.get_or_insert_with(|| Pending::new(line));
            if entry.parts.is_empty() {
                entry.parts.push(content.trim_start().to_string());
            } else {
                entry.parts.push(content.to_string());
            }
            entry.end_line = line;
            entry.heredocs.extend(heredoc_markers(content));

            if !continues && !entry.open_heredocs() {
                if let Some(done) = pending.take() {
                    instructions.push(done.finish()?);
                }
            }
        }

        if let Some(done) = pending.take() {
            if done.in_heredoc() {
                debug!(
                    "Unterminated heredoc {:?} at end of input, closing instruction",
                    done.heredocs[0].terminator
                );
            } else {
                debug!(
                    "Dangling line continuation at line {}, closing instruction",
                    done.end_line
                );
            }
            instructions.push(done.finish()?);
        }

        Ok(Self { instructions })
    }

    /// Returns the instructions in document order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Returns the set of instruction kinds present.
    #[must_use]
    pub fn kinds(&self) -> BTreeSet<InstructionKind> {
        self.instructions.iter().map(Instruction::kind).collect()
    }

    /// Returns true if the document has no instructions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// An instruction whose continuation lines are still being collected.
struct Pending {
    start_line: usize,
    end_line: usize,
    parts: Vec<String>,
    heredocs: VecDeque<Heredoc>,
    reading_bodies: bool,
}

impl Pending {
    fn new(line: usize) -> Self {
        Self {
            start_line: line,
            end_line: line,
            parts: Vec::new(),
            heredocs: VecDeque::new(),
            reading_bodies: false,
        }
    }

    fn in_heredoc(&self) -> bool {
        self.reading_bodies && !self.heredocs.is_empty()
    }

    /// Called once the instruction line itself is complete. Switches to body
    /// collection if the keyword takes heredocs and a marker was seen.
    fn open_heredocs(&mut self) -> bool {
        let accepts = self
            .parts
            .first()
            .and_then(|first| first.split_whitespace().next())
            .and_then(InstructionKind::from_keyword)
            .is_some_and(InstructionKind::accepts_heredoc);
        if !accepts {
            self.heredocs.clear();
        }
        self.reading_bodies = !self.heredocs.is_empty();
        self.reading_bodies
    }

    /// Appends a body line verbatim. Returns true once the last heredoc is
    /// terminated.
    fn push_heredoc_line(&mut self, line: usize, raw: &str) -> bool {
        self.parts.push(raw.to_string());
        self.end_line = line;
        if self.heredocs.front().is_some_and(|h| h.is_terminator(raw)) {
            self.heredocs.pop_front();
        }
        self.heredocs.is_empty()
    }

    fn finish(self) -> Result<Instruction, ParseError> {
        let original = self.parts.join("\n");
        let keyword = original.split_whitespace().next().unwrap_or_default();
        let kind =
            InstructionKind::from_keyword(keyword).ok_or_else(|| ParseError::UnknownInstruction {
                line: self.start_line,
                keyword: keyword.to_string(),
            })?;

        Ok(Instruction::new(kind, original, self.start_line).with_end_line(self.end_line))
    }
}

/// One `<<WORD` heredoc opened by an instruction line.
#[derive(Debug)]
struct Heredoc {
    terminator: String,
    strip_tabs: bool,
}

impl Heredoc {
    fn is_terminator(&self, raw: &str) -> bool {
        let candidate = if self.strip_tabs {
            raw.trim_start_matches('\t')
        } else {
            raw
        };
        candidate == self.terminator
    }
}

/// Finds `<<WORD`, `<<-WORD`, `<<"WORD"` and `<<'WORD'` markers outside
/// shell quotes, in order. `<<<` here-strings are not heredocs.
fn heredoc_markers(text: &str) -> Vec<Heredoc> {
    let mut markers = Vec::new();
    let mut quote: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (None | Some('"'), '\\') => {
                chars.next();
            }
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '<') if chars.next_if_eq(&'<').is_some() => {
                if chars.next_if_eq(&'<').is_some() {
                    continue;
                }
                let strip_tabs = chars.next_if_eq(&'-').is_some();
                let quoted = chars.next_if(|c| *c == '"' || *c == '\'');
                let mut terminator = String::new();
                while let Some(c) =
                    chars.next_if(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
                {
                    terminator.push(c);
                }
                if quoted.is_some_and(|q| chars.next_if_eq(&q).is_none()) {
                    continue;
                }
                if !terminator.is_empty() {
                    markers.push(Heredoc {
                        terminator,
                        strip_tabs,
                    });
                }
            }
            _ => {}
        }
    }

    markers
}

/// Splits a `# key=value` parser directive.
fn parse_directive(line: &str) -> Option<(&str, &str)> {
    let body = line.strip_prefix('#')?;
    let (key, value) = body.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((key, value.trim()))
}

fn parse_escape(line: usize, value: &str) -> Result<char, ParseError> {
    match value {
        "\\" => Ok('\\'),
        "`" => Ok('`'),
        other => Err(ParseError::InvalidEscape {
            line,
            value: other.to_string(),
        }),
    }
}
