//! Path template compilation.
//!
//! # Responsibilities
//! - Split a template such as `/projects/:projectId` into literal and parameter pieces
//! - Compile the template into an anchored matcher with an optional trailing slash
//! - Extract parameter values from a matching path
//! - Interpolate parameter values back into the template
//!
//! # Design Decisions
//! - A parameter is `:` followed by a run of non-`/` characters
//! - A `:` with no name after it is literal text
//! - Literal text is regex-escaped, so `.` in a template only matches `.`
//! - Parameter values are percent-decoded on match and percent-encoded on
//!   interpolation, so values survive a round trip
//! - A value of `.` or `..` filling a whole segment is refused: URL parsers
//!   collapse dot segments even when percent-encoded

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;

use crate::routing::error::{RouteError, RouteResult};
use crate::routing::location::RouteParams;

/// Characters escaped when a parameter value is written into a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Why a template could not be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolateError<'a> {
    /// No value was supplied for this parameter.
    Missing(&'a str),
    /// The value would form a `.` or `..` path segment.
    DotSegment(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Param(String),
}

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    pieces: Vec<Piece>,
    param_names: Vec<String>,
    regex: Regex,
}

impl PathPattern {
    /// Compile a path template.
    pub fn new(template: impl Into<String>) -> RouteResult<Self> {
        let template = template.into();
        let pieces = tokenize(&template);

        let mut source = String::with_capacity(template.len() + 8);
        source.push('^');
        for piece in &pieces {
            match piece {
                Piece::Literal(text) => source.push_str(&regex::escape(text)),
                Piece::Param(_) => source.push_str("([^/]*)"),
            }
        }
        source.push_str("/?$");

        let regex = Regex::new(&source).map_err(|source| RouteError::InvalidPattern {
            path: template.clone(),
            source,
        })?;

        let param_names = pieces
            .iter()
            .filter_map(|piece| match piece {
                Piece::Param(name) => Some(name.clone()),
                Piece::Literal(_) => None,
            })
            .collect();

        Ok(Self {
            template,
            pieces,
            param_names,
            regex,
        })
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Parameter names in left-to-right order.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Returns true if the template declares at least one parameter.
    pub fn has_params(&self) -> bool {
        !self.param_names.is_empty()
    }

    /// Returns true if `path` matches the template.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and zip the captured values with the parameter names.
    ///
    /// Returns `None` when the path does not match. A template without
    /// parameters yields an empty map on match.
    pub fn captures(&self, path: &str) -> Option<RouteParams> {
        let captures = self.regex.captures(path)?;

        let params = self
            .param_names
            .iter()
            .zip(captures.iter().skip(1))
            .map(|(name, value)| {
                let raw = value.map(|m| m.as_str()).unwrap_or_default();
                (name.clone(), percent_decode_str(raw).decode_utf8_lossy().into_owned())
            })
            .collect();

        Some(params)
    }

    /// Substitute every `:name` token with its value from `params`.
    pub fn interpolate<'a>(&'a self, params: &RouteParams) -> Result<String, InterpolateError<'a>> {
        let mut path = String::with_capacity(self.template.len());
        for (index, piece) in self.pieces.iter().enumerate() {
            match piece {
                Piece::Literal(text) => path.push_str(text),
                Piece::Param(name) => {
                    let value = params
                        .get(name)
                        .ok_or(InterpolateError::Missing(name.as_str()))?;
                    if (value == "." || value == "..") && self.fills_segment(index) {
                        return Err(InterpolateError::DotSegment(name.as_str()));
                    }
                    path.extend(utf8_percent_encode(value, PATH_SEGMENT));
                }
            }
        }
        Ok(path)
    }

    fn fills_segment(&self, index: usize) -> bool {
        let starts = match index.checked_sub(1).map(|prev| &self.pieces[prev]) {
            None => true,
            Some(Piece::Literal(text)) => text.ends_with('/'),
            Some(Piece::Param(_)) => false,
        };
        let ends = match self.pieces.get(index + 1) {
            None => true,
            Some(Piece::Literal(text)) => text.starts_with('/'),
            Some(Piece::Param(_)) => false,
        };
        starts && ends
    }
}

fn tokenize(template: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(idx) = rest.find(':') {
        literal.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];
        let end = after.find('/').unwrap_or(after.len());

        if end == 0 {
            literal.push(':');
        } else {
            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(Piece::Param(after[..end].to_string()));
        }
        rest = &after[end..];
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    pieces
}
