use std::fmt;

use crate::{Field, ParseError, SemanticVersion, TAG_FORMAT};

lazy_static! {
    static ref TAG_TEMPLATE: VersionTemplate = VersionTemplate::new(TAG_FORMAT);
}

/// Token in a compiled [`VersionTemplate`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Character that must appear verbatim.
    Literal(char),
    /// `%M`
    Major,
    /// `%m`
    Minor,
    /// `%p`
    Patch,
    /// `%s`, rendered as `-` followed by the special string when present.
    Special,
}

/// Template used both to format versions as strings and to parse strings into
/// versions.
///
/// `%M`, `%m`, and `%p` stand for the major, minor, and patch numbers. `%s`
/// stands for the special (prerelease) string including its leading `-`, and
/// is omitted entirely when there is no special string. Every other character
/// is a literal.
///
/// When parsing, `%s` consumes the rest of the input, so it only makes sense as
/// the last token of a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionTemplate {
    tokens: Vec<Token>,
}

impl fmt::Display for VersionTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                Token::Literal(c) => write!(f, "{c}")?,
                Token::Major => write!(f, "%M")?,
                Token::Minor => write!(f, "%m")?,
                Token::Patch => write!(f, "%p")?,
                Token::Special => write!(f, "%s")?,
            }
        }
        Ok(())
    }
}

impl From<&str> for VersionTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl VersionTemplate {
    /// Compiles a template string.
    pub fn new(template: &str) -> Self {
        let mut tokens = vec![];
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            let placeholder = match (c, chars.peek()) {
                ('%', Some('M')) => Some(Token::Major),
                ('%', Some('m')) => Some(Token::Minor),
                ('%', Some('p')) => Some(Token::Patch),
                ('%', Some('s')) => Some(Token::Special),
                _ => None,
            };
            match placeholder {
                Some(token) => {
                    chars.next();
                    tokens.push(token);
                }
                None => tokens.push(Token::Literal(c)),
            }
        }
        Self { tokens }
    }

    /// Returns the compiled [`TAG_FORMAT`] template.
    pub fn tag() -> &'static Self {
        &TAG_TEMPLATE
    }

    /// Returns the tokens of the template.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Renders a version using the template.
    pub fn format(&self, version: &SemanticVersion) -> String {
        let mut ret = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(c) => ret.push(*c),
                Token::Major => ret += &version.major.to_string(),
                Token::Minor => ret += &version.minor.to_string(),
                Token::Patch => ret += &version.patch.to_string(),
                Token::Special => {
                    if let Some(special) = &version.special {
                        ret.push('-');
                        ret += special;
                    }
                }
            }
        }
        ret
    }

    /// Parses a version using the template.
    ///
    /// If `allow_missing` is `true`, a numeric field with no digits is parsed
    /// as `0` without consuming any input, and so is a numeric field with no
    /// placeholder in the template. Otherwise both are errors.
    pub fn parse(&self, input: &str, allow_missing: bool) -> Result<SemanticVersion, ParseError> {
        let mut version = SemanticVersion::default();
        let mut rest = input;

        for &token in &self.tokens {
            match token {
                Token::Literal(expected) => match rest.strip_prefix(expected) {
                    Some(remaining) => rest = remaining,
                    None => {
                        return Err(ParseError::FormatMismatch {
                            position: input.len() - rest.len(),
                            expected: Some(expected),
                            found: rest.chars().next(),
                        });
                    }
                },

                Token::Special => {
                    if let Some(special) = rest.strip_prefix('-') {
                        version.special = Some(special.to_owned());
                        rest = "";
                    }
                }

                Token::Major => {
                    (version.major, rest) = take_number(input, rest, Field::Major, allow_missing)?;
                }
                Token::Minor => {
                    (version.minor, rest) = take_number(input, rest, Field::Minor, allow_missing)?;
                }
                Token::Patch => {
                    (version.patch, rest) = take_number(input, rest, Field::Patch, allow_missing)?;
                }
            }
        }

        if let Some(found) = rest.chars().next() {
            return Err(ParseError::FormatMismatch {
                position: input.len() - rest.len(),
                expected: None,
                found: Some(found),
            });
        }

        if !allow_missing {
            let placeholders = [
                (Token::Major, Field::Major),
                (Token::Minor, Field::Minor),
                (Token::Patch, Field::Patch),
            ];
            for (token, field) in placeholders {
                if !self.tokens.contains(&token) {
                    return Err(ParseError::MissingField {
                        field,
                        position: None,
                    });
                }
            }
        }

        Ok(version)
    }
}

/// Consumes the longest run of ASCII digits at the start of `rest`, returning
/// the parsed number and the remaining input.
fn take_number<'a>(
    input: &str,
    rest: &'a str,
    field: Field,
    allow_missing: bool,
) -> Result<(u64, &'a str), ParseError> {
    let position = input.len() - rest.len();
    let digit_count = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, remaining) = rest.split_at(digit_count);
    if digits.is_empty() {
        return if allow_missing {
            Ok((0, rest))
        } else {
            Err(ParseError::MissingField {
                field,
                position: Some(position),
            })
        };
    }
    let value = digits
        .parse()
        .map_err(|_| ParseError::NumberTooLarge { field, position })?;
    Ok((value, remaining))
}
