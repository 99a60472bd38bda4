//! Raw flag and header parsing for subcommand tokens.
//!
//! Subcommands receive their tokens untouched from clap and read them here
//! with the loose `--name value` / `--flag` grammar CI workflows already use.

use std::collections::{BTreeMap, HashMap};

/// Value recorded for a single flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Flag followed by a value token
    Str(String),
    /// Presence-only flag
    Bool(bool),
}

/// Flags parsed from one invocation's tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    values: HashMap<String, FlagValue>,
}

/// Header name to value, both trimmed
pub type HeaderMap = BTreeMap<String, String>;

impl ParsedArgs {
    /// Raw value for a flag
    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.values.get(name)
    }

    /// String value for a flag.
    ///
    /// Presence-only flags and empty values count as absent.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FlagValue::Str(value)) if !value.is_empty() => Some(value),
            _ => None,
        }
    }

    /// Whether the flag appeared at all
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of distinct flags
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no flags were parsed
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse `--name value` and `--flag` tokens.
///
/// A flag consumes the next token as its value unless that token is missing
/// or itself starts with `--`. Later occurrences overwrite earlier ones.
pub fn parse_args<S: AsRef<str>>(tokens: &[S]) -> ParsedArgs {
    let mut values = HashMap::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i].as_ref();
        if let Some(name) = token.strip_prefix("--") {
            match tokens.get(i + 1).map(AsRef::as_ref) {
                Some(next) if !next.starts_with("--") => {
                    values.insert(name.to_string(), FlagValue::Str(next.to_string()));
                    i += 2;
                    continue;
                }
                _ => {
                    values.insert(name.to_string(), FlagValue::Bool(true));
                }
            }
        }
        i += 1;
    }

    ParsedArgs { values }
}

/// Collect every `--header "Key: Value"` pair.
///
/// Entries without a colon, or with an empty name before it, are dropped.
pub fn parse_headers_from_args<S: AsRef<str>>(tokens: &[S]) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for pair in tokens.windows(2) {
        if pair[0].as_ref() != "--header" {
            continue;
        }
        let raw = pair[1].as_ref();
        match raw.find(':') {
            Some(colon) if colon > 0 => {
                let key = raw[..colon].trim();
                let value = raw[colon + 1..].trim();
                headers.insert(key.to_string(), value.to_string());
            }
            _ => log::debug!("Ignoring malformed header '{}'", raw),
        }
    }

    headers
}
