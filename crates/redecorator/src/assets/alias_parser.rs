//! Alias declaration parser
//!
//! Each pack may ship an alias file whose lines read `alias=source`. An alias
//! gives `alias` a copy of the texture set `source` has in the same pack.
//! Blank lines are ignored; anything else that does not fit the form is
//! reported and skipped.

use thiserror::Error;

/// One parsed `alias=source` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRule {
    /// Object name receiving the copy
    pub alias: String,
    /// Object name whose texture set is copied
    pub source: String,
    /// 1-based line number in the alias file
    pub line: usize,
}

/// Recoverable alias problems; the offending line is skipped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AliasError {
    /// Line does not have the `alias=source` form
    #[error("{pack}: line {line}: expected `alias=source`, found `{text}`")]
    Malformed {
        /// Pack the alias file belongs to
        pack: String,
        /// 1-based line number
        line: usize,
        /// Offending line, trimmed
        text: String,
    },

    /// The source object has no textures in this pack
    #[error("{pack}: line {line}: cannot alias `{alias}` to `{source_name}`, no textures for `{source_name}` in this pack")]
    MissingSource {
        /// Pack the alias file belongs to
        pack: String,
        /// 1-based line number
        line: usize,
        /// Requested alias name
        alias: String,
        /// Object name that could not be found
        source_name: String,
    },
}

/// Alias file parser
pub struct AliasParser;

impl AliasParser {
    /// Parse alias file contents, one result per non-blank line in file order
    pub fn parse(pack: &str, contents: &str) -> Vec<Result<AliasRule, AliasError>> {
        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| Self::parse_line(pack, index + 1, line))
            .collect()
    }

    /// Parse a single non-blank line
    pub fn parse_line(pack: &str, line_num: usize, line: &str) -> Result<AliasRule, AliasError> {
        let text = line.trim();
        let malformed = || AliasError::Malformed {
            pack: pack.to_string(),
            line: line_num,
            text: text.to_string(),
        };

        let (alias, source) = text.split_once('=').ok_or_else(malformed)?;
        let (alias, source) = (alias.trim(), source.trim());

        if alias.is_empty() || source.is_empty() || source.contains('=') {
            return Err(malformed());
        }

        Ok(AliasRule {
            alias: alias.to_string(),
            source: source.to_string(),
            line: line_num,
        })
    }
}
