//! Console rendering of a token store
//!
//! The banner strings and the bracket form are a fixed output format that
//! downstream tooling compares byte for byte.

use crate::tokens::TokenStore;
use std::io::{self, Write};

pub const TOKENS_BANNER_OPEN: &str = "---------- Tokens ----------";
pub const TOKENS_BANNER_CLOSE: &str = "----------------------------";
pub const ORIGINAL_BANNER_OPEN: &str = "---------- Original ----------";
pub const ORIGINAL_BANNER_CLOSE: &str = "------------------------------";

/// One output line per stored line, each lexeme followed by two spaces
pub fn render_tokens<W: Write>(
    out: &mut W,
    store: &TokenStore,
    bracket: bool,
    boundary: bool,
) -> io::Result<()> {
    if boundary {
        writeln!(out, "{}", TOKENS_BANNER_OPEN)?;
    }

    for line in store.lines() {
        for token in line.tokens() {
            if bracket {
                write!(out, "[{}]  ", token.lexeme)?;
            } else {
                write!(out, "{}  ", token.lexeme)?;
            }
        }
        writeln!(out)?;
    }

    if boundary {
        writeln!(out, "{}", TOKENS_BANNER_CLOSE)?;
    }
    Ok(())
}

/// Recorded input lines, unmodified
pub fn render_original<W: Write>(
    out: &mut W,
    store: &TokenStore,
    boundary: bool,
) -> io::Result<()> {
    if boundary {
        writeln!(out, "{}", ORIGINAL_BANNER_OPEN)?;
    }
    for line in store.original_lines() {
        writeln!(out, "{}", line)?;
    }
    if boundary {
        writeln!(out, "{}", ORIGINAL_BANNER_CLOSE)?;
    }
    Ok(())
}

/// `render_tokens` into a string
pub fn tokens_to_string(store: &TokenStore, bracket: bool, boundary: bool) -> String {
    let mut buffer = Vec::new();
    // Writing to a Vec cannot fail
    let _ = render_tokens(&mut buffer, store, bracket, boundary);
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::scan_str;

    #[test]
    fn bracketed_with_banners() {
        let store = scan_str("a>>=b\n\n  x");
        assert_eq!(
            tokens_to_string(&store, true, true),
            "---------- Tokens ----------\n[a]  [>>=]  [b]  \n[x]  \n----------------------------\n"
        );
    }

    #[test]
    fn plain_without_banners() {
        let store = scan_str("f(1)");
        assert_eq!(tokens_to_string(&store, false, false), "f  (  1  )  \n");
    }

    #[test]
    fn empty_store_renders_only_banners() {
        let store = scan_str("   ");
        assert_eq!(
            tokens_to_string(&store, true, true),
            format!("{}\n{}\n", TOKENS_BANNER_OPEN, TOKENS_BANNER_CLOSE)
        );
    }

    #[test]
    fn original_keeps_blank_lines() {
        let store = scan_str("a\n\n b");
        let mut buffer = Vec::new();
        render_original(&mut buffer, &store, true).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "---------- Original ----------\na\n\n b\n------------------------------\n"
        );
    }
}
