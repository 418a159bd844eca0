use std::io::{BufRead, Write};

use tracing::debug;

use crate::cli::Options;
use crate::error::{Error, Result};
use crate::token::Diagnostic;
use crate::utf::{scalars_of, to_display_char, CodePoint};

const MENU: &str = "\
1) Characters -> code points
2) Code point -> character
3) Tokens -> UTF-16BE
q) Quit
> ";

/// Menu loop. Returns when `q` is chosen or `input` runs out.
pub fn run<R, W>(input: &mut R, out: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(out, "{MENU}")?;
        out.flush()?;
        let Some(choice) = read_line(input)? else {
            return Ok(());
        };
        debug!(choice = choice.trim(), "menu");
        match choice.trim() {
            "1" => {
                let Some(text) = prompt(input, out, "Text: ")? else {
                    return Ok(());
                };
                for (character, codepoint) in describe_chars(&text) {
                    writeln!(out, "'{character}' {codepoint}")?;
                }
            }
            "2" => {
                let Some(text) = prompt(input, out, "Code point (hex): ")? else {
                    return Ok(());
                };
                match parse_hex_codepoint(text.trim()) {
                    Ok(codepoint) => match to_display_char(codepoint) {
                        Ok(character) => writeln!(out, "{codepoint} -> '{character}'")?,
                        Err(error) => writeln!(out, "Cannot display: {error}")?,
                    },
                    Err(diagnostic) => writeln!(out, "{diagnostic}")?,
                }
            }
            "3" => {
                let Some(text) = prompt(input, out, "Tokens: ")? else {
                    return Ok(());
                };
                convert_line(text, out)?;
            }
            "q" | "Q" => return Ok(()),
            "" => {}
            other => writeln!(out, "Unknown choice: '{other}'")?,
        }
    }
}

/// Each character of `text` with its code point.
pub fn describe_chars(text: &str) -> impl Iterator<Item = (char, CodePoint)> + '_ {
    text.chars().zip(scalars_of(text))
}

/// Base 16 regardless of an optional `U+` or `0x` prefix.
pub fn parse_hex_codepoint(text: &str) -> std::result::Result<CodePoint, Diagnostic> {
    let digits = ["U+", "u+", "0x", "0X"]
        .into_iter()
        .find_map(|prefix| text.strip_prefix(prefix))
        .unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Diagnostic::Unrecognized {
            token: text.to_owned(),
        });
    }
    let value = u32::from_str_radix(digits, 16).map_err(|_| Diagnostic::Overflow {
        token: text.to_owned(),
    })?;
    CodePoint::from_u32(value).ok_or_else(|| Diagnostic::OutOfRange {
        token: text.to_owned(),
        value,
    })
}

fn convert_line<W: Write>(line: String, out: &mut W) -> Result<()> {
    let options = Options {
        tokens: vec![line],
        ..Options::default()
    };
    let mut report = Vec::new();
    let mut diagnostics = Vec::new();
    let result = crate::convert(&options, &mut report, &mut diagnostics);
    out.write_all(&diagnostics)?;
    out.write_all(&report)?;
    match result {
        Err(Error::NoValidInput) => writeln!(out, "{}", Error::NoValidInput)?,
        other => other?,
    }
    Ok(())
}

fn prompt<R, W>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{label}")?;
    out.flush()?;
    read_line(input)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}
