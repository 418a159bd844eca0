pub mod cli;
pub mod error;
pub mod interactive;
pub mod token;
pub mod utf;

use std::ffi::OsString;
use std::io::Write;

use clap::{CommandFactory, Parser};
use itertools::Itertools;
use tracing::info;

pub use cli::Options;
pub use error::{Error, Result};
pub use token::{parse_token, parse_tokens, split_tokens, Diagnostic, Notation, ParseOutcome};
pub use utf::utf16sequence::{encode_all, Encoded, SurrogateWarning, Utf16Sequence};
pub use utf::{render_string, scalars_of, to_display_char, CodePoint};

/// Runs the converter on the given arguments, program name excluded.
pub fn uniccc<I, T>(argv: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let options = Options::try_parse_from(
        std::iter::once(OsString::from("uniccc")).chain(argv.into_iter().map(Into::into)),
    )?;
    if options.interactive {
        return interactive::run(&mut std::io::stdin().lock(), &mut std::io::stdout().lock());
    }
    convert(
        &options,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
}

/// Parses the tokens in `options`, writes the output file if one was asked
/// for, and renders the result to `out`. Diagnostics and surrogate warnings go
/// to `err`, all of them before [`Error::NoValidInput`] is returned. Usage is
/// printed first when there are no tokens at all.
pub fn convert<W, E>(options: &Options, out: &mut W, err: &mut E) -> Result<()>
where
    W: Write,
    E: Write,
{
    if options.tokens.is_empty() {
        writeln!(out, "{}", Options::command().render_help())?;
    }
    let outcome = parse_tokens(options.tokens.iter().flat_map(|argument| split_tokens(argument)));
    if !outcome.diagnostics.is_empty() {
        writeln!(err, "Parse errors:")?;
        for diagnostic in &outcome.diagnostics {
            writeln!(err, "  {diagnostic}")?;
        }
    }
    if outcome.codepoints.is_empty() {
        return Err(Error::NoValidInput);
    }

    let encoded = encode_all(&outcome.codepoints);
    for warning in &encoded.warnings {
        writeln!(err, "Warning: {warning}.")?;
    }

    if let Some(path) = &options.output {
        std::fs::write(path, &encoded.bytes)?;
        info!(path = %path.display(), len = encoded.bytes.len(), "wrote output");
        writeln!(
            out,
            "Wrote {} bytes to '{}' (UTF-16BE).",
            encoded.bytes.len(),
            path.display()
        )?;
    }

    let hex = render_hex(&encoded.bytes);
    if options.hex_only {
        writeln!(out, "{hex}")?;
    } else {
        writeln!(out, "Code points: {}", outcome.codepoints.iter().join(" "))?;
        writeln!(out, "String:      {}", render_string(&outcome.codepoints))?;
        writeln!(out, "UTF-16BE:    {hex}")?;
    }
    Ok(())
}

/// Two uppercase hex digits per byte, separated by spaces.
pub fn render_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02X}")).join(" ")
}
