use std::path::PathBuf;

use clap::Parser;

/// Unicode → UTF-16BE converter.
///
/// Tokens may be written as U+XXXX (U+0041), 0xXXXX (0x1F600), &#xHH; (&#x1F600;),
/// &#DDDD; (&#128512;), plain decimal (65) or plain hex (1F600). Commas and
/// whitespace inside an argument separate tokens as well.
#[derive(Parser, Debug, Default)]
#[command(name = "uniccc", version)]
pub struct Options {
    /// Write the UTF-16BE bytes to this file, without a byte order mark.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print only the hexadecimal bytes.
    #[arg(short = 'H', long)]
    pub hex_only: bool,

    /// Start the interactive menu.
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Code points to convert.
    #[arg(value_name = "TOKENS", allow_negative_numbers = true)]
    pub tokens: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Options {
        Options::try_parse_from(std::iter::once("uniccc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags() {
        let options = parse(&["-o", "out.bin", "-H", "U+0041", "0x42"]);
        assert_eq!(options.output, Some(PathBuf::from("out.bin")));
        assert!(options.hex_only);
        assert_eq!(options.tokens, vec!["U+0041", "0x42"]);
        assert!(!options.interactive);
    }

    #[test]
    fn long_flags() {
        let options = parse(&["--hex-only", "--output", "a.bin", "65"]);
        assert!(options.hex_only);
        assert_eq!(options.output, Some(PathBuf::from("a.bin")));
    }

    #[test]
    fn interactive_only_on_request() {
        assert!(!parse(&[]).interactive);
        assert!(parse(&["-i"]).interactive);
        assert!(parse(&["--interactive", "65"]).interactive);
    }

    #[test]
    fn negative_numbers_are_tokens() {
        let options = parse(&["-H", "U+0041", "-5", "0x42"]);
        assert!(options.hex_only);
        assert_eq!(options.tokens, vec!["U+0041", "-5", "0x42"]);
        assert_eq!(parse(&["-12"]).tokens, vec!["-12"]);
    }

    #[test]
    fn output_needs_a_file() {
        assert!(Options::try_parse_from(["uniccc", "65", "-o"]).is_err());
    }
}
