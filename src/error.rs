pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A surrogate code point was asked for as a `char`.
    #[error("U+{0:04X} is not a Unicode scalar value")]
    InvalidScalar(u32),
    /// Every token failed to parse.
    #[error("No valid code points.")]
    NoValidInput,
    #[error(transparent)]
    Cli(#[from] clap::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
