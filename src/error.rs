use crate::parquet_bridge::{Compression, Encoding};

/// Errors of this crate. All of them abort the read that produced them;
/// there is no retry logic below the public API.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A read would cross the end of the available bytes.
    TruncatedInput(String),
    /// The header or footer magic is not "PAR1".
    InvalidMagic,
    /// The footer declares a metadata length of zero or one larger than the file.
    InvalidMetadataLength(i64),
    /// Malformed Thrift Compact Protocol data.
    ThriftDecode(String),
    /// The file violates the parquet specification.
    OutOfSpec(String),
    /// The page declares an encoding this crate does not decode.
    UnsupportedEncoding(Encoding),
    /// The column declares a converted type with no logical representation here.
    UnsupportedConvertedType(String),
    /// The column chunk is compressed with a codec absent from the registry.
    DecompressorMissing(Compression),
    /// A registered decompressor returned a different number of bytes than
    /// the page header declared.
    DecompressionSizeMismatch { expected: usize, got: usize },
    /// A v2 page's level section did not consume its declared byte length.
    LevelsByteLengthMismatch { declared: usize, consumed: usize },
    /// An internal invariant was violated (e.g. assembly stack underflow).
    InternalInvariant(String),
    /// An error from the underlying byte source, passed through unchanged.
    Transport(String),
}

impl Error {
    pub(crate) fn oos<S: Into<String>>(message: S) -> Self {
        Self::OutOfSpec(message.into())
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::TruncatedInput(context) => write!(fmt, "truncated input: {}", context),
            Error::InvalidMagic => write!(fmt, "magic bytes are not PAR1"),
            Error::InvalidMetadataLength(len) => {
                write!(fmt, "invalid metadata length {}", len)
            }
            Error::ThriftDecode(message) => write!(fmt, "thrift: {}", message),
            Error::OutOfSpec(message) => write!(fmt, "file out of spec: {}", message),
            Error::UnsupportedEncoding(encoding) => {
                write!(fmt, "unsupported encoding {:?}", encoding)
            }
            Error::UnsupportedConvertedType(name) => {
                write!(fmt, "unsupported converted type {}", name)
            }
            Error::DecompressorMissing(codec) => {
                write!(fmt, "no decompressor registered for {:?}", codec)
            }
            Error::DecompressionSizeMismatch { expected, got } => write!(
                fmt,
                "decompression size mismatch: expected {} bytes, got {}",
                expected, got
            ),
            Error::LevelsByteLengthMismatch { declared, consumed } => write!(
                fmt,
                "level section consumed {} bytes but the header declares {}",
                consumed, declared
            ),
            Error::InternalInvariant(message) => write!(fmt, "internal invariant: {}", message),
            Error::Transport(message) => write!(fmt, "transport: {}", message),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Transport(format!("underlying IO error: {}", e))
    }
}

/// A specialized `Result` for this crate's errors.
pub type Result<T> = std::result::Result<T, Error>;
