// Bridges the integer codes of the Thrift metadata to rust enums.
use crate::error::Error;

/// The repetition of a parquet field
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum Repetition {
    /// When the field has no null values
    Required,
    /// When the field may have null values
    Optional,
    /// When the field may be repeated (list field)
    Repeated,
}

impl TryFrom<i32> for Repetition {
    type Error = Error;

    fn try_from(repetition: i32) -> Result<Self, Self::Error> {
        Ok(match repetition {
            0 => Repetition::Required,
            1 => Repetition::Optional,
            2 => Repetition::Repeated,
            _ => {
                return Err(Error::oos(format!(
                    "field repetition type {} out of range",
                    repetition
                )))
            }
        })
    }
}

impl From<Repetition> for i32 {
    fn from(repetition: Repetition) -> Self {
        match repetition {
            Repetition::Required => 0,
            Repetition::Optional => 1,
            Repetition::Repeated => 2,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum Compression {
    Uncompressed,
    Snappy,
    Gzip,
    Lzo,
    Brotli,
    Lz4,
    Zstd,
    Lz4Raw,
}

impl TryFrom<i32> for Compression {
    type Error = Error;

    fn try_from(codec: i32) -> Result<Self, Self::Error> {
        Ok(match codec {
            0 => Compression::Uncompressed,
            1 => Compression::Snappy,
            2 => Compression::Gzip,
            3 => Compression::Lzo,
            4 => Compression::Brotli,
            5 => Compression::Lz4,
            6 => Compression::Zstd,
            7 => Compression::Lz4Raw,
            _ => return Err(Error::oos(format!("compression codec {} out of range", codec))),
        })
    }
}

impl From<Compression> for i32 {
    fn from(codec: Compression) -> Self {
        match codec {
            Compression::Uncompressed => 0,
            Compression::Snappy => 1,
            Compression::Gzip => 2,
            Compression::Lzo => 3,
            Compression::Brotli => 4,
            Compression::Lz4 => 5,
            Compression::Zstd => 6,
            Compression::Lz4Raw => 7,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum PageType {
    DataPage,
    IndexPage,
    DictionaryPage,
    DataPageV2,
}

impl TryFrom<i32> for PageType {
    type Error = Error;

    fn try_from(type_: i32) -> Result<Self, Self::Error> {
        Ok(match type_ {
            0 => PageType::DataPage,
            1 => PageType::IndexPage,
            2 => PageType::DictionaryPage,
            3 => PageType::DataPageV2,
            _ => return Err(Error::oos(format!("page type {} out of range", type_))),
        })
    }
}

impl From<PageType> for i32 {
    fn from(type_: PageType) -> Self {
        match type_ {
            PageType::DataPage => 0,
            PageType::IndexPage => 1,
            PageType::DictionaryPage => 2,
            PageType::DataPageV2 => 3,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum Encoding {
    Plain,
    PlainDictionary,
    Rle,
    BitPacked,
    DeltaBinaryPacked,
    DeltaLengthByteArray,
    DeltaByteArray,
    RleDictionary,
    ByteStreamSplit,
}

impl Encoding {
    /// Whether data pages with this encoding carry dictionary indices.
    pub fn is_dictionary(&self) -> bool {
        matches!(self, Encoding::PlainDictionary | Encoding::RleDictionary)
    }
}

impl TryFrom<i32> for Encoding {
    type Error = Error;

    fn try_from(encoding: i32) -> Result<Self, Self::Error> {
        Ok(match encoding {
            0 => Encoding::Plain,
            2 => Encoding::PlainDictionary,
            3 => Encoding::Rle,
            4 => Encoding::BitPacked,
            5 => Encoding::DeltaBinaryPacked,
            6 => Encoding::DeltaLengthByteArray,
            7 => Encoding::DeltaByteArray,
            8 => Encoding::RleDictionary,
            9 => Encoding::ByteStreamSplit,
            _ => return Err(Error::oos(format!("encoding {} out of range", encoding))),
        })
    }
}

impl From<Encoding> for i32 {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Plain => 0,
            Encoding::PlainDictionary => 2,
            Encoding::Rle => 3,
            Encoding::BitPacked => 4,
            Encoding::DeltaBinaryPacked => 5,
            Encoding::DeltaLengthByteArray => 6,
            Encoding::DeltaByteArray => 7,
            Encoding::RleDictionary => 8,
            Encoding::ByteStreamSplit => 9,
        }
    }
}
