/// A physical native representation of a parquet fixed-sized type.
pub trait NativeType: Sized + Copy + std::fmt::Debug {
    type Bytes: AsRef<[u8]> + for<'a> TryFrom<&'a [u8], Error = std::array::TryFromSliceError>;

    fn to_le_bytes(&self) -> Self::Bytes;

    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! native {
    ($type:ty) => {
        impl NativeType for $type {
            type Bytes = [u8; std::mem::size_of::<Self>()];
            #[inline]
            fn to_le_bytes(&self) -> Self::Bytes {
                Self::to_le_bytes(*self)
            }

            #[inline]
            fn from_le_bytes(bytes: Self::Bytes) -> Self {
                Self::from_le_bytes(bytes)
            }
        }
    };
}

native!(i32);
native!(i64);
native!(f32);
native!(f64);

/// An INT96 value: twelve bytes holding the low 64 bits followed by the high
/// 32 bits of a 96-bit little-endian unsigned magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int96(pub [u32; 3]);

impl Int96 {
    /// The low 64 bits of the magnitude.
    #[inline]
    pub fn low(&self) -> u64 {
        (self.0[0] as u64) | ((self.0[1] as u64) << 32)
    }

    /// The high 32 bits of the magnitude.
    #[inline]
    pub fn high(&self) -> u32 {
        self.0[2]
    }

    pub fn from_le_bytes(bytes: [u8; 12]) -> Self {
        Self([
            u32::from_le_bytes(bytes[0..4].try_into().unwrap()),
            u32::from_le_bytes(bytes[4..8].try_into().unwrap()),
            u32::from_le_bytes(bytes[8..12].try_into().unwrap()),
        ])
    }
}
