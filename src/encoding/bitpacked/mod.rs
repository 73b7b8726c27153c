// LSB-first bit packing, as used by the RLE/bit-packed hybrid and by
// DELTA_BINARY_PACKED miniblocks.
mod decode;
mod encode;

pub use decode::{Decoder, Decoder64};
pub use encode::{encode, encode64};
