/// Packs `values` LSB-first at `num_bits` each into `buffer`.
pub fn encode(values: &[u32], num_bits: u8, buffer: &mut Vec<u8>) {
    if num_bits == 0 {
        return;
    }
    let num_bits = num_bits as usize;
    let mut register = 0u64;
    let mut bits_in_register = 0usize;
    for value in values {
        register |= (*value as u64) << bits_in_register;
        bits_in_register += num_bits;
        while bits_in_register >= 8 {
            buffer.push((register & 0xff) as u8);
            register >>= 8;
            bits_in_register -= 8;
        }
    }
    if bits_in_register > 0 {
        buffer.push((register & 0xff) as u8);
    }
}

/// Packs `values` LSB-first at `num_bits` each, for widths up to 64.
pub fn encode64(values: &[u64], num_bits: u8, buffer: &mut Vec<u8>) {
    if num_bits == 0 {
        return;
    }
    let num_bits = num_bits as usize;
    let mut register = 0u128;
    let mut bits_in_register = 0usize;
    for value in values {
        register |= (*value as u128) << bits_in_register;
        bits_in_register += num_bits;
        while bits_in_register >= 8 {
            buffer.push((register & 0xff) as u8);
            register >>= 8;
            bits_in_register -= 8;
        }
    }
    if bits_in_register > 0 {
        buffer.push((register & 0xff) as u8);
    }
}
