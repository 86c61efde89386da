/// Finds the length of the common prefix between a key and an edge label.
///
/// Returns the number of leading bytes the two slices share.
pub fn prefix_match(key: &[u8], label: &[u8]) -> usize {
    let mut i = 0;

    while i < label.len() && i < key.len() && key[i] == label[i] {
        i += 1;
    }

    i
}

/// Position of the first occurrence of `byte`, or the length of the slice.
pub fn find_or_end(bytes: &[u8], byte: u8) -> usize {
    bytes.iter().position(|&b| b == byte).unwrap_or(bytes.len())
}
