use encoding_rs::WINDOWS_1250;

/// Decode a response body from windows-1250.
///
/// The site serves every page in this one code page; nothing is
/// auto-detected. Single-byte decoding is total, so this never fails.
pub fn decode_page(bytes: &[u8]) -> String {
    let (text, _, _) = WINDOWS_1250.decode(bytes);
    text.into_owned()
}
