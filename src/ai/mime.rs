use base64::Engine as _;

/// Base64 characters needed to decode the 12 header bytes the sniffer reads.
const HEADER_B64_LEN: usize = 16;

fn sniff(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => None,
    }
}

/// Guess the MIME type of a base64 image from its decoded header.
///
/// Stability returns PNG unless asked otherwise, so anything unrecognised is
/// labelled `image/png`.
pub fn detect_base64_mime(b64: &str) -> &'static str {
    let head = &b64.as_bytes()[..b64.len().min(HEADER_B64_LEN)];
    let head = &head[..head.len() - head.len() % 4];

    let detected = base64::engine::general_purpose::STANDARD
        .decode(head)
        .ok()
        .and_then(|bytes| sniff(&bytes));

    detected.unwrap_or_else(|| {
        tracing::debug!("Unrecognized image header, falling back to image/png");
        "image/png"
    })
}

/// Wrap raw base64 image data in a `data:` URI.
pub fn data_uri(b64: &str) -> String {
    format!("data:{};base64,{}", detect_base64_mime(b64), b64)
}
