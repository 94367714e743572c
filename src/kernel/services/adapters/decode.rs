use encoding_rs::{Encoding, WINDOWS_1252};

/// UTF-8 first, then `fallback_encoding` (a WHATWG label such as `latin1` or
/// `shift_jis`). Never fails; unknown labels fall back to windows-1252.
pub fn decode_output(bytes: &[u8], fallback_encoding: &str) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            let encoding = Encoding::for_label(fallback_encoding.trim().as_bytes())
                .unwrap_or_else(|| {
                    tracing::warn!(label = fallback_encoding, "unknown fallback encoding");
                    WINDOWS_1252
                });
            let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
            tracing::debug!(
                error = %e,
                encoding = encoding.name(),
                had_errors,
                "command output is not utf-8, decoded with fallback"
            );
            text.into_owned()
        }
    }
}

/// `\r\n` and lone `\r` become `\n`, like a text-mode pipe read.
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/decode.rs"]
mod tests;
