pub(super) fn is_line_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'-') && bytes.get(idx + 1) == Some(&b'-')
}

pub(super) fn is_block_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'/') && bytes.get(idx + 1) == Some(&b'*')
}

pub(super) fn is_block_comment_end(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'*') && bytes.get(idx + 1) == Some(&b'/')
}

/// Oracle alternative quoting: `q'[...]'`, `q'{...}'`, `q'<...>'`, `q'(...)'`, or `q'X...X'`.
/// Returns the closing delimiter and the index of the opening one.
pub(super) fn try_start_q_quote(bytes: &[u8], idx: usize) -> Option<(u8, usize)> {
    if !matches!(bytes.get(idx), Some(b'q' | b'Q')) || bytes.get(idx + 1) != Some(&b'\'') {
        return None;
    }
    if idx > 0 && (bytes[idx - 1].is_ascii_alphanumeric() || bytes[idx - 1] == b'_') {
        return None;
    }
    let open = *bytes.get(idx + 2)?;
    let close = match open {
        b'[' => b']',
        b'{' => b'}',
        b'<' => b'>',
        b'(' => b')',
        b' ' | b'\t' | b'\n' | b'\'' => return None,
        other => other,
    };
    Some((close, idx + 2))
}

pub(super) fn is_q_quote_end(bytes: &[u8], idx: usize, close: u8) -> bool {
    bytes.get(idx) == Some(&close) && bytes.get(idx + 1) == Some(&b'\'')
}
