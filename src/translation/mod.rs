mod parsers;
mod returning;
mod scanner;

use parsers::{
    is_block_comment_end, is_block_comment_start, is_line_comment_start, is_q_quote_end,
    try_start_q_quote,
};
use scanner::State;

pub use returning::{returning_clause, returning_column};

use crate::driver::{BindParam, NamedParams};
use crate::types::RowValues;

/// Name of the `n`th positional binding once rewritten.
#[must_use]
pub fn param_name(n: usize) -> String {
    format!("param{n}")
}

/// A statement with Oracle named binds, ready for the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedStatement {
    pub sql: String,
    pub params: NamedParams,
}

/// Rewrite `?` placeholders to `:param0`, `:param1`, ... and bind `bindings` under the same
/// names.
///
/// Placeholders are numbered left to right. Question marks inside string literals, quoted
/// identifiers, `q'[...]'` literals, and comments are left alone. The ORM guarantees one
/// binding per placeholder; if there are more placeholders than bindings the surplus stays
/// as written, and surplus bindings are still bound.
#[must_use]
pub fn rewrite_placeholders(sql: &str, bindings: &[RowValues]) -> NamedStatement {
    let mut params = NamedParams::with_capacity(bindings.len() + 1);
    for (n, value) in bindings.iter().enumerate() {
        params.insert(param_name(n), BindParam::In(value.clone()));
    }

    if bindings.is_empty() {
        return NamedStatement {
            sql: sql.to_string(),
            params,
        };
    }

    let mut out = String::with_capacity(sql.len() + bindings.len() * 8);
    let mut state = State::Normal;
    let mut copied = 0;
    let mut next = 0;
    let mut idx = 0;
    let bytes = sql.as_bytes();

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => {
                if let Some((close, open_idx)) = try_start_q_quote(bytes, idx) {
                    state = State::QQuoted(close);
                    idx = open_idx;
                } else {
                    match b {
                        b'\'' => state = State::SingleQuoted,
                        b'"' => state = State::DoubleQuoted,
                        _ if is_line_comment_start(bytes, idx) => {
                            state = State::LineComment;
                            idx += 1;
                        }
                        _ if is_block_comment_start(bytes, idx) => {
                            state = State::BlockComment;
                            idx += 1;
                        }
                        b'?' if next < bindings.len() => {
                            out.push_str(&sql[copied..idx]);
                            out.push(':');
                            out.push_str(&param_name(next));
                            copied = idx + 1;
                            next += 1;
                        }
                        _ => {}
                    }
                }
            }
            State::SingleQuoted => {
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    state = State::Normal;
                }
            }
            State::QQuoted(close) => {
                if is_q_quote_end(bytes, idx, close) {
                    state = State::Normal;
                    idx += 1;
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if is_block_comment_end(bytes, idx) {
                    state = State::Normal;
                    idx += 1;
                }
            }
        }
        idx += 1;
    }

    out.push_str(&sql[copied..]);
    NamedStatement { sql: out, params }
}
