#[derive(Clone, Copy)]
pub(super) enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    QQuoted(u8),
    LineComment,
    BlockComment,
}
