//! Decoding raw terminal bytes into key events.
//!
//! Only the keys the prompts react to get their own variant. Every other
//! escape sequence is swallowed whole and reported as [`Key::Unknown`] so it
//! can never leak into a text buffer.

use std::io;

use tracing::trace;

use crate::terminal::TerminalIo;

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;
const BACKSPACE: u8 = 0x08;
const DEL: u8 = 0x7f;

/// A logical key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Delete,
    Enter,
    Space,
    Backspace,
    CtrlC,
    /// A printable character, decoded from one or more UTF-8 bytes.
    Char(char),
    /// Anything else: unbound escape sequences, stray control bytes,
    /// malformed UTF-8.
    Unknown,
}

/// Arrow direction, for handlers that only care about movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// The direction of an arrow key, `None` for every other key.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Block until one full key has been read from `term`.
///
/// Read errors are the only errors; unrecognised input becomes
/// [`Key::Unknown`].
pub fn read_key(term: &mut dyn TerminalIo) -> io::Result<Key> {
    let byte = term.read_byte()?;
    let key = match byte {
        ESC => read_escape(term)?,
        b'\r' | b'\n' => Key::Enter,
        b' ' => Key::Space,
        CTRL_C => Key::CtrlC,
        BACKSPACE | DEL => Key::Backspace,
        0x00..=0x1f => Key::Unknown,
        0x20..=0x7e => Key::Char(char::from(byte)),
        _ => read_utf8(term, byte)?,
    };
    trace!(?key, "decoded key");
    Ok(key)
}

fn read_escape(term: &mut dyn TerminalIo) -> io::Result<Key> {
    match term.read_byte()? {
        b'[' => read_csi(term),
        b'O' => Ok(match term.read_byte()? {
            b'A' => Key::Up,
            b'B' => Key::Down,
            b'C' => Key::Right,
            b'D' => Key::Left,
            b'H' => Key::Home,
            b'F' => Key::End,
            _ => Key::Unknown,
        }),
        _ => Ok(Key::Unknown),
    }
}

/// `ESC [` has been read. Consumes the rest of the control sequence.
fn read_csi(term: &mut dyn TerminalIo) -> io::Result<Key> {
    let mut params = Vec::new();
    let mut byte = term.read_byte()?;
    // Parameter bytes are 0x30..=0x3f; the sequence ends on a final byte.
    while (0x30..=0x3f).contains(&byte) {
        params.push(byte);
        byte = term.read_byte()?;
    }
    // Intermediate bytes, rare but legal.
    while (0x20..=0x2f).contains(&byte) {
        byte = term.read_byte()?;
    }
    let key = match byte {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' => Key::Home,
        b'F' => Key::End,
        b'~' => match params.as_slice() {
            b"1" | b"7" => Key::Home,
            b"4" | b"8" => Key::End,
            b"3" => Key::Delete,
            _ => Key::Unknown,
        },
        _ => Key::Unknown,
    };
    Ok(key)
}

fn read_utf8(term: &mut dyn TerminalIo, lead: u8) -> io::Result<Key> {
    let continuation = match lead {
        0xc2..=0xdf => 1,
        0xe0..=0xef => 2,
        0xf0..=0xf4 => 3,
        _ => return Ok(Key::Unknown),
    };
    let mut bytes = vec![lead];
    for _ in 0..continuation {
        let b = term.read_byte()?;
        if b & 0xc0 != 0x80 {
            return Ok(Key::Unknown);
        }
        bytes.push(b);
    }
    Ok(std::str::from_utf8(&bytes)
        .ok()
        .and_then(|s| s.chars().next())
        .map_or(Key::Unknown, Key::Char))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::ScriptedTerminal;

    fn decode(bytes: &[u8]) -> Vec<Key> {
        let mut term = ScriptedTerminal::new().keys(bytes);
        let mut keys = Vec::new();
        while term.pending_keys() > 0 {
            keys.push(read_key(&mut term).unwrap());
        }
        keys
    }

    #[test]
    fn arrows_in_both_encodings() {
        assert_eq!(
            decode(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![Key::Up, Key::Down, Key::Right, Key::Left]
        );
        assert_eq!(
            decode(b"\x1bOA\x1bOB\x1bOC\x1bOD"),
            vec![Key::Up, Key::Down, Key::Right, Key::Left]
        );
    }

    #[test]
    fn plain_bytes() {
        assert_eq!(
            decode(b"\r\n \x03x"),
            vec![Key::Enter, Key::Enter, Key::Space, Key::CtrlC, Key::Char('x')]
        );
        assert_eq!(decode(b"\x7f\x08"), vec![Key::Backspace, Key::Backspace]);
    }

    #[test]
    fn unknown_escape_is_absorbed() {
        assert_eq!(decode(b"\x1bxa"), vec![Key::Unknown, Key::Char('a')]);
        assert_eq!(decode(b"\x1bOZ"), vec![Key::Unknown]);
        assert_eq!(decode(b"\x1b[Z"), vec![Key::Unknown]);
    }

    #[test]
    fn parameterised_sequences_are_consumed_whole() {
        assert_eq!(decode(b"\x1b[3~"), vec![Key::Delete]);
        assert_eq!(decode(b"\x1b[1~\x1b[4~"), vec![Key::Home, Key::End]);
        assert_eq!(decode(b"\x1b[15~a"), vec![Key::Unknown, Key::Char('a')]);
        assert_eq!(decode(b"\x1b[1;5C"), vec![Key::Right]);
    }

    #[test]
    fn utf8_is_decoded_to_one_char() {
        assert_eq!(decode("é€".as_bytes()), vec![Key::Char('é'), Key::Char('€')]);
        assert_eq!(decode("😀".as_bytes()), vec![Key::Char('😀')]);
    }

    #[test]
    fn control_bytes_are_unknown() {
        assert_eq!(decode(b"\x01\x1f"), vec![Key::Unknown, Key::Unknown]);
        assert_eq!(decode(b"\xff"), vec![Key::Unknown]);
    }

    #[test]
    fn read_error_propagates() {
        let mut term = ScriptedTerminal::new().keys(b"\x1b[");
        let err = read_key(&mut term).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn direction_only_for_arrows() {
        assert_eq!(Key::Up.direction(), Some(Direction::Up));
        assert_eq!(Key::Enter.direction(), None);
    }
}
