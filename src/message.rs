//! Line protocol definitions
//!
//! Every unit on the wire is a byte sequence terminated by `\n`.
//! A line starting with `/` is a command; anything else is a chat
//! message relayed to the other clients as `"<name>: <line>"`.

/// First byte marking a line as a command
pub const COMMAND_MARKER: u8 = b'/';

/// Line terminator
pub const LINE_FEED: u8 = b'\n';

/// Client → Server message
///
/// One framed line, interpreted. Chat lines borrow the raw bytes,
/// terminator included, so they can be relayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage<'a> {
    /// `/nick <name>`: rename the sender
    Nick(String),
    /// Any other command; silently ignored
    UnknownCommand,
    /// Chat message to relay
    Chat(&'a [u8]),
}

impl<'a> ClientMessage<'a> {
    /// Interpret one line read from a client
    ///
    /// The command word is everything up to the first space. `/nick`
    /// takes the rest of the line with surrounding line feeds trimmed;
    /// no other validation is done on the name.
    pub fn parse(line: &'a [u8]) -> Self {
        if line.first() != Some(&COMMAND_MARKER) {
            return ClientMessage::Chat(line);
        }

        let mut parts = line.splitn(2, |&b| b == b' ');
        let command = parts.next().unwrap_or_default();

        match (command, parts.next()) {
            (b"/nick", Some(rest)) => {
                ClientMessage::Nick(String::from_utf8_lossy(trim_line_feeds(rest)).into_owned())
            }
            _ => ClientMessage::UnknownCommand,
        }
    }
}

/// Build the frame delivered to recipients of a chat line
pub fn chat_frame(sender_name: &str, line: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(sender_name.len() + 2 + line.len());
    frame.extend_from_slice(sender_name.as_bytes());
    frame.extend_from_slice(b": ");
    frame.extend_from_slice(line);
    frame
}

fn trim_line_feeds(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| b != LINE_FEED)
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|&b| b != LINE_FEED)
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nick() {
        let msg = ClientMessage::parse(b"/nick alice\n");
        assert_eq!(msg, ClientMessage::Nick("alice".to_string()));
    }

    #[test]
    fn test_parse_nick_keeps_spaces_in_name() {
        let msg = ClientMessage::parse(b"/nick bob the builder\n");
        assert_eq!(msg, ClientMessage::Nick("bob the builder".to_string()));
    }

    #[test]
    fn test_parse_nick_empty_name() {
        let msg = ClientMessage::parse(b"/nick \n");
        assert_eq!(msg, ClientMessage::Nick(String::new()));
    }

    #[test]
    fn test_parse_nick_without_argument_is_ignored() {
        assert_eq!(ClientMessage::parse(b"/nick\n"), ClientMessage::UnknownCommand);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(ClientMessage::parse(b"/quit now\n"), ClientMessage::UnknownCommand);
        assert_eq!(ClientMessage::parse(b"/\n"), ClientMessage::UnknownCommand);
    }

    #[test]
    fn test_parse_chat_keeps_terminator() {
        let line: &[u8] = b"gg wp\n";
        assert_eq!(ClientMessage::parse(line), ClientMessage::Chat(line));
    }

    #[test]
    fn test_parse_empty_line_is_chat() {
        let line: &[u8] = b"\n";
        assert_eq!(ClientMessage::parse(line), ClientMessage::Chat(line));
    }

    #[test]
    fn test_chat_frame() {
        assert_eq!(chat_frame("x7Qp", b"gg wp\n"), b"x7Qp: gg wp\n".to_vec());
    }

    #[test]
    fn test_trim_line_feeds() {
        assert_eq!(trim_line_feeds(b"\nname\n\n"), b"name");
        assert_eq!(trim_line_feeds(b"\n\n"), b"");
        assert_eq!(trim_line_feeds(b"na\nme"), b"na\nme");
    }
}
