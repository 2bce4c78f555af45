// Incremental text/event-stream decoder
//
// Bytes arrive in arbitrary chunks; frames end at a blank line.

/// One dispatched server-sent event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseFrame {
    pub event: Option<String>,
    pub id: Option<String>,
    pub retry: Option<u64>,
    /// `data:` lines joined with `\n`
    pub data: String,
}

#[derive(Debug, Default)]
pub struct SseParser {
    buffer: Vec<u8>,
    event: Option<String>,
    id: Option<String>,
    retry: Option<u64>,
    data: Vec<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk and return every frame it completed
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(chunk);
        let mut frames = Vec::new();

        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if let Some(frame) = self.process_line(line) {
                frames.push(frame);
            }
        }
        frames
    }

    fn process_line(&mut self, line: &str) -> Option<SseFrame> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "data" => self.data.push(value.to_string()),
            "event" => self.event = Some(value.to_string()),
            "id" => self.id = Some(value.to_string()),
            "retry" => self.retry = value.parse().ok(),
            _ => {}
        }
        None
    }

    /// A blank line ends the frame; frames without data are dropped
    fn dispatch(&mut self) -> Option<SseFrame> {
        let event = self.event.take();
        let id = self.id.take();
        let retry = self.retry.take();
        if self.data.is_empty() {
            return None;
        }
        Some(SseFrame {
            event,
            id,
            retry,
            data: std::mem::take(&mut self.data).join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_frame() {
        let mut parser = SseParser::new();
        let frames = parser.feed(b"data: {\"title\":\"t\",\"text\":\"x\"}\n\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, r#"{"title":"t","text":"x"}"#);
        assert_eq!(frames[0].event, None);
    }

    #[test]
    fn frames_split_across_chunks() {
        let mut parser = SseParser::new();
        assert!(parser.feed(b"event: defect\r\nda").is_empty());
        assert!(parser.feed(b"ta: first\n").is_empty());
        let frames = parser.feed(b"data: second\n\ndata: third\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event.as_deref(), Some("defect"));
        assert_eq!(frames[0].data, "first\nsecond");

        let frames = parser.feed(b"\n");
        assert_eq!(frames[0].data, "third");
        assert_eq!(frames[0].event, None);
    }

    #[test]
    fn comments_and_empty_frames_are_skipped() {
        let mut parser = SseParser::new();
        let frames = parser.feed(b": keep-alive\n\nid: 4\nretry: 3000\n\ndata\n\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "");
        assert_eq!(frames[0].id, None);
    }

    #[test]
    fn id_and_retry_are_attached() {
        let mut parser = SseParser::new();
        let frames = parser.feed(b"id: 7\nretry: 1500\ndata:no-space\n\n");
        assert_eq!(frames[0].id.as_deref(), Some("7"));
        assert_eq!(frames[0].retry, Some(1500));
        assert_eq!(frames[0].data, "no-space");
    }
}
