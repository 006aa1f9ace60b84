//! Incremental UTF-8 decoding of a chunked response body
//!
//! Chunk boundaries fall on arbitrary bytes, so a multi-byte character can be
//! split across two reads. Incomplete trailing sequences are held back until
//! the next chunk; invalid sequences become U+FFFD.

use futures::stream::{self, LocalBoxStream, Stream, StreamExt};

use crate::shared::errors::Result;

#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    pending: Vec<u8>,
}

impl Utf8ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode as much of `pending + bytes` as possible
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::new();
        let mut rest: &[u8] = &self.pending;

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    rest = &[];
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    // valid_up_to guarantees this prefix is UTF-8
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[bad..];
                        }
                        None => {
                            rest = after;
                            break;
                        }
                    }
                }
            }
        }

        self.pending = rest.to_vec();
        out
    }

    /// Flush at end of stream; a dangling partial sequence becomes U+FFFD
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Turn a stream of byte chunks into a stream of text chunks
///
/// Empty text chunks (a chunk made only of a partial character) are skipped.
/// The stream stops after the first error.
pub fn decode_text_chunks<S, B>(bytes: S) -> LocalBoxStream<'static, Result<String>>
where
    S: Stream<Item = Result<B>> + Unpin + 'static,
    B: AsRef<[u8]>,
{
    let state = Some((bytes, Utf8ChunkDecoder::new()));
    stream::unfold(state, |state| async move {
        let (mut bytes, mut decoder) = state?;
        match bytes.next().await {
            Some(Ok(chunk)) => {
                let text = decoder.decode(chunk.as_ref());
                Some((Ok(text), Some((bytes, decoder))))
            }
            Some(Err(e)) => Some((Err(e), None)),
            None => {
                let tail = decoder.finish();
                if tail.is_empty() {
                    None
                } else {
                    Some((Ok(tail), None))
                }
            }
        }
    })
    .filter(|item| futures::future::ready(!matches!(item, Ok(text) if text.is_empty())))
    .boxed_local()
}
