//! Non-fatal decode notices.
//!
//! Decoding tolerates unknown elements and repeated singular elements. Both are reported here
//! instead of failing the decode; a sink can never make a decode fail.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeNotice {
    /// An element not present in the parent's schema was consumed and dropped.
    SkippedElement {
        parent: &'static str,
        namespace: Option<String>,
        local: String,
    },
    /// A singular child appeared more than once; the later occurrence replaced the earlier one.
    ReplacedElement {
        parent: &'static str,
        field: &'static str,
    },
}

impl fmt::Display for DecodeNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeNotice::SkippedElement {
                parent,
                namespace: Some(namespace),
                local,
            } => write!(f, "skipping unsupported element on {parent}: {{{namespace}}}{local}"),
            DecodeNotice::SkippedElement {
                parent,
                namespace: None,
                local,
            } => write!(f, "skipping unsupported element on {parent}: {local}"),
            DecodeNotice::ReplacedElement { parent, field } => {
                write!(f, "duplicate <{field}> on {parent}; keeping the last occurrence")
            }
        }
    }
}

pub trait DecodeSink {
    fn notice(&mut self, notice: DecodeNotice);
}

/// Forwards notices to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DecodeSink for LogSink {
    fn notice(&mut self, notice: DecodeNotice) {
        log::debug!("{notice}");
    }
}

/// Drops every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DecodeSink for NullSink {
    fn notice(&mut self, _notice: DecodeNotice) {}
}

impl DecodeSink for Vec<DecodeNotice> {
    fn notice(&mut self, notice: DecodeNotice) {
        self.push(notice);
    }
}

impl<S: DecodeSink + ?Sized> DecodeSink for &mut S {
    fn notice(&mut self, notice: DecodeNotice) {
        (**self).notice(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_notice_names_the_qualified_element() {
        let notice = DecodeNotice::SkippedElement {
            parent: "CT_pivotTableDefinition",
            namespace: Some("urn:x".to_string()),
            local: "mystery".to_string(),
        };
        assert_eq!(
            notice.to_string(),
            "skipping unsupported element on CT_pivotTableDefinition: {urn:x}mystery"
        );
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut notices: Vec<DecodeNotice> = Vec::new();
        let sink: &mut dyn DecodeSink = &mut notices;
        sink.notice(DecodeNotice::ReplacedElement {
            parent: "CT_A",
            field: "b",
        });
        sink.notice(DecodeNotice::ReplacedElement {
            parent: "CT_A",
            field: "c",
        });
        assert_eq!(notices.len(), 2);
    }
}
