use tokio::sync::mpsc::UnboundedSender;
use crate::structs::stream_item::StreamItem;
use crate::structs::stream_result::StreamResult;

/// Receives decoded text as it arrives.
pub trait StreamSink {
    fn on_fragment(&mut self, fragment: &str);

    fn on_complete(&mut self, _result: &StreamResult) {}
}

impl StreamSink for Vec<String> {
    fn on_fragment(&mut self, fragment: &str) {
        self.push(fragment.to_string());
    }
}

impl StreamSink for String {
    fn on_fragment(&mut self, fragment: &str) {
        self.push_str(fragment);
    }
}

/// Forwards fragments to another task, ending with a completion item.
pub struct ChannelSink {
    tx: UnboundedSender<StreamItem>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<StreamItem>) -> Self {
        Self { tx }
    }
}

impl StreamSink for ChannelSink {
    fn on_fragment(&mut self, fragment: &str) {
        // A closed receiver means nobody renders any more; the reader keeps its own copy.
        let _ = self.tx.send(StreamItem::new(fragment.to_string()));
    }

    fn on_complete(&mut self, result: &StreamResult) {
        let _ = self.tx.send(StreamItem::complete(String::new(), result.finish_reason.clone()));
    }
}
