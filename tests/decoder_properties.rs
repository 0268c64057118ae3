use codilla_stream::services::stream_decoder::StreamDecoder;
use proptest::prelude::*;

fn data_line(content: &str) -> String {
    format!(
        "data: {}\n",
        serde_json::json!({ "choices": [{ "index": 0, "delta": { "content": content } }] })
    )
}

fn transcript(fragments: &[String], noise: bool) -> String {
    let mut body = String::new();
    if noise {
        body.push_str(": ping\n\nevent: completion\n");
    }
    for fragment in fragments {
        body.push_str(&data_line(fragment));
        if noise {
            body.push('\n');
        }
    }
    body.push_str("data: [DONE]\n");
    body
}

fn decode_in_chunks(bytes: &[u8], cuts: &[usize]) -> (Vec<String>, StreamDecoder) {
    let mut decoder = StreamDecoder::default();
    let mut delivered = Vec::new();
    let mut start = 0;
    for &cut in cuts {
        let cut = cut.min(bytes.len());
        if cut < start {
            continue;
        }
        delivered.extend(decoder.decode_chunk(&bytes[start..cut]));
        start = cut;
    }
    delivered.extend(decoder.decode_chunk(&bytes[start..]));
    (delivered, decoder)
}

proptest! {
    #[test]
    fn any_chunking_delivers_the_same_fragments(
        fragments in prop::collection::vec("[a-zA-Z0-9 \"\\\\{}:,éü日本🎉\n]{1,12}", 0..8),
        cuts in prop::collection::vec(0usize..600, 0..24),
        noise in any::<bool>(),
    ) {
        let body = transcript(&fragments, noise);
        let bytes = body.as_bytes();
        let mut cuts = cuts;
        cuts.sort_unstable();

        let (whole, whole_decoder) = decode_in_chunks(bytes, &[]);
        let (split, split_decoder) = decode_in_chunks(bytes, &cuts);

        prop_assert_eq!(&whole, &fragments);
        prop_assert_eq!(&split, &whole);
        prop_assert_eq!(split_decoder.assembled_text(), whole_decoder.assembled_text());
        prop_assert!(split_decoder.is_terminated());
    }

    #[test]
    fn byte_at_a_time_matches_single_chunk(
        fragments in prop::collection::vec("\\PC{1,6}", 1..5),
    ) {
        let body = transcript(&fragments, true);
        let bytes = body.as_bytes();
        let cuts: Vec<usize> = (1..bytes.len()).collect();

        let (split, _) = decode_in_chunks(bytes, &cuts);
        prop_assert_eq!(split, fragments);
    }
}

#[test]
fn example_scenario_from_three_chunks() {
    let mut decoder = StreamDecoder::default();
    let mut calls = 0;
    let mut assembled = String::new();

    for chunk in [
        "data: {\"choices\":[{\"delta\":{\"content\":\"Hel",
        "lo\"}}]}\n",
        "data: [DONE]\n",
    ] {
        for fragment in decoder.decode_chunk(chunk.as_bytes()) {
            calls += 1;
            assembled.push_str(&fragment);
        }
    }

    assert_eq!(assembled, "Hello");
    assert_eq!(calls, 1);
    assert!(decoder.is_terminated());
}

#[test]
fn sentinel_in_same_chunk_stops_delivery() {
    let body = format!("{}data: [DONE]\n{}", data_line("kept"), data_line("dropped"));
    let mut decoder = StreamDecoder::default();

    assert_eq!(decoder.decode_chunk(body.as_bytes()), vec!["kept".to_string()]);
    assert_eq!(decoder.assembled_text(), "kept");
}

#[test]
fn split_multibyte_character_inside_json_string() {
    let body = data_line("👋 hi");
    let bytes = body.as_bytes();
    let emoji_start = body.find('👋').unwrap();

    let mut decoder = StreamDecoder::default();
    assert!(decoder.decode_chunk(&bytes[..emoji_start + 2]).is_empty());
    assert_eq!(decoder.decode_chunk(&bytes[emoji_start + 2..]), vec!["👋 hi".to_string()]);
}

#[test]
fn unterminated_final_event_is_not_delivered() {
    // Open question: the dropped tail mirrors the web client. FlushPolicy::Flush opts out.
    let body = format!("{}{}", data_line("first"), data_line("last").trim_end());
    let mut decoder = StreamDecoder::default();

    let mut delivered = decoder.decode_chunk(body.as_bytes());
    let report = decoder.finish();
    delivered.extend(report.flushed);

    assert_eq!(delivered, vec!["first".to_string()]);
    assert!(report.discarded_bytes > 0);
}
