use codilla_stream::services::stream_decoder::StreamDecoder;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn transcript(events: usize) -> String {
    let mut body = String::new();
    for i in 0..events {
        body.push_str(&format!(
            "data: {{\"choices\":[{{\"index\":0,\"delta\":{{\"content\":\"token {} ünïcödé \"}}}}]}}\n\n",
            i
        ));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

fn decode_chunked(c: &mut Criterion) {
    let body = transcript(2_000);
    let mut group = c.benchmark_group("decode_chunked");
    group.throughput(Throughput::Bytes(body.len() as u64));

    for chunk_size in [16usize, 256, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk_size), &chunk_size, |b, &size| {
            b.iter(|| {
                let mut decoder = StreamDecoder::default();
                let mut delivered = 0;
                for chunk in body.as_bytes().chunks(size) {
                    delivered += decoder.decode_chunk(black_box(chunk)).len();
                }
                delivered
            })
        });
    }

    group.finish();
}

criterion_group!(benches, decode_chunked);
criterion_main!(benches);
