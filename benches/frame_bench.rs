use bytes::BytesMut;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use nsframe::{decode, encode, Message, MessageCodec, HEADER_LEN};
use tokio_util::codec::{Decoder, Encoder};

#[allow(clippy::unwrap_used)]
fn bench_frame_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_encode_decode");
    let body_sizes = [64usize, 512, 4096, 65536, 1024 * 1000];

    for &size in &body_sizes {
        let msg = Message::new("bench.topic", 1, vec![0u8; size]).unwrap();
        let frame = encode(&msg).unwrap();
        group.throughput(Throughput::Bytes(frame.len() as u64));

        group.bench_function(format!("encode_{size}b"), |b| {
            b.iter(|| encode(&msg).unwrap())
        });
        group.bench_function(format!("decode_{size}b"), |b| {
            b.iter(|| decode(&frame[..HEADER_LEN], &frame[HEADER_LEN..]).unwrap())
        });
        group.bench_function(format!("codec_roundtrip_{size}b"), |b| {
            let mut codec = MessageCodec::default();
            b.iter_batched(
                || BytesMut::with_capacity(frame.len()),
                |mut buf| {
                    codec.encode(msg.clone(), &mut buf).unwrap();
                    codec.decode(&mut buf).unwrap().unwrap()
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_frame_encode_decode);
criterion_main!(benches);
