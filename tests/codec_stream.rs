//! Integration tests for the streaming codec
//!
//! Validates incremental buffering, back-to-back frames in one buffer and
//! framed transport over an in-memory duplex stream.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use bytes::BytesMut;
use futures::{SinkExt, StreamExt};
use nsframe::config::FrameConfig;
use nsframe::error::{Malformed, ProtocolError};
use nsframe::{encode, Message, MessageCodec, HEADER_LEN};
use std::sync::Arc;
use tokio_util::codec::{Decoder, Encoder, Framed, FramedRead, FramedWrite};

#[test]
fn test_codec_incremental_buffer_fill() {
    let mut codec = MessageCodec::default();
    let msg = Message::new("alerts", 7, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    let full = encode(&msg).unwrap();

    let mut buffer = BytesMut::new();
    // Add data byte by byte (simulating slow network)
    for (i, byte) in full.iter().enumerate() {
        buffer.extend_from_slice(&[*byte]);
        let result = codec.decode(&mut buffer).expect("Should not error");

        if i < full.len() - 1 {
            assert!(result.is_none());
            assert_eq!(buffer.len(), i + 1);
        } else {
            assert_eq!(result, Some(msg.clone()));
            assert!(buffer.is_empty());
        }
    }
}

#[test]
fn test_codec_multiple_frames_in_buffer() {
    let mut codec = MessageCodec::default();
    let mut buffer = BytesMut::new();

    for i in 0..10u8 {
        let msg = Message::new(format!("topic-{i}"), i, vec![i; i as usize]).unwrap();
        codec.encode(msg, &mut buffer).expect("encode");
    }

    let mut count = 0u8;
    while let Some(msg) = codec.decode(&mut buffer).expect("decode") {
        assert_eq!(msg.namespace(), format!("topic-{count}"));
        assert_eq!(msg.key(), count);
        assert_eq!(msg.body().len(), count as usize);
        count += 1;
    }

    assert_eq!(count, 10);
    assert!(buffer.is_empty());
}

#[test]
fn test_codec_partial_frame_keeps_bytes() {
    let mut codec = MessageCodec::default();
    let frame = encode(&Message::new("ns", 1, vec![0u8; 64]).unwrap()).unwrap();

    let mut buffer = BytesMut::from(&frame[..HEADER_LEN + 10]);
    assert!(codec.decode(&mut buffer).expect("decode").is_none());
    assert_eq!(buffer.len(), HEADER_LEN + 10);
    assert!(buffer.capacity() >= frame.len());
}

#[test]
fn test_codec_bad_version_error() {
    let mut codec = MessageCodec::default();
    let mut frame = encode(&Message::new("ns", 1, vec![1]).unwrap()).unwrap();
    frame[2] = 0x01;

    let mut buffer = BytesMut::from(&frame[..]);
    let err = codec.decode(&mut buffer).unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::MalformedFrame(Malformed::Version(0x01))
    ));
}

#[test]
fn test_codec_decoded_body_is_zero_copy() {
    let mut codec = MessageCodec::default();
    let frame = encode(&Message::new("ns", 1, vec![0xAB; 128]).unwrap()).unwrap();
    let mut buffer = BytesMut::from(&frame[..]);
    let body_ptr = buffer[HEADER_LEN + 2..].as_ptr();

    let msg = codec.decode(&mut buffer).unwrap().unwrap();
    assert_eq!(msg.body().as_ptr(), body_ptr);
}

#[tokio::test]
async fn test_framed_duplex_roundtrip() {
    let (client, server) = tokio::io::duplex(64);
    let metrics = Arc::new(nsframe::utils::metrics::CodecMetrics::new());
    let codec = MessageCodec::with_metrics(FrameConfig::default(), metrics.clone());

    let mut writer = FramedWrite::new(client, codec.clone());
    let mut reader = FramedRead::new(server, codec);

    let sent: Vec<Message> = (0..50u8)
        .map(|i| Message::new(format!("events/{i}"), i, vec![i; 200]).unwrap())
        .collect();

    let to_send = sent.clone();
    let send_task = tokio::spawn(async move {
        for msg in to_send {
            writer.send(msg).await.expect("send");
        }
        writer.close().await.expect("close");
    });

    let mut received = Vec::new();
    while let Some(msg) = reader.next().await {
        received.push(msg.expect("frame"));
    }
    send_task.await.unwrap();

    assert_eq!(received, sent);
    let snap = metrics.snapshot();
    assert_eq!(snap.frames_encoded, 50);
    assert_eq!(snap.frames_decoded, 50);
    assert_eq!(snap.bytes_encoded, snap.bytes_decoded);
}

#[tokio::test]
async fn test_framed_echo() {
    let (client, server) = tokio::io::duplex(1024);
    let mut client = Framed::new(client, MessageCodec::default());
    let mut server = Framed::new(server, MessageCodec::default());

    let echo = tokio::spawn(async move {
        while let Some(Ok(msg)) = server.next().await {
            let (namespace, key, body) = msg.into_parts();
            let reply = Message::new(format!("{namespace}.reply"), key, body).unwrap();
            if server.send(reply).await.is_err() {
                break;
            }
        }
    });

    let msg = Message::new("ping", 3, vec![9, 9, 9]).unwrap();
    client.send(msg.clone()).await.expect("send");
    let reply = client.next().await.expect("reply").expect("frame");
    assert_eq!(reply.namespace(), "ping.reply");
    assert_eq!(reply.key(), 3);
    assert_eq!(&reply.body()[..], &[9, 9, 9]);

    drop(client);
    echo.await.unwrap();
}

#[tokio::test]
async fn test_framed_rejects_oversized_stream_frame() {
    let (mut client, server) = tokio::io::duplex(1024);
    let config = FrameConfig {
        max_frame_size: 128,
        ..FrameConfig::default()
    };
    let mut reader = FramedRead::new(server, MessageCodec::new(config));

    let frame = encode(&Message::new("big", 0, vec![0u8; 512]).unwrap()).unwrap();
    tokio::io::AsyncWriteExt::write_all(&mut client, &frame[..HEADER_LEN])
        .await
        .unwrap();

    let result = reader.next().await.expect("item");
    assert!(matches!(result, Err(ProtocolError::OversizedFrame(531))));
}
