// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::io::{Read, Write};
use twinflow_test_utils::{FailingFlush, FailingReader, FailingWriter, SharedBuffer};

#[test]
fn test_failing_reader_yields_data_then_fails() {
    let mut reader = FailingReader::new("abcdef");
    let mut buf = [0u8; 4];

    assert_eq!(reader.read(&mut buf).unwrap(), 4);
    assert_eq!(&buf, b"abcd");
    assert_eq!(reader.read(&mut buf).unwrap(), 2);
    assert_eq!(&buf[..2], b"ef");
    assert!(reader.read(&mut buf).is_err());
    assert!(reader.read(&mut buf).is_err());
}

#[test]
fn test_failing_reader_immediately() {
    let mut reader = FailingReader::immediately();
    let mut buf = [0u8; 4];

    let err = reader.read(&mut buf).unwrap_err();

    assert_eq!(err.to_string(), "injected read failure");
}

#[test]
fn test_failing_writer_forwards_up_to_limit() {
    // Arrange
    let sink = SharedBuffer::new();
    let mut writer = FailingWriter::new(sink.clone(), 5);

    // Act
    let short = writer.write(b"abcdefgh").unwrap();
    let failed = writer.write(b"ijk");

    // Assert
    assert_eq!(short, 5);
    assert!(failed.is_err());
    assert_eq!(sink.as_string(), "abcde");
}

#[test]
fn test_failing_writer_write_all_reports_error() {
    let sink = SharedBuffer::new();
    let mut writer = FailingWriter::new(sink.clone(), 3);

    assert!(writer.write_all(b"abcdef").is_err());
    assert_eq!(sink.as_string(), "abc");
}

#[test]
fn test_failing_flush_keeps_writes() {
    let sink = SharedBuffer::new();
    let mut writer = FailingFlush::new(sink.clone());

    writer.write_all(b"kept").unwrap();

    assert!(writer.flush().is_err());
    assert_eq!(sink.as_string(), "kept");
    assert_eq!(sink.flush_count(), 0);
}
