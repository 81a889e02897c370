//! End-to-end tests against an in-process Modbus/TCP controller.
//!
//! A small server exposes a packed serial number in input registers 14-17,
//! and the reader and scanner are pointed at it over loopback. A bare TCP
//! peer that speaks just enough of the protocol checks session teardown and
//! read deadlines.

use electroscan::scanner::{
    HostOutcome, ModbusSerialReader, ScanConfig, SerialReader, SubnetScanner,
};
use electroscan::serial::{SerialCode, Site};
use electroscan::types::{OctetRange, ScanTarget, Subnet};
use std::collections::HashMap;
use std::future;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time;
use tokio_modbus::prelude::*;
use tokio_modbus::server::tcp::{accept_tcp_connection, Server};

fn controller_serial() -> SerialCode {
    SerialCode {
        site: Site::Sa,
        order: 'A',
        chassis: 42,
        day: 5,
        month: 7,
        year: 23,
        product: ['A', 'B'],
    }
}

struct FakeController {
    input_registers: HashMap<u16, u16>,
}

impl FakeController {
    fn with_serial(raw: u64) -> Self {
        let input_registers = (0..4u16)
            .map(|i| (14 + i, (raw >> (48 - 16 * i)) as u16))
            .collect();
        Self { input_registers }
    }
}

impl tokio_modbus::server::Service for FakeController {
    type Request = Request<'static>;
    type Response = Response;
    type Exception = ExceptionCode;
    type Future = future::Ready<Result<Self::Response, Self::Exception>>;

    fn call(&self, req: Self::Request) -> Self::Future {
        let res = match req {
            Request::ReadInputRegisters(addr, cnt) => (addr..addr + cnt)
                .map(|reg| self.input_registers.get(&reg).copied())
                .collect::<Option<Vec<u16>>>()
                .map(Response::ReadInputRegisters)
                .ok_or(ExceptionCode::IllegalDataAddress),
            _ => Err(ExceptionCode::IllegalFunction),
        };
        future::ready(res)
    }
}

/// Start a controller on an ephemeral loopback port.
async fn start_controller(raw: u64) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = Server::new(listener);

    let new_service = move |_socket_addr| Ok(Some(FakeController::with_serial(raw)));
    let on_connected = move |stream, socket_addr| async move {
        accept_tcp_connection(stream, socket_addr, new_service)
    };
    let on_process_error = |err| {
        eprintln!("controller error: {}", err);
    };

    tokio::spawn(async move {
        if let Err(e) = server.serve(&on_connected, on_process_error).await {
            eprintln!("controller stopped: {}", e);
        }
    });

    time::sleep(Duration::from_millis(50)).await;
    addr
}

fn loopback(port: u16) -> ScanTarget {
    ScanTarget::new(Ipv4Addr::LOCALHOST, port)
}

#[tokio::test]
async fn test_reader_decodes_controller_serial() {
    let addr = start_controller(controller_serial().to_raw()).await;
    let reader = ModbusSerialReader::new(Duration::from_secs(1));

    let serial = reader.read_serial(loopback(addr.port())).await.unwrap();

    assert_eq!(serial.site, Site::Sa);
    assert_eq!(serial.chassis, 42);
    assert_eq!(serial.day, 5);
    assert_eq!(serial.year, 23);
    assert_eq!(serial.month, 7);
    assert_eq!(serial.to_string(), "AB23070542ASA");
    assert_eq!(serial, controller_serial());
}

#[tokio::test]
async fn test_reader_exception_is_read_error() {
    let addr = start_controller(controller_serial().to_raw()).await;
    let reader = ModbusSerialReader::new(Duration::from_secs(1)).with_register(100);

    let err = reader.read_serial(loopback(addr.port())).await.unwrap_err();
    assert!(err.is_read(), "unexpected error: {err}");
}

#[tokio::test]
async fn test_reader_survives_repeated_sessions() {
    let addr = start_controller(controller_serial().to_raw()).await;
    let reader = ModbusSerialReader::new(Duration::from_secs(1));

    for _ in 0..3 {
        let serial = reader.read_serial(loopback(addr.port())).await.unwrap();
        assert_eq!(serial.to_string(), "AB23070542ASA");
    }
}

#[tokio::test]
async fn test_scan_finds_loopback_controller() {
    let addr = start_controller(controller_serial().to_raw()).await;
    let config = ScanConfig::default()
        .with_port(addr.port())
        .with_probe_timeout(Duration::from_millis(500))
        .with_read_timeout(Duration::from_secs(1));
    let scanner = SubnetScanner::from_config(&config);

    // The controller is bound to 127.0.0.1 only, so .2 has nothing listening.
    let report = scanner
        .scan(
            Subnet::containing(Ipv4Addr::LOCALHOST),
            OctetRange::new(1, 3).unwrap(),
        )
        .await;

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].address, Ipv4Addr::new(127, 0, 0, 1));
    assert_eq!(
        report.results[0].serial_string().as_deref(),
        Some("AB23070542ASA")
    );
    assert_eq!(report.results[1].address, Ipv4Addr::new(127, 0, 0, 2));
    assert!(!report.results[1].outcome.is_found());
    assert_eq!(report.found_count(), 1);
}

#[tokio::test]
async fn test_scan_records_unreadable_controller() {
    let addr = start_controller(controller_serial().to_raw()).await;
    let mut config = ScanConfig::default()
        .with_port(addr.port())
        .with_probe_timeout(Duration::from_millis(500))
        .with_read_timeout(Duration::from_secs(1));
    config.register = 200;
    let scanner = SubnetScanner::from_config(&config);

    let report = scanner
        .scan(
            Subnet::containing(Ipv4Addr::LOCALHOST),
            OctetRange::new(1, 2).unwrap(),
        )
        .await;

    assert_eq!(report.results.len(), 1);
    assert!(matches!(
        report.results[0].outcome,
        HostOutcome::NoSerial { .. }
    ));
    assert!(report.absence_summary().contains("127.0.0.1 and 127.0.0.2"));
}

/// How the bare peer answers the one request it reads.
enum Reply {
    Words([u16; 4]),
    Exception(u8),
    Silent,
}

/// Accept one connection, answer one read-input-registers request, then
/// report whether the client closed the connection.
async fn start_peer(reply: Reply) -> (SocketAddr, oneshot::Receiver<bool>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        // MBAP header (7 bytes) + function, address, count (5 bytes).
        let mut request = [0u8; 12];
        stream.read_exact(&mut request).await.unwrap();
        assert_eq!(request[7], 0x04, "expected read input registers");

        let unit = request[6];
        let mut frame = request[..4].to_vec();
        match reply {
            Reply::Words(words) => {
                frame.extend_from_slice(&11u16.to_be_bytes());
                frame.extend_from_slice(&[unit, 0x04, 8]);
                for word in words {
                    frame.extend_from_slice(&word.to_be_bytes());
                }
            }
            Reply::Exception(code) => {
                frame.extend_from_slice(&3u16.to_be_bytes());
                frame.extend_from_slice(&[unit, 0x84, code]);
            }
            Reply::Silent => frame.clear(),
        }
        if !frame.is_empty() {
            stream.write_all(&frame).await.unwrap();
        }

        let mut rest = Vec::new();
        let closed = matches!(
            time::timeout(Duration::from_secs(2), stream.read_to_end(&mut rest)).await,
            Ok(Ok(_))
        );
        let _ = tx.send(closed);
    });

    (addr, rx)
}

fn serial_words(raw: u64) -> [u16; 4] {
    [
        (raw >> 48) as u16,
        (raw >> 32) as u16,
        (raw >> 16) as u16,
        raw as u16,
    ]
}

#[tokio::test]
async fn test_session_closed_after_successful_read() {
    let (addr, closed) = start_peer(Reply::Words(serial_words(controller_serial().to_raw()))).await;
    let reader = ModbusSerialReader::new(Duration::from_secs(1));

    let serial = reader.read_serial(loopback(addr.port())).await.unwrap();
    assert_eq!(serial.to_string(), "AB23070542ASA");
    assert!(closed.await.unwrap(), "session left open after read");
}

#[tokio::test]
async fn test_session_closed_after_exception() {
    // Illegal data address
    let (addr, closed) = start_peer(Reply::Exception(0x02)).await;
    let reader = ModbusSerialReader::new(Duration::from_secs(1));

    let err = reader.read_serial(loopback(addr.port())).await.unwrap_err();
    assert!(err.is_read(), "unexpected error: {err}");
    assert!(closed.await.unwrap(), "session left open after exception");
}

#[tokio::test]
async fn test_silent_peer_times_out_and_is_closed() {
    let (addr, closed) = start_peer(Reply::Silent).await;
    let reader = ModbusSerialReader::new(Duration::from_millis(100));

    let started = Instant::now();
    let err = reader.read_serial(loopback(addr.port())).await.unwrap_err();
    let elapsed = started.elapsed();

    assert!(err.is_read(), "unexpected error: {err}");
    assert!(elapsed >= Duration::from_millis(100), "returned early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(1), "read not bounded: {elapsed:?}");
    assert!(closed.await.unwrap(), "session left open after timeout");
}
