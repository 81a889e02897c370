//! Modbus/TCP serial number reader.
//!
//! Opens a session to the controller, reads the four input registers holding
//! the packed serial, and closes the session again. The session is closed on
//! every path once it has been opened, including failed reads.

use crate::error::{ScanError, ScanResult};
use crate::scanner::traits::SerialReader;
use crate::serial::SerialCode;
use crate::types::ScanTarget;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::time::timeout;
use tokio_modbus::client::{tcp, Client, Context, Reader};
use tokio_modbus::Slave;
use tracing::{debug, warn};

/// Input register holding the first word of the serial number.
pub const SERIAL_REGISTER: u16 = 14;

/// 16-bit registers making up one 64-bit value.
pub const SERIAL_WORDS: u16 = 4;

/// Default Modbus unit identifier.
pub const DEFAULT_UNIT_ID: u8 = 1;

/// Default deadline for the session open and the register read.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Reads the serial register over Modbus/TCP.
#[derive(Debug, Clone)]
pub struct ModbusSerialReader {
    timeout: Duration,
    register: u16,
    unit_id: u8,
}

impl ModbusSerialReader {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            register: SERIAL_REGISTER,
            unit_id: DEFAULT_UNIT_ID,
        }
    }

    /// Read from a different input register.
    pub fn with_register(mut self, register: u16) -> Self {
        self.register = register;
        self
    }

    /// Address a different unit behind the endpoint.
    pub fn with_unit_id(mut self, unit_id: u8) -> Self {
        self.unit_id = unit_id;
        self
    }

    pub fn register(&self) -> u16 {
        self.register
    }

    async fn open(&self, addr: SocketAddr) -> ScanResult<Context> {
        match timeout(self.timeout, tcp::connect_slave(addr, Slave(self.unit_id))).await {
            Ok(Ok(ctx)) => Ok(ctx),
            Ok(Err(e)) => Err(ScanError::Connect {
                addr,
                reason: e.to_string(),
            }),
            Err(_) => Err(ScanError::ConnectTimeout {
                addr,
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }

    async fn read_raw(&self, ctx: &mut Context, addr: SocketAddr) -> ScanResult<u64> {
        let read_error = |reason: String| ScanError::Read {
            addr,
            register: self.register,
            reason,
        };

        let words = match timeout(
            self.timeout,
            ctx.read_input_registers(self.register, SERIAL_WORDS),
        )
        .await
        {
            Ok(Ok(Ok(words))) => words,
            Ok(Ok(Err(exception))) => return Err(read_error(exception.to_string())),
            Ok(Err(e)) => return Err(read_error(e.to_string())),
            Err(_) => {
                return Err(read_error(format!(
                    "timed out after {}ms",
                    self.timeout.as_millis()
                )))
            }
        };

        words_to_u64(&words).ok_or(ScanError::MalformedData {
            addr,
            expected: usize::from(SERIAL_WORDS),
            actual: words.len(),
        })
    }
}

impl Default for ModbusSerialReader {
    fn default() -> Self {
        Self::new(DEFAULT_READ_TIMEOUT)
    }
}

#[async_trait]
impl SerialReader for ModbusSerialReader {
    async fn read_serial(&self, target: ScanTarget) -> ScanResult<SerialCode> {
        let addr = target.socket_addr();
        let mut ctx = self.open(addr).await?;

        let raw = self.read_raw(&mut ctx, addr).await;

        if let Err(e) = ctx.disconnect().await {
            warn!(%addr, error = %e, "failed to close modbus session");
        }

        let raw = raw?;
        debug!(%addr, raw = %format!("{raw:#018x}"), "read serial register");
        Ok(SerialCode::decode(raw))
    }
}

/// Combine four registers, high word first.
pub fn words_to_u64(words: &[u16]) -> Option<u64> {
    let words: &[u16; 4] = words.try_into().ok()?;
    Some(
        words
            .iter()
            .fold(0u64, |acc, &word| (acc << 16) | u64::from(word)),
    )
}
