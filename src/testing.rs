use crate::register::control::CONTROL_ADDR;
use crate::register::data::DATA_ADDR;
use crate::register::control::TEMPERATURE_COMMAND;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal::i2c::{ErrorKind, ErrorType, Operation, SevenBitAddress};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use heapless::Vec;

const MAX_LOGGED_WRITES: usize = 32;
const MAX_WRITE_LEN: usize = 24;

/// A register-file model of an I2C device.
///
/// Writes of `[reg, data..]` store `data` starting at `reg` and move the register
/// pointer to `reg`, reads return bytes from the pointer onwards. A write to the
/// control register latches the configured raw temperature or pressure sample into
/// the data registers, the way the sensor does once a conversion has finished.
pub struct FakeI2c {
    registers: [u8; 256],
    pointer: u8,
    raw_temperature: [u8; 2],
    raw_pressure: [u8; 3],
    writes: Vec<Vec<u8, MAX_WRITE_LEN>, MAX_LOGGED_WRITES>,
    reads: usize,
    last_address: Option<SevenBitAddress>,
    write_error: Option<ErrorKind>,
    read_error: Option<ErrorKind>,
    hang: bool,
}

impl FakeI2c {
    pub fn new() -> Self {
        FakeI2c {
            registers: [0u8; 256],
            pointer: 0,
            raw_temperature: [0u8; 2],
            raw_pressure: [0u8; 3],
            writes: Vec::new(),
            reads: 0,
            last_address: None,
            write_error: None,
            read_error: None,
            hang: false,
        }
    }

    /// A BMP085 answering its chip id with the given calibration ROM contents.
    pub fn bmp085(calibration: &[u8; 22]) -> Self {
        let mut fake = Self::new();
        fake.set_registers(0xD0, &[0x55]);
        fake.set_registers(0xAA, calibration);

        fake
    }

    pub fn set_registers(&mut self, start: u8, data: &[u8]) {
        for (i, b) in data.iter().enumerate() {
            self.registers[(start as usize + i) % 256] = *b;
        }
    }

    pub fn registers(&self, start: u8, len: usize) -> &[u8] {
        &self.registers[start as usize..start as usize + len]
    }

    pub fn set_raw_temperature(&mut self, raw: u16) {
        self.raw_temperature = raw.to_be_bytes();
    }

    pub fn set_raw_pressure(&mut self, raw: [u8; 3]) {
        self.raw_pressure = raw;
    }

    pub fn writes(&self) -> &[Vec<u8, MAX_WRITE_LEN>] {
        &self.writes
    }

    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn last_address(&self) -> Option<SevenBitAddress> {
        self.last_address
    }

    pub fn fail_writes(&mut self, error: ErrorKind) {
        self.write_error = Some(error);
    }

    pub fn fail_reads(&mut self, error: ErrorKind) {
        self.read_error = Some(error);
    }

    pub fn clear_failures(&mut self) {
        self.write_error = None;
        self.read_error = None;
    }

    /// Makes every following transaction pend forever.
    pub fn hang(&mut self) {
        self.hang = true;
    }

    fn handle_write(&mut self, bytes: &[u8]) -> Result<(), ErrorKind> {
        if let Some(e) = self.write_error {
            return Err(e);
        }

        self.writes
            .push(Vec::from_slice(bytes).expect("write too long for fake"))
            .expect("too many writes for fake");

        if let Some((&reg, data)) = bytes.split_first() {
            self.pointer = reg;
            self.set_registers(reg, data);

            if reg == CONTROL_ADDR {
                if let Some(&command) = data.first() {
                    if command == TEMPERATURE_COMMAND {
                        let raw = self.raw_temperature;
                        self.set_registers(DATA_ADDR, &raw);
                    } else {
                        let raw = self.raw_pressure;
                        self.set_registers(DATA_ADDR, &raw);
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_read(&mut self, buf: &mut [u8]) -> Result<(), ErrorKind> {
        if let Some(e) = self.read_error {
            return Err(e);
        }

        self.reads += 1;
        for (i, b) in buf.iter_mut().enumerate() {
            *b = self.registers[(self.pointer as usize + i) % 256];
        }

        Ok(())
    }
}

impl ErrorType for FakeI2c {
    type Error = ErrorKind;
}

impl I2c for FakeI2c {
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.hang {
            core::future::pending::<()>().await;
        }

        self.last_address = Some(address);
        for operation in operations {
            match operation {
                Operation::Write(bytes) => self.handle_write(bytes)?,
                Operation::Read(buf) => self.handle_read(buf)?,
            }
        }

        Ok(())
    }
}

/// Completes every delay immediately and keeps a tally of the requested time.
#[derive(Default)]
pub struct FakeDelay {
    pub total_ns: u64,
    pub calls: usize,
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
        self.calls += 1;
    }
}

/// A timer that never fires, used where a transport timeout must not interfere.
pub struct NeverDelay;

impl DelayNs for NeverDelay {
    async fn delay_ns(&mut self, _: u32) {
        core::future::pending::<()>().await
    }
}

/// Records whether the shared bus was locked while a delay was in progress.
pub struct LockProbeDelay<'a> {
    bus: &'a Mutex<NoopRawMutex, FakeI2c>,
    pub waits: usize,
    pub locked_during_wait: bool,
}

impl<'a> LockProbeDelay<'a> {
    pub fn new(bus: &'a Mutex<NoopRawMutex, FakeI2c>) -> Self {
        Self { bus, waits: 0, locked_during_wait: false }
    }
}

impl DelayNs for LockProbeDelay<'_> {
    async fn delay_ns(&mut self, _: u32) {
        self.waits += 1;
        self.locked_during_wait |= self.bus.try_lock().is_err();
    }
}
