//! Test doubles for the register bus and the pacing delay. The bus keeps a
//! byte-per-register model of the chip plus an ordered write log, so tests
//! can assert both final state and exact write sequences.

// Not every test binary touches every helper.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

pub struct BusState {
    regs: [u8; 256],
    writes: Vec<(u8, u8)>,
    general_calls: Vec<Vec<u8>>,
    addr_seen: Option<u8>,
}

/// Recording register-bus double. Clones share the same state, so a test can
/// keep a handle while the driver owns another.
#[derive(Clone)]
pub struct MockBus(Rc<RefCell<BusState>>);

impl MockBus {
    pub fn new() -> Self {
        MockBus(Rc::new(RefCell::new(BusState {
            regs: [0; 256],
            writes: Vec::new(),
            general_calls: Vec::new(),
            addr_seen: None,
        })))
    }

    /// Ordered (register, value) write log.
    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.0.borrow().writes.clone()
    }

    /// Payloads addressed to the general call address 0x00.
    pub fn general_calls(&self) -> Vec<Vec<u8>> {
        self.0.borrow().general_calls.clone()
    }

    /// Device address of the last targeted transfer.
    pub fn addr_seen(&self) -> Option<u8> {
        self.0.borrow().addr_seen
    }

    /// Current value of a register in the device model.
    pub fn reg(&self, register: u8) -> u8 {
        self.0.borrow().regs[register as usize]
    }

    /// Drops the recorded logs, keeping the register state.
    pub fn clear(&self) {
        let mut state = self.0.borrow_mut();
        state.writes.clear();
        state.general_calls.clear();
    }
}

impl ErrorType for MockBus {
    type Error = ErrorKind;
}

impl I2c for MockBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        let mut pointer: u8 = 0;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    if address == 0x00 {
                        state.general_calls.push(bytes.to_vec());
                        continue;
                    }
                    state.addr_seen = Some(address);
                    if let Some((&register, values)) = bytes.split_first() {
                        pointer = register;
                        for (i, &value) in values.iter().enumerate() {
                            let reg = register.wrapping_add(i as u8);
                            state.regs[reg as usize] = value;
                            state.writes.push((reg, value));
                        }
                    }
                }
                Operation::Read(buf) => {
                    for (i, byte) in buf.iter_mut().enumerate() {
                        *byte = state.regs[pointer.wrapping_add(i as u8) as usize];
                    }
                }
            }
        }
        Ok(())
    }
}

/// Recording delay double; logs every requested pause in nanoseconds.
#[derive(Clone)]
pub struct MockDelay(Rc<RefCell<Vec<u32>>>);

impl MockDelay {
    pub fn new() -> Self {
        MockDelay(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn total_ns(&self) -> u64 {
        self.0.borrow().iter().map(|&ns| ns as u64).sum()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(ns);
    }
}
