mod common;

use common::{MockBus, MockDelay};
use motorhat_drivers::pwm::Pca9685;
use motorhat_drivers::Error;

#[test]
fn init_register_sequence() {
    let bus = MockBus::new();
    let mut delay = MockDelay::new();
    let mut pwm = Pca9685::new(bus.clone(), 0x40);
    pwm.init(&mut delay).unwrap();

    // All channels off, MODE2 totem-pole, MODE1 all-call, then the wake-up
    // rewrite of MODE1 with SLEEP still clear.
    assert_eq!(
        bus.writes(),
        vec![
            (0xFA, 0x00),
            (0xFB, 0x00),
            (0xFC, 0x00),
            (0xFD, 0x00),
            (0x01, 0x04),
            (0x00, 0x01),
            (0x00, 0x01),
        ]
    );
    assert_eq!(bus.addr_seen(), Some(0x40));
    // Two 5 ms oscillator settles.
    assert_eq!(delay.total_ns(), 10_000_000);
}

#[test]
fn set_frequency_programs_the_prescaler() {
    let bus = MockBus::new();
    let mut delay = MockDelay::new();
    let mut pwm = Pca9685::new(bus.clone(), 0x40);
    pwm.init(&mut delay).unwrap();
    bus.clear();

    pwm.set_frequency(1600, &mut delay).unwrap();

    // Sleep, prescale 3, mode restore, restart.
    assert_eq!(
        bus.writes(),
        vec![(0x00, 0x11), (0xFE, 0x03), (0x00, 0x01), (0x00, 0x81)]
    );
}

#[test]
fn prescale_rounds_to_nearest() {
    let bus = MockBus::new();
    let mut delay = MockDelay::new();
    let mut pwm = Pca9685::new(bus.clone(), 0x40);
    pwm.init(&mut delay).unwrap();

    // 25 MHz / 4096 / 60 Hz - 1 = 100.7, rounds to 101.
    pwm.set_frequency(60, &mut delay).unwrap();
    assert_eq!(bus.reg(0xFE), 101);

    assert_eq!(pwm.set_frequency(0, &mut delay), Err(Error::InvalidFrequency));
}

#[test]
fn set_channel_writes_the_duty_window() {
    let bus = MockBus::new();
    let mut pwm = Pca9685::new(bus.clone(), 0x40);

    pwm.set_channel(0, 0, 4080).unwrap();
    assert_eq!(
        bus.writes(),
        vec![(0x06, 0x00), (0x07, 0x00), (0x08, 0xF0), (0x09, 0x0F)]
    );

    bus.clear();
    pwm.set_channel(15, 4096, 0).unwrap();
    assert_eq!(
        bus.writes(),
        vec![(0x42, 0x00), (0x43, 0x10), (0x44, 0x00), (0x45, 0x00)]
    );
}

#[test]
fn set_channel_rejects_out_of_range_arguments() {
    let bus = MockBus::new();
    let mut pwm = Pca9685::new(bus.clone(), 0x40);

    assert_eq!(pwm.set_channel(16, 0, 0), Err(Error::InvalidChannel(16)));
    assert_eq!(pwm.set_channel(0, 4097, 0), Err(Error::InvalidTicks(4097)));
    assert_eq!(pwm.set_channel(0, 0, 4097), Err(Error::InvalidTicks(4097)));
    // Nothing reaches the bus on a rejected call.
    assert!(bus.writes().is_empty());
}

#[test]
fn software_reset_is_a_general_call() {
    let mut bus = MockBus::new();
    Pca9685::<MockBus>::software_reset(&mut bus).unwrap();
    assert_eq!(bus.general_calls(), vec![vec![0x06]]);
    assert!(bus.writes().is_empty());
}
