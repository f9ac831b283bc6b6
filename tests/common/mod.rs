//! Shared test infrastructure for expression-flower integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use expression_flower::FlowerHardware;
use palette::Srgb;

// ============================================================================
// Mock Hardware
// ============================================================================

/// Error returned by [`MockHardware`] when a failure is injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offline;

/// Mock hardware that records every write and can be told to fail
#[derive(Default)]
pub struct MockHardware {
    pub servo_writes: heapless::Vec<f32, 256>,
    pub led_writes: heapless::Vec<Srgb, 256>,
    pub indicator_writes: heapless::Vec<bool, 32>,
    pub release_calls: u32,
    pub fail_servo: bool,
    pub fail_led: bool,
    pub fail_indicator: bool,
    pub fail_release: bool,
}

impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn servo_writes(&self) -> &[f32] {
        &self.servo_writes
    }

    pub fn led_writes(&self) -> &[Srgb] {
        &self.led_writes
    }

    pub fn indicator_writes(&self) -> &[bool] {
        &self.indicator_writes
    }

    pub fn last_servo(&self) -> Option<f32> {
        self.servo_writes.last().copied()
    }

    pub fn last_led(&self) -> Option<Srgb> {
        self.led_writes.last().copied()
    }

    pub fn release_calls(&self) -> u32 {
        self.release_calls
    }
}

impl FlowerHardware for MockHardware {
    type Error = Offline;

    fn write_servo_opening(&mut self, opening: f32) -> Result<(), Offline> {
        if self.fail_servo {
            return Err(Offline);
        }
        let _ = self.servo_writes.push(opening);
        Ok(())
    }

    fn write_led_color(&mut self, color: Srgb) -> Result<(), Offline> {
        if self.fail_led {
            return Err(Offline);
        }
        let _ = self.led_writes.push(color);
        Ok(())
    }

    fn write_detection_indicator(&mut self, present: bool) -> Result<(), Offline> {
        if self.fail_indicator {
            return Err(Offline);
        }
        let _ = self.indicator_writes.push(present);
        Ok(())
    }

    fn release(&mut self) -> Result<(), Offline> {
        self.release_calls += 1;
        if self.fail_release {
            return Err(Offline);
        }
        Ok(())
    }
}

// ============================================================================
// Completion Callbacks
// ============================================================================

pub type Callback = Box<dyn FnOnce()>;

/// Returns a shared counter and a callback incrementing it
pub fn counting_callback() -> (std::rc::Rc<std::cell::Cell<u32>>, Callback) {
    let count = std::rc::Rc::new(std::cell::Cell::new(0));
    let handle = count.clone();
    let callback: Callback = Box::new(move || handle.set(handle.get() + 1));
    (count, callback)
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);
pub const GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}

/// Compare two openings with floating-point tolerance
pub fn openings_equal(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}
