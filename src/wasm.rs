//! WASM bindings for Pulse Core.
//!
//! This module provides JavaScript-friendly bindings for stepping a module
//! network from a browser, for example to animate presses.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmPulseMachine } from 'pulse_core';
//!
//! await init();
//!
//! const networkDsl = `
//!   broadcaster -> a, b, c
//!   %a -> b
//!   %b -> c
//!   %c -> inv
//!   &inv -> a
//! `;
//!
//! const machine = new WasmPulseMachine(networkDsl);
//! machine.press_many(1000);
//! console.log(machine.low, machine.high, machine.product());
//! ```

use wasm_bindgen::prelude::*;

use crate::cycle::CycleDetector;
use crate::dsl;
use crate::engine::{sync, MachineConfig, PulseMachine, SyncConfig};
use crate::error::PulseError;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: PulseError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible pulse machine.
///
/// This struct wraps the native [`PulseMachine`] and exposes presses,
/// counters and per-module queries to JavaScript.
#[wasm_bindgen]
pub struct WasmPulseMachine {
    machine: PulseMachine,
}

#[wasm_bindgen]
impl WasmPulseMachine {
    /// Create a machine from a module list, entering at `broadcaster`.
    ///
    /// # Example
    /// ```javascript
    /// const machine = new WasmPulseMachine(networkDsl);
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(network_dsl: &str) -> Result<WasmPulseMachine, JsValue> {
        Self::with_entry(network_dsl, crate::engine::DEFAULT_ENTRY)
    }

    /// Create a machine whose presses are sent to a custom entry module.
    #[wasm_bindgen]
    pub fn with_entry(network_dsl: &str, entry: &str) -> Result<WasmPulseMachine, JsValue> {
        let ast = dsl::parse(network_dsl).map_err(to_js)?;
        let machine =
            PulseMachine::from_ast(&ast, MachineConfig::new().with_entry(entry)).map_err(to_js)?;
        Ok(WasmPulseMachine { machine })
    }

    /// Run one press to quiescence.
    ///
    /// # Returns
    /// `[low, high]` pulses sent during this press.
    #[wasm_bindgen]
    pub fn press(&mut self) -> Vec<u64> {
        let sent = self.machine.press();
        vec![sent.low, sent.high]
    }

    /// Run `n` presses.
    #[wasm_bindgen]
    pub fn press_many(&mut self, n: u64) {
        self.machine.press_many(n);
    }

    /// Cumulative low pulses.
    #[wasm_bindgen(getter)]
    pub fn low(&self) -> u64 {
        self.machine.counts().low
    }

    /// Cumulative high pulses.
    #[wasm_bindgen(getter)]
    pub fn high(&self) -> u64 {
        self.machine.counts().high
    }

    /// Completed presses.
    #[wasm_bindgen(getter)]
    pub fn presses(&self) -> u64 {
        self.machine.presses()
    }

    /// `low * high` of the cumulative counters, as a decimal string.
    ///
    /// The product can exceed 64 bits.
    #[wasm_bindgen]
    pub fn product(&self) -> String {
        self.machine.counts().product().to_string()
    }

    /// Return to the freshly wired state.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.machine.reset();
    }

    /// Whether a flip-flop is on, or `undefined` if `name` is not a flip-flop.
    #[wasm_bindgen]
    pub fn is_on(&self, name: &str) -> Option<bool> {
        self.machine.is_on(name).ok()
    }

    /// Whether a conjunction emitted high during the last press, or
    /// `undefined` if `name` is not a conjunction.
    #[wasm_bindgen]
    pub fn fired_high(&self, name: &str) -> Option<bool> {
        self.machine.fired_high(name).ok()
    }

    /// `[low, high]` after `presses` presses from the current state,
    /// extrapolated through the press cycle. The machine is left untouched.
    #[wasm_bindgen]
    pub fn extrapolate(&self, presses: u64, max_steps: usize) -> Result<Vec<u64>, JsValue> {
        let detector = CycleDetector::new().with_max_steps(max_steps);
        let run = self
            .machine
            .extrapolate_counts(presses, &detector)
            .map_err(to_js)?;
        Ok(vec![run.counts.low, run.counts.high])
    }

    /// Presses until `target` first receives low, using the counter shortcut.
    #[wasm_bindgen]
    pub fn presses_until_low(&mut self, target: &str, max_presses: u64) -> Result<u64, JsValue> {
        let config = SyncConfig::new().with_max_presses(max_presses);
        sync::presses_until_low(&mut self.machine, target, &config).map_err(to_js)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
