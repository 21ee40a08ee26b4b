use std::cell::Cell;
use std::rc::Rc;

use game_core::*;
use js_sys::{Array, Function, Uint8Array};
use log::{info, warn};
use proto::InputMsg;
use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use crate::bridge;
use crate::fsm::{UiAction, UiFsm};
use crate::input::{HeldKeys, KeyCommand};

fn call(callback: &Function, args: &Array) {
    if let Err(e) = callback.apply(&JsValue::NULL, args) {
        warn!("host callback failed: {:?}", e);
    }
}

/// Calls `callback(name, value)` per sound unless muted
struct JsAudio {
    callback: Function,
    muted: Rc<Cell<bool>>,
}

impl AudioSink for JsAudio {
    fn play(&mut self, sound: SoundEvent) {
        if self.muted.get() {
            return;
        }
        if let proto::HostMsg::Sound { name, value } = bridge::sound_msg(sound) {
            let args = Array::of2(&JsValue::from_str(&name), &JsValue::from(value));
            call(&self.callback, &args);
        }
    }
}

/// Calls `callback(name, x, y, intensity)` per effect
struct JsEffects {
    callback: Function,
}

impl EffectsSink for JsEffects {
    fn trigger(&mut self, effect: EffectEvent) {
        if let proto::HostMsg::Effect {
            name,
            x,
            y,
            intensity,
        } = bridge::effect_msg(effect)
        {
            let args = Array::of4(
                &JsValue::from_str(&name),
                &JsValue::from(x),
                &JsValue::from(y),
                &JsValue::from(intensity),
            );
            call(&self.callback, &args);
        }
    }
}

/// Calls `callback(bytes)` with the encoded game-over summary
struct JsProgression {
    callback: Function,
}

impl ProgressionSink for JsProgression {
    fn record(&mut self, summary: &RoundSummary) {
        match bridge::summary_msg(summary).to_bytes() {
            Ok(bytes) => {
                let args = Array::of1(&Uint8Array::from(bytes.as_slice()).into());
                call(&self.callback, &args);
            }
            Err(e) => warn!("failed to encode round summary: {:?}", e),
        }
    }
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) keeps the existing logger
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WasmGame {
    game: Match,
    ui: UiFsm,
    keys: HeldKeys,
    muted: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl WasmGame {
    /// `config` is a preset name or a TOML override document
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, config: Option<String>) -> Result<WasmGame, JsValue> {
        let config = match config.as_deref() {
            None => Config::new(),
            Some(src) => match Config::preset(src) {
                Some(preset) => preset,
                None => Config::from_toml_str(src)
                    .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?,
            },
        };
        let game = Match::new(config, seed)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?;
        info!("Impossible Pong ready (seed {seed})");

        Ok(Self {
            game,
            ui: UiFsm::new(),
            keys: HeldKeys::default(),
            muted: Rc::new(Cell::new(false)),
        })
    }

    pub fn set_audio(&mut self, callback: Function) {
        self.game.hooks.audio = Some(Box::new(JsAudio {
            callback,
            muted: self.muted.clone(),
        }));
    }

    pub fn set_effects(&mut self, callback: Function) {
        self.game.hooks.effects = Some(Box::new(JsEffects { callback }));
    }

    pub fn set_progression(&mut self, callback: Function) {
        self.game.hooks.progression = Some(Box::new(JsProgression { callback }));
    }

    pub fn key_down(&mut self, key: &str) {
        match self.keys.key_down(key) {
            KeyCommand::Move | KeyCommand::Ignored => {}
            KeyCommand::Fire => self.game.trigger_fire(),
            KeyCommand::StartOrPause => self.start_or_pause(),
            KeyCommand::TogglePractice => self.toggle_practice(),
            KeyCommand::ToggleDebug => {
                let on = self.ui.toggle_debug();
                info!("AI debug {}", if on { "on" } else { "off" });
            }
            KeyCommand::ToggleMute => self.muted.set(self.ui.toggle_mute()),
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.key_up(key);
    }

    /// `keydown` listener entry point. Space would scroll the page.
    pub fn on_key_down(&mut self, event: &KeyboardEvent) {
        let key = event.key();
        if key == " " {
            event.prevent_default();
        }
        self.key_down(&key);
    }

    pub fn on_key_up(&mut self, event: &KeyboardEvent) {
        self.key_up(&event.key());
    }

    /// Window lost focus
    pub fn blur(&mut self) {
        self.keys.release_all();
    }

    /// Host animation callback. Returns true when a tick ran.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.game.set_input(self.keys.up, self.keys.down);
        let ticked = self.game.frame(now_ms);
        if self.game.state() == MatchState::GameOver && self.ui.is_playing() {
            self.ui.transition(UiAction::GameOver);
        }
        ticked
    }

    /// Frame callback stamped with `performance.now()`
    pub fn frame_now(&mut self) -> Result<bool, JsValue> {
        let now = web_sys::window()
            .and_then(|w| w.performance())
            .ok_or_else(|| JsValue::from_str("performance.now() unavailable"))?
            .now();
        Ok(self.frame(now))
    }

    /// Encoded `HostMsg::Frame` for the renderer
    pub fn snapshot_bytes(&self) -> Result<Vec<u8>, JsValue> {
        bridge::frame_msg(&self.game.snapshot(), self.ui.debug())
            .to_bytes()
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize frame: {:?}", e)))
    }

    /// Apply an encoded `InputMsg` from a host running this in a worker
    pub fn handle_input(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let msg = InputMsg::from_bytes(bytes)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse input: {:?}", e)))?;

        match msg {
            InputMsg::Input { up, down, fire } => {
                self.keys.up = up;
                self.keys.down = down;
                if fire {
                    self.game.trigger_fire();
                }
            }
            InputMsg::Start => {
                if !self.ui.is_playing() && self.game.state() != MatchState::Paused {
                    self.start_or_pause();
                }
            }
            InputMsg::TogglePause => {
                if matches!(self.game.state(), MatchState::Playing | MatchState::Paused) {
                    self.start_or_pause();
                }
            }
            InputMsg::SetPractice { on } => {
                if self.ui.practice() != on {
                    self.toggle_practice();
                }
            }
            InputMsg::SetDebug { on } => {
                if self.ui.debug() != on {
                    self.ui.toggle_debug();
                }
            }
            InputMsg::Frame { now_ms } => {
                self.frame(now_ms);
            }
        }
        Ok(())
    }

    pub fn state_string(&self) -> String {
        self.ui.state_string()
    }

    pub fn practice(&self) -> bool {
        self.ui.practice()
    }

    pub fn debug(&self) -> bool {
        self.ui.debug()
    }
}

impl WasmGame {
    fn start_or_pause(&mut self) {
        let result = self.ui.start_or_pause();
        if !result.success() {
            return;
        }
        match result.action() {
            UiAction::Start | UiAction::PlayAgain => {
                self.game.set_practice_mode(self.ui.practice());
                self.game.start();
            }
            UiAction::Pause | UiAction::Resume => self.game.toggle_pause(),
            UiAction::GameOver => {}
        }
    }

    fn toggle_practice(&mut self) {
        if self.ui.toggle_practice() && self.game.set_practice_mode(self.ui.practice()) {
            info!("practice mode {}", if self.ui.practice() { "on" } else { "off" });
        }
    }
}
