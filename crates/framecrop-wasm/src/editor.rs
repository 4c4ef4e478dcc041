//! The `CropEditor` class: one crop session bound to JavaScript.
//!
//! The host owns the DOM. It forwards container measurements and pointer
//! events here, renders whatever `state()` reports, and attaches window-level
//! `pointermove`/`pointerup` listeners only while `is_dragging()` is true.
//!
//! # Example
//!
//! ```typescript
//! import init, { CropEditor } from '@framecrop/wasm';
//!
//! await init();
//! const editor = new CropEditor({ shape: { kind: 'rect', aspect: 16 / 9 } });
//! editor.set_on_save((dataUrl) => upload(dataUrl).then(() => editor.finish_save()));
//! editor.set_on_cancel(() => closeModal());
//!
//! editor.load_image(new Uint8Array(await file.arrayBuffer()));
//! editor.set_container_size(stage.clientWidth, stage.clientHeight);
//!
//! stage.onpointerdown = (e) => {
//!   const r = stage.getBoundingClientRect();
//!   if (editor.pointer_down(e.clientX, e.clientY, r.left, r.top)) attachDragListeners();
//! };
//! ```

use framecrop_core::{
    decode_image, CropConfig, CropSession, DecodeError, ExportError, ExportedCrop, Key, Point,
    SessionOutcome, Size, StageRect,
};
use wasm_bindgen::prelude::*;

use crate::types::{parse_target, phase_name, EditorState};

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Log a recoverable problem to tracing and, in the browser, the console.
fn warn(message: &str) {
    tracing::warn!("{message}");
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Interactive crop editor over a single image.
#[wasm_bindgen]
pub struct CropEditor {
    session: CropSession,
    image: Option<framecrop_core::Raster>,
    on_save: Option<js_sys::Function>,
    on_cancel: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl CropEditor {
    /// Create an editor. `config` is a `CropConfig`-shaped object; missing
    /// fields (or `undefined`) use the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CropEditor, JsValue> {
        let config: CropConfig = if config.is_undefined() || config.is_null() {
            CropConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid crop config: {}", e)))?
        };
        Ok(Self::with_config(config))
    }

    /// Called with the PNG data URL when `save()` succeeds.
    pub fn set_on_save(&mut self, callback: Option<js_sys::Function>) {
        self.on_save = callback;
    }

    /// Called with no arguments when the user aborts the session.
    pub fn set_on_cancel(&mut self, callback: Option<js_sys::Function>) {
        self.on_cancel = callback;
    }

    /// Decode JPEG or PNG bytes and use them as the source image.
    ///
    /// On failure the editor stays idle and the error is returned.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.load_bytes(bytes).map(|_| ()).map_err(to_js_error)
    }

    /// Container client size, on mount and after every resize observation.
    pub fn set_container_size(&mut self, width: f64, height: f64) {
        self.session.set_container_size(Size::new(width, height));
    }

    /// Press on the stage. Returns `true` when a drag started, i.e. when the
    /// host should attach its window listeners.
    pub fn pointer_down(
        &mut self,
        client_x: f64,
        client_y: f64,
        stage_left: f64,
        stage_top: f64,
    ) -> bool {
        let stage = self.stage(stage_left, stage_top);
        self.session.pointer_down(Point::new(client_x, client_y), &stage)
    }

    /// Start a drag on an explicit target: `"body"` or `"nw"`/`"ne"`/`"sw"`/`"se"`.
    pub fn begin_drag(
        &mut self,
        target: &str,
        client_x: f64,
        client_y: f64,
        stage_left: f64,
        stage_top: f64,
    ) -> bool {
        let Some(target) = parse_target(target) else {
            warn(&format!("unknown drag target '{}'", target));
            return false;
        };
        let stage = self.stage(stage_left, stage_top);
        self.session.begin_drag(target, Point::new(client_x, client_y), &stage)
    }

    /// Returns `true` when the selection changed and should be re-rendered.
    pub fn pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        stage_left: f64,
        stage_top: f64,
    ) -> bool {
        let stage = self.stage(stage_left, stage_top);
        self.session.pointer_move(Point::new(client_x, client_y), &stage)
    }

    pub fn pointer_up(&mut self) -> bool {
        self.session.pointer_up()
    }

    pub fn pointer_cancel(&mut self) -> bool {
        self.session.pointer_cancel()
    }

    /// Forward a `keydown` (`KeyboardEvent.key`). Returns `true` if handled.
    pub fn key_down(&mut self, key: &str) -> Result<bool, JsValue> {
        let outcome = self.session.key_down(Key::from_name(key));
        self.apply_outcome(outcome)
    }

    /// Click on the modal backdrop.
    pub fn backdrop_click(&mut self) -> Result<bool, JsValue> {
        let outcome = self.session.backdrop_click();
        self.apply_outcome(outcome)
    }

    /// Programmatic cancel (e.g. a Cancel button). Ignored while saving.
    pub fn cancel(&mut self) -> Result<bool, JsValue> {
        let outcome = self.session.request_cancel();
        self.apply_outcome(outcome)
    }

    /// The host component is unmounting; any drag is dropped.
    pub fn teardown(&mut self) {
        self.session.teardown();
    }

    /// `"idle"`, `"layout_ready"` or `"dragging"`.
    pub fn phase(&self) -> String {
        phase_name(self.session.phase()).to_string()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    pub fn is_saving(&self) -> bool {
        self.session.is_saving()
    }

    pub fn image_layout(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.layout()).map_err(to_js_error)
    }

    pub fn selection(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.selection()).map_err(to_js_error)
    }

    pub fn natural_size(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.natural_size()).map_err(to_js_error)
    }

    /// Full snapshot for rendering (see `EditorState`).
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&EditorState::capture(&self.session)).map_err(to_js_error)
    }

    /// PNG bytes of the current crop, or `undefined` when not ready.
    pub fn export_png(&self) -> Result<Option<Vec<u8>>, JsValue> {
        let crop = self.export_crop().map_err(to_js_error)?;
        Ok(crop.map(|crop| crop.png))
    }

    /// `data:image/png;base64,...` of the current crop, or `undefined`.
    pub fn export_data_url(&self) -> Result<Option<String>, JsValue> {
        let crop = self.export_crop().map_err(to_js_error)?;
        Ok(crop.map(|crop| crop.to_data_url()))
    }

    /// Export and hand the data URL to the save callback.
    ///
    /// Returns `false` without exporting when no save callback is set, when
    /// nothing can be exported, or when a save is already in flight. After a
    /// successful call the save stays in flight until the host calls
    /// `finish_save()`; cancel is ignored meanwhile.
    pub fn save(&mut self) -> Result<bool, JsValue> {
        if self.on_save.is_none() {
            warn("save requested without an on_save callback");
            return Ok(false);
        }
        if !self.session.begin_save() {
            return Ok(false);
        }

        let crop = match self.export_crop() {
            Ok(Some(crop)) => crop,
            Ok(None) => {
                self.session.finish_save();
                return Ok(false);
            }
            Err(e) => {
                self.session.finish_save();
                warn(&format!("crop export failed: {}", e));
                return Err(to_js_error(e));
            }
        };

        let Some(callback) = &self.on_save else {
            self.session.finish_save();
            return Ok(false);
        };

        let data_url = JsValue::from_str(&crop.to_data_url());
        if let Err(e) = callback.call1(&JsValue::NULL, &data_url) {
            self.session.finish_save();
            return Err(e);
        }
        Ok(true)
    }

    /// The host finished handling the saved image.
    pub fn finish_save(&mut self) {
        self.session.finish_save();
    }
}

impl CropEditor {
    pub fn with_config(config: CropConfig) -> Self {
        Self {
            session: CropSession::new(config),
            image: None,
            on_save: None,
            on_cancel: None,
        }
    }

    pub fn session(&self) -> &CropSession {
        &self.session
    }

    /// Decode `bytes` and feed the natural size into the session.
    pub(crate) fn load_bytes(&mut self, bytes: &[u8]) -> Result<Size, DecodeError> {
        self.session.set_image_source();
        self.image = None;

        match decode_image(bytes) {
            Ok(raster) => {
                let natural = raster.size();
                self.session.image_loaded(natural);
                self.image = Some(raster);
                Ok(natural)
            }
            Err(e) => {
                warn(&format!("image failed to load: {}", e));
                self.session.image_failed();
                Err(e)
            }
        }
    }

    pub(crate) fn export_crop(&self) -> Result<Option<ExportedCrop>, ExportError> {
        self.session.export(self.image.as_ref())
    }

    fn stage(&self, left: f64, top: f64) -> StageRect {
        let size = self.session.container_size().unwrap_or_default();
        StageRect::new(left, top, size.width, size.height)
    }

    fn apply_outcome(&mut self, outcome: SessionOutcome) -> Result<bool, JsValue> {
        match outcome {
            SessionOutcome::Ignored => Ok(false),
            SessionOutcome::DragCancelled => Ok(true),
            SessionOutcome::CancelRequested => {
                if let Some(callback) = &self.on_cancel {
                    callback.call0(&JsValue::NULL)?;
                }
                Ok(true)
            }
        }
    }
}


/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use framecrop_core::encode_png;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn gray_png() -> Vec<u8> {
        encode_png(&vec![128u8; 100 * 100 * 3], 100, 100).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_new_with_undefined_config() {
        let editor = CropEditor::new(JsValue::UNDEFINED).unwrap();
        assert_eq!(editor.phase(), "idle");
    }

    #[wasm_bindgen_test]
    fn test_load_invalid_bytes_errors() {
        let mut editor = CropEditor::new(JsValue::UNDEFINED).unwrap();
        assert!(editor.load_image(&[0, 1, 2]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_export_data_url() {
        let mut editor = CropEditor::new(JsValue::UNDEFINED).unwrap();
        editor.set_container_size(200.0, 200.0);
        editor.load_image(&gray_png()).unwrap();

        let url = editor.export_data_url().unwrap().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(editor.export_png().unwrap().is_some());
    }

    #[wasm_bindgen_test]
    fn test_export_before_ready_is_none() {
        let editor = CropEditor::new(JsValue::UNDEFINED).unwrap();
        assert!(editor.export_png().unwrap().is_none());
        assert!(editor.export_data_url().unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn test_save_keeps_flight_until_finished() {
        let mut editor = CropEditor::new(JsValue::UNDEFINED).unwrap();
        editor.set_container_size(200.0, 200.0);
        editor.load_image(&gray_png()).unwrap();
        editor.set_on_save(Some(js_sys::Function::new_with_args("url", "return url;")));

        assert!(editor.save().unwrap());
        assert!(editor.is_saving());
        // Cancel is ignored while the save is in flight
        assert!(!editor.cancel().unwrap());
        assert!(!editor.save().unwrap());

        editor.finish_save();
        assert!(editor.cancel().unwrap());
    }

    #[wasm_bindgen_test]
    fn test_escape_requests_cancel() {
        let mut editor = CropEditor::new(JsValue::UNDEFINED).unwrap();
        editor.set_on_cancel(Some(js_sys::Function::new_no_args("")));
        assert!(editor.key_down("Escape").unwrap());
        assert!(!editor.key_down("Enter").unwrap());
    }
}
