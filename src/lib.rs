use wasm_bindgen::prelude::*;

pub mod math;
pub mod animation;
pub mod critter;
pub mod config;
pub mod error;

pub use config::AnimatorConfig;
pub use critter::{AnimatorState, EyeImage, Part, PoseAnimator};
pub use error::CritterError;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Critter animation engine exposed to JavaScript
///
/// The host owns the image views, forwards gesture progress, calls `tick`
/// from its animation frame callback and copies the presented transforms
/// onto its layers.
#[wasm_bindgen]
pub struct CritterView {
    animator: PoseAnimator,
}

#[wasm_bindgen]
impl CritterView {
    /// Create an engine with the tuned default timings
    #[wasm_bindgen(constructor)]
    pub fn new() -> CritterView {
        Self {
            animator: PoseAnimator::default(),
        }
    }

    /// Create an engine with timings overridden from a YAML string
    #[wasm_bindgen]
    pub fn with_config(yaml: &str) -> Result<CritterView, JsValue> {
        let config = AnimatorConfig::from_yaml(yaml).map_err(to_js)?;
        Ok(Self {
            animator: PoseAnimator::new(config),
        })
    }

    // === Head turn ===

    #[wasm_bindgen]
    pub fn start_head_rotation(&mut self, start_at: f32) {
        self.animator.start_head_rotation(start_at);
    }

    #[wasm_bindgen]
    pub fn update_head_rotation(&mut self, progress: f32) {
        self.animator.update_head_rotation(progress);
    }

    #[wasm_bindgen]
    pub fn stop_head_rotation(&mut self) {
        self.animator.stop_head_rotation();
    }

    #[wasm_bindgen]
    pub fn store_current_state(&mut self) {
        self.animator.store_current_state();
    }

    #[wasm_bindgen]
    pub fn restore_state(&mut self) -> Result<(), JsValue> {
        self.animator.try_restore_state().map_err(to_js)
    }

    /// Stored snapshot as YAML, if any
    #[wasm_bindgen]
    pub fn stored_pose_yaml(&self) -> Result<Option<String>, JsValue> {
        stored_pose_yaml(&self.animator).map_err(to_js)
    }

    // === Validation ===

    #[wasm_bindgen]
    pub fn validate(&mut self) {
        self.animator.validate();
    }

    #[wasm_bindgen]
    pub fn is_doe_eyed(&self) -> bool {
        self.animator.is_doe_eyed()
    }

    // === Frame loop ===

    /// Advance animations by `dt` seconds
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f32) {
        self.animator.tick(dt);
    }

    #[wasm_bindgen]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// "idle", "turning" or "returning"
    #[wasm_bindgen]
    pub fn state(&self) -> String {
        state_name(self.animator.state()).to_string()
    }

    // === Presentation ===

    /// Presented transform of a part as 16 column-major floats
    #[wasm_bindgen]
    pub fn part_transform(&self, part: &str) -> Result<js_sys::Float32Array, JsValue> {
        let part = Part::from_name(part).map_err(to_js)?;
        let transform = self.animator.transform(part);
        Ok(js_sys::Float32Array::from(&transform.as_slice()[..]))
    }

    /// Presented z position of a part
    #[wasm_bindgen]
    pub fn part_z_position(&self, part: &str) -> Result<f32, JsValue> {
        let part = Part::from_name(part).map_err(to_js)?;
        Ok(z_position(&self.animator, part))
    }

    #[wasm_bindgen]
    pub fn eye_diameter(&self) -> f32 {
        self.eye().map_or(self.animator.config().eye_diameter, |eye| eye.diameter)
    }

    /// Weight of the doe-eye bitmap in the current cross-fade (0..1)
    #[wasm_bindgen]
    pub fn eye_blend(&self) -> f32 {
        self.eye().map_or(0.0, |eye| doe_weight(&eye.contents))
    }
}

impl Default for CritterView {
    fn default() -> Self {
        Self::new()
    }
}

impl CritterView {
    fn eye(&self) -> Option<critter::EyePresentation> {
        self.animator.eye_presentation(Part::LeftEye)
    }

    pub fn animator(&self) -> &PoseAnimator {
        &self.animator
    }
}

fn to_js(err: CritterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn state_name(state: AnimatorState) -> &'static str {
    match state {
        AnimatorState::Idle => "idle",
        AnimatorState::Turning => "turning",
        AnimatorState::Returning => "returning",
    }
}

fn z_position(animator: &PoseAnimator, part: Part) -> f32 {
    animator
        .ear_z_order(part)
        .map_or(critter::layout::base_z(part), |z| z.z_position())
}

fn doe_weight(contents: &animation::ContentPresentation<EyeImage>) -> f32 {
    let weight = |image: EyeImage| if image == EyeImage::DoeEyed { 1.0 } else { 0.0 };
    weight(contents.from) * (1.0 - contents.blend) + weight(contents.to) * contents.blend
}

fn stored_pose_yaml(animator: &PoseAnimator) -> error::Result<Option<String>> {
    animator
        .stored_pose()
        .map(|stored| serde_yaml::to_string(stored).map_err(CritterError::from))
        .transpose()
}
