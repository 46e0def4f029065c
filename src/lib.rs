#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod spring;

use std::fmt;

use serde::Serialize;
use spring::{
    FeaHandoff, GenerationOptions, LoadCase, Material, MeshLevel, NormalizedSpring, SpringCenterline,
    SpringDesign, SpringFactors,
};
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    // A second start-up call finds the logger already installed.
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("could not start the rayon thread pool: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DesignSummary<'a> {
    spring: &'a NormalizedSpring,
    #[serde(skip_serializing_if = "Option::is_none")]
    factors: Option<SpringFactors>,
    point_count: usize,
}

/// Public entry point for consumers.
#[wasm_bindgen]
pub struct SpringEngine {
    initialized: bool,
    design: Option<SpringDesign>,
    last_result: Option<SpringCenterline>,
    result_dirty: bool,
}

impl Default for SpringEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl SpringEngine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> SpringEngine {
        SpringEngine {
            initialized: true,
            design: None,
            last_result: None,
            result_dirty: false,
        }
    }

    #[wasm_bindgen]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Loads a design object `{springType, geometry, options}`.
    #[wasm_bindgen]
    pub fn load_design(&mut self, design: JsValue) -> Result<(), JsValue> {
        let design: SpringDesign = serde_wasm_bindgen::from_value(design).map_err(to_js_error)?;
        self.set_design(design);
        Ok(())
    }

    /// Loads a design from its JSON text.
    #[wasm_bindgen]
    pub fn load_json(&mut self, text: &str) -> Result<(), JsValue> {
        let design = SpringDesign::from_json(text).map_err(to_js_error)?;
        self.set_design(design);
        Ok(())
    }

    /// Replaces the generation options of the loaded design.
    #[wasm_bindgen]
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsValue> {
        let options: GenerationOptions =
            serde_wasm_bindgen::from_value(options).map_err(to_js_error)?;
        options.validate().map_err(to_js_error)?;
        let design = self
            .design
            .as_mut()
            .ok_or_else(|| js_error("no design loaded"))?;
        design.options = options;
        self.result_dirty = true;
        Ok(())
    }

    /// Samples the loaded design. A no-op when nothing changed since the
    /// last call.
    #[wasm_bindgen]
    pub fn generate(&mut self) -> Result<(), JsValue> {
        if !self.result_dirty {
            return Ok(());
        }
        let design = self
            .design
            .as_ref()
            .ok_or_else(|| js_error("no design loaded"))?;
        let centerline = spring::generate(design).map_err(to_js_error)?;
        self.last_result = Some(centerline);
        self.result_dirty = false;
        Ok(())
    }

    /// The last generated centerline, points plus cross-section and grinding.
    #[wasm_bindgen]
    pub fn get_centerline(&self) -> Result<JsValue, JsValue> {
        let centerline = self.current_result()?;
        serde_wasm_bindgen::to_value(centerline).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Normalized parameters and wire correction factors of the last result.
    #[wasm_bindgen]
    pub fn get_summary(&self) -> Result<JsValue, JsValue> {
        let centerline = self.current_result()?;
        let summary = DesignSummary {
            spring: &centerline.spring,
            factors: SpringFactors::for_spring(&centerline.spring),
            point_count: centerline.path.len(),
        };
        serde_wasm_bindgen::to_value(&summary).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Beam-model hand-off for the loaded design.
    #[wasm_bindgen]
    pub fn get_fea_handoff(&self, load_cases: JsValue, mesh_level: &str) -> Result<JsValue, JsValue> {
        let design = self
            .design
            .as_ref()
            .ok_or_else(|| js_error("no design loaded"))?;
        let load_cases: Vec<LoadCase> =
            serde_wasm_bindgen::from_value(load_cases).map_err(to_js_error)?;
        let level = MeshLevel::parse(mesh_level)
            .ok_or_else(|| js_error(&format!("unknown mesh level `{mesh_level}`")))?;
        let material = match design.parameters.family() {
            spring::SpringFamily::Wave => Material::wave_alloy(),
            _ => Material::steel(),
        };
        let handoff = FeaHandoff::new(design, material, load_cases, level).map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&handoff).map_err(|err| JsError::new(&err.to_string()).into())
    }
}

impl SpringEngine {
    fn set_design(&mut self, design: SpringDesign) {
        debug_log!("design loaded: {}", design.parameters.family());
        self.design = Some(design);
        self.last_result = None;
        self.result_dirty = true;
    }

    fn current_result(&self) -> Result<&SpringCenterline, JsValue> {
        if self.result_dirty {
            return Err(js_error("design has not been generated yet"));
        }
        self.last_result
            .as_ref()
            .ok_or_else(|| js_error("no design loaded"))
    }

    /// The last generated centerline, for native callers.
    #[must_use]
    pub fn centerline(&self) -> Option<&SpringCenterline> {
        if self.result_dirty {
            None
        } else {
            self.last_result.as_ref()
        }
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::SpringEngine;
    use crate::spring::SpringFamily;

    const DESIGN: &str = r#"{
        "springType": "compression",
        "geometry": {"wireDiameter": 3.2, "meanDiameter": 24.0, "activeCoils": 8,
                     "totalCoils": 10, "freeLength": 50.0}
    }"#;

    #[test]
    fn engine_initializes_empty() {
        let engine = SpringEngine::new();
        assert!(engine.is_initialized());
        assert!(engine.centerline().is_none());
    }

    #[test]
    fn generate_without_design_is_a_no_op() {
        let mut engine = SpringEngine::new();
        assert!(engine.generate().is_ok());
        assert!(engine.centerline().is_none());
    }

    #[test]
    fn loaded_json_generates_once() {
        let mut engine = SpringEngine::new();
        engine.load_json(DESIGN).expect("valid design");
        assert!(engine.centerline().is_none());
        engine.generate().expect("generates");
        let centerline = engine.centerline().expect("result available");
        assert_eq!(centerline.family, SpringFamily::Compression);
        assert_eq!(centerline.path.len(), 361);
    }

    #[test]
    fn invalid_json_is_rejected() {
        let mut engine = SpringEngine::new();
        assert!(engine.load_json("{\"springType\": 3}").is_err());
        assert!(engine.centerline().is_none());
    }
}
