use std::path::Path;

use crate::shared::frame::{Frame, PixelOrder};

/// Fallback model input edge when the model's input shape is dynamic.
pub(crate) fn square_input_size(session: &ort::session::Session, fallback: u32) -> u32 {
    // NCHW: [1, 3, H, W]; H and W are equal for the models used here
    session
        .inputs()
        .first()
        .and_then(|input| {
            if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                if shape.len() >= 4 && shape[2] > 0 {
                    Some(shape[2] as u32)
                } else {
                    None
                }
            } else {
                None
            }
        })
        .unwrap_or(fallback)
}

/// Both models read RGB tensors; a BGR frame here is a caller error.
pub(crate) fn ensure_rgb(image: &Frame, detector: &str) -> Result<(), Box<dyn std::error::Error>> {
    if image.order() != PixelOrder::Rgb {
        return Err(format!("{detector} expects an RGB frame").into());
    }
    Ok(())
}

/// Loads an ONNX model on the preferred execution provider.
pub fn load_session(
    model_path: &Path,
) -> Result<ort::session::Session, Box<dyn std::error::Error>> {
    let intra_threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let session = ort::session::Session::builder()?
        .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)?
        .with_intra_threads(intra_threads)?
        .with_execution_providers(preferred_execution_providers())?
        .commit_from_file(model_path)?;
    log::debug!("Loaded ONNX model {}", model_path.display());
    Ok(session)
}

/// CoreML on macOS, DirectML on Windows, CPU elsewhere.
///
/// ONNX Runtime falls back to CPU when a listed provider cannot start.
fn preferred_execution_providers() -> Vec<ort::execution_providers::ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        vec![]
    }
}
