pub mod audio;
pub mod bridge;
pub mod dsp;
pub mod engine;
pub mod ffi;
pub mod fields;
pub mod imaging;
pub mod paths;
pub mod presets;
pub mod render;
pub mod settings;
pub mod spectrogram;

pub use bridge::{classify, submit, GenerationError, NativeSettings, SpectralGenerator, Submission};
pub use engine::Engine;
pub use fields::SettingsForm;
pub use settings::SpectrogramSettings;
