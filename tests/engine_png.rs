use std::ffi::CString;
use std::fs;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use image::GenericImageView;
use sp3ctragen::dsp::sine_wave;
use sp3ctragen::engine::{EngineOptions, EXIT_FAILURE, EXIT_SUCCESS};
use sp3ctragen::render::RenderLayout;
use sp3ctragen::{submit, Engine, NativeSettings, SettingsForm, SpectralGenerator, Submission};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sp3ctragen-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_tone(path: &Path, sample_rate: u32, seconds: f64, channels: u16) {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let len = (sample_rate as f64 * seconds) as usize;
    let tone = sine_wave(len, sample_rate as f64, 1000.0, 0.5);
    let mut writer = WavWriter::create(path, spec).unwrap();
    for s in tone {
        for _ in 0..channels {
            writer.write_sample((s * i16::MAX as f64) as i16).unwrap();
        }
    }
    writer.finalize().unwrap();
}

fn small_engine() -> Engine {
    Engine::new(EngineOptions {
        layout: RenderLayout {
            width: 120,
            height: 1200,
            top_margin: 100,
            bottom_margin: 100,
        },
        padded_size: 4096,
        blur_radius: None,
    })
}

fn small_settings() -> NativeSettings {
    NativeSettings {
        fft_size: 1024,
        overlap: 0.5,
        min_freq: 100.0,
        max_freq: 3500.0,
        duration: 1.0,
        sample_rate: 8000,
        ..NativeSettings::default()
    }
}

#[test]
fn engine_writes_png_with_layout_size() {
    let dir = scratch_dir("layout");
    let input = dir.join("tone.wav");
    let output = dir.join("spectrogram.png");
    write_tone(&input, 8000, 1.0, 2);

    let mut settings = small_settings();
    let code = small_engine().generate(&mut settings, input.to_str().unwrap(), output.to_str().unwrap());
    assert_eq!(code, EXIT_SUCCESS);

    let img = image::open(&output).unwrap().to_luma8();
    assert_eq!(img.dimensions(), (120, 1200));
    // Margins are untouched.
    assert!((0..120).all(|x| img.get_pixel(x, 0)[0] == 255));
    assert!((0..120).all(|x| img.get_pixel(x, 1199)[0] == 255));
    // The tone leaves at least one dark row in the plot area.
    let darkest = (100..1100).map(|y| img.get_pixel(60, y)[0]).min().unwrap();
    assert_eq!(darkest, 0);
}

#[test]
fn blurred_output_keeps_dimensions() {
    let dir = scratch_dir("blur");
    let input = dir.join("tone.wav");
    let output = dir.join("spectrogram.png");
    write_tone(&input, 8000, 1.0, 1);

    let mut engine = small_engine();
    engine.options.blur_radius = Some(2);
    let mut settings = small_settings();
    let code = engine.generate(&mut settings, input.to_str().unwrap(), output.to_str().unwrap());
    assert_eq!(code, EXIT_SUCCESS);
    assert_eq!(image::open(&output).unwrap().to_luma8().dimensions(), (120, 1200));
}

#[test]
fn too_short_input_fails() {
    let dir = scratch_dir("short");
    let input = dir.join("short.wav");
    let output = dir.join("spectrogram.png");
    write_tone(&input, 8000, 0.05, 1);

    let mut settings = small_settings();
    let code = small_engine().generate(&mut settings, input.to_str().unwrap(), output.to_str().unwrap());
    assert_eq!(code, EXIT_FAILURE);
    assert!(!output.exists());
}

#[test]
fn unwritable_output_fails() {
    let dir = scratch_dir("unwritable");
    let input = dir.join("tone.wav");
    write_tone(&input, 8000, 1.0, 1);
    let output = dir.join("missing-subdir").join("spectrogram.png");

    let mut settings = small_settings();
    let code = small_engine().generate(&mut settings, input.to_str().unwrap(), output.to_str().unwrap());
    assert_eq!(code, EXIT_FAILURE);
}

#[test]
fn submit_runs_engine_end_to_end() {
    let dir = scratch_dir("submit");
    let input = dir.join("tone.wav");
    write_tone(&input, 8000, 1.0, 1);

    let form = SettingsForm {
        fft_size: "1024".into(),
        overlap: "0.5".into(),
        min_freq: "100".into(),
        max_freq: "3500".into(),
        duration: "1.0".into(),
        sample_rate: "8000".into(),
        input_file: input.to_str().unwrap().to_string(),
        output_folder: dir.to_str().unwrap().to_string(),
        ..SettingsForm::default()
    };
    let result = submit(&small_engine(), &form);
    assert_eq!(result, Submission::Completed(dir.join("spectrogram.png")));
    assert!(dir.join("spectrogram.png").exists());
}

#[test]
fn c_entry_point_renders_default_page() {
    let dir = scratch_dir("ffi");
    let input = dir.join("tone.wav");
    let output = dir.join("spectrogram.png");
    write_tone(&input, 8000, 1.0, 1);

    let settings = small_settings();
    let input_c = CString::new(input.to_str().unwrap()).unwrap();
    let output_c = CString::new(output.to_str().unwrap()).unwrap();
    let code = unsafe { sp3ctragen::ffi::spectral_generator(&settings, input_c.as_ptr(), output_c.as_ptr()) };
    assert_eq!(code, EXIT_SUCCESS);
    assert_eq!(image::open(&output).unwrap().dimensions(), (7014, 4962));
}
