//! C ABI export of the in-process engine, matching
//! `int spectral_generator(const SpectrogramSettings *, const char *, const char *)`.

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};

use log::error;

use crate::bridge::{NativeSettings, SpectralGenerator};
use crate::engine::{Engine, EXIT_FAILURE};

unsafe fn path_arg<'a>(ptr: *const c_char, name: &str) -> Option<&'a str> {
    if ptr.is_null() {
        error!("{} path is null", name);
        return None;
    }
    match CStr::from_ptr(ptr).to_str() {
        Ok(s) if !s.is_empty() => Some(s),
        Ok(_) => {
            error!("{} path is empty", name);
            None
        }
        Err(_) => {
            error!("{} path is not valid UTF-8", name);
            None
        }
    }
}

/// # Safety
///
/// `cfg` must be null or point to a valid settings record; `input_file` and
/// `output_file` must be null or point to NUL-terminated strings. All three
/// must stay valid for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn spectral_generator(
    cfg: *const NativeSettings,
    input_file: *const c_char,
    output_file: *const c_char,
) -> c_int {
    if cfg.is_null() {
        error!("settings pointer is null");
        return EXIT_FAILURE;
    }
    let (input, output) = match (path_arg(input_file, "input"), path_arg(output_file, "output")) {
        (Some(i), Some(o)) => (i, o),
        _ => return EXIT_FAILURE,
    };

    let mut settings = *cfg;
    Engine::default().generate(&mut settings, input, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;
    use std::ptr;

    #[test]
    fn null_arguments_fail() {
        let settings = NativeSettings::default();
        let path = CString::new("/tmp/a.wav").unwrap();
        unsafe {
            assert_eq!(spectral_generator(ptr::null(), path.as_ptr(), path.as_ptr()), 1);
            assert_eq!(spectral_generator(&settings, ptr::null(), path.as_ptr()), 1);
            assert_eq!(spectral_generator(&settings, path.as_ptr(), ptr::null()), 1);
        }
    }

    #[test]
    fn empty_paths_fail() {
        let settings = NativeSettings::default();
        let empty = CString::new("").unwrap();
        let path = CString::new("/tmp/out.png").unwrap();
        unsafe {
            assert_eq!(spectral_generator(&settings, empty.as_ptr(), path.as_ptr()), 1);
        }
    }

    #[test]
    fn record_layout_matches_c_struct() {
        // int, 4 doubles, int, 2 doubles, int, double, int, double with
        // natural alignment.
        assert_eq!(std::mem::size_of::<NativeSettings>(), 96);
        assert_eq!(std::mem::align_of::<NativeSettings>(), std::mem::align_of::<f64>());
    }
}
