use std::{env, path::PathBuf};

/// Emits link directives for the C library behind the selected adapter.
///
/// Pure-Rust adapters need nothing. Library locations can be overridden with
/// `MKLROOT` and `FFTW_LIB_DIR`.
pub fn build() {
    println!("cargo:rerun-if-env-changed=MKLROOT");
    println!("cargo:rerun-if-env-changed=FFTW_LIB_DIR");

    let threads: bool = env::var_os("CARGO_FEATURE_THREADS").is_some();

    if env::var_os("CARGO_FEATURE_MKL").is_some() {
        if let Some(root) = env::var_os("MKLROOT") {
            // oneAPI installs under lib/, older releases under lib/intel64/.
            let lib_dir: PathBuf = PathBuf::from(root).join("lib");
            println!("cargo:rustc-link-search=native={}", lib_dir.join("intel64").display());
            println!("cargo:rustc-link-search=native={}", lib_dir.display());
        }
        // The single dynamic library exports the FFTW3 interface and picks the
        // threading layer from MKL_THREADING_LAYER at run time.
        println!("cargo:rustc-link-lib=dylib=mkl_rt");
    }

    if env::var_os("CARGO_FEATURE_FFTW3").is_some() {
        if let Some(dir) = env::var_os("FFTW_LIB_DIR") {
            println!("cargo:rustc-link-search=native={}", PathBuf::from(dir).display());
        }
        if threads {
            println!("cargo:rustc-link-lib=dylib=fftw3_threads");
        }
        println!("cargo:rustc-link-lib=dylib=fftw3");
    }
}
