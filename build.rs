fn main() {
    println!("cargo:rerun-if-env-changed=CONDA_PREFIX");
    // the embedded interpreter needs the conda env's libpython and RDKit libs
    if let Ok(prefix) = std::env::var("CONDA_PREFIX") {
        println!("cargo:rustc-env=LD_LIBRARY_PATH={prefix}/lib");
    }
}
