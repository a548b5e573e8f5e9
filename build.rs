use std::process::Command;

fn main() {
    // Without this, vcruntime140.dll and others will be needed to run output.
    static_vcruntime::metabuild();

    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_owned());
    let toolchain = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|version| version.trim().to_owned())
        .filter(|version| !version.is_empty())
        .unwrap_or_else(|| "Unknown".to_owned());

    println!("cargo:rustc-env=RHC_BUILD_TOOLCHAIN={}", toolchain);
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RUSTC");
}
