use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    // Hex seconds and nanos since the epoch; tells local builds apart in `guide status`.
    let build_id = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|now| format!("{:x}-{:x}", now.as_secs(), now.subsec_nanos()))
        .unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GUIDE_BUILD_ID={build_id}");
    println!("cargo:rerun-if-changed=build.rs");
}
