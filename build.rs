fn main() {
    // Stamp the build date into the binary for `floorkit --version`
    let build_date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    println!("cargo:rustc-env=FLOORKIT_BUILD_DATE={}", build_date);
}
