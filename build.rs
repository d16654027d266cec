// build.rs

fn main() {
    // Generate build info (VERGEN_BUILD_TIMESTAMP, VERGEN_GIT_SHA) for --version
    vergen::EmitBuilder::builder()
        .build_timestamp()
        .git_sha(true)
        .emit()
        .expect("Unable to generate build info");
}
