use chrono::Utc;

fn main() {
    // Stamp build time for /api/health / 记录构建时间
    let build_time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    println!("cargo:rustc-env=VIDSHARE_BUILD_TIME={}", build_time);
    println!("cargo:rerun-if-changed=build.rs");
}
