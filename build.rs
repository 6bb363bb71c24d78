use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    // 将 memory.x 放到链接器搜索路径中
    let out = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    fs::write(out.join("memory.x"), include_bytes!("memory.x")).unwrap();
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=memory.x");

    println!("cargo:rustc-link-arg=--nmagic");
    println!("cargo:rustc-link-arg=-Tlink.x");
    // defmt 日志及 defmt-test 都需要
    println!("cargo:rustc-link-arg=-Tdefmt.x");
}
