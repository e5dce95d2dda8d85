fn main() {
    // the starter project and the partials are embedded with rust-embed;
    // rebuild when they change
    println!("cargo:rerun-if-changed=assets/default_site");
    println!("cargo:rerun-if-changed=assets/partials");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
