use std::path::PathBuf;

use ngorm_gen::{Config, Generator};

const MODELS: &str = "src/model.rs";

fn main() {
    println!("cargo:rerun-if-changed={MODELS}");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
    let mut config = Config::default();
    config.output.path = Some(out_dir.join("ngorm_generate.rs"));

    let generator = Generator::new(config).with_invocation(MODELS);
    if let Err(e) = generator.run(&[PathBuf::from(MODELS)]) {
        panic!("ngormgen: {e}");
    }
}
