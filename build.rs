fn main() {
    println!("cargo:rerun-if-env-changed=VENTDOOR_CONFIG_JSON");

    // Propagate the ESP-IDF sysenv only for device builds; host builds
    // (tests, fuzzing) have no ESP-IDF toolchain to link against.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
