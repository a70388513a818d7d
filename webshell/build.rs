fn main() {
    // On Windows, when building with the "gui" feature, set the subsystem to "windows"
    // so no console window appears next to the shell
    #[cfg(target_os = "windows")]
    {
        if std::env::var("CARGO_FEATURE_GUI").is_ok() {
            // For MSVC linker: set Windows subsystem to hide console
            println!("cargo:rustc-link-arg-bin=webshell=/SUBSYSTEM:WINDOWS");
            println!("cargo:rustc-link-arg-bin=webshell=/ENTRY:mainCRTStartup");
        }
    }
}
