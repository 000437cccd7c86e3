cfg_if::cfg_if! {
    if #[cfg(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64")))] {
        pub use epochalypse_platforms_sensehat::platform_init;
    } else {
        pub use epochalypse_platforms_stub::platform_init;
    }
}
