//! Argument parsing and environment defaults.
use macmon::config::{parse_args, usage, Config, Mode, MAX_PROC_CPU_DELAY_MS};
use std::sync::Mutex;
use std::time::Duration;

// serialize tests that mutate process-wide environment variables
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn argv(args: &[&str]) -> Vec<String> {
    std::iter::once("macmon")
        .chain(args.iter().copied())
        .map(String::from)
        .collect()
}

#[test]
fn modes() {
    assert_eq!(parse_args(argv(&[])), Ok(Mode::Serve));
    assert_eq!(parse_args(argv(&["--test"])), Ok(Mode::SelfTest));
    assert_eq!(parse_args(argv(&["-h"])), Ok(Mode::Help));
    assert_eq!(parse_args(argv(&["--version"])), Ok(Mode::Version));
    let err = parse_args(argv(&["serve"])).unwrap_err();
    assert!(err.contains("Unexpected argument 'serve'"));
    assert!(err.contains("Usage: macmon"));
}

#[test]
fn env_overrides_and_fallbacks() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("MACMON_CPU_INTERVAL_MS", "250");
    std::env::set_var("MACMON_PROC_CPU_DELAY_MS", "not-a-number");
    std::env::set_var("MACMON_DISK_MOUNT", "/data");
    let cfg = Config::from_env();
    assert_eq!(cfg.cpu_interval, Duration::from_millis(250));
    assert_eq!(cfg.proc_cpu_delay, Duration::from_millis(100));
    assert_eq!(cfg.disk_mount, std::path::PathBuf::from("/data"));

    std::env::remove_var("MACMON_CPU_INTERVAL_MS");
    std::env::remove_var("MACMON_PROC_CPU_DELAY_MS");
    std::env::remove_var("MACMON_DISK_MOUNT");
    assert_eq!(Config::from_env(), Config::default());
}

#[test]
fn process_delay_is_clamped() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("MACMON_PROC_CPU_DELAY_MS", "2000");
    let cfg = Config::from_env();
    std::env::remove_var("MACMON_PROC_CPU_DELAY_MS");
    assert_eq!(
        cfg.proc_cpu_delay,
        Duration::from_millis(MAX_PROC_CPU_DELAY_MS)
    );
    assert!(usage("macmon").contains("max 500"));
}
