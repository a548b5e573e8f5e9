use std::ffi::OsString;
use std::process::Command;

use runhiddenconsole::cli::{self, Invocation, LogOptions};
use runhiddenconsole::{Arguments, Error};

fn args(tokens: &[&str]) -> Arguments {
    let mut all = vec!["RunHiddenConsole".to_owned()];
    all.extend(tokens.iter().map(|t| t.to_string()));
    Arguments::Wide(all)
}

fn launched(tokens: &[&str]) -> Vec<Vec<u8>> {
    match cli::parse(&args(tokens)).unwrap() {
        Invocation::Launch { command, .. } => command,
        other => panic!("expected launch, got {:?}", other),
    }
}

#[test]
fn help_and_version_flags() {
    assert_eq!(cli::parse(&args(&["-h"])).unwrap(), Invocation::Help);
    assert_eq!(cli::parse(&args(&["--help"])).unwrap(), Invocation::Help);
    assert_eq!(cli::parse(&args(&["-v"])).unwrap(), Invocation::Version);
    assert_eq!(cli::parse(&args(&["--version"])).unwrap(), Invocation::Version);
}

#[test]
fn repeated_help_and_version_flags() {
    assert_eq!(cli::parse(&args(&["-h", "-h"])).unwrap(), Invocation::Help);
    assert_eq!(cli::parse(&args(&["--help", "--help"])).unwrap(), Invocation::Help);
    assert_eq!(cli::parse(&args(&["--version", "--version"])).unwrap(), Invocation::Version);
    assert_eq!(cli::parse(&args(&["-v", "-v", "calc.exe"])).unwrap(), Invocation::Version);
}

#[test]
fn first_informational_flag_wins() {
    assert_eq!(cli::parse(&args(&["-vh"])).unwrap(), Invocation::Version);
    assert_eq!(cli::parse(&args(&["-hv"])).unwrap(), Invocation::Help);
    assert_eq!(cli::parse(&args(&["-v", "--help"])).unwrap(), Invocation::Version);
    assert_eq!(cli::parse(&args(&["--help", "-v"])).unwrap(), Invocation::Help);
    assert_eq!(cli::parse(&args(&["--log-file", "-v", "-h"])).unwrap(), Invocation::Help);
    assert_eq!(cli::parse(&args(&["--log-level=debug", "-v"])).unwrap(), Invocation::Version);
}

#[test]
fn options_after_help_are_not_checked() {
    assert_eq!(cli::parse(&args(&["-h", "--bogus"])).unwrap(), Invocation::Help);
    assert_eq!(cli::parse(&args(&["--version", "-x", "calc.exe"])).unwrap(), Invocation::Version);
}

#[test]
fn unknown_option_before_help_is_a_usage_error() {
    assert!(matches!(cli::parse(&args(&["--bogus", "-h"])), Err(Error::Usage(_))));
    assert!(matches!(cli::parse(&args(&["-xh"])), Err(Error::Usage(_))));
}

#[test]
fn unknown_option_is_a_usage_error() {
    match cli::parse(&args(&["--bogus", "notepad.exe"])) {
        Err(Error::Usage(message)) => assert_eq!(message, "Use -h to see help."),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn missing_command_is_reported() {
    assert!(matches!(cli::parse(&args(&[])), Err(Error::NoCommand)));
    assert!(matches!(cli::parse(&args(&["--log-file", "x.log"])), Err(Error::NoCommand)));
    assert_eq!(Error::NoCommand.to_string(), "No command line find.");
}

#[test]
fn command_tokens_are_kept_in_order() {
    assert_eq!(launched(&["notepad.exe", "some file.txt"]), vec![b"notepad.exe".to_vec(), b"some file.txt".to_vec()]);
}

#[test]
fn options_stop_at_the_first_positional() {
    assert_eq!(
        launched(&["cmd.exe", "-h", "--version", "/c"]),
        vec![b"cmd.exe".to_vec(), b"-h".to_vec(), b"--version".to_vec(), b"/c".to_vec()]
    );
    assert_eq!(launched(&["--", "-weird.exe"]), vec![b"-weird.exe".to_vec()]);
}

#[test]
fn logging_options() {
    match cli::parse(&args(&["--log-file", "rhc.log", "--log-level", "DEBUG", "calc.exe"])).unwrap() {
        Invocation::Launch { command, log } => {
            assert_eq!(command, vec![b"calc.exe".to_vec()]);
            assert_eq!(log, Some(LogOptions { file: "rhc.log".into(), level: log::Level::Debug }));
        }
        other => panic!("unexpected {:?}", other),
    }

    match cli::parse(&args(&["--log-file", "rhc.log", "calc.exe"])).unwrap() {
        Invocation::Launch { log, .. } => assert_eq!(log.unwrap().level, log::Level::Info),
        other => panic!("unexpected {:?}", other),
    }

    assert!(matches!(cli::parse(&args(&["--log-level", "loud", "calc.exe"])), Err(Error::Usage(_))));
}

#[test]
fn native_arguments_parse_the_same() {
    let native = Arguments::Native(vec![OsString::from("RunHiddenConsole"), OsString::from("a b"), OsString::from("c")]);
    match cli::parse(&native).unwrap() {
        Invocation::Launch { command, log } => {
            assert_eq!(command, vec![b"a b".to_vec(), b"c".to_vec()]);
            assert!(log.is_none());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn version_text_names_version_and_toolchain() {
    let text = cli::version_text();
    assert!(text.starts_with("RunHiddenConsole"));
    assert!(text.contains(&format!("Version: {}", env!("CARGO_PKG_VERSION"))));
    assert!(text.contains("Build with "));
    assert!(!text.contains("Copyright"));
    assert_eq!(text.lines().count(), 3);
}

fn run_hidden_console() -> Command {
    Command::new(env!("CARGO_BIN_EXE_RunHiddenConsole"))
}

#[test]
fn binary_prints_help() {
    let output = run_hidden_console().arg("--help").output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), cli::USAGE);
}

#[test]
fn binary_prints_version() {
    let output = run_hidden_console().arg("-v").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn binary_handles_repeated_help() {
    let output = run_hidden_console().args(["-h", "-h", "--bogus"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), cli::USAGE);
}

#[test]
fn binary_without_command_fails() {
    let output = run_hidden_console().output().unwrap();
    assert!(!output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stderr), "No command line find.");
}

#[test]
fn binary_rejects_unknown_option() {
    let output = run_hidden_console().arg("--nope").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Use -h to see help."));
}

#[cfg(unix)]
#[test]
fn binary_launches_and_logs() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("rhc.log");

    let output = run_hidden_console()
        .arg("--log-file")
        .arg(&log_file)
        .args(["--log-level", "debug", "true", "some arg"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let log = std::fs::read_to_string(&log_file).unwrap();
    assert!(log.contains(r#"cmdline: true "some arg""#), "{}", log);
    assert!(log.contains("Started process"), "{}", log);
    assert!(log.contains("Wide arguments unavailable: No wide argument vector available."), "{}", log);
}

#[cfg(unix)]
#[test]
fn binary_reports_unusable_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_hidden_console()
        .arg("--log-file")
        .arg(dir.path())
        .arg("true")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Can not initialize logging"));
}
