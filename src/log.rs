// https://github.com/estk/log4rs/blob/master/examples/log_to_file.rs
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

struct LogSettings {
    level: log::Level,
    groups: HashSet<String>,
}

static LOG_SETTINGS: OnceLock<LogSettings> = OnceLock::new();

/// Sends `level` and above for the given groups to `file_path`.
///
/// Only the first call takes effect; the logger can be installed once per process.
pub fn initialize_log<P>(level: log::Level, groups: &[&str], file_path: P) -> anyhow::Result<log4rs::Handle>
where P: AsRef<Path> {
    let settings = LogSettings {
        level,
        groups: groups.iter().map(|x| x.to_string()).collect(),
    };
    if LOG_SETTINGS.set(settings).is_err() {
        anyhow::bail!("logging already initialized");
    }

    // Pattern: https://docs.rs/log4rs/*/log4rs/encode/pattern/index.html
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S)} {l} - {m}\n")))
        .build(file_path.as_ref())?;

    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(
            Root::builder()
                .appender("logfile")
                .build(level.to_level_filter()),
        )?;

    Ok(log4rs::init_config(config)?)
}

pub fn enabled(group: &str, level: log::Level) -> bool {
    LOG_SETTINGS
        .get()
        .map_or(false, |settings| level <= settings.level && settings.groups.contains(group))
}

pub fn __private_log(
    args: std::fmt::Arguments,
    level: log::Level,
    &(group, _module_path, file, line): &(&str, &'static str, &'static str, u32),
) {
    log::log!(level, "{}:{} [{},{}] - {}", file, line, group, std::process::id(), args);
}

// trace!("launch", log::Level::Debug, "a {} event", "log")
#[macro_export]
macro_rules! trace {
    ($group:expr, $lvl:expr, $($arg:tt)+) => ({
        let lvl = $lvl;
        if $crate::log::enabled($group, lvl) {
            $crate::log::__private_log(
                std::format_args!($($arg)+),
                lvl,
                &($group, std::module_path!(), std::file!(), std::line!()),
            );
        }
    });
}
