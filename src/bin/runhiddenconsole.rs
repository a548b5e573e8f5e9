#![windows_subsystem = "windows"]
use runhiddenconsole::{
    cli::{self, Invocation},
    console, trace, Arguments, CommandLine, Error, LaunchPlan, Result,
};

const EXIT_FAILURE: i32 = -1;

// Start a console subsystem program with no console.
fn main() {
    console::attach_parent_console();

    let code = match run() {
        Ok(()) => 0,
        Err(err) => {
            eprint!("{}", err);
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let (arguments, fallback) = Arguments::from_process();

    match cli::parse(&arguments)? {
        Invocation::Help => {
            print!("{}", cli::USAGE);
            Ok(())
        }
        Invocation::Version => {
            print!("{}", cli::version_text());
            Ok(())
        }
        Invocation::Launch { command, log } => {
            if let Some(log) = log {
                runhiddenconsole::log::initialize_log(log.level, &["args", "launch"], &log.file)
                    .map_err(Error::Log)?;
            }
            if let Some(reason) = fallback {
                trace!("args", log::Level::Warn, "Wide arguments unavailable: {}", reason);
            }
            trace!("args", log::Level::Debug, "{} arguments from {:?} source", arguments.len(), arguments.source());

            let command_line = CommandLine::join(&command);
            trace!("launch", log::Level::Info, "cmdline: {}", command_line);

            let plan = LaunchPlan::prepare(arguments.source(), &command_line)?;
            plan.spawn()?;
            Ok(())
        }
    }
}
