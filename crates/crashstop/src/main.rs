//! Command-line front end for the crashstop facility.
//!
//! Installs the crash handlers in its own process and then waits, crashes,
//! or triggers the suspension protocol on demand. Serves as a manual
//! demonstration harness and as the spawn target of the integration tests.

use std::io::Write;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libcrashstop::DebugFlags;
use log::info;
use nix::sys::signal::{self, Signal};

/// Top-level argument parser describing the harness interface.
#[derive(Parser, Debug)]
#[command(name = "crashstop", version, about = "Suspend-on-crash demonstration harness", long_about = None)]
struct Cli {
    /// Deliver signal handlers on a dedicated alternate stack.
    #[arg(long)]
    altstack: bool,

    /// Engage the debugger-attach handshake after suspension.
    #[arg(long)]
    wait_attach: bool,

    /// Opaque options forwarded to the debugger launcher.
    #[arg(long, default_value = "")]
    opts: String,

    #[command(subcommand)]
    cmd: Command,
}

/// Subcommands exposed by the harness.
#[derive(Subcommand, Debug)]
enum Command {
    /// Install handlers and idle until a signal arrives.
    Wait,
    /// Install handlers, then raise the named fatal signal at ourselves.
    Crash { signal: String },
    /// Install handlers, then invoke the suspension protocol directly.
    Trigger,
    /// Display version information for diagnostics.
    Version,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Command::Version = cli.cmd {
        println!("crashstop {}", libcrashstop::version());
        return Ok(());
    }

    let mut flags = DebugFlags::empty();
    if cli.altstack {
        flags |= DebugFlags::ALT_STACK;
    }
    if cli.wait_attach {
        flags |= DebugFlags::WAIT_ATTACH;
    }

    let installed = libcrashstop::install_signal_handlers(flags, &cli.opts);
    info!("signal handlers installed: {installed}");

    // Readiness marker for whoever spawned us; flushed explicitly since
    // stdout is block-buffered on a pipe.
    println!("installed: {installed}");
    std::io::stdout().flush()?;

    match cli.cmd {
        Command::Wait => loop {
            std::thread::sleep(Duration::from_secs(3600));
        },
        Command::Crash { signal } => {
            let sig = Signal::from_str(&signal)
                .map_err(|_| anyhow::anyhow!("unknown signal name {signal}"))?;
            info!("raising {sig}");
            signal::raise(sig).context("failed to raise signal")?;
            // Reached only if the signal's disposition let us continue.
            Ok(())
        }
        Command::Trigger => {
            let ok = libcrashstop::trigger_debug(flags, &cli.opts);
            info!("suspension protocol finished: {ok}");
            // A handled crash that falls through to termination exits
            // non-zero; the direct trigger follows the same convention.
            std::process::exit(1);
        }
        Command::Version => unreachable!(),
    }
}
