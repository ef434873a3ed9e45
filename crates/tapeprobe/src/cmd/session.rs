use std::io::{BufRead, Write};

use tracing::debug;

use tapeprobe_client::{Exchange, ExchangeError, TapeRenderer};
use tapeprobe_link::{PacketSocket, RawLink};

use crate::cmd::SessionArgs;
use crate::exit::{io_error, link_error, CliResult, SUCCESS};

const PROMPT: &str = "> ";
const QUIT: &str = "quit";
const NO_RESPONSE_MSG: &str = "Didn't receive response";
const NO_HEADER_MSG: &str = "cannot find TM header in the packet";

pub fn run(args: SessionArgs) -> CliResult<i32> {
    let config = args.target.probe_config()?;
    let renderer = args.target.renderer();

    let link = PacketSocket::open(&args.target.iface)
        .map_err(|err| link_error("link setup failed", err))?;
    let mut exchange = Exchange::new(link, config);
    debug!(iface = %args.target.iface, "session starting");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_session(&mut exchange, &renderer, stdin.lock(), stdout.lock())
        .map_err(|err| io_error("session I/O failed", err))?;

    Ok(SUCCESS)
}

/// Drive the prompt loop: one probe per input line.
///
/// Probe failures are reported on the line and the loop continues; only
/// `quit`, end of input, or a terminal I/O failure ends the session.
fn run_session<L, R, W>(
    exchange: &mut Exchange<L>,
    renderer: &TapeRenderer,
    mut input: R,
    mut out: W,
) -> std::io::Result<()>
where
    L: RawLink,
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // End of input behaves like quit.
            return Ok(());
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line == QUIT {
            return Ok(());
        }
        writeln!(out, "{line}")?;

        match exchange.transact() {
            Ok(record) => writeln!(out, "{}", renderer.render(&record))?,
            Err(ExchangeError::TimedOut(_)) => writeln!(out, "{NO_RESPONSE_MSG}")?,
            Err(ExchangeError::NoMatchingHeader) => writeln!(out, "{NO_HEADER_MSG}")?,
            Err(err) => writeln!(out, "{err}")?,
        }
    }
}
