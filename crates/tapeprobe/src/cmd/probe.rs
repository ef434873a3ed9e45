use tracing::debug;

use tapeprobe_client::Exchange;
use tapeprobe_link::PacketSocket;

use crate::cmd::ProbeArgs;
use crate::exit::{exchange_error, link_error, CliResult, SUCCESS};
use crate::output::{print_record, OutputFormat};

pub fn run(args: ProbeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = args.target.probe_config()?;
    let renderer = args.target.renderer();
    debug!(
        iface = %args.target.iface,
        dest = %config.dest,
        timeout = ?config.timeout,
        cells = config.layout.cell_count,
        "probe starting"
    );

    let link = PacketSocket::open(&args.target.iface)
        .map_err(|err| link_error("link setup failed", err))?;
    let mut exchange = Exchange::new(link, config);

    let record = exchange
        .transact()
        .map_err(|err| exchange_error("probe failed", err))?;

    print_record(&record, &renderer, format);
    Ok(SUCCESS)
}
