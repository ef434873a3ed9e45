use std::time::Duration;

use clap::{Args, Subcommand, ValueEnum};

use tapeprobe_client::{ProbeConfig, RenderPolicy, TapeRenderer};
use tapeprobe_link::MacAddr;
use tapeprobe_wire::TapeLayout;

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod doctor;
pub mod expr;
pub mod probe;
pub mod session;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send one probe and print the device state.
    Probe(ProbeArgs),
    /// Interactive prompt: one probe per input line.
    Session(SessionArgs),
    /// Tokenize a prompt expression and print the tokens.
    Expr(ExprArgs),
    /// Run local environment health checks.
    Doctor(DoctorArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Probe(args) => probe::run(args, format),
        Command::Session(args) => session::run(args),
        Command::Expr(args) => expr::run(args, format),
        Command::Doctor(args) => doctor::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Device variant presets: tape width, probe fill value, default view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// 10-cell device; probe cells hold 3; numeric view.
    Basic,
    /// 21-cell device; probe cells hold 255; symbolic view.
    Wide,
}

/// Record view override.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    Numeric,
    Symbolic,
}

/// Target and layout flags shared by `probe` and `session`.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Network interface to send on.
    #[arg(long, short = 'i', default_value = "eth0", env = "TAPEPROBE_IFACE")]
    pub iface: String,

    /// Destination hardware address of the device.
    #[arg(long, default_value = "00:04:00:00:00:00")]
    pub dest: MacAddr,

    /// Reply timeout (e.g. 2s, 500ms).
    #[arg(long, default_value = "2s")]
    pub timeout: String,

    /// Device variant preset.
    #[arg(long, value_enum, default_value = "basic")]
    pub profile: Profile,

    /// Override the preset's tape width.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..))]
    pub cells: Option<u8>,

    /// Override the preset's probe fill value.
    #[arg(long)]
    pub fill: Option<u8>,

    /// Override the preset's record view.
    #[arg(long, value_enum)]
    pub render: Option<RenderMode>,
}

impl TargetArgs {
    /// Resolve the flags into an exchange configuration.
    pub fn probe_config(&self) -> CliResult<ProbeConfig> {
        let mut layout = match self.profile {
            Profile::Basic => TapeLayout::basic(),
            Profile::Wide => TapeLayout::wide(),
        };
        if let Some(cells) = self.cells {
            layout.cell_count = cells as usize;
        }
        if let Some(fill) = self.fill {
            layout.default_cell_value = fill;
        }

        Ok(ProbeConfig {
            dest: self.dest,
            timeout: parse_duration(&self.timeout)?,
            layout,
        })
    }

    /// Renderer implied by the profile unless overridden.
    pub fn renderer(&self) -> TapeRenderer {
        let policy = match (self.render, self.profile) {
            (Some(RenderMode::Numeric), _) => RenderPolicy::Numeric,
            (Some(RenderMode::Symbolic), _) => RenderPolicy::Symbolic,
            (None, Profile::Basic) => RenderPolicy::Numeric,
            (None, Profile::Wide) => RenderPolicy::Symbolic,
        };
        TapeRenderer::new(policy)
    }
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Args, Debug)]
pub struct ExprArgs {
    /// Expression to tokenize, e.g. "12 + 7".
    pub input: String,
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Interface the checks should look at.
    #[arg(long, short = 'i', default_value = "eth0", env = "TAPEPROBE_IFACE")]
    pub iface: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(args: &[&str]) -> TargetArgs {
        #[derive(clap::Parser)]
        struct Wrapper {
            #[command(flatten)]
            target: TargetArgs,
        }
        let full: Vec<&str> = std::iter::once("test").chain(args.iter().copied()).collect();
        <Wrapper as clap::Parser>::try_parse_from(full)
            .expect("target args should parse")
            .target
    }

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("-1s").is_err());
    }

    #[test]
    fn profile_selects_layout_and_view() {
        let basic = target(&[]);
        let config = basic.probe_config().unwrap();
        assert_eq!(config.layout, TapeLayout::basic());
        assert_eq!(basic.renderer().policy, RenderPolicy::Numeric);

        let wide = target(&["--profile", "wide"]);
        let config = wide.probe_config().unwrap();
        assert_eq!(config.layout, TapeLayout::wide());
        assert_eq!(wide.renderer().policy, RenderPolicy::Symbolic);
    }

    #[test]
    fn overrides_replace_preset_fields() {
        let args = target(&["--profile", "wide", "--cells", "5", "--fill", "9"]);
        let config = args.probe_config().unwrap();
        assert_eq!(config.layout.cell_count, 5);
        assert_eq!(config.layout.default_cell_value, 9);
    }

    #[test]
    fn render_override_beats_profile_default() {
        let args = target(&["--profile", "wide", "--render", "numeric"]);
        assert_eq!(args.renderer().policy, RenderPolicy::Numeric);
    }

    #[test]
    fn default_target_matches_reference_device() {
        let args = target(&[]);
        let config = args.probe_config().unwrap();
        assert_eq!(config.dest.to_string(), "00:04:00:00:00:00");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(args.iface, "eth0");
    }
}
