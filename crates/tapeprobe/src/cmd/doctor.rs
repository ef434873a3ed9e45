use serde::Serialize;

use tapeprobe_link::RawLink;

use crate::cmd::DoctorArgs;
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Info,
    Skip,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    detail: String,
}

#[derive(Debug, Serialize)]
struct DoctorOutput {
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(args: DoctorArgs, format: OutputFormat) -> CliResult<i32> {
    let iface_check = interface_check(&args.iface);
    let iface_ok = matches!(iface_check.status, CheckStatus::Pass);

    let checks = vec![
        iface_check,
        raw_socket_check(&args.iface, iface_ok),
        build_info_check(),
    ];

    let has_fail = checks.iter().any(|c| matches!(c.status, CheckStatus::Fail));
    let overall = if has_fail { "fail" } else { "pass" };

    let output = DoctorOutput { checks, overall };
    print_doctor(&output, format);

    if has_fail {
        Ok(HEALTH_CHECK_FAILED)
    } else {
        Ok(SUCCESS)
    }
}

fn interface_check(iface: &str) -> CheckResult {
    match tapeprobe_link::interface_index(iface) {
        Ok(index) => CheckResult {
            name: "interface".to_string(),
            status: CheckStatus::Pass,
            detail: format!("{iface} has index {index}"),
        },
        Err(err) => CheckResult {
            name: "interface".to_string(),
            status: CheckStatus::Fail,
            detail: err.to_string(),
        },
    }
}

fn raw_socket_check(iface: &str, iface_ok: bool) -> CheckResult {
    if !iface_ok {
        return CheckResult {
            name: "raw_socket".to_string(),
            status: CheckStatus::Skip,
            detail: "interface check failed".to_string(),
        };
    }

    match tapeprobe_link::PacketSocket::open(iface) {
        Ok(socket) => {
            let hwaddr = socket.hardware_addr();
            let detail = if hwaddr.is_zero() {
                format!("packet socket opened, but {iface} reports an all-zero hardware address")
            } else {
                format!("packet socket opened, hardware address {hwaddr}")
            };
            CheckResult {
                name: "raw_socket".to_string(),
                status: CheckStatus::Pass,
                detail,
            }
        }
        Err(err) => CheckResult {
            name: "raw_socket".to_string(),
            status: CheckStatus::Fail,
            detail: format!("{err}; opening a packet socket needs CAP_NET_RAW or root"),
        },
    }
}

fn build_info_check() -> CheckResult {
    CheckResult {
        name: "build".to_string(),
        status: CheckStatus::Info,
        detail: format!(
            "tapeprobe {} on {}/{}",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH
        ),
    }
}

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Text | OutputFormat::Table => {
            println!("tapeprobe doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<12} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: all checks passed");
            } else {
                println!("\n  Result: one or more checks failed");
            }
        }
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Info => "INFO",
        CheckStatus::Skip => "SKIP",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_output_has_overall_status() {
        let checks = vec![CheckResult {
            name: "x".to_string(),
            status: CheckStatus::Pass,
            detail: "ok".to_string(),
        }];
        let output = DoctorOutput {
            checks,
            overall: "pass",
        };
        let json = serde_json::to_string(&output).expect("doctor output should serialize");
        assert!(json.contains("\"overall\":\"pass\""));
    }

    #[test]
    fn missing_interface_fails_and_skips_socket_check() {
        let iface_check = interface_check("tpmissing0");
        assert!(matches!(iface_check.status, CheckStatus::Fail));

        let socket_check = raw_socket_check("tpmissing0", false);
        assert!(matches!(socket_check.status, CheckStatus::Skip));
    }

    #[test]
    fn build_info_is_informational() {
        let check = build_info_check();
        assert!(matches!(check.status, CheckStatus::Info));
        assert!(check.detail.contains(env!("CARGO_PKG_VERSION")));
    }
}
