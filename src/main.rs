mod cli;

use clap::error::ErrorKind;
use std::net::IpAddr;
use std::process;
use tracing::{error, info};
use wakeonlan::{network, wake_async, WakeError, WakeRequest, WakeSender};

fn init_logger(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            init_logger(tracing::Level::INFO);
            error!("Argument error: {}", e);
            process::exit(1);
        }
    };

    init_logger(if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    });

    let destination = match (&args.ip, &args.interface) {
        (Some(ip), _) => *ip,
        (None, Some(name)) => match network::broadcast_for_interface(name) {
            Ok(broadcast) => IpAddr::V4(broadcast),
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        },
        (None, None) => {
            error!("Either --ip or --interface is required");
            process::exit(1);
        }
    };

    let mut sender = WakeSender::new();
    if let Some(timeout) = args.timeout() {
        sender = sender.with_timeout(timeout);
    }
    if let Some(scope_id) = args.scope_id {
        sender = sender.with_scope_id(scope_id);
    }

    let request = WakeRequest::new(args.mac, destination, args.port);
    info!("Waking {} via {}:{}", request.mac, request.ip, request.port);

    match wake_async(&request, &sender).await {
        Ok(()) => {
            info!("Magic packet sent");
        }
        Err(e) => {
            error!("Wake failed: {}", e);
            let exit_code = match e {
                WakeError::Address(_) | WakeError::Interface(_) => 1,
                ref e if e.is_timeout() => 2,
                _ => 3,
            };
            process::exit(exit_code);
        }
    }
}
