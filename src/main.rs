// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Orthoroute CLI entrypoint.
//!
//! Reads a JSON route request, routes it and prints the JSON response on stdout.
//! Diagnostics go to stderr and are filtered with `RUST_LOG`.

use std::error::Error;
use std::path::PathBuf;

use orthoroute::config::RouterConfig;
use orthoroute::format::{request_schema, RouteRequestJson, RouteResponseJson};
use orthoroute::route::Router;
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <request.json> [--config <config.json>] [--debug]\n  {program} --schema\n\n<request.json> may be `-` to read the request from stdin.\n--config loads router settings; missing fields keep their defaults.\n--debug adds the visited search states to the response.\n--schema prints the JSON Schema of the request format."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    request: Option<String>,
    config: Option<PathBuf>,
    debug: bool,
    schema: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.config = Some(PathBuf::from(path));
            }
            "--debug" => {
                if options.debug {
                    return Err(());
                }
                options.debug = true;
            }
            "--schema" => {
                if options.schema {
                    return Err(());
                }
                options.schema = true;
            }
            "-" => {
                if options.request.is_some() {
                    return Err(());
                }
                options.request = Some(arg);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.request.is_some() {
                    return Err(());
                }
                options.request = Some(arg);
            }
        }
    }

    if options.schema {
        if options.request.is_some() || options.config.is_some() || options.debug {
            return Err(());
        }
    } else if options.request.is_none() {
        return Err(());
    }

    Ok(options)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_request(source: &str) -> std::io::Result<String> {
    if source == "-" {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(source)
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "orthoroute".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();

        if options.schema {
            println!("{}", serde_json::to_string_pretty(&request_schema())?);
            return Ok(());
        }

        let config = match &options.config {
            Some(path) => RouterConfig::load(path)?,
            None => RouterConfig::default(),
        };
        let source = options.request.as_deref().unwrap_or("-");
        let raw = read_request(source)?;
        let (shapes, request) = RouteRequestJson::from_json_str(&raw)?.into_model()?;

        let routed = Router::new(config).route(&shapes, &request);
        tracing::debug!(
            status = routed.status().as_str(),
            points = routed.points().len(),
            "routed connector"
        );
        let response = RouteResponseJson::from_routed(&routed, options.debug);
        println!("{}", serde_json::to_string_pretty(&response)?);
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("orthoroute: {err}");
        std::process::exit(1);
    }
}
