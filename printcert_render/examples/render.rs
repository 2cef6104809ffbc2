// SPDX-License-Identifier: Apache-2.0
//! Prints a certificate as text or HTML.
//!
//! Usage: `render [--html] [--verbose] [--decode-names] [--heading <text>] [--pem] <path>`
use std::{env, fs, process};

use printcert_render::{render_html, render_text, PrintCertificate, DEFAULT_TABLE_CLASSES};

#[derive(Debug, Default)]
struct Options {
    html: bool,
    verbose: bool,
    decode_names: bool,
    pem: bool,
    heading: Option<String>,
    path: Option<String>,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--html" => options.html = true,
            "--verbose" => options.verbose = true,
            "--decode-names" => options.decode_names = true,
            "--pem" => options.pem = true,
            "--heading" => {
                options.heading = Some(args.next().ok_or("--heading needs a value")?);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag {}", flag)),
            _ if options.path.is_some() => return Err("only one path can be given".to_string()),
            _ => options.path = Some(arg),
        }
    }
    Ok(options)
}

fn load(options: &Options, path: &str) -> Result<PrintCertificate, String> {
    let bytes = fs::read(path).map_err(|e| format!("can't read {}: {}", path, e))?;
    let cert = if options.pem {
        PrintCertificate::from_pem(&String::from_utf8_lossy(&bytes))
    } else {
        PrintCertificate::from_der(bytes)
    };
    cert.map_err(|e| format!("can't load {}: {}", path, e))
}

fn main() {
    env_logger::init();
    let options = match parse_args() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };
    let path = match &options.path {
        Some(path) => path,
        None => {
            eprintln!("no certificate path given");
            process::exit(2);
        }
    };
    let cert = match load(&options, path) {
        Ok(cert) => cert,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    if options.html {
        println!(
            "<style>{}</style>{}",
            include_str!("../printcert.css"),
            render_html(
                &cert,
                options.heading.as_deref(),
                &DEFAULT_TABLE_CLASSES,
                options.verbose,
                options.decode_names,
            )
        );
    } else {
        println!("{}", render_text(&cert, options.verbose, options.decode_names));
    }
}
