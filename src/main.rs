//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `txt_checker` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Ctrl-C handling
//! - User-facing output formatting and the results file
//!
//! All core functionality is implemented in the library crate.

use std::io::Write;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tokio::sync::mpsc;

use txt_checker::app::{append_results, json_line, render_progress_line, MatchLine};
use txt_checker::initialization::init_logger_with;
use txt_checker::mail::{mail_records, MailRecords};
use txt_checker::spf::{extract_spf_details, is_spf_record};
use txt_checker::{
    init_lookup, init_source, load_words, HickoryTxtClient, LogFormat, MatchResult, Opt,
    RunController, RunEvent, ScanMode,
};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let mode = match &opt.list {
        Some(path) => match load_words(path).await {
            Ok(words) => ScanMode::WordList { words },
            Err(e) => {
                eprintln!("txt_checker error: {:#}", e);
                process::exit(1);
            }
        },
        None => ScanMode::Auto {
            duration: opt.auto_duration(),
        },
    };

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let controller = match RunController::new(opt.run_config(mode)) {
        Ok(controller) => controller.with_events(events_tx),
        Err(e) => {
            eprintln!("txt_checker configuration error: {}", e);
            process::exit(1);
        }
    };

    let lookup = match init_lookup(controller.config()).await {
        Ok(lookup) => lookup,
        Err(e) => {
            eprintln!("txt_checker error: {:#}", e);
            process::exit(1);
        }
    };
    let json = matches!(opt.log_format, LogFormat::Json);

    let cancel = controller.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n{}", "Interrupted, waiting for in-flight queries...".yellow());
            cancel.cancel();
        }
    });

    let progress_printer = {
        let mut progress = controller.subscribe_progress();
        tokio::spawn(async move {
            while progress.changed().await.is_ok() {
                let line = render_progress_line(&progress.borrow_and_update());
                eprint!("\r{}", line.cyan());
                let _ = std::io::stderr().flush();
            }
        })
    };

    let printer = EventPrinter {
        show_spf: opt.show_spf,
        mail_lookup: opt.mail_records.then(|| lookup.clone()),
        timeout: controller.config().query_timeout,
        json,
    };
    let event_printer = tokio::spawn(printer.run(events_rx));

    let source = init_source(controller.config());
    let report = controller.run(source, lookup).await;

    let _ = progress_printer.await;
    let _ = event_printer.await;

    eprintln!();
    if json {
        println!("{}", json_line(&report.snapshot)?);
    } else {
        println!(
            "{} ({}): {} domain{} checked in {:.1}s, {} found",
            "Done".bold(),
            report.termination,
            report.snapshot.processed_count,
            if report.snapshot.processed_count == 1 { "" } else { "s" },
            report.elapsed_seconds,
            report.matches.len()
        );
    }

    if !report.matches.is_empty() {
        append_results(&opt.output, &report.matches)
            .await
            .context("Failed to save results")?;
        eprintln!("Results appended to {}", opt.output.display());
    }

    Ok(())
}

/// Prints each match as it is recorded, with the details the options ask for.
struct EventPrinter {
    show_spf: bool,
    /// Set when DMARC and DKIM records should be looked up for each match
    mail_lookup: Option<HickoryTxtClient>,
    timeout: Duration,
    /// One JSON object per match on stdout instead of colored text
    json: bool,
}

impl EventPrinter {
    /// Ends when the run drops its sender.
    async fn run(self, mut events: mpsc::UnboundedReceiver<RunEvent>) {
        while let Some(event) = events.recv().await {
            let RunEvent::Matched(result) = event else {
                continue;
            };
            let mail = match &self.mail_lookup {
                Some(lookup) => Some(mail_records(lookup, &result.domain, self.timeout).await),
                None => None,
            };
            if self.json {
                self.print_json(&result, mail);
            } else {
                self.print_text(&result, mail.as_ref());
            }
        }
    }

    fn print_json(&self, result: &MatchResult, mail: Option<MailRecords>) {
        let spf = (self.show_spf && is_spf_record(&result.matched_record))
            .then(|| extract_spf_details(&result.matched_record));
        match json_line(&MatchLine { result, spf, mail }) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("txt_checker error: {:#}", e),
        }
    }

    fn print_text(&self, result: &MatchResult, mail: Option<&MailRecords>) {
        eprint!("\r");
        println!(
            "{}",
            format!("[+] Found TXT record on {}", result.domain).green()
        );

        if self.show_spf && is_spf_record(&result.matched_record) {
            let details = extract_spf_details(&result.matched_record);
            if details.is_empty() {
                println!("    No ip4/ip6/include mechanisms");
            } else {
                if !details.ips.is_empty() {
                    println!("    IPs: {}", details.ips.join(", "));
                }
                let includes = details.include_base_domains(&result.domain);
                if !includes.is_empty() {
                    println!("    Includes: {}", includes.join(", "));
                }
            }
        }

        if let Some(mail) = mail {
            match &mail.dmarc {
                Some(record) => println!("    {} {}", "[DMARC]".yellow(), record),
                None => println!("    {} No DMARC record found", "[DMARC]".yellow()),
            }
            match &mail.dkim {
                Some(dkim) => println!(
                    "    {} (selector {}) {}",
                    "[DKIM]".magenta(),
                    dkim.selector,
                    dkim.record
                ),
                None => println!("    {} No DKIM record found", "[DKIM]".magenta()),
            }
        }
    }
}
