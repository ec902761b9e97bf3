// ABOUTME: Example application that encodes an SMS as an SMS-SUBMIT PDU for a GSM modem
// ABOUTME: Prints the AT+CMGS command line and the hex payload to type at the modem prompt

use argh::FromArgs;
use sms_pdu::{CmgsSubmission, SubmitPdu};
use std::error::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Encode a text message as a PDU-mode SMS-SUBMIT
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// the service centre number (default: the one stored in the modem)
    #[argh(option)]
    smsc: Option<String>,

    /// the recipient telephone number
    #[argh(option, short = 't')]
    to: String,

    /// the message to send, at most 160 plain ASCII characters
    #[argh(option, short = 'm')]
    message: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli_args.debugging {
            Level::TRACE
        } else {
            Level::WARN
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut builder = SubmitPdu::builder()
        .to(cli_args.to)
        .text(cli_args.message);
    if let Some(smsc) = cli_args.smsc {
        builder = builder.smsc(smsc);
    }

    let sms = builder.build().map_err(|e| {
        eprintln!("Invalid message: {e}");
        e
    })?;
    let encoded = sms.to_encoded()?;

    if cli_args.debugging {
        println!(
            "Encoded {} bytes, TP-length {}",
            encoded.len(),
            encoded.tp_len
        );
    }

    let submission = CmgsSubmission::new(encoded);
    println!("{}", submission.command_line().trim_end());
    println!("{}", submission.pdu().to_hex());

    Ok(())
}
