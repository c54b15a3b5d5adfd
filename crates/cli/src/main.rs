use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use streamid::{RejectReason, StreamId};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "srt-streamid",
    about = "Decode SRT stream IDs (native or #!:: syntax)"
)]
struct Args {
    /// Print one JSON object per stream ID
    #[arg(long)]
    json: bool,

    /// Print the password instead of masking it
    #[arg(long)]
    show_secret: bool,

    /// Stream IDs to decode; read from stdin, one per line, when omitted
    stream_ids: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Decode every input. Returns `Ok(false)` if any stream ID was rejected.
fn run(args: &Args) -> io::Result<bool> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stderr = io::stderr();
    let mut err = stderr.lock();

    if args.stream_ids.is_empty() {
        return decode_lines(args, io::stdin().lock(), &mut out, &mut err);
    }

    let mut all_ok = true;
    for raw in &args.stream_ids {
        all_ok &= decode_one(args, raw, &mut out, &mut err)?;
    }
    Ok(all_ok)
}

/// Decode one stream ID per line of `input`.
///
/// Lines are split on `\n` with a trailing `\r` dropped. A line that is not
/// UTF-8 is reported like a rejected stream ID and the next line is still read.
fn decode_lines(
    args: &Args,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    let mut all_ok = true;

    for line in input.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        match String::from_utf8(line) {
            Ok(raw) => all_ok &= decode_one(args, &raw, out, err)?,
            Err(e) => {
                tracing::debug!("stream id line is not UTF-8");
                writeln!(
                    err,
                    "error: {:?}: not valid UTF-8 (reject code {})",
                    String::from_utf8_lossy(e.as_bytes()),
                    RejectReason::BadRequest.code()
                )?;
                all_ok = false;
            }
        }
    }

    Ok(all_ok)
}

fn decode_one(
    args: &Args,
    raw: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    match streamid::decode(raw) {
        Ok(sid) => {
            writeln!(out, "{}", render(&sid, args.json, args.show_secret))?;
            Ok(true)
        }
        Err(e) => {
            tracing::debug!(error = %e, "stream id rejected");
            writeln!(
                err,
                "error: {raw:?}: {e} (reject code {})",
                e.reject_reason().code()
            )?;
            Ok(false)
        }
    }
}

fn render(sid: &StreamId, json: bool, show_secret: bool) -> String {
    let pass = if show_secret || sid.pass().is_empty() {
        sid.pass()
    } else {
        "***"
    };

    if json {
        let mut value = serde_json::json!(sid);
        value["pass"] = serde_json::Value::from(pass);
        value.to_string()
    } else {
        format!(
            "mode={} path={} user={} pass={} query={}",
            sid.mode(),
            sid.path(),
            sid.user(),
            pass,
            sid.query()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_masks_pass() {
        let sid = streamid::decode("read:cam:bob:pw:a=1").unwrap();
        assert_eq!(
            render(&sid, false, false),
            "mode=read path=cam user=bob pass=*** query=a=1"
        );
        assert_eq!(
            render(&sid, false, true),
            "mode=read path=cam user=bob pass=pw query=a=1"
        );
    }

    #[test]
    fn json_output() {
        let sid = streamid::decode("#!::m=publish,r=cam?x=%26,s=pw").unwrap();
        let value: serde_json::Value = serde_json::from_str(&render(&sid, true, false)).unwrap();
        assert_eq!(value["mode"], "publish");
        assert_eq!(value["path"], "cam");
        assert_eq!(value["query"], "x=&");
        assert_eq!(value["pass"], "***");
        assert_eq!(value["syntax"], "standard");
    }

    #[test]
    fn decode_one_reports_failure() {
        let args = Args::parse_from(["srt-streamid"]);
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        assert!(!decode_one(&args, "#!::m=weird,r=x", &mut out, &mut err).unwrap());
        assert!(out.is_empty());
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "error: \"#!::m=weird,r=x\": unknown mode 'weird' (reject code 1400)\n"
        );

        let mut err: Vec<u8> = Vec::new();
        assert!(decode_one(&args, "read:cam", &mut out, &mut err).unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "mode=read path=cam user= pass= query=\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn lines_continue_past_non_utf8() {
        let args = Args::parse_from(["srt-streamid"]);
        let input: &[u8] = b"read:a\n\xff\xfe\nread:b\n";
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();

        assert!(!decode_lines(&args, input, &mut out, &mut err).unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "mode=read path=a user= pass= query=\n\
             mode=read path=b user= pass= query=\n"
        );
        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("not valid UTF-8 (reject code 1400)"), "{err}");
        assert_eq!(err.lines().count(), 1);
    }

    #[test]
    fn lines_strip_crlf_and_keep_going() {
        let args = Args::parse_from(["srt-streamid"]);
        let input: &[u8] = b"publish:cam\r\nbogus\r\n#!::m=read,r=x";
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();

        assert!(!decode_lines(&args, input, &mut out, &mut err).unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "mode=publish path=cam user= pass= query=\n\
             mode=read path=x user= pass= query=\n"
        );
        assert!(String::from_utf8(err).unwrap().starts_with("error: \"bogus\""));
    }

    #[test]
    fn all_good_lines_succeed() {
        let args = Args::parse_from(["srt-streamid"]);
        let input: &[u8] = b"read:a\nread:b\n";
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        assert!(decode_lines(&args, input, &mut out, &mut err).unwrap());
        assert!(err.is_empty());
    }
}
