//! Interactive terminal driver for the login flow.
//!
//! Phone entry reads a number (unless one was given on the command line).
//! At the code prompt a line of digits is pasted into the code input and
//! submitted once complete; an empty line submits what was typed, `resend`
//! asks for a new code once the countdown expired, and `back` returns to
//! phone entry. Going back resets the CAPTCHA, so the driver asks for a new
//! token; an empty line reuses the one given on the command line. The flow is
//! ticked once per second while any prompt waits for input.

use crate::api::{HttpOtpApi, OtpApi};
use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::login::{
    CaptchaEvent, CaptchaWidget, DetachedCaptcha, FlowConfig, LoginFlow, MessageRegion, Screen,
    Tick,
};
use anyhow::{bail, Result};
use secrecy::ExposeSecret;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, instrument};

/// Handle the login action
#[instrument(skip(action, globals))]
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Login { phone } = action;

    let api = HttpOtpApi::new(&globals.base_url, Duration::from_secs(globals.timeout))?;

    debug!("login against {}", api.base_url());

    let mut flow = LoginFlow::new(api, DetachedCaptcha, FlowConfig::default());
    let input = BufReader::new(tokio::io::stdin());
    let mut output = std::io::stdout();

    let target = run(
        &mut flow,
        globals.captcha_token.expose_secret(),
        phone,
        input,
        &mut output,
    )
    .await?;

    debug!("redirect target: {target}");

    Ok(())
}

/// What a prompt is asking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Captcha,
    Phone,
    Code,
}

/// Drives `flow` from `input` until the code is verified and returns the
/// redirect target.
///
/// # Errors
/// Returns an error if `input` closes before the login completes or `output`
/// cannot be written.
pub async fn run<A, C, R, W>(
    flow: &mut LoginFlow<A, C>,
    captcha_token: &str,
    mut phone: Option<String>,
    input: R,
    output: &mut W,
) -> Result<String>
where
    A: OtpApi,
    C: CaptchaWidget,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    flow.handle_captcha(CaptchaEvent::Token(captcha_token.to_string()));

    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    loop {
        match flow.screen().clone() {
            Screen::PhoneEntry => {
                writeln!(output, "{}", flow.subtitle())?;

                if !flow.has_captcha_token() {
                    writeln!(
                        output,
                        "Paste a new CAPTCHA token, or press enter to reuse the configured one."
                    )?;
                    let Some(line) =
                        read_line(flow, Field::Captcha, &mut ticker, &mut lines, output).await?
                    else {
                        bail!("input closed before a CAPTCHA token was given");
                    };
                    let token = match line.trim() {
                        "" => captcha_token.to_string(),
                        fresh => fresh.to_string(),
                    };
                    flow.handle_captcha(CaptchaEvent::Token(token));
                }

                let raw = match phone.take() {
                    Some(phone) => phone,
                    None => {
                        match read_line(flow, Field::Phone, &mut ticker, &mut lines, output).await? {
                            Some(line) => line,
                            None => bail!("input closed before a code was sent"),
                        }
                    }
                };

                flow.input_phone(&raw);
                flow.submit_phone().await;
                report(output, flow.phone_error())?;
            }
            Screen::CodeEntry => code_entry(flow, &mut ticker, &mut lines, output).await?,
            Screen::Redirected(target) => {
                writeln!(output, "Signed in, continue at {target}")?;
                return Ok(target);
            }
        }
    }
}

async fn code_entry<A, C, R, W>(
    flow: &mut LoginFlow<A, C>,
    ticker: &mut Interval,
    lines: &mut Lines<R>,
    output: &mut W,
) -> Result<()>
where
    A: OtpApi,
    C: CaptchaWidget,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(output, "{}", flow.subtitle())?;
    writeln!(
        output,
        "Type the {}-digit code, `resend` or `back`.",
        flow.config().code_length
    )?;

    while flow.screen() == &Screen::CodeEntry {
        let Some(line) = read_line(flow, Field::Code, ticker, lines, output).await? else {
            bail!("input closed before the code was verified");
        };

        match line.trim() {
            "back" => flow.back(),
            "resend" => {
                if flow.resend_button().is_visible() {
                    flow.resend().await;
                    if !report(output, flow.otp_error())? {
                        writeln!(output, "A new code is on its way.")?;
                    }
                } else if let Some(clock) = flow.timer_display() {
                    writeln!(output, "You can request a new code in {clock}.")?;
                }
            }
            "" => {
                flow.submit_code().await;
                report(output, flow.otp_error())?;
            }
            text => {
                flow.code_input_mut().handle_paste(text);
                if flow.code_input().value().len() == flow.config().code_length {
                    flow.submit_code().await;
                    report(output, flow.otp_error())?;
                }
            }
        }
    }

    Ok(())
}

/// Prompts for `field` and waits for a line, ticking the flow every second
/// meanwhile. Returns `None` once `lines` is exhausted.
async fn read_line<A, C, R, W>(
    flow: &mut LoginFlow<A, C>,
    field: Field,
    ticker: &mut Interval,
    lines: &mut Lines<R>,
    output: &mut W,
) -> Result<Option<String>>
where
    A: OtpApi,
    C: CaptchaWidget,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    prompt(flow, field, output)?;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let waiting = rate_limited(flow);

                if flow.tick() == Tick::Expired {
                    writeln!(output)?;
                    writeln!(output, "Code expired. Type `resend` to get a new one.")?;
                    prompt(flow, field, output)?;
                }

                let still_waiting = rate_limited(flow);
                if (waiting.0 && !still_waiting.0) || (waiting.1 && !still_waiting.1) {
                    writeln!(output)?;
                    writeln!(output, "You can try again now.")?;
                    prompt(flow, field, output)?;
                }
            }
            line = lines.next_line() => return Ok(line?),
        }
    }
}

/// Whether the phone and code regions are counting down a rate limit.
fn rate_limited<A, C>(flow: &LoginFlow<A, C>) -> (bool, bool)
where
    A: OtpApi,
    C: CaptchaWidget,
{
    (
        flow.phone_error().rate_limit_remaining().is_some(),
        flow.otp_error().rate_limit_remaining().is_some(),
    )
}

fn prompt<A, C, W>(flow: &LoginFlow<A, C>, field: Field, output: &mut W) -> Result<()>
where
    A: OtpApi,
    C: CaptchaWidget,
    W: Write,
{
    match field {
        Field::Captcha => write!(output, "captcha> ")?,
        Field::Phone => write!(output, "phone> ")?,
        Field::Code => match flow.timer_display() {
            Some(clock) => write!(output, "[{clock}] code> ")?,
            None => write!(output, "code> ")?,
        },
    }
    output.flush()?;
    Ok(())
}

/// Prints a visible message region; returns whether anything was printed.
fn report<W: Write>(output: &mut W, region: &MessageRegion) -> Result<bool> {
    if region.is_visible() {
        writeln!(output, "! {}", region.text())?;
    }
    Ok(region.is_visible())
}
