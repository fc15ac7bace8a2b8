use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Result};
use secrecy::SecretString;

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let base_url = matches
        .get_one::<String>("base-url")
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow!("missing required argument: --base-url"))?;

    let token = matches
        .get_one::<String>("captcha-token")
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow!("missing required argument: --captcha-token"))?;

    let mut globals = GlobalArgs::new(base_url);
    globals.set_token(SecretString::from(token));
    globals.timeout = matches.get_one::<u64>("timeout").copied().unwrap_or(10);

    Ok((
        Action::Login {
            phone: matches.get_one::<String>("phone").map(|s| s.to_string()),
        },
        globals,
    ))
}
