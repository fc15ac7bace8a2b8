use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub base_url: String,
    pub captcha_token: SecretString,
    pub timeout: u64,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            captcha_token: SecretString::default(),
            timeout: 10,
        }
    }

    pub fn set_token(&mut self, token: SecretString) {
        self.captcha_token = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let base_url = "https://shop.example.com".to_string();
        let mut args = GlobalArgs::new(base_url);
        assert_eq!(args.base_url, "https://shop.example.com");
        assert_eq!(args.captcha_token.expose_secret(), "");
        assert_eq!(args.timeout, 10);

        args.set_token(SecretString::from("captcha-token".to_string()));
        assert_eq!(args.captcha_token.expose_secret(), "captcha-token");
    }
}
